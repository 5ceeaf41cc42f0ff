//! End-to-end tests for the JSON export.
//!
//! Build a small recipe, export it, and check the serialized shape that
//! presentation layers consume.

use pretty_assertions::assert_eq;
use recipe_graph::annotation::{DepRel::*, Document, DocumentBuilder, NoSimilarity, Pos};
use recipe_graph::export::{IngredientRecord, MatchRecord, NodeRecord, RecipeExport, StepFields};
use recipe_graph::{BuilderConfig, Ingredient, IngredientId, MatchKind, Recipe};
use serde_json::json;

/// Stir the chocolate into the heavy cream. Pour over the mini marshmallows.
fn fudge_doc() -> Document {
    DocumentBuilder::new()
        .sentence(&[
            ("Stir", "stir", Pos::Verb, "VB", Root, 0),
            ("the", "the", Pos::Det, "DT", Det, 2),
            ("chocolate", "chocolate", Pos::Noun, "NN", Dobj, 0),
            ("into", "into", Pos::Adp, "IN", Prep, 0),
            ("the", "the", Pos::Det, "DT", Det, 6),
            ("heavy", "heavy", Pos::Adj, "JJ", Amod, 6),
            ("cream", "cream", Pos::Noun, "NN", Pobj, 3),
            (".", ".", Pos::Punct, ".", Punct, 0),
        ])
        .sentence(&[
            ("Pour", "pour", Pos::Verb, "VB", Root, 0),
            ("over", "over", Pos::Adp, "IN", Prep, 0),
            ("the", "the", Pos::Det, "DT", Det, 4),
            ("mini", "mini", Pos::Adj, "JJ", Amod, 4),
            ("marshmallows", "marshmallow", Pos::Noun, "NNS", Pobj, 1),
            (".", ".", Pos::Punct, ".", Punct, 0),
        ])
        .build()
        .unwrap()
}

fn fudge() -> Recipe {
    Recipe::parse(
        ["4 oz chocolate", "1/2 cup heavy cream", "2 cups mini marshmallows"],
        &fudge_doc(),
        &BuilderConfig::default(),
        &NoSimilarity,
    )
    .unwrap()
}

// ============================================================================
// 1. Graph section
// ============================================================================

#[test]
fn test_graph_records() {
    let export = fudge().export();

    assert_eq!(
        export.graph[4],
        NodeRecord {
            id: 4,
            ingredient_ids: vec![0, 1, 2],
            parent_ids: vec![2, 3],
            step: Some(StepFields {
                clause_start: 8,
                clause_end: 13,
                verb_token_index: 8,
                matches: vec![
                    MatchRecord {
                        token_range: Some([11, 12]),
                        target_node_id: 2,
                        match_kind: MatchKind::PrepositionalObject,
                    },
                    MatchRecord {
                        token_range: None,
                        target_node_id: 3,
                        match_kind: MatchKind::Implicit,
                    },
                ],
            }),
        }
    );
    assert_eq!(
        export.graph[0],
        NodeRecord {
            id: 0,
            ingredient_ids: vec![0],
            parent_ids: vec![],
            step: None,
        }
    );
}

// ============================================================================
// 2. Ingredient and step sections
// ============================================================================

#[test]
fn test_ingredient_and_step_sections() {
    let export = fudge().export();

    assert_eq!(
        export.ingredients[1],
        IngredientRecord {
            id: 1,
            magnitude: 0.5,
            unit: Some("cup".into()),
            name: "heavy cream".into(),
            notes: None,
        }
    );

    let texts: Vec<&str> = export.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Stir the chocolate into the heavy cream.",
            "Pour over the mini marshmallows."
        ]
    );
    assert_eq!(export.steps[0].id, 3);
    assert_eq!(export.steps[0].fields.clause_end, 7);
}

// ============================================================================
// 3. JSON text
// ============================================================================

#[test]
fn test_json_round_trip() {
    let export = fudge().export();
    let json = export.to_json_pretty().unwrap();
    let back: RecipeExport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, export);
}

#[test]
fn test_json_field_names() {
    let json = fudge().export().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(
        value["graph"][3],
        json!({
            "id": 3,
            "ingredient_ids": [0, 1],
            "parent_ids": [0, 1],
            "clause_start": 0,
            "clause_end": 7,
            "verb_token_index": 0,
            "matches": [
                {"token_range": [2, 2], "target_node_id": 0, "match_kind": "direct_object"},
                {"token_range": [5, 6], "target_node_id": 1, "match_kind": "prepositional_object"}
            ]
        })
    );
    assert_eq!(value["steps"][1]["method"], json!([]));
}

#[test]
fn test_notes_are_exported() {
    let recipe = Recipe::from_ingredients(vec![
        Ingredient::from_components(IngredientId(0), Some("2"), None, "eggs", Some("room temperature"))
            .unwrap(),
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&recipe.export().to_json().unwrap()).unwrap();
    assert_eq!(value["ingredients"][0]["notes"], "room temperature");
    assert_eq!(value["ingredients"][0]["unit"], serde_json::Value::Null);
    assert_eq!(value["steps"], json!([]));
}
