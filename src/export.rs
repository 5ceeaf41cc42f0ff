//! JSON export of a built recipe graph.
//!
//! Three sections, in the order presentation layers read them:
//!
//! ```text
//! ingredients  [{id, magnitude, unit, name, notes}]
//! steps        [{id, clause_start, clause_end, verb_token_index, matches, text, method}]
//! graph        [{id, ingredient_ids, parent_ids, (step fields for step nodes)}]
//! ```
//!
//! All token ranges are inclusive `[first, last]` pairs.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::model::{Match, MatchKind, Node, Step, TokenRange};
use crate::storage::NodeStore;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeExport {
    pub ingredients: Vec<IngredientRecord>,
    pub steps: Vec<StepRecord>,
    pub graph: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: u32,
    pub magnitude: f64,
    pub unit: Option<String>,
    pub name: String,
    pub notes: Option<String>,
}

/// Clause position and matches of a step node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFields {
    pub clause_start: usize,
    pub clause_end: usize,
    pub verb_token_index: usize,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id: u32,
    #[serde(flatten)]
    pub fields: StepFields,
    pub text: String,
    pub method: Vec<[usize; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// `None` for implicit matches.
    pub token_range: Option<[usize; 2]>,
    pub target_node_id: u32,
    pub match_kind: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    pub ingredient_ids: Vec<u32>,
    pub parent_ids: Vec<u32>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub step: Option<StepFields>,
}

impl RecipeExport {
    pub fn from_store(store: &NodeStore) -> Self {
        let ingredients = store
            .ingredients()
            .iter()
            .map(|ingredient| IngredientRecord {
                id: ingredient.id.0,
                magnitude: ingredient.quantity.magnitude,
                unit: ingredient.quantity.unit.clone(),
                name: ingredient.name.clone(),
                notes: ingredient.notes.clone(),
            })
            .collect();

        let steps = store
            .steps()
            .map(|(node, step)| StepRecord {
                id: node.id.0,
                fields: step_fields(step),
                text: step.text.clone(),
                method: step.method.iter().filter_map(inclusive).collect(),
            })
            .collect();

        let graph = store.nodes().iter().map(node_record).collect();

        Self {
            ingredients,
            steps,
            graph,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, writer: &mut dyn Write) -> Result<()> {
        serde_json::to_writer(&mut *writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn node_record(node: &Node) -> NodeRecord {
    NodeRecord {
        id: node.id.0,
        ingredient_ids: node.ingredient_ids.iter().map(|id| id.0).collect(),
        parent_ids: node.parent_ids.iter().map(|id| id.0).collect(),
        step: node.as_step().map(step_fields),
    }
}

fn step_fields(step: &Step) -> StepFields {
    StepFields {
        clause_start: step.clause.start,
        clause_end: step.clause.last().unwrap_or(step.clause.start),
        verb_token_index: step.verb,
        matches: step.matches.iter().map(match_record).collect(),
    }
}

fn match_record(m: &Match) -> MatchRecord {
    MatchRecord {
        token_range: m.token_range().as_ref().and_then(inclusive),
        target_node_id: m.target.0,
        match_kind: m.kind,
    }
}

fn inclusive(range: &TokenRange) -> Option<[usize; 2]> {
    Some([range.start, range.last()?])
}
