//! # Graph Builder
//!
//! Walks an annotated instruction document clause by clause, in text order,
//! and turns every imperative clause with resolvable objects into a step
//! node.
//!
//! The builder owns the [`NodeStore`] and the current reference (the node an
//! implicit match points at). Both change only inside
//! [`GraphBuilder::process_clause`], so clauses must be fed strictly left to
//! right.

use std::collections::BTreeSet;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::annotation::{DepRel, Document, Pos, Similarity};
use crate::config::BuilderConfig;
use crate::model::{Match, NodeId, Step, TokenRange};
use crate::resolver::Resolver;
use crate::storage::NodeStore;
use crate::syntax::{self, Clause};
use crate::Result;

/// Build counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub clauses_seen: u64,
    pub imperative_clauses: u64,
    pub steps_created: u64,
    /// Imperative clauses that produced no match.
    pub clauses_discarded: u64,
}

// ============================================================================
// GraphBuilder
// ============================================================================

pub struct GraphBuilder<'a> {
    store: NodeStore,
    current: Option<NodeId>,
    config: &'a BuilderConfig,
    similarity: &'a dyn Similarity,
    stats: BuildStats,
}

impl<'a> GraphBuilder<'a> {
    /// Start from a store holding the ingredient nodes. The current
    /// reference is the last node inserted so far.
    pub fn new(store: NodeStore, config: &'a BuilderConfig, similarity: &'a dyn Similarity) -> Self {
        let current = store.last();
        Self {
            store,
            current,
            config,
            similarity,
            stats: BuildStats::default(),
        }
    }

    /// Process every sentence of `doc`, then every clause of each sentence.
    pub fn build(&mut self, doc: &Document) -> Result<()> {
        for &sentence in doc.sentences() {
            for clause in syntax::segment(doc, sentence) {
                self.process_clause(doc, &clause)?;
            }
        }
        tracing::debug!(
            steps = self.stats.steps_created,
            discarded = self.stats.clauses_discarded,
            nodes = self.store.len(),
            "graph built"
        );
        Ok(())
    }

    /// Turn one clause into a step node, if it is an instruction with at
    /// least one match.
    pub fn process_clause(&mut self, doc: &Document, clause: &Clause) -> Result<Option<NodeId>> {
        self.stats.clauses_seen += 1;
        let span = clause.span;

        if !syntax::is_imperative(doc, clause.root, &self.config.imperative_tag) {
            tracing::debug!(start = span.start, end = span.end, "not imperative");
            return Ok(None);
        }
        self.stats.imperative_clauses += 1;

        let objects = syntax::extract(doc, clause.root, self.config);
        let matches = Resolver::new(doc, &self.store, self.config, self.similarity)
            .combine(&objects, self.current);

        if matches.is_empty() {
            self.stats.clauses_discarded += 1;
            tracing::debug!(
                start = span.start,
                end = span.end,
                direct = objects.direct.len(),
                prepositional = objects.prepositional.len(),
                has_direct = objects.has_direct,
                "no matches, clause discarded"
            );
            return Ok(None);
        }

        let parents: BTreeSet<NodeId> = matches.iter().map(|m| m.target).collect();
        let method = method_phrases(doc, clause, &matches);
        let step = Step::new(span, clause.root, matches)
            .with_text(doc.span_text(span))
            .with_method(method);
        let id = self.store.insert_step(parents, step)?;

        self.current = Some(id);
        self.stats.steps_created += 1;
        tracing::debug!(start = span.start, end = span.end, step = %id, "step created");
        Ok(Some(id))
    }

    /// Node an implicit match would target.
    pub fn current_reference(&self) -> Option<NodeId> {
        self.current
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn finish(self) -> (NodeStore, BuildStats) {
        (self.store, self.stats)
    }
}

/// Subtrees of the verb's children that carry no match: manner, duration
/// and location phrases. Punctuation and coordination are skipped.
fn method_phrases(doc: &Document, clause: &Clause, matches: &[Match]) -> Vec<TokenRange> {
    let matched: HashSet<usize> = matches
        .iter()
        .flat_map(|m| m.tokens.iter().copied())
        .collect();

    doc.token(clause.root)
        .children
        .iter()
        .copied()
        .filter(|&c| clause.span.contains(c))
        .filter(|&c| {
            let token = doc.token(c);
            token.pos != Pos::Punct && !matches!(token.dep, DepRel::Cc | DepRel::Conj | DepRel::Punct)
        })
        .map(|c| doc.subtree_edges(c))
        .filter(|range| !matched.iter().any(|&t| range.contains(t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{DocumentBuilder, NoSimilarity};
    use crate::model::{Ingredient, IngredientId, MatchKind, Quantity};
    use DepRel::*;

    fn store(names: &[&str]) -> NodeStore {
        NodeStore::with_ingredients(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Ingredient::new(IngredientId(i as u32), Quantity::zero(), name)),
        )
        .unwrap()
    }

    // Cook onion and butter about 5 minutes.
    fn cook() -> Document {
        DocumentBuilder::new()
            .sentence(&[
                ("Cook", "cook", Pos::Verb, "VB", Root, 0),
                ("onion", "onion", Pos::Noun, "NN", Dobj, 0),
                ("and", "and", Pos::Cconj, "CC", Cc, 1),
                ("butter", "butter", Pos::Noun, "NN", Conj, 1),
                ("about", "about", Pos::Adv, "RB", Advmod, 5),
                ("5", "5", Pos::Num, "CD", Nummod, 6),
                ("minutes", "minute", Pos::Noun, "NNS", Npadvmod, 0),
                (".", ".", Pos::Punct, ".", Punct, 0),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_step_from_direct_objects() {
        let doc = cook();
        let config = BuilderConfig::default();
        let mut builder = GraphBuilder::new(store(&["flour", "onion", "butter"]), &config, &NoSimilarity);
        assert_eq!(builder.current_reference(), Some(NodeId(2)));

        builder.build(&doc).unwrap();
        let (store, stats) = builder.finish();

        let node = store.get(NodeId(3)).unwrap();
        assert_eq!(node.parent_ids, BTreeSet::from([NodeId(1), NodeId(2)]));
        let step = node.as_step().unwrap();
        assert_eq!(step.verb, 0);
        assert_eq!(step.text, "Cook onion and butter about 5 minutes.");
        assert!(step.matches.iter().all(|m| m.kind == MatchKind::DirectObject));
        assert_eq!(step.method, vec![TokenRange::new(4, 7)]);
        assert_eq!(
            stats,
            BuildStats {
                clauses_seen: 1,
                imperative_clauses: 1,
                steps_created: 1,
                clauses_discarded: 0,
            }
        );
    }

    #[test]
    fn test_unmatched_clause_keeps_current_reference() {
        let doc = cook();
        let config = BuilderConfig::default();
        let mut builder = GraphBuilder::new(store(&["sugar", "eggs"]), &config, &NoSimilarity);
        builder.build(&doc).unwrap();
        assert_eq!(builder.current_reference(), Some(NodeId(1)));
        assert_eq!(builder.store().len(), 2);
        assert_eq!(builder.stats().clauses_discarded, 1);
    }

    #[test]
    fn test_current_reference_moves_to_new_step() {
        let doc = cook();
        let config = BuilderConfig::default();
        let mut builder = GraphBuilder::new(store(&["onion", "butter"]), &config, &NoSimilarity);
        let clause = syntax::segment(&doc, doc.sentences()[0]).remove(0);
        let id = builder.process_clause(&doc, &clause).unwrap();
        assert_eq!(id, Some(NodeId(2)));
        assert_eq!(builder.current_reference(), id);
    }
}
