//! # Reference Resolver
//!
//! Maps the object tokens of a clause to surface nodes of the store.
//!
//! A candidate head is expanded to its reference phrase (compound and
//! adjectival modifiers, then the head). Each surface node is scored by how
//! many distinct phrase lemmas occur in its ingredients' names; every node
//! reaching the best nonzero score is a target. With no lexical overlap the
//! head lemma is compared to each node's base terms through the
//! [`Similarity`] model, and the single most similar node is accepted when
//! it reaches the configured threshold.
//!
//! ## Combination
//!
//! | direct | direct matched | prepositional | prepositional matched | matches |
//! |--------|----------------|---------------|-----------------------|---------|
//! | yes | yes | any | any | direct + prepositional |
//! | yes | no  | any | any | none |
//! | no  | -   | yes | any | prepositional + implicit |
//! | no  | -   | no  | -   | none |

use smallvec::SmallVec;

use crate::annotation::{Document, Similarity};
use crate::config::BuilderConfig;
use crate::model::ingredient::normalize_lemma;
use crate::model::{Match, MatchKind, NodeId};
use crate::storage::NodeStore;
use crate::syntax::Objects;

/// Targets found for one candidate head.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Reference phrase tokens: modifiers, then the head.
    pub tokens: SmallVec<[usize; 4]>,
    /// Ascending node ids. Empty when the candidate is non-referential.
    pub targets: Vec<NodeId>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        !self.targets.is_empty()
    }

    fn into_matches(self, kind: MatchKind) -> impl Iterator<Item = Match> {
        let tokens = self.tokens;
        self.targets
            .into_iter()
            .map(move |target| Match::new(tokens.clone(), target, kind))
    }
}

/// Reference phrase of `head`: its compound and adjectival-modifier
/// children in text order, followed by the head itself.
pub fn reference_phrase(doc: &Document, head: usize) -> SmallVec<[usize; 4]> {
    let mut phrase: SmallVec<[usize; 4]> = doc
        .token(head)
        .children
        .iter()
        .copied()
        .filter(|&c| doc.token(c).dep.is_phrase_modifier())
        .collect();
    phrase.push(head);
    phrase
}

/// Read-only view over the store used to resolve one clause.
pub struct Resolver<'a> {
    doc: &'a Document,
    store: &'a NodeStore,
    config: &'a BuilderConfig,
    similarity: &'a dyn Similarity,
}

impl<'a> Resolver<'a> {
    pub fn new(
        doc: &'a Document,
        store: &'a NodeStore,
        config: &'a BuilderConfig,
        similarity: &'a dyn Similarity,
    ) -> Self {
        Self {
            doc,
            store,
            config,
            similarity,
        }
    }

    /// Resolve one candidate head token.
    pub fn resolve(&self, head: usize) -> Resolution {
        let tokens = reference_phrase(self.doc, head);
        let lemmas: Vec<String> = tokens
            .iter()
            .map(|&t| normalize_lemma(&self.doc.token(t).lemma))
            .filter(|l| !l.is_empty())
            .collect();

        let (best, mut targets) = self.lexical(&lemmas);
        tracing::trace!(
            head = %self.doc.token(head).text,
            ?lemmas,
            best,
            targets = targets.len(),
            "lexical score"
        );

        if targets.is_empty() && self.config.fallback_to_similarity {
            let head_lemma = normalize_lemma(&self.doc.token(head).lemma);
            if let Some((node, score)) = self.most_similar(&head_lemma) {
                tracing::trace!(head = %head_lemma, %node, score, "similarity fallback");
                if score >= self.config.similarity_threshold {
                    targets.push(node);
                }
            }
        }

        Resolution { tokens, targets }
    }

    /// Best nonzero overlap count and every surface node reaching it.
    pub fn lexical(&self, lemmas: &[String]) -> (usize, Vec<NodeId>) {
        let mut best = 0;
        let mut targets = Vec::new();
        for id in self.store.surface() {
            let Some(node) = self.store.node(id) else {
                continue;
            };
            let score = self
                .store
                .ingredients_of(node)
                .map(|ingredient| ingredient.matching_words(lemmas))
                .max()
                .unwrap_or(0);
            if score == 0 || score < best {
                continue;
            }
            if score > best {
                best = score;
                targets.clear();
            }
            targets.push(id);
        }
        (best, targets)
    }

    /// Surface node whose base terms are most similar to `lemma`. The first
    /// node in id order wins a tie.
    fn most_similar(&self, lemma: &str) -> Option<(NodeId, f32)> {
        let mut best: Option<(NodeId, f32)> = None;
        for id in self.store.surface() {
            let Some(node) = self.store.node(id) else {
                continue;
            };
            let score = self
                .store
                .ingredients_of(node)
                .filter_map(|ingredient| ingredient.base_term())
                .filter_map(|term| self.similarity.similarity(lemma, &term))
                .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.max(s))));
            if let Some(score) = score {
                if best.is_none_or(|(_, b)| score > b) {
                    best = Some((id, score));
                }
            }
        }
        best
    }

    /// Resolve every object of a clause and combine the results.
    ///
    /// `current` is the target of an implicit match; with `None` the
    /// implicit match is left out.
    pub fn combine(&self, objects: &Objects, current: Option<NodeId>) -> Vec<Match> {
        let resolve_all = |heads: &[usize]| -> Vec<Resolution> {
            heads.iter().map(|&h| self.resolve(h)).collect()
        };
        let direct = objects.has_direct.then(|| resolve_all(&objects.direct));
        let prepositional = objects
            .has_prepositional
            .then(|| resolve_all(&objects.prepositional));
        combine(direct, prepositional, current)
    }
}

/// Apply the combination table to resolved candidates.
///
/// `None` means the clause has no object of that kind. `Some` with no
/// resolved candidate (possibly empty, when every object was a
/// non-referent) means the objects are present but unmatched.
pub fn combine(
    direct: Option<Vec<Resolution>>,
    prepositional: Option<Vec<Resolution>>,
    current: Option<NodeId>,
) -> Vec<Match> {
    let had_prepositional = prepositional.is_some();
    let prepositional_matches = prepositional
        .into_iter()
        .flatten()
        .flat_map(|r| r.into_matches(MatchKind::PrepositionalObject));

    if let Some(direct) = direct {
        if !direct.iter().any(Resolution::is_resolved) {
            return Vec::new();
        }
        return direct
            .into_iter()
            .flat_map(|r| r.into_matches(MatchKind::DirectObject))
            .chain(prepositional_matches)
            .collect();
    }

    let mut matches: Vec<Match> = prepositional_matches.collect();
    if had_prepositional {
        matches.extend(current.map(Match::implicit));
    }
    matches
}
