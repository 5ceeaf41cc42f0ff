//! Step payload: the clause a node came from and what it matched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::NodeId;

/// Half-open token range `[start, end)` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Inclusive end, as used in the exported representation.
    pub fn last(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.end - 1) }
    }
}

/// How a match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    DirectObject,
    PrepositionalObject,
    /// Continuity with the previous step; no tokens.
    Implicit,
}

/// One reference phrase resolved to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Token indices of the reference phrase in phrase order. Empty for
    /// implicit matches.
    pub tokens: SmallVec<[usize; 4]>,
    pub target: NodeId,
    pub kind: MatchKind,
}

impl Match {
    pub fn new(tokens: SmallVec<[usize; 4]>, target: NodeId, kind: MatchKind) -> Self {
        Self { tokens, target, kind }
    }

    pub fn implicit(target: NodeId) -> Self {
        Self {
            tokens: SmallVec::new(),
            target,
            kind: MatchKind::Implicit,
        }
    }

    /// Smallest range covering the reference phrase.
    pub fn token_range(&self) -> Option<TokenRange> {
        let start = *self.tokens.iter().min()?;
        let end = *self.tokens.iter().max()? + 1;
        Some(TokenRange::new(start, end))
    }
}

/// An instruction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub clause: TokenRange,
    /// Surface text of the clause.
    #[serde(default)]
    pub text: String,
    pub verb: usize,
    pub matches: Vec<Match>,
    /// Verb children that are not part of any match, as `[left, right]`
    /// subtree edges ("about 5 minutes", "until golden").
    pub method: Vec<TokenRange>,
}

impl Step {
    pub fn new(clause: TokenRange, verb: usize, matches: Vec<Match>) -> Self {
        Self {
            clause,
            text: String::new(),
            verb,
            matches,
            method: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_method(mut self, method: Vec<TokenRange>) -> Self {
        self.method = method;
        self
    }

    /// Distinct match targets in first-seen order.
    pub fn targets(&self) -> SmallVec<[NodeId; 4]> {
        let mut out: SmallVec<[NodeId; 4]> = SmallVec::new();
        for m in &self.matches {
            if !out.contains(&m.target) {
                out.push(m.target);
            }
        }
        out
    }
}
