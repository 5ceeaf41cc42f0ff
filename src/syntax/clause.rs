//! Clause segmentation at coordinating conjunctions.

use crate::annotation::{DepRel, Document};
use crate::model::TokenRange;

/// A clause: a token span and its grammatical root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub span: TokenRange,
    pub root: usize,
}

/// Split a sentence into clauses, left to right.
///
/// While the current span's root has a conjunct child inside the span, the
/// span is cut in two: the head runs up to the conjunct (minus a coordinating
/// conjunction right before it) and the tail starts at the conjunct and is
/// split again with the conjunct as its root.
pub fn segment(doc: &Document, sentence: TokenRange) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let Some(mut root) = doc.span_root(sentence) else {
        return clauses;
    };
    let mut span = sentence;

    while let Some(conj) = first_conjunct(doc, root, span) {
        let head_end = if conj - 1 > root && doc.token(conj - 1).dep == DepRel::Cc {
            conj - 1
        } else {
            conj
        };
        clauses.push(Clause {
            span: TokenRange::new(span.start, head_end),
            root,
        });
        span = TokenRange::new(conj, span.end);
        root = conj;
    }
    clauses.push(Clause { span, root });

    clauses
}

/// First conjunct of `root` that lies to its right inside `span`.
fn first_conjunct(doc: &Document, root: usize, span: TokenRange) -> Option<usize> {
    doc.children_with(root, DepRel::Conj)
        .find(|&c| c > root && span.contains(c))
}
