//! Direct and prepositional object extraction.

use hashbrown::HashSet;

use crate::annotation::{DepRel, Document};
use crate::config::BuilderConfig;

/// Candidate reference heads of one clause, in text order.
///
/// `has_direct` and `has_prepositional` reflect the parse before
/// non-referent nouns are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Objects {
    pub direct: Vec<usize>,
    pub prepositional: Vec<usize>,
    pub has_direct: bool,
    pub has_prepositional: bool,
}

impl Objects {
    /// No object of either kind in the parse.
    pub fn is_empty(&self) -> bool {
        !self.has_direct && !self.has_prepositional
    }
}

/// Collect the objects of a clause root, dropping non-referent nouns.
pub fn extract(doc: &Document, root: usize, config: &BuilderConfig) -> Objects {
    let mut seen = HashSet::new();
    seen.insert(root);

    let mut direct = Vec::new();
    for obj in doc.children_with(root, DepRel::Dobj) {
        if seen.insert(obj) {
            direct.push(obj);
            direct.extend(conjuncts(doc, obj, &mut seen));
        }
    }

    let mut prepositional = Vec::new();
    for prep in doc.children_with(root, DepRel::Prep) {
        prepositional_chain(doc, prep, &mut seen, &mut prepositional);
    }

    let keep = |&i: &usize| !config.is_non_referent(&doc.token(i).text);
    Objects {
        has_direct: !direct.is_empty(),
        has_prepositional: !prepositional.is_empty(),
        direct: direct.into_iter().filter(keep).collect(),
        prepositional: prepositional.into_iter().filter(keep).collect(),
    }
}

/// Every token coordinated with `token`, following conjunct chains, in
/// text order.
fn conjuncts(doc: &Document, token: usize, seen: &mut HashSet<usize>) -> Vec<usize> {
    let mut out = Vec::new();
    collect_conjuncts(doc, token, seen, &mut out);
    out.sort_unstable();
    out
}

fn collect_conjuncts(doc: &Document, token: usize, seen: &mut HashSet<usize>, out: &mut Vec<usize>) {
    for conj in doc.children_with(token, DepRel::Conj) {
        if seen.insert(conj) {
            out.push(conj);
            collect_conjuncts(doc, conj, seen, out);
        }
    }
}

/// Objects of `prep` and their conjuncts, then the objects of prepositions
/// hanging off those ("into the bowl with the butter").
fn prepositional_chain(doc: &Document, prep: usize, seen: &mut HashSet<usize>, out: &mut Vec<usize>) {
    if !seen.insert(prep) {
        return;
    }
    let mut group = Vec::new();
    for obj in doc.children_with(prep, DepRel::Pobj) {
        if seen.insert(obj) {
            group.push(obj);
            group.extend(conjuncts(doc, obj, seen));
        }
    }
    out.extend(group.iter().copied());
    for obj in group {
        let nested: Vec<usize> = doc.children_with(obj, DepRel::Prep).collect();
        for inner in nested {
            prepositional_chain(doc, inner, seen, out);
        }
    }
}
