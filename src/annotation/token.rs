//! Annotated token and its tag sets.

use serde::{Deserialize, Serialize};

/// Coarse part of speech (Universal POS tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
    #[serde(other)]
    Other,
}

/// Dependency relation label (ClearNLP style, as produced by spaCy's English
/// models).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepRel {
    #[serde(rename = "ROOT", alias = "root")]
    Root,
    Nsubj,
    Nsubjpass,
    #[serde(alias = "obj")]
    Dobj,
    Dative,
    Prep,
    Pobj,
    Conj,
    Cc,
    Compound,
    Amod,
    Det,
    Poss,
    Nummod,
    Quantmod,
    Npadvmod,
    Advmod,
    Advcl,
    Acomp,
    Xcomp,
    Ccomp,
    Prt,
    Aux,
    Neg,
    Appos,
    Mark,
    Punct,
    #[serde(other)]
    Other,
}

impl DepRel {
    /// Subject relations that make a clause non-imperative.
    pub fn is_nominal_subject(self) -> bool {
        matches!(self, DepRel::Nsubj | DepRel::Nsubjpass)
    }

    /// Relations whose dependents form part of a reference phrase.
    pub fn is_phrase_modifier(self) -> bool {
        matches!(self, DepRel::Compound | DepRel::Amod)
    }
}

/// One token of the annotated instruction text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
    /// Fine-grained tag (Penn Treebank: `VB`, `NN`, ...).
    pub tag: String,
    pub dep: DepRel,
    /// Document index of the syntactic head; a sentence root is its own head.
    pub head: usize,
    /// Document indices of dependents, ascending. Rebuilt from `head` when a
    /// [`Document`](super::Document) is constructed.
    #[serde(default)]
    pub children: Vec<usize>,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: Pos,
        tag: impl Into<String>,
        dep: DepRel,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            tag: tag.into(),
            dep,
            head,
            children: Vec::new(),
        }
    }
}
