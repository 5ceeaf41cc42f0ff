//! # Syntactic Annotation Interface
//!
//! Read-only input computed before graph building: sentences, tokens with
//! lemma / POS / tag / dependency arcs, and a word similarity model.
//! Tokenizing and parsing happen upstream; this module only validates and
//! indexes the result.

pub mod document;
pub mod similarity;
pub mod token;

pub use document::{Document, DocumentBuilder};
pub use similarity::{NoSimilarity, Similarity, VectorTable};
pub use token::{DepRel, Pos, Token};
