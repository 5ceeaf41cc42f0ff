//! # Clause Syntax
//!
//! Clause segmentation and object extraction over an annotated
//! [`Document`](crate::annotation::Document). Stateless.

pub mod clause;
pub mod objects;

pub use clause::{segment, Clause};
pub use objects::{extract, Objects};

use crate::annotation::Document;

/// An imperative clause root carries the base-form verb tag and has no
/// nominal subject.
pub fn is_imperative(doc: &Document, root: usize, imperative_tag: &str) -> bool {
    let token = doc.token(root);
    token.tag == imperative_tag
        && !token
            .children
            .iter()
            .any(|&c| doc.token(c).dep.is_nominal_subject())
}
