//! # Recipe Graph Model
//!
//! Plain data shared by every stage: ingredients, quantities, nodes, steps.
//!
//! Design rule: no annotation types here. Steps refer to the instruction
//! text only through document token indices.

pub mod ingredient;
pub mod node;
pub mod quantity;
pub mod step;

pub use ingredient::{Ingredient, IngredientId};
pub use node::{Node, NodeId, NodeKind};
pub use quantity::{Dimensionality, Quantity};
pub use step::{Match, MatchKind, Step, TokenRange};
