//! Node in the recipe graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{IngredientId, Step};

/// Opaque node identifier.
///
/// Ingredient nodes take ids `0..n` in ingredient order; step ids follow in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IngredientId> for NodeId {
    fn from(id: IngredientId) -> Self {
        NodeId(id.0)
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// A raw ingredient, before any step touches it.
    Ingredient { ingredient: IngredientId },
    /// The product of an instruction clause.
    Step(Step),
}

/// A node in the recipe graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Every ingredient reachable from this node through its parents.
    pub ingredient_ids: BTreeSet<IngredientId>,
    pub parent_ids: BTreeSet<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn ingredient(id: IngredientId) -> Self {
        Self {
            id: id.into(),
            ingredient_ids: BTreeSet::from([id]),
            parent_ids: BTreeSet::new(),
            kind: NodeKind::Ingredient { ingredient: id },
        }
    }

    pub fn step(id: NodeId, parent_ids: BTreeSet<NodeId>, ingredient_ids: BTreeSet<IngredientId>, step: Step) -> Self {
        Self {
            id,
            ingredient_ids,
            parent_ids,
            kind: NodeKind::Step(step),
        }
    }

    pub fn is_step(&self) -> bool {
        matches!(self.kind, NodeKind::Step(_))
    }

    pub fn as_step(&self) -> Option<&Step> {
        match &self.kind {
            NodeKind::Step(step) => Some(step),
            NodeKind::Ingredient { .. } => None,
        }
    }
}
