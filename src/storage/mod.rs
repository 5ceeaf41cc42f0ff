//! # Node Store
//!
//! Arena of every graph node, indexed by [`NodeId`]. Parent links are id
//! sets resolved through the arena, so the graph needs no shared ownership.
//!
//! Alongside the arena the store tracks the **surface set**: nodes that no
//! later step has consumed. Only surface nodes are eligible resolver targets.
//!
//! ## Invariants
//!
//! - Ingredient nodes occupy ids `0..n` and are inserted before any step.
//! - Node ids are dense and never reused; nodes are never removed.
//! - A step's `ingredient_ids` is the union of its parents' sets.

use std::collections::BTreeSet;

use crate::model::{Ingredient, IngredientId, Node, NodeId, Step};
use crate::{Error, Result};

// ============================================================================
// NodeStore
// ============================================================================

/// Owner of all nodes of one recipe graph.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    ingredients: Vec<Ingredient>,
    surface: BTreeSet<NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with one node per ingredient, in order.
    pub fn with_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Result<Self> {
        let mut store = Self::new();
        for ingredient in ingredients {
            store.insert_ingredient(ingredient)?;
        }
        Ok(store)
    }

    /// Id the next ingredient must carry.
    pub fn next_ingredient_id(&self) -> IngredientId {
        IngredientId(self.ingredients.len() as u32)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add an ingredient node. Its id must be the next free one, and no step
    /// may exist yet.
    pub fn insert_ingredient(&mut self, ingredient: Ingredient) -> Result<NodeId> {
        if self.step_count() > 0 {
            return Err(Error::ConstraintViolation(format!(
                "ingredient '{}' inserted after the first step",
                ingredient.name
            )));
        }
        let expected = self.next_ingredient_id();
        if ingredient.id != expected {
            return Err(Error::ConstraintViolation(format!(
                "ingredient id {} out of sequence, expected {expected}",
                ingredient.id
            )));
        }

        let node = Node::ingredient(ingredient.id);
        let id = node.id;
        self.nodes.push(node);
        self.ingredients.push(ingredient);
        self.surface.insert(id);
        Ok(id)
    }

    /// Add a step consuming `parents`.
    ///
    /// The parents leave the surface set and the new step joins it.
    pub fn insert_step(&mut self, parents: BTreeSet<NodeId>, step: Step) -> Result<NodeId> {
        let mut ingredient_ids = BTreeSet::new();
        for &parent in &parents {
            ingredient_ids.extend(self.get(parent)?.ingredient_ids.iter().copied());
        }

        let id = NodeId(self.nodes.len() as u32);
        for parent in &parents {
            self.surface.remove(parent);
        }
        self.nodes.push(Node::step(id, parents, ingredient_ids, step));
        self.surface.insert(id);
        Ok(id)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| Error::NotFound(format!("Node {id}")))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(id.0 as usize)
    }

    /// Ingredients carried by a node, in id order.
    pub fn ingredients_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Ingredient> + 'a {
        node.ingredient_ids
            .iter()
            .filter_map(move |&id| self.ingredient(id))
    }

    /// All nodes: ingredients in input order, then steps in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Step nodes with their payload, in creation order.
    pub fn steps(&self) -> impl Iterator<Item = (&Node, &Step)> {
        self.nodes[self.ingredients.len()..]
            .iter()
            .filter_map(|node| node.as_step().map(|step| (node, step)))
    }

    /// Surface node ids, ascending.
    pub fn surface(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.surface.iter().copied()
    }

    pub fn is_surface(&self, id: NodeId) -> bool {
        self.surface.contains(&id)
    }

    /// Most recently inserted node.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().map(|node| node.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn step_count(&self) -> usize {
        self.nodes.len() - self.ingredients.len()
    }
}
