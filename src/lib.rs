//! # recipe-graph: Recipe Instruction Graph Builder
//!
//! Turns an ingredient list and annotated cooking instructions into a
//! directed acyclic graph: every instruction step points at the ingredients
//! or earlier steps it acts on.
//!
//! ## Design Principles
//!
//! 1. **Annotation in, graph out**: tokenizing, tagging and parsing happen
//!    upstream; the crate reads a validated [`annotation::Document`]
//! 2. **Clean DTOs**: `Node`, `Step`, `Match`, `Ingredient` cross all boundaries
//! 3. **Arena, not pointers**: nodes live in a [`storage::NodeStore`] and refer
//!    to parents by id
//! 4. **Strict order**: clauses are processed left to right; each one may
//!    read and move the current reference
//!
//! ## Quick Start
//!
//! ```rust
//! use recipe_graph::{BuilderConfig, Recipe};
//! use recipe_graph::annotation::{DepRel, DocumentBuilder, NoSimilarity, Pos};
//!
//! # fn example() -> recipe_graph::Result<()> {
//! let doc = DocumentBuilder::new()
//!     .sentence(&[
//!         ("Whisk", "whisk", Pos::Verb, "VB", DepRel::Root, 0),
//!         ("the", "the", Pos::Det, "DT", DepRel::Det, 2),
//!         ("eggs", "egg", Pos::Noun, "NNS", DepRel::Dobj, 0),
//!         (".", ".", Pos::Punct, ".", DepRel::Punct, 0),
//!     ])
//!     .build()?;
//!
//! let recipe = Recipe::parse(
//!     ["2 cups (226g) flour", "3 eggs"],
//!     &doc,
//!     &BuilderConfig::default(),
//!     &NoSimilarity,
//! )?;
//!
//! assert_eq!(recipe.steps().count(), 1);
//! println!("{}", recipe.export().to_json_pretty()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod quantity;
pub mod annotation;
pub mod syntax;
pub mod storage;
pub mod resolver;
pub mod builder;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Ingredient, IngredientId, Node, NodeId, NodeKind,
    Quantity, Dimensionality, Step, Match, MatchKind, TokenRange,
};

// ============================================================================
// Re-exports: Building
// ============================================================================

pub use builder::{BuildStats, GraphBuilder};
pub use config::BuilderConfig;
pub use export::RecipeExport;
pub use storage::NodeStore;

use annotation::{Document, Similarity};

// ============================================================================
// Top-level Recipe handle
// ============================================================================

/// A built recipe graph: ingredient nodes followed by step nodes.
#[derive(Debug, Clone)]
pub struct Recipe {
    store: NodeStore,
    stats: BuildStats,
}

impl Recipe {
    /// Parse raw ingredient phrases and build the graph for `doc`.
    ///
    /// Fails fast on the first malformed ingredient quantity.
    pub fn parse<I, S>(
        phrases: I,
        doc: &Document,
        config: &BuilderConfig,
        similarity: &dyn Similarity,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ingredients = phrases
            .into_iter()
            .enumerate()
            .map(|(i, phrase)| Ingredient::parse(IngredientId(i as u32), phrase.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::build(ingredients, doc, config, similarity)
    }

    /// Build the graph from already-constructed ingredients. Ids must run
    /// `0..n` in list order.
    pub fn build(
        ingredients: Vec<Ingredient>,
        doc: &Document,
        config: &BuilderConfig,
        similarity: &dyn Similarity,
    ) -> Result<Self> {
        config.validate()?;
        let store = NodeStore::with_ingredients(ingredients)?;
        let mut builder = GraphBuilder::new(store, config, similarity);
        builder.build(doc)?;
        let (store, stats) = builder.finish();
        Ok(Self { store, stats })
    }

    /// A graph of ingredient nodes only.
    pub fn from_ingredients(ingredients: Vec<Ingredient>) -> Result<Self> {
        Ok(Self {
            store: NodeStore::with_ingredients(ingredients)?,
            stats: BuildStats::default(),
        })
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.store.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.store.ingredients()
    }

    pub fn steps(&self) -> impl Iterator<Item = (&Node, &Step)> {
        self.store.steps()
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Each ingredient's fraction of the total volume of all
    /// volume-measured ingredients. Other ingredients get 0.
    pub fn volume_shares(&self) -> Vec<f64> {
        let volumes: Vec<f64> = self
            .ingredients()
            .iter()
            .map(|ingredient| {
                ingredient
                    .quantity
                    .convert_to("milliliter")
                    .map(|q| q.magnitude)
                    .unwrap_or(0.0)
            })
            .collect();
        let total: f64 = volumes.iter().sum();
        if total <= 0.0 {
            return vec![0.0; volumes.len()];
        }
        volumes.into_iter().map(|v| v / total).collect()
    }

    pub fn export(&self) -> RecipeExport {
        RecipeExport::from_store(&self.store)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed quantity '{input}': {reason}")]
    MalformedQuantity { input: String, reason: String },

    #[error("Incompatible units: cannot convert {from} to {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
