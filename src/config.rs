//! Builder configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Nouns that name equipment or other non-ingredients. Direct and
/// prepositional objects with these surface forms are never resolved.
pub const DEFAULT_NON_REFERENTS: &[&str] = &[
    "oven", "pan", "pans", "pot", "pots", "bowl", "bowls", "dish", "dishes", "saucepan",
    "skillet", "foil", "sheet", "sheets", "tray", "rack", "wok", "griddle", "grill", "blender",
    "processor", "mixer", "whisk", "spoon", "spatula", "knife", "board", "colander", "sieve",
    "strainer", "plate", "platter", "jar", "container", "lid", "paper", "parchment", "wrap",
    "towel", "heat", "temperature", "minute", "minutes", "hour", "hours", "second", "seconds",
    "side", "sides", "top", "bottom", "center", "middle", "edge", "edges", "way", "time",
];

/// Tunables for the graph builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Minimum similarity for the fallback match.
    pub similarity_threshold: f32,
    /// Lowercased surface forms that are never references.
    pub non_referents: BTreeSet<String>,
    /// Fine-grained tag of an imperative verb.
    pub imperative_tag: String,
    /// Use the similarity model when no lemma overlaps.
    pub fallback_to_similarity: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.70,
            non_referents: DEFAULT_NON_REFERENTS.iter().map(|s| s.to_string()).collect(),
            imperative_tag: "VB".to_string(),
            fallback_to_similarity: true,
        }
    }
}

impl BuilderConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BuilderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::Config(format!(
                "similarity_threshold must be within 0..=1, got {}",
                self.similarity_threshold
            )));
        }
        if self.imperative_tag.trim().is_empty() {
            return Err(Error::Config("imperative_tag must not be empty".into()));
        }
        Ok(())
    }

    pub fn is_non_referent(&self, surface: &str) -> bool {
        self.non_referents.contains(surface.to_lowercase().as_str())
    }

    pub fn with_non_referent(mut self, word: &str) -> Self {
        self.non_referents.insert(word.to_lowercase());
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}
