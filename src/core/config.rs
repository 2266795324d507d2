//! Indexing parameters — tuning knobs shared with recipe implementations.
//!
//! The construction code behind each recipe reads these at registration time;
//! the registry itself only consults `verbose`. Every field deserializes with
//! a default, so an enclosing program can overlay a partial YAML config.

use serde::{Deserialize, Serialize};

/// Immutable tuning record handed to the registry at construction.
///
/// Recipe closures capture whatever they need from it when they are
/// registered; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingParameters {
    /// Maximum node length when constructing a graph from sequence input
    #[serde(default = "default_max_node_size")]
    pub max_node_size: usize,

    /// Degree above which nodes are dropped during pruning (0 disables)
    #[serde(default = "default_pruning_max_node_degree")]
    pub pruning_max_node_degree: usize,

    /// Walk length used to identify complex regions during pruning
    #[serde(default = "default_pruning_walk_length")]
    pub pruning_walk_length: usize,

    /// Maximum edge count a walk may cross before its region is pruned
    #[serde(default = "default_pruning_max_edge_count")]
    pub pruning_max_edge_count: usize,

    /// Connected components smaller than this are pruned away
    #[serde(default = "default_pruning_min_component_size")]
    pub pruning_min_component_size: usize,

    /// Initial k-mer length for text-index construction
    #[serde(default = "default_initial_kmer_length")]
    pub initial_kmer_length: usize,

    /// Number of doubling steps during text-index construction
    #[serde(default = "default_doubling_steps")]
    pub doubling_steps: usize,

    /// Print a progress line per executed recipe
    #[serde(default)]
    pub verbose: bool,
}

fn default_max_node_size() -> usize {
    32
}

fn default_pruning_max_node_degree() -> usize {
    128
}

fn default_pruning_walk_length() -> usize {
    24
}

fn default_pruning_max_edge_count() -> usize {
    3
}

fn default_pruning_min_component_size() -> usize {
    33
}

fn default_initial_kmer_length() -> usize {
    16
}

fn default_doubling_steps() -> usize {
    4
}

impl Default for IndexingParameters {
    fn default() -> Self {
        Self {
            max_node_size: default_max_node_size(),
            pruning_max_node_degree: default_pruning_max_node_degree(),
            pruning_walk_length: default_pruning_walk_length(),
            pruning_max_edge_count: default_pruning_max_edge_count(),
            pruning_min_component_size: default_pruning_min_component_size(),
            initial_kmer_length: default_initial_kmer_length(),
            doubling_steps: default_doubling_steps(),
            verbose: false,
        }
    }
}

impl IndexingParameters {
    /// Parse parameters from a YAML document; absent fields take defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }
}
