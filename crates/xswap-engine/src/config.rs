use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::Edge;
use xswap_graph::IndexConfig;

/// Immutable per-run swap conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Seed for the run's generator.
    #[serde(default)]
    pub seed: u64,
    /// Whether swaps may create edges like `(0, 0)`.
    #[serde(default)]
    pub allow_self_loop: bool,
    /// Whether swaps may create `(1, 0)` while `(0, 1)` exists.
    #[serde(default)]
    pub allow_antiparallel: bool,
    /// Edges a swap must never create. Compared by equality, not through the index.
    #[serde(default)]
    pub excluded_edges: Vec<Edge>,
}

/// YAML-configurable parameters of a single permutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermuteConfig {
    /// Whether swaps may create self-loops.
    #[serde(default)]
    pub allow_self_loops: bool,
    /// Whether swaps may create antiparallel edges.
    #[serde(default)]
    pub allow_antiparallel: bool,
    /// Swap attempts per input edge; the product is rounded down.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Seed for the run's generator.
    #[serde(default)]
    pub seed: u64,
    /// Edges a swap must never create.
    #[serde(default)]
    pub excluded_edges: Vec<Edge>,
    /// Membership index settings.
    #[serde(default)]
    pub index: IndexConfig,
}

fn default_multiplier() -> f64 {
    10.0
}

impl Default for PermuteConfig {
    fn default() -> Self {
        Self {
            allow_self_loops: false,
            allow_antiparallel: false,
            multiplier: default_multiplier(),
            seed: 0,
            excluded_edges: Vec::new(),
            index: IndexConfig::default(),
        }
    }
}

impl PermuteConfig {
    /// Swap conditions derived from this configuration.
    pub fn conditions(&self) -> Conditions {
        Conditions {
            seed: self.seed,
            allow_self_loop: self.allow_self_loops,
            allow_antiparallel: self.allow_antiparallel,
            excluded_edges: self.excluded_edges.clone(),
        }
    }

    /// Number of swap attempts for an edge list of `num_edges` edges.
    pub fn num_swaps(&self, num_edges: usize) -> Result<u64, XswapError> {
        swap_budget(self.multiplier, num_edges)
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, XswapError> {
        load_yaml(path)
    }
}

/// YAML-configurable parameters of an XSwap prior computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorConfig {
    /// Number of permuted networks to sample.
    #[serde(default = "default_permutations")]
    pub n_permutations: u64,
    /// `(rows, cols)` of the prior matrix. Defaults to a square of side `max_id + 1`.
    #[serde(default)]
    pub shape: Option<(usize, usize)>,
    /// Whether swaps may create self-loops.
    #[serde(default)]
    pub allow_self_loops: bool,
    /// Whether swaps may create antiparallel edges.
    #[serde(default)]
    pub allow_antiparallel: bool,
    /// Swap attempts per input edge in every permutation.
    #[serde(default = "default_multiplier")]
    pub swap_multiplier: f64,
    /// Seed of the first permutation; permutation `i` uses `initial_seed + i`.
    #[serde(default)]
    pub initial_seed: u64,
    /// Membership index settings shared by every permutation.
    #[serde(default)]
    pub index: IndexConfig,
}

fn default_permutations() -> u64 {
    1000
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            n_permutations: default_permutations(),
            shape: None,
            allow_self_loops: false,
            allow_antiparallel: false,
            swap_multiplier: default_multiplier(),
            initial_seed: 0,
            index: IndexConfig::default(),
        }
    }
}

impl PriorConfig {
    /// Swap conditions of permutation `permutation`.
    pub fn conditions(&self, permutation: u64) -> Conditions {
        Conditions {
            seed: self.initial_seed.wrapping_add(permutation),
            allow_self_loop: self.allow_self_loops,
            allow_antiparallel: self.allow_antiparallel,
            excluded_edges: Vec::new(),
        }
    }

    /// Number of swap attempts per permutation.
    pub fn num_swaps(&self, num_edges: usize) -> Result<u64, XswapError> {
        swap_budget(self.swap_multiplier, num_edges)
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, XswapError> {
        load_yaml(path)
    }
}

fn swap_budget(multiplier: f64, num_edges: usize) -> Result<u64, XswapError> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(XswapError::Input(
            ErrorInfo::new("invalid-multiplier", "swap multiplier must be finite and non-negative")
                .with_context("multiplier", multiplier),
        ));
    }
    Ok((multiplier * num_edges as f64).floor() as u64)
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, XswapError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        XswapError::Serde(
            ErrorInfo::new("config-read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    serde_yaml::from_str(&contents).map_err(|err| {
        XswapError::Serde(
            ErrorInfo::new("config-parse", err.to_string()).with_context("path", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config: PermuteConfig = serde_yaml::from_str("seed: 7\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.multiplier, 10.0);
        assert!(!config.allow_self_loops);
        assert_eq!(config.index, IndexConfig::default());
    }

    #[test]
    fn excluded_edges_and_backend_parse() {
        let yaml = "excluded_edges:\n  - {source: 0, target: 3}\nindex:\n  backend: hashed\n";
        let config: PermuteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.excluded_edges, vec![Edge::new(0, 3)]);
        assert_eq!(config.index.backend, xswap_graph::BackendChoice::Hashed);
    }

    #[test]
    fn swap_count_rounds_down() {
        let config = PermuteConfig {
            multiplier: 2.5,
            ..PermuteConfig::default()
        };
        assert_eq!(config.num_swaps(3).unwrap(), 7);
        let negative = PermuteConfig {
            multiplier: -1.0,
            ..PermuteConfig::default()
        };
        assert_eq!(negative.num_swaps(3).unwrap_err().info().code, "invalid-multiplier");
    }

    #[test]
    fn prior_seeds_increment() {
        let config = PriorConfig {
            initial_seed: 40,
            ..PriorConfig::default()
        };
        assert_eq!(config.conditions(2).seed, 42);
    }
}
