//! Search Hyperparameters Configuration
//!
//! This module defines all tunable hyperparameters for one search instance.
//! Every `SearchTree` owns its own copy; nothing here is shared mutable
//! state between searches.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::MctsZeroError;

/// Bootstrap prior for a root created without an evaluation.
pub const ROOT_PRIOR: f64 = 1.0;

/// Below this the stochastic policy degenerates to the visit-count argmax.
pub const MIN_TEMPERATURE: f64 = 1e-6;

/// Search hyperparameters configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Exploration constant for the PUCT score. Higher values lean on the
    /// prior for longer before exploitation takes over.
    /// Default: 2.0
    pub c_puct: f64,

    /// Maximum number of successful playouts per search.
    /// Default: 10_000
    pub max_iterations: u32,

    /// Wall-clock budget in seconds, checked once per completed playout.
    /// Default: 8.0
    pub max_runtime_secs: f64,

    /// Temperature for the stochastic move-selection policy.
    /// 1.0 samples proportionally to visit counts; near zero is argmax.
    /// Default: 1.0
    pub temperature: f64,

    /// Consecutive evaluator failures tolerated before the search aborts.
    /// Default: 3
    pub evaluator_retry_budget: u32,

    /// Dirichlet concentration for self-play root noise.
    /// Default: 0.3
    pub dirichlet_alpha: f64,

    /// Fraction of noise blended into the move distribution during
    /// self-play, `(1 - f) * probs + f * noise`.
    /// Default: 0.25
    pub dirichlet_fraction: f64,

    /// Seed for the search-instance random generator. `None` draws fresh
    /// entropy from the OS.
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            c_puct: 2.0,
            max_iterations: 10_000,
            max_runtime_secs: 8.0,
            temperature: 1.0,
            evaluator_retry_budget: 3,
            dirichlet_alpha: 0.3,
            dirichlet_fraction: 0.25,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Wall-clock budget as a [`Duration`].
    pub fn max_runtime(&self) -> Duration {
        Duration::from_secs_f64(self.max_runtime_secs.max(0.0))
    }

    /// Validate ranges before a search runs with this configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.c_puct.is_finite() || self.c_puct <= 0.0 {
            return Err(format!("c_puct must be positive, got {}", self.c_puct));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }
        if !self.max_runtime_secs.is_finite() || self.max_runtime_secs < 0.0 {
            return Err(format!(
                "max_runtime_secs must be non-negative, got {}",
                self.max_runtime_secs
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(format!(
                "temperature must be non-negative, got {}",
                self.temperature
            ));
        }
        if !self.dirichlet_alpha.is_finite() || self.dirichlet_alpha <= 0.0 {
            return Err(format!(
                "dirichlet_alpha must be positive, got {}",
                self.dirichlet_alpha
            ));
        }
        if !(0.0..=1.0).contains(&self.dirichlet_fraction) {
            return Err(format!(
                "dirichlet_fraction must be in [0, 1], got {}",
                self.dirichlet_fraction
            ));
        }
        Ok(())
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "c_puct[{:.2}]_iters[{}]_runtime[{:.1}s]_temp[{:.2}]_noise[{:.2},{:.2}]",
            self.c_puct,
            self.max_iterations,
            self.max_runtime_secs,
            self.temperature,
            self.dirichlet_alpha,
            self.dirichlet_fraction,
        )
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MctsZeroError> {
        let raw = std::fs::read_to_string(path)?;
        let config: SearchConfig =
            serde_json::from_str(&raw).map_err(|e| MctsZeroError::Config(e.to_string()))?;
        config.validate().map_err(MctsZeroError::Config)?;
        Ok(config)
    }

    /// Save this configuration as pretty-printed JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MctsZeroError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| MctsZeroError::Config(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
