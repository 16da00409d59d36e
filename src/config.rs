use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ml::classifier::ModelKind;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of the batch held out for candidate scoring
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    /// Reproducibility seed for the stratified shuffle and forest fitting
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Candidate models in preference order; ties on held-out accuracy
    /// resolve to the earlier entry
    #[serde(default = "default_candidates")]
    pub candidates: Vec<ModelKind>,

    /// Random-forest hyperparameters
    #[serde(default)]
    pub forest: ForestConfig,
}

/// Random-forest hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    #[serde(default = "default_n_trees")]
    pub n_trees: u16,

    #[serde(default = "default_max_depth")]
    pub max_depth: u16,
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_candidates() -> Vec<ModelKind> {
    vec![ModelKind::RandomForest, ModelKind::LogisticRegression]
}

fn default_n_trees() -> u16 {
    100
}

fn default_max_depth() -> u16 {
    10
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            candidates: default_candidates(),
            forest: ForestConfig::default(),
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            max_depth: default_max_depth(),
        }
    }
}

impl TrainingConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: TrainingConfig =
            toml::from_str(raw).map_err(|e| EngineError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(EngineError::Configuration(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.candidates.is_empty() {
            return Err(EngineError::Configuration(
                "at least one candidate model is required".to_string(),
            ));
        }
        if self.forest.n_trees == 0 {
            return Err(EngineError::Configuration(
                "forest.n_trees must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(
            config.candidates,
            vec![ModelKind::RandomForest, ModelKind::LogisticRegression]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let config = TrainingConfig::from_toml("seed = 7\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.forest.n_trees, 100);
    }

    #[test]
    fn test_invalid_test_fraction_rejected() {
        let err = TrainingConfig::from_toml("test_fraction = 1.5\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_empty_candidate_list_rejected() {
        let err = TrainingConfig::from_toml("candidates = []\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
