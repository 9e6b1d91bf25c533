use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{DistrictError, Result};

/// Run parameters for plan generation.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictingConfig {
    /// Number of regions (districts) to produce.
    pub num_districts: usize,

    /// Allowed fractional deviation from the target population, in (0, 1).
    pub tolerance: f64,

    /// Upper bound on boundary repair iterations; 0 disables repair.
    pub max_repair_iters: usize,

    /// Seed for the seed-selection random source; `None` draws from the OS.
    pub seed: Option<u64>,

    /// Reject repair moves that would disconnect the donor region.
    pub preserve_contiguity: bool,

    /// Candidate population property names, matched case-insensitively in order.
    pub population_columns: Vec<String>,
}

impl Default for DistrictingConfig {
    fn default() -> Self {
        Self {
            num_districts: 1,
            tolerance: 0.05,
            max_repair_iters: 5000,
            seed: None,
            preserve_contiguity: false,
            population_columns: ["pop", "P1_001N", "P0010001", "TOT_POP", "TOTAL", "POP"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DistrictingConfig {
    /// Config for `num_districts` regions at the given tolerance, other fields defaulted.
    pub fn new(num_districts: usize, tolerance: f64) -> Self {
        Self { num_districts, tolerance, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_repair_iters(mut self, max_repair_iters: usize) -> Self {
        self.max_repair_iters = max_repair_iters;
        self
    }

    pub fn with_preserve_contiguity(mut self, preserve_contiguity: bool) -> Self {
        self.preserve_contiguity = preserve_contiguity;
        self
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check that the region count and tolerance are usable.
    pub fn validate(&self) -> Result<()> {
        if self.num_districts == 0 {
            return Err(DistrictError::InvalidConfig("num_districts must be at least 1".into()));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(DistrictError::InvalidConfig(format!(
                "tolerance must lie in (0, 1), got {}", self.tolerance
            )));
        }
        if self.population_columns.is_empty() {
            return Err(DistrictError::InvalidConfig("population_columns must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DistrictingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_repair_iters, 5000);
        assert!(!config.preserve_contiguity);
        assert_eq!(config.population_columns[0], "pop");
    }

    #[test]
    fn rejects_zero_districts() {
        let err = DistrictingConfig::new(0, 0.05).validate().unwrap_err();
        assert!(matches!(err, DistrictError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_tolerance_outside_unit_interval() {
        for tolerance in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(DistrictingConfig::new(3, tolerance).validate().is_err(), "tolerance {tolerance}");
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: DistrictingConfig =
            serde_json::from_str(r#"{ "num_districts": 6, "seed": 42 }"#).unwrap();
        assert_eq!(config.num_districts, 6);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tolerance, 0.05);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "num_districts": 4, "tolerance": 0.01 }"#).unwrap();

        let config = DistrictingConfig::from_json_file(&path).unwrap();
        assert_eq!(config, DistrictingConfig::new(4, 0.01));
    }
}
