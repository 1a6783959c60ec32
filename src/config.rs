use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvolveError, Result};

pub const DEFAULT_GRID_SIZE: usize = 50;
pub const DEFAULT_GRID_STEP: f64 = 1.0;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
/// convolution is quadratic in the grid size
pub const MAX_GRID_SIZE: usize = 10_000;

/// Discretisation parameters shared by both obstacles.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// number of grid points T, the grid is `[0, step, ..., (T-1) * step]`
    pub grid_size: usize,
    pub grid_step: f64,
    /// width of the index interval at which the percentile search stops
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            grid_size: DEFAULT_GRID_SIZE,
            grid_step: DEFAULT_GRID_STEP,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ModelConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_grid_step(mut self, grid_step: f64) -> Self {
        self.grid_step = grid_step;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(ConvolveError::InvalidConfig(
                "grid_size must be at least 1".to_string(),
            ));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConvolveError::InvalidConfig(format!(
                "grid_size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(ConvolveError::InvalidConfig(format!(
                "grid_step must be positive, got {}",
                self.grid_step
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConvolveError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Sample points of the shared time grid.
    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.grid_size)
            .map(|i| i as f64 * self.grid_step)
            .collect()
    }
}

/// Raw, not yet validated sample values, as they may appear in a config file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SampleInput {
    pub probability: Option<f64>,
    pub obstacle1: Option<Vec<f64>>,
    pub obstacle2: Option<Vec<f64>>,
}

/// Contents of a run description file.
///
/// ```toml
/// [model]
/// grid_size = 50
/// tolerance = 1e-4
///
/// [samples]
/// probability = 0.9
/// obstacle1 = [1.0, 2.0, 3.0]
/// obstacle2 = [2.0, 2.0, 2.0]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub samples: SampleInput,
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let parsed: RunConfig =
            toml::from_str(s).map_err(|e| ConvolveError::InvalidConfig(e.to_string()))?;
        parsed.model.validate()?;
        Ok(parsed)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut buf))
            .map_err(|e| ConvolveError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(buf.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_unit_grid() {
        let config = ModelConfig::default();
        assert_eq!(config.grid_size, 50);
        assert_eq!(config.grid_step, 1.0);
        assert_eq!(config.tolerance, 1e-4);
        let grid = config.time_grid();
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[49], 49.0);
    }

    #[test]
    fn rejects_empty_grid_and_bad_tolerance() {
        assert!(matches!(
            ModelConfig::default().with_grid_size(0).validate(),
            Err(ConvolveError::InvalidConfig(_))
        ));
        assert!(ModelConfig::default().with_tolerance(0.0).validate().is_err());
        assert!(ModelConfig::default()
            .with_grid_step(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(ModelConfig::default()
            .with_grid_size(MAX_GRID_SIZE)
            .validate()
            .is_ok());
        assert!(matches!(
            ModelConfig::default()
                .with_grid_size(10_000_000_000)
                .validate(),
            Err(ConvolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = RunConfig::from_toml_str(
            r#"
            [model]
            grid_size = 10

            [samples]
            probability = 0.5
            obstacle1 = [1.0, 2.0, 3.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.model.grid_size, 10);
        assert_eq!(config.model.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.samples.probability, Some(0.5));
        assert_eq!(config.samples.obstacle1, Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(config.samples.obstacle2, None);
    }

    #[test]
    fn invalid_model_in_file_is_rejected() {
        let err = RunConfig::from_toml_str("[model]\ngrid_size = 0\n").unwrap_err();
        assert!(matches!(err, ConvolveError::InvalidConfig(_)));
    }
}
