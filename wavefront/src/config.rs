use serde::{Deserialize, Serialize};

use crate::error::{Result, WaveError};
use crate::neighborhood::Neighborhood;

/// Settings for one [`crate::WaveSearch`] instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Adjacency used by both expansion and reconstruction.
    /// Default: moore
    pub neighborhood: Neighborhood,

    /// Give up the expansion after this many cells were popped from the frontier.
    /// Default: unlimited
    pub max_expansions: Option<usize>,

    /// Maximum number of steps taken while walking back from the goal.
    /// Default: the number of cells in the grid
    pub max_path_steps: Option<usize>,

    /// Log progress every this many expansions.
    /// Default: 1000
    pub progress_interval: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::default(),
            max_expansions: None,
            max_path_steps: None,
            progress_interval: 1000,
        }
    }
}

impl WaveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: WaveConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(WaveError::Config(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        if self.max_expansions == Some(0) {
            return Err(WaveError::Config(
                "max_expansions must be at least 1".to_string(),
            ));
        }
        if self.max_path_steps == Some(0) {
            return Err(WaveError::Config(
                "max_path_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_max_path_steps(mut self, max: usize) -> Self {
        self.max_path_steps = Some(max);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}
