use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::ChartSettings;
use super::validation::validate_settings;

/// Initial viewport and settings for a `ChartEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub settings: ChartSettings,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            settings: ChartSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(ChartError::json("failed to serialize engine config"))
    }

    /// Parses a persisted config; settings are validated as well.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(ChartError::json("failed to parse engine config"))?;
        validate_settings(&config.settings)?;
        Ok(config)
    }
}
