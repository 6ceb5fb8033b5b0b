use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::math::quadrature::gausslaguerrequadrature::QuadratureTable;
use crate::math::quadrature::infiniteintervalaccumulator::InfiniteIntervalAccumulator;


#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),
    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("invalid configuration field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String }
}

impl ConfigurationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::InvalidField { field, reason: reason.into() }
    }
}

/// Parameters of one comparison run. Every field has a default, so a JSON
/// file only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfiguration {
    pub integrand: String,
    pub tolerance: f64,
    pub initial_subdivisions: usize,
    pub max_subdivisions: usize,
    pub block_width: f64,
    pub gauss_node_count: usize,
    pub max_blocks: usize,
    pub negligible_blocks: usize
}

impl Default for IntegrationConfiguration {
    fn default() -> Self {
        IntegrationConfiguration {
            integrand: "1".to_owned(),
            tolerance: 1e-6,
            initial_subdivisions: 4,
            max_subdivisions: InfiniteIntervalAccumulator::DEFAULT_MAX_SUBDIVISIONS,
            block_width: InfiniteIntervalAccumulator::DEFAULT_BLOCK_WIDTH,
            gauss_node_count: 5,
            max_blocks: InfiniteIntervalAccumulator::DEFAULT_MAX_BLOCKS,
            negligible_blocks: InfiniteIntervalAccumulator::DEFAULT_NEGLIGIBLE_BLOCKS
        }
    }
}

impl IntegrationConfiguration {
    pub fn new() -> IntegrationConfiguration {
        IntegrationConfiguration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<IntegrationConfiguration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: IntegrationConfiguration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<IntegrationConfiguration, ConfigurationError> {
        let configuration: IntegrationConfiguration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(ConfigurationError::invalid("tolerance", format!("must be positive, got {}", self.tolerance)));
        }
        if !(self.block_width > 0.0) || !self.block_width.is_finite() {
            return Err(ConfigurationError::invalid("block_width", format!("must be positive, got {}", self.block_width)));
        }
        if self.initial_subdivisions == 0 {
            return Err(ConfigurationError::invalid("initial_subdivisions", "must be at least 1"));
        }
        if self.max_subdivisions < self.initial_subdivisions {
            return Err(ConfigurationError::invalid(
                "max_subdivisions",
                format!("{} is below initial_subdivisions {}", self.max_subdivisions, self.initial_subdivisions)
            ));
        }
        if !QuadratureTable::supported_node_counts().contains(&self.gauss_node_count) {
            return Err(ConfigurationError::invalid("gauss_node_count", format!("{} is not one of 2, 3, 4, 5", self.gauss_node_count)));
        }
        if self.max_blocks == 0 {
            return Err(ConfigurationError::invalid("max_blocks", "must be at least 1"));
        }
        if self.negligible_blocks == 0 {
            return Err(ConfigurationError::invalid("negligible_blocks", "must be at least 1"));
        }
        Ok(())
    }

    pub fn accumulator(&self) -> InfiniteIntervalAccumulator {
        InfiniteIntervalAccumulator::new(self.tolerance)
            .with_block_width(self.block_width)
            .with_subdivisions(self.initial_subdivisions, self.max_subdivisions)
            .with_max_blocks(self.max_blocks)
            .with_negligible_blocks(self.negligible_blocks)
    }
}
