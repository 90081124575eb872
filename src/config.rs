use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::vector::NumericKind;

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Smallest size exponent; arrays hold `2^exponent` elements
    pub min_exponent: u32,

    /// Largest size exponent (inclusive)
    pub max_exponent: u32,

    /// Increment between successive exponents
    pub exponent_step: u32,

    /// Element types to run, in order
    pub kinds: Vec<NumericKind>,

    /// Seed for operand generation; entropy-seeded when absent
    pub seed: Option<u64>,

    /// Label of the root timing node
    pub root_label: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            min_exponent: 25,
            max_exponent: 25,
            exponent_step: 5,
            kinds: NumericKind::ALL.to_vec(),
            seed: None,
            root_label: "Main".to_string(),
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Run a single size exponent
    pub fn exponent(self, exponent: u32) -> Self {
        self.exponents(exponent, exponent, 1)
    }

    /// Sweep size exponents from `min` to `max` (inclusive) by `step`
    pub fn exponents(mut self, min: u32, max: u32, step: u32) -> Self {
        self.min_exponent = min;
        self.max_exponent = max;
        self.exponent_step = step;
        self
    }

    /// Set the element types to run
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = NumericKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Seed operand generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the root timing node's label
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Check the sweep is non-empty and every length is addressable
    pub fn validate(&self) -> Result<()> {
        if self.exponent_step == 0 {
            return Err(Error::invalid_argument("exponent_step must be at least 1"));
        }
        if self.min_exponent > self.max_exponent {
            return Err(Error::invalid_argument(format!(
                "min_exponent {} exceeds max_exponent {}",
                self.min_exponent, self.max_exponent
            )));
        }
        if self.max_exponent >= usize::BITS {
            return Err(Error::invalid_argument(format!(
                "max_exponent {} does not fit in usize",
                self.max_exponent
            )));
        }
        if self.kinds.is_empty() {
            return Err(Error::invalid_argument("at least one numeric kind is required"));
        }
        Ok(())
    }

    /// The configured exponents, ascending
    pub fn exponent_sweep(&self) -> impl Iterator<Item = u32> {
        (self.min_exponent..=self.max_exponent).step_by(self.exponent_step.max(1) as usize)
    }
}
