//! CLI configuration
//!
//! Same layering as the engine: defaults, an optional file, then `RPN_`
//! environment variables. Nested keys use `__` (`RPN_DISPLAY__DIGITS=15`,
//! `RPN_ENGINE__STACK_CAPACITY=16`).

use anyhow::{bail, Context, Result};
use figment::providers::Env;
use rpn_calc::config::{figment_for_defaults, ENV_PREFIX};
use rpn_calc::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Most decimals an `f64` can meaningfully show
pub const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub display: DisplayConfig,
}

/// Number formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals shown in fixed notation (`FIX n`)
    pub digits: usize,
    /// Magnitude at which values switch to scientific notation
    pub sci_threshold: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            sci_threshold: 1e10,
        }
    }
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = figment_for_defaults::<CliConfig>(path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        self.display.validate()
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.digits > MAX_DIGITS {
            bail!("display.digits must be at most {}, got {}", MAX_DIGITS, self.digits);
        }
        if !self.sci_threshold.is_finite() || self.sci_threshold <= 0.0 {
            bail!(
                "display.sci_threshold must be a positive number, got {}",
                self.sci_threshold
            );
        }
        Ok(())
    }
}
