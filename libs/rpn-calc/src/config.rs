//! Engine configuration
//!
//! Loaded with figment. Priority (highest to lowest):
//! 1. Environment variables prefixed `RPN_` (e.g. `RPN_STACK_CAPACITY=16`)
//! 2. Config file, format chosen by extension (`.toml`, `.yaml`/`.yml`, `.json`)
//! 3. Default values

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::angle::AngleMode;
use crate::error::{CalcError, Result};
use crate::registers::MIN_REGISTERS;
use crate::stack::OverflowPolicy;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RPN_";

/// Smallest stack that can feed a binary operator
pub const MIN_STACK_CAPACITY: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operand stack slots
    pub stack_capacity: usize,
    /// Size of the register file (statistics use registers 2..=7)
    pub register_count: usize,
    /// Angular mode at power-on
    pub angle_mode: AngleMode,
    /// What a push onto a full stack does
    pub overflow: OverflowPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stack_capacity: 8,
            register_count: 10,
            angle_mode: AngleMode::Radians,
            overflow: OverflowPolicy::Reject,
        }
    }
}

impl EngineConfig {
    /// Load from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = figment_for(path)?
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| CalcError::config(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from defaults and a file only, ignoring the environment
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config: Self = figment_for(Some(path))?.extract().map_err(|e| {
            CalcError::config(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stack_capacity < MIN_STACK_CAPACITY {
            return Err(CalcError::config(format!(
                "stack_capacity must be at least {}, got {}",
                MIN_STACK_CAPACITY, self.stack_capacity
            )));
        }
        if self.register_count < MIN_REGISTERS {
            return Err(CalcError::config(format!(
                "register_count must be at least {}, got {}",
                MIN_REGISTERS, self.register_count
            )));
        }
        Ok(())
    }
}

/// Defaults merged with `path`, format picked by extension
///
/// Generic over the target so that hosts can nest [`EngineConfig`] in their
/// own configuration and reuse the same file handling.
pub fn figment_for_defaults<T: Serialize + Default>(path: Option<&Path>) -> Result<Figment> {
    let figment = Figment::from(Serialized::defaults(T::default()));
    let Some(path) = path else {
        return Ok(figment);
    };
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CalcError::config("Config file must have an extension"))?;

    match extension {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(CalcError::config(format!(
            "Unsupported config file format: {}",
            extension
        ))),
    }
}

fn figment_for(path: Option<&Path>) -> Result<Figment> {
    figment_for_defaults::<EngineConfig>(path)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.stack_capacity, 8);
        assert_eq!(config.register_count, 10);
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "calc.toml",
            "stack_capacity = 16\nangle_mode = \"degrees\"\n",
        );
        let config = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(config.stack_capacity, 16);
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        // untouched keys keep their defaults
        assert_eq!(config.register_count, 10);
    }

    #[test]
    fn test_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();
        let yaml = write_file(&dir, "calc.yaml", "overflow: discard_oldest\n");
        assert_eq!(
            EngineConfig::load_from_file(&yaml).unwrap().overflow,
            OverflowPolicy::DiscardOldest
        );

        let json = write_file(&dir, "calc.json", r#"{"register_count": 32}"#);
        assert_eq!(EngineConfig::load_from_file(&json).unwrap().register_count, 32);
    }

    #[test]
    fn test_validation_rejects_small_sizes() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "calc.toml", "stack_capacity = 1\n");
        assert!(matches!(
            EngineConfig::load_from_file(&path),
            Err(CalcError::Config(_))
        ));

        let config = EngineConfig {
            register_count: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "calc.ini", "stack_capacity = 4\n");
        assert!(matches!(
            EngineConfig::load_from_file(&path),
            Err(CalcError::Config(_))
        ));
    }
}
