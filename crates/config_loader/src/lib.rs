//! # Config Loader
//!
//! Scenario loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON scenario files
//! - Validate scenario legality
//! - Generate `ScenarioBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("scenario.toml")).unwrap();
//! println!("Scenario: {}", blueprint.scenario.name);
//! ```

mod parser;
mod validator;

pub use contracts::ScenarioBlueprint;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::NullStreamError;
use std::path::Path;

/// Scenario loader
///
/// Provides static methods to load a scenario from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a scenario from a file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ScenarioBlueprint, NullStreamError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a scenario from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ScenarioBlueprint, NullStreamError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize a ScenarioBlueprint to a TOML string
    pub fn to_toml(blueprint: &ScenarioBlueprint) -> Result<String, NullStreamError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| NullStreamError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a ScenarioBlueprint to a JSON string
    pub fn to_json(blueprint: &ScenarioBlueprint) -> Result<String, NullStreamError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| NullStreamError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer the scenario format from the file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, NullStreamError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            NullStreamError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| NullStreamError::unsupported_format(ext))
    }

    /// Read the scenario file content
    fn read_file(path: &Path) -> Result<String, NullStreamError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate scenario content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ScenarioBlueprint, NullStreamError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }
}
