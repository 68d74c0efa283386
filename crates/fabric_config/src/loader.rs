//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::FabricConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "fabric.toml";

/// Loads and validates `<project_dir>/fabric.toml`.
pub fn load_config(project_dir: &Path) -> Result<FabricConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<FabricConfig, ConfigError> {
    let config: FabricConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &FabricConfig) -> Result<(), ConfigError> {
    let domains = &config.domains;
    if domains.comb.is_empty() {
        return Err(ConfigError::ValidationError(
            "domains.comb must not be empty".to_string(),
        ));
    }
    if domains.default.is_empty() {
        return Err(ConfigError::ValidationError(
            "domains.default must not be empty".to_string(),
        ));
    }
    if domains.comb == domains.default {
        return Err(ConfigError::ValidationError(format!(
            "domains.default `{}` would resolve to the unclocked domain",
            domains.default
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriorityEncoding;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, FabricConfig::default());
        assert_eq!(config.domains.comb, "comb");
        assert_eq!(config.domains.default, "sync");
        assert_eq!(config.lowering.priority, PriorityEncoding::FirstMatch);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[domains]
comb = "async"
default = "pix"

[lowering]
priority = "exclusive"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.domains.comb, "async");
        assert_eq!(config.domains.default, "pix");
        assert_eq!(config.lowering.priority, PriorityEncoding::Exclusive);
    }

    #[test]
    fn unknown_priority_is_parse_error() {
        let toml = "[lowering]\npriority = \"parallel\"\n";
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn empty_comb_name_rejected() {
        let toml = "[domains]\ncomb = \"\"\n";
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn default_equal_to_comb_rejected() {
        let toml = "[domains]\ncomb = \"sync\"\n";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("unclocked"));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[lowering]\npriority = \"first-match\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.lowering.priority, PriorityEncoding::FirstMatch);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::IoError(_))
        ));
    }
}
