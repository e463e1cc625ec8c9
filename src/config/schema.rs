use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_SCORE_DECIMALS: usize = 1;
const MAX_SCORE_DECIMALS: usize = 4;

/// Settings file.
///
/// Example YAML:
/// ```yaml
/// store: /srv/asa/workbook.json
/// currency: "$"
/// score_decimals: 1
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Workbook location (default: ~/.config/asa-scoreboard/workbook.json)
    #[serde(default)]
    pub store: Option<PathBuf>,

    /// Symbol printed before money amounts (default: "$")
    #[serde(default)]
    pub currency: Option<String>,

    /// Decimal places when printing scores (default: 1)
    #[serde(default)]
    pub score_decimals: Option<usize>,
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| super::get_config_dir().join("workbook.json"))
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn score_decimals(&self) -> usize {
        self.score_decimals.unwrap_or(DEFAULT_SCORE_DECIMALS)
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref store) = config.store {
        if store.as_os_str().is_empty() {
            errors.push("store: must not be empty".to_string());
        }
    }

    if let Some(ref currency) = config.currency {
        if currency.trim().is_empty() {
            errors.push("currency: must not be blank".to_string());
        }
    }

    if let Some(decimals) = config.score_decimals {
        if decimals > MAX_SCORE_DECIMALS {
            errors.push(format!(
                "score_decimals: {} is more than {}",
                decimals, MAX_SCORE_DECIMALS
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.currency(), "$");
        assert_eq!(config.score_decimals(), 1);
        assert!(config.store_path().ends_with("workbook.json"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
store: /tmp/asa/workbook.json
currency: "PHP "
score_decimals: 2
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.store_path(), PathBuf::from("/tmp/asa/workbook.json"));
        assert_eq!(config.currency(), "PHP ");
        assert_eq!(config.score_decimals(), 2);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("colour: red\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            store: Some(PathBuf::new()),
            currency: Some("  ".to_string()),
            score_decimals: Some(9),
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[2].contains("score_decimals"));
    }
}
