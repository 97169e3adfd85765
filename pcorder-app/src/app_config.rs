use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: Vec<SessionStep>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "pcorder=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// A card to issue before the session starts
#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    pub number: String,
    pub holder_name: String,
    pub expires_at: DateTime<Utc>, // RFC 3339
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub presets: Vec<PresetConfig>,
    #[serde(default)]
    pub custom_builds: Vec<CustomBuildConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PresetConfig {
    pub name: String,
    pub manufacturer: String,
    pub parts: Vec<String>,
    pub price_cents: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CustomBuildConfig {
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PartConfig {
    pub name: String,
    pub price_cents: i64,
}

/// One order to replay: who buys which model with which card, and what
/// happens to the order afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionStep {
    pub first_name: String,
    pub last_name: String,
    pub card: String,
    pub model: String,
    #[serde(default)]
    pub action: StepAction,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Fulfil,
    Cancel,
    #[default]
    Hold,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `PCORDER_LOGGING__FILTER=debug`
            .add_source(config::Environment::with_prefix("PCORDER").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.logging.filter, "pcorder=info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.cards.is_empty());
        assert!(config.catalog.presets.is_empty());
        assert!(config.session.is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_toml_str(
            r#"
            [logging]
            filter = "pcorder=debug"
            format = "json"

            [[cards]]
            number = "11112222"
            holder_name = "Nick Davis"
            expires_at = "2030-01-31T00:00:00Z"

            [[catalog.presets]]
            name = "ProStation X1"
            manufacturer = "Dell"
            parts = ["Intel i7 CPU", "16GB RAM"]
            price_cents = 149999

            [[catalog.custom_builds]]
            name = "GamerOne"
            parts = [{ name = "32GB RAM", price_cents = 25000 }]

            [[session]]
            first_name = "Nick"
            last_name = "Davis"
            card = "11112222"
            model = "ProStation X1"
            action = "fulfil"

            [[session]]
            first_name = "Nick"
            last_name = "Davis"
            card = "11112222"
            model = "GamerOne"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.cards[0].number, "11112222");
        assert_eq!(config.cards[0].expires_at.to_rfc3339(), "2030-01-31T00:00:00+00:00");
        assert_eq!(config.catalog.presets[0].parts.len(), 2);
        assert_eq!(config.catalog.custom_builds[0].parts[0].price_cents, 25_000);
        assert_eq!(config.session[0].action, StepAction::Fulfil);
        assert_eq!(config.session[1].action, StepAction::Hold);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = Config::from_toml_str(
            r#"
            [[session]]
            first_name = "Nick"
            last_name = "Davis"
            card = "11112222"
            model = "ProStation X1"
            action = "refund"
            "#,
        );
        assert!(result.is_err());
    }
}
