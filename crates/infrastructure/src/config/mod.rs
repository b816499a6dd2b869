//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `connector`: Bot Framework registration and connector
//! - `turn`: Turn handling and reply audio

mod connector;
mod server;
mod turn;

use ai_speech::SpeechConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use connector::ConnectorAppConfig;
pub use server::ServerConfig;
pub use turn::TurnAppConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix of structured environment overrides (`SPEECHRELAY__SERVER__PORT`)
pub const ENV_PREFIX: &str = "SPEECHRELAY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Bot Framework connector configuration
    #[serde(default)]
    pub connector: ConnectorAppConfig,

    /// Azure speech configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Turn handling configuration
    #[serde(default)]
    pub turn: TurnAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml`, environment, and the bot's
    /// conventional environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config = Self::load_from(config::File::with_name("config").required(false))?;
        config.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a given file source plus the environment
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3978)?
            .add_source(file)
            // Override with environment variables (e.g., SPEECHRELAY__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Apply `PORT`, `MICROSOFT_APP_ID`, `MICROSOFT_APP_PASSWORD` and
    /// `MICROSOFT_SPEECH_KEY` (or `MICROSOFT_BING_SPEECH_KEY`)
    ///
    /// Set, non-empty variables take precedence over every other source.
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid PORT"),
            }
        }

        if let Some(app_id) = get("MICROSOFT_APP_ID") {
            self.connector.app_id = Some(app_id);
        }

        if let Some(password) = get("MICROSOFT_APP_PASSWORD") {
            self.connector.app_password = Some(SecretString::from(password));
        }

        if let Some(key) =
            get("MICROSOFT_SPEECH_KEY").or_else(|| get("MICROSOFT_BING_SPEECH_KEY"))
        {
            self.speech.subscription_key = Some(SecretString::from(key));
            debug!("Speech subscription key taken from environment");
        }
    }

    /// Log configuration gaps that do not prevent startup
    ///
    /// Returns the number of warnings emitted.
    pub fn warn_on_gaps(&self) -> usize {
        let mut warnings = 0;

        if !self.speech.has_subscription_key() {
            warn!(
                "Speech subscription key is not set; transcription and synthesis will fail \
                 until MICROSOFT_SPEECH_KEY or speech.subscription_key is provided"
            );
            warnings += 1;
        }

        if self.connector.is_emulator_mode() {
            warn!("No Microsoft App ID configured; connector calls are sent unauthenticated");
            warnings += 1;
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_toml(toml: &str) -> AppConfig {
        AppConfig::load_from(config::File::from_str(toml, config::FileFormat::Toml)).unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = from_toml("");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3978);
        assert_eq!(config.server.log_format, "text");
        assert!(config.connector.app_id.is_none());
        assert!(config.connector.is_emulator_mode());
        assert_eq!(config.speech.region, "westus");
        assert!(config.turn.speak_prompt);
        assert_eq!(config.turn.synthesized_file_name, "bing-synthesized.wav");
    }

    #[test]
    fn file_values_are_read() {
        let config = from_toml(
            r#"
            [server]
            port = 8080
            log_format = "json"

            [connector]
            app_id = "app-123"
            app_password = "secret"

            [speech]
            subscription_key = "key"
            region = "northeurope"

            [turn]
            speak_prompt = false
            work_dir = "/var/tmp/speechrelay"
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert!(config.server.json_logs());
        assert_eq!(config.connector.app_id.as_deref(), Some("app-123"));
        assert_eq!(config.connector.app_password_str(), Some("secret"));
        assert!(!config.connector.is_emulator_mode());
        assert_eq!(config.speech.subscription_key_str(), Some("key"));
        assert_eq!(config.speech.region, "northeurope");
        assert!(!config.turn.speak_prompt);
        assert_eq!(
            config.turn.to_turn_config().work_dir,
            std::path::PathBuf::from("/var/tmp/speechrelay")
        );
    }

    #[test]
    fn legacy_env_overrides() {
        let mut config = from_toml("[server]\nport = 8080");
        config.apply_legacy_env(env(&[
            ("PORT", "3999"),
            ("MICROSOFT_APP_ID", "app-id"),
            ("MICROSOFT_APP_PASSWORD", "app-password"),
            ("MICROSOFT_SPEECH_KEY", "speech-key"),
        ]));

        assert_eq!(config.server.port, 3999);
        assert_eq!(config.connector.app_id.as_deref(), Some("app-id"));
        assert_eq!(config.connector.app_password_str(), Some("app-password"));
        assert_eq!(config.speech.subscription_key_str(), Some("speech-key"));
    }

    #[test]
    fn bing_speech_key_is_fallback() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[("MICROSOFT_BING_SPEECH_KEY", "bing-key")]));
        assert_eq!(config.speech.subscription_key_str(), Some("bing-key"));

        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[
            ("MICROSOFT_SPEECH_KEY", "speech-key"),
            ("MICROSOFT_BING_SPEECH_KEY", "bing-key"),
        ]));
        assert_eq!(config.speech.subscription_key_str(), Some("speech-key"));
    }

    #[test]
    fn empty_or_invalid_legacy_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[("PORT", "not-a-port"), ("MICROSOFT_APP_ID", "  ")]));

        assert_eq!(config.server.port, 3978);
        assert!(config.connector.app_id.is_none());
    }

    #[test]
    fn gaps_are_counted() {
        assert_eq!(AppConfig::default().warn_on_gaps(), 2);

        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[
            ("MICROSOFT_APP_ID", "app-id"),
            ("MICROSOFT_APP_PASSWORD", "pw"),
            ("MICROSOFT_SPEECH_KEY", "key"),
        ]));
        assert_eq!(config.warn_on_gaps(), 0);
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[
            ("MICROSOFT_APP_PASSWORD", "app-password"),
            ("MICROSOFT_SPEECH_KEY", "speech-key"),
        ]));

        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("app-password"));
        assert!(!debug.contains("speech-key"));
    }

    #[test]
    fn secrets_are_not_serialized() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(env(&[
            ("MICROSOFT_APP_PASSWORD", "app-password"),
            ("MICROSOFT_SPEECH_KEY", "speech-key"),
        ]));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("app-password"));
        assert!(!json.contains("speech-key"));
    }

    #[test]
    fn connector_client_config_drops_empty_app_id() {
        let config = ConnectorAppConfig {
            app_id: Some(String::new()),
            ..Default::default()
        };
        assert!(config.to_client_config().app_id.is_none());
        assert!(config.is_emulator_mode());
    }

    #[test]
    fn turn_config_defaults_to_temp_dir() {
        let turn = TurnAppConfig::default().to_turn_config();
        assert_eq!(turn.work_dir, std::env::temp_dir());
        assert!(turn.speak_prompt);
    }
}
