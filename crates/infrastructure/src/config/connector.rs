//! Bot Framework connector configuration.

use integration_botframework::ConnectorConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Bot Framework registration and connector settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectorAppConfig {
    /// Microsoft App ID (unset when running against the local emulator)
    #[serde(default)]
    pub app_id: Option<String>,

    /// Microsoft App password (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub app_password: Option<SecretString>,

    /// OAuth2 token endpoint
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// OAuth2 scope for connector calls
    #[serde(default = "default_oauth_scope")]
    pub oauth_scope: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl std::fmt::Debug for ConnectorAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorAppConfig")
            .field("app_id", &self.app_id)
            .field(
                "app_password",
                &if self.app_password.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("token_endpoint", &self.token_endpoint)
            .field("oauth_scope", &self.oauth_scope)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_token_endpoint() -> String {
    "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token".to_string()
}

fn default_oauth_scope() -> String {
    "https://api.botframework.com/.default".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

impl Default for ConnectorAppConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_password: None,
            token_endpoint: default_token_endpoint(),
            oauth_scope: default_oauth_scope(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ConnectorAppConfig {
    /// Get the app password as a string reference
    #[must_use]
    pub fn app_password_str(&self) -> Option<&str> {
        self.app_password.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether the bot runs without a Bot Framework registration
    #[must_use]
    pub fn is_emulator_mode(&self) -> bool {
        self.app_id.as_deref().is_none_or(str::is_empty)
    }

    /// Convert to the connector client's configuration
    #[must_use]
    pub fn to_client_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            app_id: self.app_id.clone().filter(|id| !id.is_empty()),
            app_password: self.app_password.clone(),
            token_endpoint: self.token_endpoint.clone(),
            oauth_scope: self.oauth_scope.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}
