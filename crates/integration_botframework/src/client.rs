//! Bot Framework connector client
//!
//! Acquires OAuth2 client-credential tokens and posts activities back to the
//! channel's connector service.

use std::sync::Arc;
use std::time::{Duration, Instant};

use domain::{ConversationAddress, Reply};
use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::activity::Activity;
use crate::error::ConnectorError;

/// Tokens are refreshed this long before they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

/// Connector client configuration
#[derive(Clone)]
pub struct ConnectorConfig {
    /// Microsoft App ID (absent when talking to the local emulator)
    pub app_id: Option<String>,
    /// Microsoft App password
    pub app_password: Option<SecretString>,
    /// OAuth2 token endpoint
    pub token_endpoint: String,
    /// OAuth2 scope requested for connector calls
    pub oauth_scope: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_password: None,
            token_endpoint:
                "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token".to_string(),
            oauth_scope: "https://api.botframework.com/.default".to_string(),
            timeout_ms: 30000,
        }
    }
}

impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("app_id", &self.app_id)
            .field("app_password", &self.app_password.as_ref().map(|_| "[REDACTED]"))
            .field("token_endpoint", &self.token_endpoint)
            .field("oauth_scope", &self.oauth_scope)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Response to a posted activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceResponse {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.refresh_at
    }
}

/// Client for the Bot Framework connector REST API
///
/// Cloning is cheap; clones share the HTTP client and the token cache.
#[derive(Debug, Clone)]
pub struct ConnectorClient {
    pub(crate) client: Client,
    config: Arc<ConnectorConfig>,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl ConnectorClient {
    /// Create a new connector client
    pub fn new(config: ConnectorConfig) -> Result<Self, ConnectorError> {
        if config.app_id.as_deref().is_some_and(|id| !id.is_empty())
            && config.app_password.is_none()
        {
            return Err(ConnectorError::Configuration(
                "app_password is required when app_id is set".to_string(),
            ));
        }
        if config.timeout_ms == 0 {
            return Err(ConnectorError::Configuration(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("speechrelay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Whether an app id is configured
    ///
    /// Without one every connector call is sent unauthenticated, which is
    /// what the local emulator expects.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.config.app_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Get a valid access token, requesting a new one when the cached token
    /// is missing or about to expire
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> Result<String, ConnectorError> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken, ConnectorError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConnectorError::Configuration("app_id is required".to_string()))?;
        let app_password = self
            .config
            .app_password
            .as_ref()
            .ok_or_else(|| ConnectorError::Configuration("app_password is required".to_string()))?;

        debug!(endpoint = %self.config.token_endpoint, "Requesting connector access token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", app_id),
            ("client_secret", app_password.expose_secret()),
            ("scope", self.config.oauth_scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_endpoint)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token request rejected");
            return Err(ConnectorError::Token(format!("HTTP {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::Token(format!("invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in);
        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
        })
    }

    /// Attach a bearer token when credentials are configured
    pub(crate) async fn authorize(
        &self,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, ConnectorError> {
        if self.has_credentials() {
            Ok(request.bearer_auth(self.access_token().await?))
        } else {
            Ok(request)
        }
    }

    /// Reply to the activity the address points at
    ///
    /// Falls back to a plain conversation send when the address carries no
    /// activity id.
    #[instrument(skip(self, address, reply), fields(conversation = %address.conversation_id))]
    pub async fn reply_to_activity(
        &self,
        address: &ConversationAddress,
        reply: &Reply,
    ) -> Result<ResourceResponse, ConnectorError> {
        let Some(activity_id) = address.activity_id.as_deref() else {
            return self.send_to_conversation(address, reply).await;
        };

        let url = activities_url(
            &address.service_url,
            &address.conversation_id,
            Some(activity_id),
        )?;
        self.post_activity(url, &Activity::from_reply(address, reply))
            .await
    }

    /// Send a new activity into the conversation
    #[instrument(skip(self, address, reply), fields(conversation = %address.conversation_id))]
    pub async fn send_to_conversation(
        &self,
        address: &ConversationAddress,
        reply: &Reply,
    ) -> Result<ResourceResponse, ConnectorError> {
        let url = activities_url(&address.service_url, &address.conversation_id, None)?;
        let mut activity = Activity::from_reply(address, reply);
        activity.reply_to_id = None;
        self.post_activity(url, &activity).await
    }

    async fn post_activity(
        &self,
        url: Url,
        activity: &Activity,
    ) -> Result<ResourceResponse, ConnectorError> {
        debug!(
            url = %url,
            has_text = activity.text.is_some(),
            attachments = activity.attachments.len(),
            "Posting activity"
        );

        let request = self.authorize(self.client.post(url).json(activity)).await?;
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConnectorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Channels differ in whether they return a body
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }
}

/// Build `{service_url}/v3/conversations/{id}/activities[/{activity_id}]`
fn activities_url(
    service_url: &str,
    conversation_id: &str,
    activity_id: Option<&str>,
) -> Result<Url, ConnectorError> {
    let mut url =
        Url::parse(service_url).map_err(|e| ConnectorError::InvalidUrl(format!("{service_url}: {e}")))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ConnectorError::InvalidUrl(service_url.to_string()))?;
        segments
            .pop_if_empty()
            .extend(["v3", "conversations", conversation_id, "activities"]);
        if let Some(id) = activity_id {
            segments.push(id);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_config() -> ConnectorConfig {
        ConnectorConfig {
            app_id: Some("app-id".to_string()),
            app_password: Some(SecretString::from("app-secret")),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_targets_botframework() {
        let config = ConnectorConfig::default();
        assert!(config.token_endpoint.contains("botframework.com/oauth2/v2.0/token"));
        assert_eq!(config.oauth_scope, "https://api.botframework.com/.default");
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn app_id_without_password_is_rejected() {
        let config = ConnectorConfig {
            app_id: Some("app-id".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ConnectorClient::new(config),
            Err(ConnectorError::Configuration(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ConnectorConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(ConnectorClient::new(config).is_err());
    }

    #[test]
    fn emulator_client_has_no_credentials() {
        let client = ConnectorClient::new(ConnectorConfig::default()).unwrap();
        assert!(!client.has_credentials());

        let client = ConnectorClient::new(credentials_config()).unwrap();
        assert!(client.has_credentials());
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", credentials_config());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("app-secret"));
    }

    #[test]
    fn activities_url_with_trailing_slash() {
        let url = activities_url("https://smba.trafficmanager.net/amer/", "conv-1", Some("act-1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://smba.trafficmanager.net/amer/v3/conversations/conv-1/activities/act-1"
        );
    }

    #[test]
    fn activities_url_without_activity() {
        let url = activities_url("http://localhost:56789", "conv-1", None).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:56789/v3/conversations/conv-1/activities"
        );
    }

    #[test]
    fn activities_url_rejects_garbage() {
        assert!(matches!(
            activities_url("not a url", "conv-1", None),
            Err(ConnectorError::InvalidUrl(_))
        ));
    }

    #[test]
    fn cached_token_freshness() {
        let fresh = CachedToken {
            value: "t".to_string(),
            refresh_at: Instant::now() + Duration::from_secs(60),
        };
        assert!(fresh.is_fresh());

        let stale = CachedToken {
            value: "t".to_string(),
            refresh_at: Instant::now(),
        };
        assert!(!stale.is_fresh());
    }

    #[tokio::test]
    async fn token_without_credentials_is_configuration_error() {
        let client = ConnectorClient::new(ConnectorConfig::default()).unwrap();
        assert!(matches!(
            client.access_token().await,
            Err(ConnectorError::Configuration(_))
        ));
    }
}
