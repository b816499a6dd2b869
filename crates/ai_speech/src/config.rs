//! Configuration for speech processing

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Azure speech services
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Cognitive Services subscription key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub subscription_key: Option<SecretString>,

    /// Azure region hosting the speech resource
    #[serde(default = "default_region")]
    pub region: String,

    /// Override for the speech-to-text base URL
    #[serde(default)]
    pub stt_base_url: Option<String>,

    /// Override for the text-to-speech base URL
    #[serde(default)]
    pub tts_base_url: Option<String>,

    /// Override for the token issuing base URL (used for availability checks)
    #[serde(default)]
    pub token_base_url: Option<String>,

    /// Recognition language (BCP-47)
    #[serde(default = "default_language")]
    pub language: String,

    /// Recognition mode
    #[serde(default)]
    pub recognition_mode: RecognitionMode,

    /// Neural voice used for synthesis
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Value of the `X-Microsoft-OutputFormat` header for synthesis
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Largest audio upload accepted for transcription
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

/// Recognition mode of the short-audio REST endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionMode {
    /// Short commands and utterances
    #[default]
    Interactive,
    /// Conversational speech
    Conversation,
    /// Dictation with punctuation
    Dictation,
}

impl RecognitionMode {
    /// Path segment used in the recognition URL
    #[must_use]
    pub const fn as_path(&self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Conversation => "conversation",
            Self::Dictation => "dictation",
        }
    }
}

fn default_region() -> String {
    "westus".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    "en-US-JennyNeural".to_string()
}

fn default_output_format() -> String {
    "riff-16khz-16bit-mono-pcm".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_audio_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            subscription_key: None,
            region: default_region(),
            stt_base_url: None,
            tts_base_url: None,
            token_base_url: None,
            language: default_language(),
            recognition_mode: RecognitionMode::default(),
            voice: default_voice(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field(
                "subscription_key",
                &self.subscription_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("region", &self.region)
            .field("stt_base_url", &self.stt_base_url)
            .field("tts_base_url", &self.tts_base_url)
            .field("token_base_url", &self.token_base_url)
            .field("language", &self.language)
            .field("recognition_mode", &self.recognition_mode)
            .field("voice", &self.voice)
            .field("output_format", &self.output_format)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_audio_bytes", &self.max_audio_bytes)
            .finish()
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            subscription_key: Some(SecretString::from("test-key")),
            ..Default::default()
        }
    }

    /// Get the subscription key as a string reference (for API calls)
    #[must_use]
    pub fn subscription_key_str(&self) -> Option<&str> {
        self.subscription_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether a non-empty subscription key is configured
    #[must_use]
    pub fn has_subscription_key(&self) -> bool {
        self.subscription_key_str().is_some_and(|k| !k.is_empty())
    }

    /// Base URL of the speech-to-text service
    #[must_use]
    pub fn stt_base(&self) -> String {
        self.stt_base_url.clone().unwrap_or_else(|| {
            format!("https://{}.stt.speech.microsoft.com", self.region)
        })
    }

    /// Base URL of the text-to-speech service
    #[must_use]
    pub fn tts_base(&self) -> String {
        self.tts_base_url.clone().unwrap_or_else(|| {
            format!("https://{}.tts.speech.microsoft.com", self.region)
        })
    }

    /// Base URL of the token service
    #[must_use]
    pub fn token_base(&self) -> String {
        self.token_base_url.clone().unwrap_or_else(|| {
            format!("https://{}.api.cognitive.microsoft.com", self.region)
        })
    }

    /// Validate the configuration
    ///
    /// A missing subscription key is not an error here: the bot starts
    /// without one and speech calls fail until it is provided.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty()
            && (self.stt_base_url.is_none() || self.tts_base_url.is_none())
        {
            return Err("Region is required unless both base URLs are set".to_string());
        }

        if self.language.trim().is_empty() {
            return Err("Recognition language must not be empty".to_string());
        }

        if self.voice.trim().is_empty() {
            return Err("Synthesis voice must not be empty".to_string());
        }

        // Validate timeout
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_audio_bytes == 0 {
            return Err("Max audio size must be greater than 0".to_string());
        }

        Ok(())
    }
}
