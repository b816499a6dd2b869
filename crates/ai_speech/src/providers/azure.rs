//! Azure Speech Provider
//!
//! Implements `SpeechToText` and `TextToSpeech` against the Azure Cognitive
//! Services Speech REST API (the successor of the Bing Speech API).
//!
//! # Endpoints
//!
//! - STT: `{stt_base}/speech/recognition/{mode}/cognitiveservices/v1`
//!   (short audio, WAV/PCM or OGG/Opus body)
//! - TTS: `{tts_base}/cognitiveservices/v1` (SSML body)
//! - Availability: `{token_base}/sts/v1.0/issueToken`
//!
//! All requests authenticate with the `Ocp-Apim-Subscription-Key` header.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, AudioFormat, RecognitionStatus, Transcription};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const USER_AGENT: &str = concat!("speechrelay/", env!("CARGO_PKG_VERSION"));

/// Azure speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct AzureSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl AzureSpeechProvider {
    /// Create a new Azure speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get the subscription key
    fn subscription_key(&self) -> &str {
        self.config.subscription_key_str().unwrap_or_default()
    }

    /// Build the STT endpoint URL
    fn stt_url(&self) -> String {
        format!(
            "{}/speech/recognition/{}/cognitiveservices/v1",
            self.config.stt_base(),
            self.config.recognition_mode.as_path()
        )
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/cognitiveservices/v1", self.config.tts_base())
    }

    /// Build the token endpoint URL
    fn token_url(&self) -> String {
        format!("{}/sts/v1.0/issueToken", self.config.token_base())
    }

    /// Audio format produced by an `X-Microsoft-OutputFormat` value
    fn output_format_to_audio_format(output_format: &str) -> AudioFormat {
        if output_format.contains("mp3") {
            AudioFormat::Mp3
        } else if output_format.starts_with("ogg") || output_format.contains("opus") {
            AudioFormat::Ogg
        } else {
            AudioFormat::Wav
        }
    }

    /// Map a non-success HTTP status to an error
    fn status_error(
        status: StatusCode,
        body: &str,
        fallback: fn(String) -> SpeechError,
    ) -> SpeechError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SpeechError::Unauthorized(format!("HTTP {status}"))
            },
            StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE => {
                SpeechError::ServiceUnavailable(format!("HTTP {status}: {body}"))
            },
            _ => fallback(format!("HTTP {status}: {body}")),
        }
    }

    /// Wrap text in a single-voice SSML document
    fn build_ssml(&self, text: &str, voice: &str) -> String {
        let lang = escape_xml(&self.config.language);
        format!(
            "<speak version='1.0' xml:lang='{lang}'><voice xml:lang='{lang}' name='{}'>{}</voice></speak>",
            escape_xml(voice),
            escape_xml(text)
        )
    }

    /// Probe the token endpoint with the subscription key
    async fn probe(&self) -> bool {
        if !self.config.has_subscription_key() {
            return false;
        }

        match self
            .client
            .post(self.token_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key())
            .header(reqwest::header::CONTENT_LENGTH, "0")
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Azure speech availability check failed: {}", e);
                false
            },
        }
    }
}

/// Escape the five XML special characters
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Simple-format recognition response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: RecognitionStatus,
    #[serde(default)]
    display_text: Option<String>,
    /// In 100-nanosecond ticks
    #[serde(default)]
    offset: Option<u64>,
    /// In 100-nanosecond ticks
    #[serde(default)]
    duration: Option<u64>,
}

const TICKS_PER_MS: u64 = 10_000;

#[async_trait]
impl SpeechToText for AzureSpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        debug!("Transcribing audio with Azure speech");

        // Validate audio is not empty
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        if audio.size_bytes() > self.config.max_audio_bytes {
            return Err(SpeechError::AudioTooLarge {
                size_bytes: audio.size_bytes(),
                max_bytes: self.config.max_audio_bytes,
            });
        }

        if audio.format() == AudioFormat::Mp3 {
            return Err(SpeechError::InvalidAudio(
                "MP3 is not accepted by the recognition endpoint".to_string(),
            ));
        }

        let content_type = audio.recognition_content_type();
        let data = audio.into_data();

        let response = self
            .client
            .post(self.stt_url())
            .query(&[("language", self.config.language.as_str()), ("format", "simple")])
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(data)
            .send()
            .await?;

        // Handle response
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(
                status,
                &error_body,
                SpeechError::TranscriptionFailed,
            ));
        }

        let recognition: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        match recognition.recognition_status {
            RecognitionStatus::Success => {},
            RecognitionStatus::NoMatch
            | RecognitionStatus::InitialSilenceTimeout
            | RecognitionStatus::BabbleTimeout => {
                return Err(SpeechError::NoMatch(format!(
                    "{:?}",
                    recognition.recognition_status
                )));
            },
            RecognitionStatus::Error | RecognitionStatus::Unknown => {
                return Err(SpeechError::TranscriptionFailed(format!(
                    "Recognition status {:?}",
                    recognition.recognition_status
                )));
            },
        }

        let text = recognition.display_text.unwrap_or_default();

        debug!(text_len = text.len(), "Transcription complete");

        let mut transcription = Transcription::new(text).with_language(&self.config.language);

        if let Some(offset) = recognition.offset {
            transcription = transcription.with_offset(offset / TICKS_PER_MS);
        }

        if let Some(duration) = recognition.duration {
            transcription = transcription.with_duration(duration / TICKS_PER_MS);
        }

        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        self.probe().await
    }

    fn language(&self) -> &str {
        &self.config.language
    }
}

#[async_trait]
impl TextToSpeech for AzureSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        debug!("Synthesizing speech with Azure speech");

        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice = voice.unwrap_or(&self.config.voice);
        let ssml = self.build_ssml(text, voice);

        let response = self
            .client
            .post(self.tts_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key())
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, &self.config.output_format)
            .body(ssml)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(
                status,
                &error_body,
                SpeechError::SynthesisFailed,
            ));
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Synthesis returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        let format = Self::output_format_to_audio_format(&self.config.output_format);
        Ok(AudioData::new(audio_bytes.to_vec(), format))
    }

    async fn is_available(&self) -> bool {
        self.probe().await
    }

    fn default_voice(&self) -> &str {
        &self.config.voice
    }
}
