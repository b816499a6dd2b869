//! Speech adapter - Implements SpeechPort using ai_speech crate

use std::sync::Arc;

use ai_speech::{
    AudioData, AzureSpeechProvider, SpeechConfig, SpeechError, SpeechToText, TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{AudioStream, SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use domain::AudioFormat;
use futures::StreamExt;
use tracing::{debug, instrument};

/// Adapter for the Azure speech services
pub struct SpeechAdapter {
    provider: Arc<AzureSpeechProvider>,
    max_audio_bytes: usize,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &"AzureSpeechProvider")
            .field("max_audio_bytes", &self.max_audio_bytes)
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let max_audio_bytes = config.max_audio_bytes;
        let provider = AzureSpeechProvider::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            provider: Arc::new(provider),
            max_audio_bytes,
        })
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::AudioTooLarge {
                size_bytes,
                max_bytes,
            } => ApplicationError::AudioTooLarge {
                size_bytes,
                max_bytes,
            },
            SpeechError::Timeout(ms) => {
                ApplicationError::Speech(format!("Speech service timeout after {ms}ms"))
            },
            other => ApplicationError::Speech(other.to_string()),
        }
    }

    /// Buffer the attachment stream, stopping once it exceeds the size limit
    async fn collect_audio(
        mut audio: AudioStream,
        max_bytes: usize,
    ) -> Result<Vec<u8>, ApplicationError> {
        let mut buffer = Vec::new();

        while let Some(chunk) = audio.next().await {
            let chunk = chunk?;
            let size_bytes = buffer.len() + chunk.len();
            if size_bytes > max_bytes {
                return Err(ApplicationError::AudioTooLarge {
                    size_bytes,
                    max_bytes,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        Ok(buffer)
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, audio), fields(format = %format))]
    async fn transcribe(
        &self,
        audio: AudioStream,
        format: AudioFormat,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let data = Self::collect_audio(audio, self.max_audio_bytes).await?;
        debug!(data_size = data.len(), "Audio buffered");

        let transcription = self
            .provider
            .transcribe(AudioData::new(data, format))
            .await
            .map_err(Self::map_error)?;

        Ok(TranscriptionResult {
            text: transcription.text,
            language: transcription.language,
            duration_ms: transcription.duration_ms,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: String) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .provider
            .synthesize(&text, None)
            .await
            .map_err(Self::map_error)?;

        let format = audio.format();
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            format,
        })
    }

    async fn is_available(&self) -> bool {
        SpeechToText::is_available(self.provider.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use secrecy::SecretString;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> SpeechConfig {
        SpeechConfig {
            subscription_key: Some(SecretString::from("test-key")),
            stt_base_url: Some(base_url.to_string()),
            tts_base_url: Some(base_url.to_string()),
            token_base_url: Some(base_url.to_string()),
            timeout_ms: 5000,
            ..Default::default()
        }
    }

    fn stream(chunks: &[&'static [u8]]) -> AudioStream {
        let items: Vec<Result<Bytes, ApplicationError>> = chunks
            .iter()
            .copied()
            .map(|c| Ok(Bytes::from_static(c)))
            .collect();
        Box::pin(futures::stream::iter(items))
    }

    #[tokio::test]
    async fn collect_audio_concatenates_chunks() {
        let data = SpeechAdapter::collect_audio(stream(&[b"RI", b"FF"]), 16)
            .await
            .unwrap();
        assert_eq!(data, b"RIFF");
    }

    #[tokio::test]
    async fn collect_audio_enforces_limit() {
        let result = SpeechAdapter::collect_audio(stream(&[b"RIFF", b"WAVE"]), 6).await;
        assert!(matches!(
            result,
            Err(ApplicationError::AudioTooLarge {
                size_bytes: 8,
                max_bytes: 6
            })
        ));
    }

    #[tokio::test]
    async fn collect_audio_propagates_stream_errors() {
        let items: Vec<Result<Bytes, ApplicationError>> = vec![
            Ok(Bytes::from_static(b"RI")),
            Err(ApplicationError::AttachmentFetch("connection reset".to_string())),
        ];
        let result = SpeechAdapter::collect_audio(Box::pin(futures::stream::iter(items)), 16).await;
        assert!(matches!(result, Err(ApplicationError::AttachmentFetch(_))));
    }

    #[test]
    fn map_error_keeps_size_details() {
        let err = SpeechAdapter::map_error(SpeechError::AudioTooLarge {
            size_bytes: 11,
            max_bytes: 10,
        });
        assert!(matches!(
            err,
            ApplicationError::AudioTooLarge {
                size_bytes: 11,
                max_bytes: 10
            }
        ));

        let err = SpeechAdapter::map_error(SpeechError::NoMatch("silence".to_string()));
        assert!(matches!(err, ApplicationError::Speech(_)));
        assert!(err.is_transcription_failure());
    }

    #[tokio::test]
    async fn transcribe_streams_into_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speech/recognition/interactive/cognitiveservices/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RecognitionStatus": "Success",
                "DisplayText": "test",
                "Duration": 5_000_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = SpeechAdapter::new(config(&server.uri())).unwrap();
        let result = adapter
            .transcribe(stream(&[b"RIFF", b"data"]), AudioFormat::Wav)
            .await
            .unwrap();

        assert_eq!(result.text, "test");
        assert_eq!(result.duration_ms, Some(500));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, b"RIFFdata");
    }

    #[tokio::test]
    async fn synthesize_returns_wav() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"RIFF".to_vec()))
            .mount(&server)
            .await;

        let adapter = SpeechAdapter::new(config(&server.uri())).unwrap();
        let result = adapter.synthesize("Hello".to_string()).await.unwrap();

        assert_eq!(result.audio_data, b"RIFF");
        assert_eq!(result.format, AudioFormat::Wav);
    }

    #[tokio::test]
    async fn synthesize_unauthorized_is_speech_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let adapter = SpeechAdapter::new(config(&server.uri())).unwrap();
        let result = adapter.synthesize("Hello".to_string()).await;

        assert!(matches!(result, Err(ApplicationError::Speech(_))));
    }

    #[tokio::test]
    async fn unavailable_without_key() {
        let adapter = SpeechAdapter::new(SpeechConfig::default()).unwrap();
        assert!(!adapter.is_available().await);
    }
}
