//! Types for speech processing
//!
//! Contains data structures for audio data, transcriptions, and recognition status.

use serde::{Deserialize, Serialize};

pub use domain::AudioFormat;

/// Container for audio data with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Content-Type header value for the recognition endpoint
    ///
    /// WAV is sent as 16 kHz mono PCM, the format the channels record.
    #[must_use]
    pub const fn recognition_content_type(&self) -> &'static str {
        match self.format {
            AudioFormat::Wav => "audio/wav; codecs=audio/pcm; samplerate=16000",
            AudioFormat::Ogg => "audio/ogg; codecs=opus",
            AudioFormat::Mp3 => self.mime_type(),
        }
    }
}

/// Outcome reported by the recognition service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecognitionStatus {
    /// Speech recognized
    Success,
    /// Speech detected but no words matched
    NoMatch,
    /// Audio started with silence longer than the service allows
    InitialSilenceTimeout,
    /// Audio contained only noise
    BabbleTimeout,
    /// Service-side recognition error
    Error,
    /// Any status this client does not know
    #[serde(other)]
    Unknown,
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Recognition language (BCP-47, e.g. "en-US")
    pub language: Option<String>,
    /// Offset of recognized speech in milliseconds
    pub offset_ms: Option<u64>,
    /// Duration of recognized speech in milliseconds
    pub duration_ms: Option<u64>,
}

impl Transcription {
    /// Create a simple transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            offset_ms: None,
            duration_ms: None,
        }
    }

    /// Set the recognition language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the speech offset
    #[must_use]
    pub const fn with_offset(mut self, offset_ms: u64) -> Self {
        self.offset_ms = Some(offset_ms);
        self
    }

    /// Set the duration
    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Check if transcription is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod audio_data {
        use super::*;

        #[test]
        fn accessors_reflect_input() {
            let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Wav);
            assert_eq!(audio.data(), &[1, 2, 3]);
            assert_eq!(audio.size_bytes(), 3);
            assert!(!audio.is_empty());
            assert_eq!(audio.format(), AudioFormat::Wav);
            assert_eq!(audio.mime_type(), "audio/wav");
        }

        #[test]
        fn empty_audio_is_empty() {
            assert!(AudioData::new(Vec::new(), AudioFormat::Wav).is_empty());
        }

        #[test]
        fn wav_content_type_is_16k_pcm() {
            let audio = AudioData::new(vec![0], AudioFormat::Wav);
            assert_eq!(
                audio.recognition_content_type(),
                "audio/wav; codecs=audio/pcm; samplerate=16000"
            );
        }

        #[test]
        fn ogg_content_type_names_opus() {
            let audio = AudioData::new(vec![0], AudioFormat::Ogg);
            assert_eq!(audio.recognition_content_type(), "audio/ogg; codecs=opus");
        }

        #[test]
        fn into_data_returns_bytes() {
            let audio = AudioData::new(vec![9, 8], AudioFormat::Mp3);
            assert_eq!(audio.into_data(), vec![9, 8]);
        }
    }

    mod recognition_status {
        use super::*;

        #[test]
        fn known_statuses_deserialize() {
            let status: RecognitionStatus = serde_json::from_str("\"Success\"").unwrap();
            assert_eq!(status, RecognitionStatus::Success);
            let status: RecognitionStatus =
                serde_json::from_str("\"InitialSilenceTimeout\"").unwrap();
            assert_eq!(status, RecognitionStatus::InitialSilenceTimeout);
        }

        #[test]
        fn unknown_status_falls_back() {
            let status: RecognitionStatus = serde_json::from_str("\"SomethingNew\"").unwrap();
            assert_eq!(status, RecognitionStatus::Unknown);
        }
    }

    mod transcription {
        use super::*;

        #[test]
        fn builder_sets_fields() {
            let t = Transcription::new("hello")
                .with_language("en-US")
                .with_offset(50)
                .with_duration(1200);
            assert_eq!(t.text, "hello");
            assert_eq!(t.language.as_deref(), Some("en-US"));
            assert_eq!(t.offset_ms, Some(50));
            assert_eq!(t.duration_ms, Some(1200));
        }

        #[test]
        fn whitespace_text_is_empty() {
            assert!(Transcription::new("  ").is_empty());
            assert!(!Transcription::new("a").is_empty());
        }
    }
}
