//! AI Speech - Speech-to-Text and Text-to-Speech abstractions
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe audio to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - Azure Cognitive Services Speech REST API (STT and TTS), keyed by a
//!   single subscription key
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AzureSpeechProvider, SpeechToText, TextToSpeech, AudioData, AudioFormat};
//!
//! let provider = AzureSpeechProvider::new(config)?;
//!
//! // Transcribe audio
//! let audio = AudioData::new(bytes, AudioFormat::Wav);
//! let transcription = provider.transcribe(audio).await?;
//! println!("Transcribed: {}", transcription.text);
//!
//! // Synthesize speech
//! let audio = provider.synthesize("Hello, world!", None).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{RecognitionMode, SpeechConfig};
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::azure::AzureSpeechProvider;
pub use types::{AudioData, AudioFormat, RecognitionStatus, Transcription};
