//! Audio format shared by the speech and transport layers

use serde::{Deserialize, Serialize};

/// Format of the audio data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// RIFF WAV, 16-bit PCM
    Wav,
    /// OGG container with Opus codec
    Ogg,
    /// MP3 format
    Mp3,
}

impl AudioFormat {
    /// Get the MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
        }
    }

    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
        }
    }

    /// Parse from MIME type
    ///
    /// `application/octet-stream` maps to WAV: channels that wrap uploads in
    /// a generic binary type still carry the WAV file the user sent.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or(mime).trim();
        match base {
            "audio/wav" | "audio/x-wav" | "audio/wave" | "application/octet-stream" => {
                Some(Self::Wav)
            },
            "audio/ogg" | "audio/opus" => Some(Self::Ogg),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
