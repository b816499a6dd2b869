//! Attachment content types the bot treats as speech audio

/// WAV audio as sent by most channels
pub const AUDIO_WAV: &str = "audio/wav";

/// Generic binary upload (Skype/Teams file attachments)
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Check whether an attachment content type is accepted as audio
///
/// Comparison is exact: parameters or alternative spellings such as
/// `audio/x-wav` are not accepted.
#[must_use]
pub fn is_audio_content_type(content_type: &str) -> bool {
    content_type == AUDIO_WAV || content_type == OCTET_STREAM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_and_octet_stream_are_audio() {
        assert!(is_audio_content_type("audio/wav"));
        assert!(is_audio_content_type("application/octet-stream"));
    }

    #[test]
    fn other_types_are_not_audio() {
        for ct in ["audio/mpeg", "audio/x-wav", "image/png", "text/plain", "", "AUDIO/WAV"] {
            assert!(!is_audio_content_type(ct), "{ct} should not be audio");
        }
    }
}
