//! Error types for the voice capability boundary.

use companion_core::error::CompanionError;

/// Errors reported by a speech capability.
///
/// These never escape the adapter: a failed start simply leaves capture off.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("speech capability unavailable: {0}")]
    Unavailable(String),
    #[error("speech capability refused: {0}")]
    Refused(String),
}

impl From<VoiceError> for CompanionError {
    fn from(err: VoiceError) -> Self {
        CompanionError::Voice(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_error_display() {
        let err = VoiceError::Unavailable("no speech engine".to_string());
        assert_eq!(
            err.to_string(),
            "speech capability unavailable: no speech engine"
        );

        let err = VoiceError::Refused("permission denied".to_string());
        assert_eq!(err.to_string(), "speech capability refused: permission denied");
    }

    #[test]
    fn test_voice_error_into_companion_error() {
        let err: CompanionError = VoiceError::Refused("muted".to_string()).into();
        assert!(matches!(err, CompanionError::Voice(_)));
        assert!(err.to_string().contains("muted"));
    }
}
