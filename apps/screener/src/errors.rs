use thiserror::Error;

use crate::classify::RejectionNotice;

/// Screening error type.
/// `code()` gives the stable machine code a transport layer maps to its own responses.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Input too short: {length} characters, minimum {minimum}")]
    InputTooShort { length: usize, minimum: usize },

    #[error("Not a resume: {}", .0.details)]
    Rejected(Box<RejectionNotice>),

    #[error("Enhancement error: {0}")]
    Enhancement(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ScreenError {
    pub fn code(&self) -> &'static str {
        match self {
            ScreenError::InputTooShort { .. } => "INPUT_TOO_SHORT",
            ScreenError::Rejected(_) => "NOT_A_RESUME",
            ScreenError::Enhancement(_) => "ENHANCEMENT_ERROR",
            ScreenError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The rejection notice carried by a NON_RESUME verdict, if this is one.
    pub fn rejection(&self) -> Option<&RejectionNotice> {
        match self {
            ScreenError::Rejected(notice) => Some(&**notice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_codes() {
        let short = ScreenError::InputTooShort {
            length: 30,
            minimum: 50,
        };
        assert_eq!(short.code(), "INPUT_TOO_SHORT");
        assert_eq!(
            short.to_string(),
            "Input too short: 30 characters, minimum 50"
        );
        assert_eq!(
            ScreenError::Enhancement("timeout".into()).code(),
            "ENHANCEMENT_ERROR"
        );
        let internal: ScreenError = anyhow!("join failed").into();
        assert_eq!(internal.code(), "INTERNAL_ERROR");
        assert!(internal.rejection().is_none());
    }
}
