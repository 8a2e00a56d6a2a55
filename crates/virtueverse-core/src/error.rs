//! Domain error types.

use thiserror::Error;

/// Why a well-formed turn was refused by the validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Narration contained kana or CJK ideographs.
    #[error("script leakage in narration")]
    NarrationScriptLeak,

    /// A dialogue line contained Latin letters.
    #[error("script leakage in dialogue")]
    DialogueScriptLeak,

    /// The suggested tier is above the stored escalation ceiling.
    #[error("tier exceeded")]
    TierExceeded {
        /// Tier proposed by the inbound feedback.
        suggested: i64,
        /// Tier currently stored in the session.
        ceiling: u32,
    },
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or has the wrong shape.
    #[error("malformed turn: {0}")]
    MalformedInput(String),

    /// A validation rule refused the turn. Displays the reason verbatim.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The persisted state could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reasons_are_reported_verbatim() {
        assert_eq!(
            DomainError::from(Rejection::NarrationScriptLeak).to_string(),
            "script leakage in narration"
        );
        assert_eq!(
            DomainError::from(Rejection::DialogueScriptLeak).to_string(),
            "script leakage in dialogue"
        );
        assert_eq!(
            DomainError::from(Rejection::TierExceeded {
                suggested: 5,
                ceiling: 2
            })
            .to_string(),
            "tier exceeded"
        );
    }

    #[test]
    fn test_storage_error_includes_cause() {
        let err = DomainError::Storage("disk full".into());
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
