use thiserror::Error;

/// Fatal errors returned by PCM decoding.
///
/// # Examples
/// ```
/// use pcmkit_core::PcmError;
///
/// let err = PcmError::TruncatedInput { needed: 512, actual: 511 };
/// assert!(err.to_string().contains("input truncated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcmError {
    #[error("input truncated: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },
}

/// Conditions the codec recovers from locally.
///
/// These never abort decoding or encoding; they are reported next to the
/// result so callers can surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcmWarning {
    #[error("malformed hex in {field} ({reason}); {fallback}")]
    MalformedHex {
        field: &'static str,
        reason: String,
        fallback: &'static str,
    },
    #[error("undecodable text in {field}; substituted replacement characters")]
    UndecodableText { field: &'static str },
}
