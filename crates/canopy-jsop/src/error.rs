//! Error types for the patch grammar crate.

/// Errors raised while parsing patch text.
#[derive(Debug, thiserror::Error)]
pub enum JsopError {
    /// A character that opens no operation, or appears where another token
    /// was required.
    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    /// A string token was opened but never closed.
    #[error("unterminated string starting at byte {pos}")]
    UnterminatedString { pos: usize },

    /// An object or array payload with unbalanced brackets.
    #[error("unbalanced payload starting at byte {pos}")]
    UnbalancedPayload { pos: usize },

    /// A raw JSON value that does not follow the JSON grammar.
    #[error("malformed value at byte {pos}: {detail}")]
    MalformedValue { pos: usize, detail: String },

    /// The patch text ended inside an operation.
    #[error("unexpected end of patch text")]
    UnexpectedEnd,
}

/// Convenience alias for patch grammar results.
pub type JsopResult<T> = Result<T, JsopError>;
