//! Error types for the bot core.
//!
//! [`CardError`] is the error channel of [`crate::Handler`] hooks; the chain propagates it to its caller.
//! Expected card failures (not found, missing recipient, delivery) are outcomes, not errors.

use thiserror::Error;

/// Error returned by a handler hook.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Failure raised inside a handler.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("State error: {0}")]
    State(String),
}

/// Result type for handler hooks; uses [`CardError`].
pub type Result<T> = std::result::Result<T, CardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_converts_into_card_error() {
        let err: CardError = HandlerError::State("chain closed".to_string()).into();
        assert!(matches!(err, CardError::Handler(HandlerError::State(_))));
        assert_eq!(err.to_string(), "Handler error: State error: chain closed");
    }
}
