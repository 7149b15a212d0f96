//! Error types for the quote client
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level client error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// The transport's request/response call failed or timed out.
    #[error("Protocol error on {command}: {source}")]
    Protocol {
        command: String,
        #[source]
        source: TransportError,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl QuoteError {
    pub fn protocol(command: impl Into<String>, source: TransportError) -> Self {
        QuoteError::Protocol {
            command: command.into(),
            source,
        }
    }

    /// The underlying transport error, if this is a protocol failure.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            QuoteError::Protocol { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failures reported by the transport channel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Connection closed")]
    Closed,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Server rejected request: code {code}, message {message}")]
    Remote { code: i32, message: String },
}

/// Malformed or unrecognized payloads
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Unknown command code: {0}")]
    UnknownCommand(u32),

    #[error("Malformed payload for {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("Invalid decimal in field {field}: {value:?}")]
    InvalidDecimal { field: String, value: String },

    #[error("Invalid date in field {field}: {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("Invalid topic code: {0}")]
    InvalidTopic(i32),
}

/// Configuration loading and validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing config value: {key}")]
    MissingValue { key: String },

    #[error("Invalid config value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config: {reason}")]
    Parse { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_protocol_error_display() {
        let err = QuoteError::protocol("subscribe", TransportError::Timeout { millis: 500 });
        assert_eq!(
            err.to_string(),
            "Protocol error on subscribe: Request timed out after 500ms"
        );
    }

    #[test]
    fn test_protocol_error_exposes_cause() {
        let err = QuoteError::protocol("unsubscribe", TransportError::Closed);
        assert_eq!(err.transport_error(), Some(&TransportError::Closed));
        let source = err.source().expect("protocol error carries its cause");
        assert_eq!(source.to_string(), "Connection closed");
    }

    #[test]
    fn test_quote_error_from_decode_error() {
        let decode_err = DecodeError::UnknownCommand(999);
        let err: QuoteError = decode_err.into();
        assert!(matches!(err, QuoteError::Decode(_)));
        assert!(err.transport_error().is_none());
    }

    #[test]
    fn test_invalid_decimal_display() {
        let err = DecodeError::InvalidDecimal {
            field: "lastDone".to_string(),
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("lastDone"));
        assert!(err.to_string().contains("abc"));
    }
}
