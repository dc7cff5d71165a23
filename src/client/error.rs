use std::error::Error as StdError;

use crate::domain::ValidationError;
use crate::transport::ResponseError;

/// Library code for an invalid or missing argument.
pub const LIB_ERROR_INVALID_ARG: i64 = -550;
/// Library code for an unexpected failure, e.g. an unreadable response.
pub const LIB_ERROR_UNKNOWN: i64 = -500;
/// Library code for a failed HTTP round trip.
pub const LIB_ERROR_CONNECTIVITY: i64 = -1000;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Text2PayClient`](crate::Text2PayClient).
///
/// Two kinds are distinguished:
/// - library errors: the request could not be built, sent or understood,
/// - API errors: the service rejected the request ([`Text2PayError::Api`]).
pub enum Text2PayError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with something other than `200 OK`.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The service reported a failure through `error_code`/`message`.
    ///
    /// `source` is empty for errors decoded from a response; callers that
    /// re-raise an API error from their own failure can attach it.
    #[error("API error {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        code: i64,
        message: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Response body could not be read as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

impl Text2PayError {
    /// Numeric code: the server's `error_code` for API errors, a negative
    /// library code otherwise.
    pub fn code(&self) -> i64 {
        match self {
            Self::Validation(_) => LIB_ERROR_INVALID_ARG,
            Self::Transport(_) | Self::HttpStatus { .. } => LIB_ERROR_CONNECTIVITY,
            Self::Api { code, .. } => *code,
            Self::Parse(_) => LIB_ERROR_UNKNOWN,
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    pub fn is_library_error(&self) -> bool {
        !self.is_api_error()
    }
}

impl From<ResponseError> for Text2PayError {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Api { code, message } => Self::Api {
                code,
                message,
                source: None,
            },
            ResponseError::Decode(err) => Self::Parse(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DecodeError;

    #[test]
    fn codes_follow_error_kind() {
        let err = Text2PayError::from(ValidationError::MissingAction);
        assert_eq!(err.code(), LIB_ERROR_INVALID_ARG);
        assert!(err.is_library_error());

        let err = Text2PayError::HttpStatus {
            status: 502,
            body: None,
        };
        assert_eq!(err.code(), LIB_ERROR_CONNECTIVITY);

        let err = Text2PayError::from(ResponseError::Api {
            code: 20004,
            message: Some("Failed".to_owned()),
        });
        assert_eq!(err.code(), 20004);
        assert!(err.is_api_error());
        assert_eq!(err.to_string(), "API error 20004: Failed");
    }

    #[test]
    fn api_errors_chain_an_optional_cause() {
        let err = Text2PayError::from(ResponseError::Api {
            code: 101,
            message: None,
        });
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "API error 101: no message");

        let cause = std::io::Error::other("billing backend unavailable");
        let err = Text2PayError::Api {
            code: 20004,
            message: Some("Failed".to_owned()),
            source: Some(Box::new(cause)),
        };
        assert_eq!(err.code(), 20004);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("billing backend unavailable"));
    }

    #[test]
    fn decode_failures_keep_their_source() {
        let err = Text2PayError::from(ResponseError::Decode(DecodeError::EmptyDocument));
        assert_eq!(err.code(), LIB_ERROR_UNKNOWN);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("XML response has no root element"));
    }
}
