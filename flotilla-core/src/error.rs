//! Error types for the flotilla library

use std::error::Error as StdError;
use std::fmt;

/// One failed delivery attempt, kept for exhaustion diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    /// The endpoint that was tried
    pub endpoint: String,
    /// Why the attempt failed
    pub message: String,
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.message)
    }
}

/// The main error type for all flotilla operations
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration, detected before any network activity
    Configuration(String),

    /// A connect/send/receive failure against one endpoint
    ///
    /// Transport errors are recoverable inside a dispatch: the next
    /// candidate endpoint is tried.
    Transport {
        /// The endpoint that could not be reached
        endpoint: String,
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Every candidate endpoint failed at the transport level
    Exhausted {
        /// The per-endpoint failures, in trial order
        attempts: Vec<EndpointFailure>,
    },

    /// A reachable endpoint answered with a non-success HTTP status
    ///
    /// Unlike transport errors these are not retried against other
    /// candidates.
    Http {
        /// The endpoint that answered
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, if one could be read
        body: String,
    },

    /// A response body could not be decoded
    Decode {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A successful response lacked a required field
    MissingField {
        /// Name of the missing field
        field: String,
    },
}

impl Error {
    /// Whether this error is a per-endpoint transport failure
    ///
    /// The dispatcher advances to the next candidate exactly when this
    /// returns `true`; every other error aborts the dispatch.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::Transport {
                endpoint, message, ..
            } => {
                write!(f, "Transport error contacting {}: {}", endpoint, message)
            }
            Error::Exhausted { attempts } => {
                if attempts.is_empty() {
                    write!(f, "All endpoints unavailable")
                } else {
                    let causes: Vec<String> = attempts.iter().map(ToString::to_string).collect();
                    write!(f, "All endpoints unavailable: {}", causes.join("; "))
                }
            }
            Error::Http {
                endpoint,
                status,
                body,
            } => write!(f, "HTTP {} from {}: {}", status, endpoint, body),
            Error::Decode { message, .. } => write!(f, "Decode error: {}", message),
            Error::MissingField { field } => {
                write!(f, "Missing field `{}` in response", field)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Transport { source, .. } | Error::Decode { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

/// Result type alias for flotilla operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
