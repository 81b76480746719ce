// Errors from the metrics and billing lookups
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use thiserror::Error;

// Error codes that mean the account isn't set up for the query, rather than
// the service failing.
const CONFIGURATION_ERROR_CODES: &[&str] = &[
    "ValidationException",
];

/// A failed size or cost lookup.
///
/// These never fail a bucket, they only degrade the field to unavailable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    /// The account or query isn't configured for this lookup.
    #[error("{code}: {message}")]
    Configuration {
        /// Service error code.
        code: String,
        /// Service error message.
        message: String,
    },

    /// Any other service or transport failure.
    #[error("{code}: {message}")]
    Service {
        /// Service error code, `Unknown` if the service didn't send one.
        code: String,
        /// Service error message.
        message: String,
    },
}

impl LookupError {
    /// Classifies an error by the `code` the service returned.
    pub fn from_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();

        match code {
            Some(code) if CONFIGURATION_ERROR_CODES.contains(&code) => {
                Self::Configuration {
                    code: code.to_string(),
                    message,
                }
            },
            Some(code) => {
                Self::Service {
                    code: code.to_string(),
                    message,
                }
            },
            None => {
                Self::Service {
                    code: "Unknown".to_string(),
                    message,
                }
            },
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> &str {
        match self {
            Self::Configuration { code, .. } => code,
            Self::Service { code, .. }       => code,
        }
    }
}
