//! Error types for the WCS client crates.

use thiserror::Error;

/// Result type alias using WcsError.
pub type WcsResult<T> = Result<T, WcsError>;

/// Primary error type for request building and response parsing.
#[derive(Debug, Error)]
pub enum WcsError {
    // === Request building ===
    #[error("Invalid argument '{param}': {message}")]
    InvalidArgument { param: String, message: String },

    // === Response parsing ===
    #[error("No parsing function for tag name '{0}' registered")]
    NoParserRegistered(String),

    #[error("Service exception {code}: {text}")]
    ServiceException {
        code: String,
        locator: Option<String>,
        text: String,
    },

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Namespace prefix '{0}' is not declared in the namespace map")]
    UnknownNamespacePrefix(String),

    #[error("Invalid path expression: {0}")]
    InvalidPath(String),
}

impl WcsError {
    /// Shorthand for a missing mandatory builder input.
    pub fn missing(param: &str) -> Self {
        WcsError::InvalidArgument {
            param: param.to_string(),
            message: format!("Parameter '{}' is mandatory", param),
        }
    }

    /// Get the OGC exception code that best describes this error.
    pub fn exception_code(&self) -> &str {
        match self {
            WcsError::InvalidArgument { .. } => "MissingParameterValue",
            WcsError::ServiceException { code, .. } => code,
            WcsError::NoParserRegistered(_) => "OperationNotSupported",
            _ => "NoApplicableCode",
        }
    }

    /// Whether this error is a well-formed exception reported by the service,
    /// as opposed to a failure inside the client.
    pub fn is_service_exception(&self) -> bool {
        matches!(self, WcsError::ServiceException { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = WcsError::missing("url");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'url': Parameter 'url' is mandatory"
        );
        assert_eq!(err.exception_code(), "MissingParameterValue");
    }

    #[test]
    fn test_service_exception_code() {
        let err = WcsError::ServiceException {
            code: "NoSuchCoverage".to_string(),
            locator: Some("C1".to_string()),
            text: "No such coverage".to_string(),
        };
        assert!(err.is_service_exception());
        assert_eq!(err.exception_code(), "NoSuchCoverage");
    }
}
