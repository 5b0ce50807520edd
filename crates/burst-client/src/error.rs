//! Client error types

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or unusable static credentials
    #[error("Credential error: {0}")]
    Credentials(String),

    /// S3 API error carrying service error metadata
    #[error("S3 error in {operation} ({code}): {message}")]
    S3Error {
        operation: &'static str,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Transport, timeout or otherwise unmodeled failure
    #[error("Request error in {operation}: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
}

impl ClientError {
    /// Convert an SDK error, keeping the service error code when there is one
    pub fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        if let Some(service) = err.as_service_error() {
            if let Some(code) = service.code() {
                return Self::S3Error {
                    operation,
                    code: code.to_string(),
                    message: service.message().unwrap_or("Unknown error").to_string(),
                    request_id: service.meta().extra("aws_request_id").map(str::to_string),
                };
            }
        }

        Self::Request {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        }
    }

    /// The S3 error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::S3Error { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self.code(), Some("NoSuchKey" | "NoSuchBucket" | "NotFound"))
    }

    /// Check if this is an access denied error
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Credentials(_))
            || matches!(
                self.code(),
                Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch")
            )
    }
}

/// Errors that end a run
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Configuration or credential failure before anything was dispatched
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A remote call failed
    #[error("Request #{index} ({operation}) failed: {source}")]
    Invocation {
        index: usize,
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    /// An invocation task panicked
    #[error("Request #{index} panicked")]
    Panicked { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::http::HttpResponse;
    use aws_sdk_s3::operation::list_buckets::ListBucketsError;

    fn s3_error(code: &str) -> ClientError {
        ClientError::S3Error {
            operation: "GetObject",
            code: code.to_string(),
            message: "boom".to_string(),
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn test_classify_codes() {
        assert!(s3_error("NoSuchKey").is_not_found());
        assert!(s3_error("NoSuchBucket").is_not_found());
        assert!(!s3_error("NoSuchKey").is_access_denied());

        assert!(s3_error("AccessDenied").is_access_denied());
        assert!(s3_error("SignatureDoesNotMatch").is_access_denied());
        assert!(!s3_error("InternalError").is_access_denied());

        assert!(ClientError::Credentials("missing".into()).is_access_denied());
        assert_eq!(ClientError::Config("x".into()).code(), None);
    }

    #[test]
    fn test_display_includes_operation_and_code() {
        let message = s3_error("AccessDenied").to_string();
        assert_eq!(message, "S3 error in GetObject (AccessDenied): boom");
    }

    #[test]
    fn test_construction_failure_is_request_error() {
        let err: SdkError<ListBucketsError, HttpResponse> =
            SdkError::construction_failure("endpoint resolution failed");

        match ClientError::from_sdk("ListBuckets", err) {
            ClientError::Request { operation, message } => {
                assert_eq!(operation, "ListBuckets");
                assert!(message.contains("endpoint resolution failed"));
            }
            other => panic!("Expected Request error, got {other:?}"),
        }
    }
}
