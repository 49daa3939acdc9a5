//! Error types for fetching and decoding the source datasets.
//!
//! Failures fall into three groups: transient transport problems that the
//! loader retries, schema drift in the upstream files that must abort the
//! refresh loudly, and local I/O problems.

use std::fmt;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Structured context attached to every [`SourceError`].
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g. "fetch", "parse_series")
    pub operation: Option<String>,
    /// The resource involved (dataset name, URL or path)
    pub resource: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether the loader may retry the operation
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref resource) = self.resource {
            parts.push(format!("resource={}", resource));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for the source loader and parsers.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network-level failure (DNS, connect, reset, timeout).
    #[error("Transport error: {message} {context}")]
    Transport {
        message: String,
        context: ErrorContext,
    },

    /// The server answered with a non-success status.
    #[error("HTTP status {status}: {message} {context}")]
    HttpStatus {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// The upstream file no longer has the expected shape.
    #[error("Schema error: {message} {context}")]
    Schema {
        message: String,
        context: ErrorContext,
    },

    /// Local filesystem failure.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn transport(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Transport {
            message: message.into(),
            context: context.retryable(),
        }
    }

    /// 5xx and 429 are retryable, every other status is not.
    pub fn http_status(status: u16, message: impl Into<String>, context: ErrorContext) -> Self {
        let context = if status >= 500 || status == 429 {
            context.retryable()
        } else {
            context
        };
        Self::HttpStatus {
            status,
            message: message.into(),
            context,
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn schema_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Schema {
            message: message.into(),
            context,
        }
    }

    pub fn io(err: std::io::Error, context: ErrorContext) -> Self {
        Self::Io {
            message: err.to_string(),
            context,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { context, .. } | Self::HttpStatus { context, .. } => {
                context.retryable
            }
            _ => false,
        }
    }

    /// Schema drift is the one failure class that means the data itself is wrong.
    pub fn is_schema_drift(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Transport { context, .. }
            | Self::HttpStatus { context, .. }
            | Self::Schema { context, .. }
            | Self::Io { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }

    /// Fill in the resource name if the error does not carry one yet.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        match &mut self {
            Self::Transport { context, .. }
            | Self::HttpStatus { context, .. }
            | Self::Schema { context, .. }
            | Self::Io { context, .. }
            | Self::Internal { context, .. } => {
                if context.resource.is_none() {
                    context.resource = Some(resource.into());
                }
            }
        }
        self
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::schema_with_context(
            err.to_string(),
            ErrorContext::new("read_csv").with_details("malformed csv"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_retryable() {
        let err = SourceError::transport("reset", ErrorContext::new("fetch"));
        assert!(err.is_retryable());
        assert!(!err.is_schema_drift());
    }

    #[test]
    fn test_status_classification() {
        assert!(SourceError::http_status(503, "x", ErrorContext::default()).is_retryable());
        assert!(SourceError::http_status(429, "x", ErrorContext::default()).is_retryable());
        assert!(!SourceError::http_status(404, "x", ErrorContext::default()).is_retryable());
    }

    #[test]
    fn test_schema_error_is_fatal() {
        let err = SourceError::schema("missing Country/Region");
        assert!(err.is_schema_drift());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("fetch")
            .with_resource("confirmed")
            .with_details("attempt=2")
            .retryable();
        assert_eq!(
            ctx.to_string(),
            "[operation=fetch, resource=confirmed, details=attempt=2, retryable=true]"
        );
    }

    #[test]
    fn test_with_resource_keeps_existing() {
        let err = SourceError::schema_with_context(
            "bad",
            ErrorContext::new("parse").with_resource("deaths"),
        )
        .with_resource("confirmed");
        assert_eq!(err.context().resource.as_deref(), Some("deaths"));
    }
}
