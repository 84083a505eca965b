use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the query ran and its result was presented
    Success = 0,
    /// A direct lookup (purl, product stream, ...) matched nothing
    NotFound = 1,
    /// Invalid command-line arguments or query parameters
    InvalidArguments = 2,
    /// Application error (service unavailable, oversized result, failed fan-out, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error to the exit code the process should terminate with.
    ///
    /// The first [`QueryError`] found in the error chain decides; anything
    /// else is an application error.
    pub fn for_error(error: &anyhow::Error) -> Self {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<QueryError>())
            .map(QueryError::exit_code)
            .unwrap_or(ExitCode::ApplicationError)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NotFound => write!(f, "Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while validating, executing and presenting queries.
///
/// Join misses between the two services are not represented here: they are
/// logged and skipped by the query that encounters them.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No parameters given for {query}\n\n💡 Hint: Accepted parameters: {}", allowed.join(", "))]
    NoParameters {
        query: String,
        allowed: Vec<String>,
    },

    #[error("Parameter '{parameter}' is not accepted by {query}\n\n💡 Hint: Accepted parameters: {}", allowed.join(", "))]
    UnknownParameter {
        query: String,
        parameter: String,
        allowed: Vec<String>,
    },

    #[error("{query} needs at least one of: {}\n\n💡 Hint: Optional filters alone do not select anything", required.join(", "))]
    MissingRequired {
        query: String,
        required: Vec<String>,
    },

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameterValue { parameter: String, reason: String },

    #[error("{service} is not accessible: {url}\nDetails: {details}\n\n💡 Hint: Check the service URL, your network connection and that your credentials have not expired")]
    ServiceUnavailable {
        service: String,
        url: String,
        details: String,
    },

    #[error("Result set too large: {what} matched {count} entries (limit {limit})\n\n💡 Hint: Narrow the query with more specific parameters")]
    ResultTooLarge {
        what: String,
        count: usize,
        limit: usize,
    },

    #[error("Concurrent step failed: {step}")]
    FanOutFailure {
        step: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("No {entity} found for {key}")]
    NotFound { entity: String, key: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl QueryError {
    /// True for errors caused by the caller's input rather than by a remote service.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            QueryError::NoParameters { .. }
                | QueryError::UnknownParameter { .. }
                | QueryError::MissingRequired { .. }
                | QueryError::InvalidParameterValue { .. }
        )
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            _ if self.is_caller_error() => ExitCode::InvalidArguments,
            QueryError::NotFound { .. } => ExitCode::NotFound,
            _ => ExitCode::ApplicationError,
        }
    }
}
