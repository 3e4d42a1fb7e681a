use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Every way a calculation request can fail.
///
/// Parser, engine and upload boundary all report through this one type, so a
/// caller never receives a partial result next to an error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("input contains no data lines")]
    #[diagnostic(
        code(chronicler::empty_input),
        help("Provide at least one line with two integers separated by whitespace")
    )]
    EmptyInput,

    #[error("line {line} is not two columns of integers: {reason}")]
    #[diagnostic(
        code(chronicler::malformed_line),
        help("Each line should look like `3   4`: two whole numbers separated by spaces")
    )]
    MalformedLine {
        line: usize,
        reason: String,
        #[source_code]
        content: String,
        #[label("expected two integers here")]
        span: SourceSpan,
    },

    #[error("invalid format: {0}")]
    #[diagnostic(code(chronicler::invalid_format))]
    InvalidFormat(String),

    #[error("list lengths differ: list1 has {list1} values, list2 has {list2}")]
    #[diagnostic(
        code(chronicler::length_mismatch),
        help("Both lists must contain the same number of values")
    )]
    LengthMismatch { list1: usize, list2: usize },

    #[error("input is {size} bytes, the limit is {limit} bytes")]
    #[diagnostic(code(chronicler::file_too_large))]
    FileTooLarge { size: usize, limit: usize },

    #[error("unsupported file type: {name}")]
    #[diagnostic(code(chronicler::unsupported_type), help("Only .txt files are accepted"))]
    UnsupportedType { name: String },

    #[error("network error: {0}")]
    #[diagnostic(code(chronicler::network))]
    Network(String),

    #[error("request timed out after {after_ms} ms")]
    #[diagnostic(code(chronicler::timeout))]
    Timeout { after_ms: u64 },

    #[error("internal error: {0}")]
    #[diagnostic(code(chronicler::internal))]
    Internal(String),
}

/// Payload-free tag for a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    MalformedLine,
    InvalidFormat,
    LengthMismatch,
    FileTooLarge,
    UnsupportedType,
    Network,
    Timeout,
    Internal,
}

impl ErrorKind {
    /// Stable identifier used in the `code` field of failure responses.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "EMPTY_INPUT",
            ErrorKind::MalformedLine => "MALFORMED_LINE",
            ErrorKind::InvalidFormat => "INVALID_FORMAT",
            ErrorKind::LengthMismatch => "LENGTH_MISMATCH",
            ErrorKind::FileTooLarge => "FILE_TOO_LARGE",
            ErrorKind::UnsupportedType => "UNSUPPORTED_TYPE",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Timeout => "TIMEOUT_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Short message that is safe to show to an end user.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "File is empty or contains no numbers",
            ErrorKind::MalformedLine | ErrorKind::InvalidFormat => {
                "File should contain two columns of numbers separated by spaces"
            }
            ErrorKind::LengthMismatch => "Both columns must contain the same number of values",
            ErrorKind::FileTooLarge => "File is larger than the upload limit",
            ErrorKind::UnsupportedType => "Only .txt files are supported",
            ErrorKind::Network => "Could not reach the server, please try again",
            ErrorKind::Timeout => "The request took too long, please try again",
            ErrorKind::Internal => "Something went wrong while calculating the distance",
        }
    }

    /// Validation failures are deterministic; only transport failures are worth retrying.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Network | ErrorKind::Timeout)
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyInput => ErrorKind::EmptyInput,
            ValidationError::MalformedLine { .. } => ErrorKind::MalformedLine,
            ValidationError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            ValidationError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            ValidationError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            ValidationError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            ValidationError::Network(_) => ErrorKind::Network,
            ValidationError::Timeout { .. } => ErrorKind::Timeout,
            ValidationError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        ValidationError::MalformedLine {
            line,
            reason: reason.into(),
            content: content.to_string(),
            span: (0, content.len()).into(),
        }
    }
}
