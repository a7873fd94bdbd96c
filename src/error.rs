//! Application error types.
//!
//! Covers the corpus pipeline's recoverable conditions (missing assets,
//! undecodable files, unresolvable names, absent chapters) and the backend
//! client's failure modes. Pipeline conditions are handled at the boundary
//! where they occur — callers fall back to synthesized content rather than
//! propagating them to the presentation layer.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Source asset fetch failed (non-OK status or unreadable file)
    #[error("Source asset {filename} unavailable")]
    AssetUnavailable {
        /// Name of the source file that could not be fetched.
        filename: String,
        /// HTTP status code, if the fetch was over HTTP.
        status: Option<u16>,
    },

    /// Both encoding attempts failed or produced empty text
    #[error("Could not decode {filename} as EUC-KR or UTF-8")]
    DecodeFailure {
        /// Name of the source file that could not be decoded.
        filename: String,
    },

    /// Filename did not match the corpus naming convention
    #[error("Filename {filename} does not match the corpus naming convention")]
    UnresolvedName {
        /// The offending filename.
        filename: String,
    },

    /// Requested book is not in the catalog
    #[error("Book {book} is not in the catalog")]
    BookNotFound {
        /// The requested book identifier.
        book: String,
    },

    /// Requested chapter is absent from a parsed book
    #[error("Chapter {chapter} not found in {book}")]
    ChapterNotFound {
        /// The book identifier.
        book: String,
        /// The requested chapter number.
        chapter: u32,
    },

    /// Backend store error with status context
    #[error("Backend error: {message}")]
    Backend {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    #[allow(dead_code)]
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an asset-unavailable error without HTTP context
    pub fn asset(filename: impl Into<String>) -> Self {
        Self::AssetUnavailable {
            filename: filename.into(),
            status: None,
        }
    }

    /// Create an asset-unavailable error from an HTTP status
    pub fn asset_status(filename: impl Into<String>, status: u16) -> Self {
        Self::AssetUnavailable {
            filename: filename.into(),
            status: Some(status),
        }
    }

    /// Create a backend error with optional status and hint
    #[allow(dead_code)]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a backend error with HTTP status
    pub fn backend_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check SUPABASE_URL and SUPABASE_ANON_KEY environment variables"),
            403 => Some("The anon key may lack row-level security access to this table"),
            404 => Some("The requested resource was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Backend server error - try again later"),
            _ => None,
        };
        Self::Backend {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether this error is a recoverable per-file load condition.
    ///
    /// Fetch failure and decode failure are treated identically: both trigger
    /// synthesized fallback content for the affected book instead of failing
    /// the batch.
    pub const fn is_recoverable_load_failure(&self) -> bool {
        matches!(
            self,
            Self::AssetUnavailable { .. } | Self::DecodeFailure { .. } | Self::Io { .. } | Self::Network(_)
        )
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
