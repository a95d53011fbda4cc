//! Error types for rurl
//!
//! Errors are split by domain: building and sending the request, and
//! streaming a response body to disk. A top-level `AppError` wraps both for
//! the binary entry point. An invalid HMAC signing specification is *not* an
//! error anywhere in this crate: it silently disables signing.

use thiserror::Error;

/// Errors raised while classifying arguments and building or sending a request
#[derive(Error, Debug)]
pub enum RequestError {
    /// No URL given on the command line
    #[error("no URL given")]
    MissingUrl,

    /// URL could not be parsed after shorthand expansion
    #[error("invalid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Method token could not be turned into an HTTP method
    #[error("invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// Request item matched none of the known separators
    #[error("invalid item: {item:?}. Expected key=value, key:value, key:=json or key==value")]
    InvalidItem { item: String },

    /// File-upload items (key@path) are recognized but not supported
    #[error("file upload items are not supported: {item:?}")]
    UnsupportedItem { item: String },

    /// Raw JSON item value (key:=value) failed to parse
    #[error("invalid JSON value for item {key:?}")]
    InvalidJsonValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Header item produced an invalid header name or value
    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    /// Proxy URL rejected by the HTTP client
    #[error("invalid proxy URL: {url}")]
    InvalidProxy { url: String },

    /// Request body could not be JSON-encoded
    #[error("failed to encode request body")]
    BodyEncoding(#[from] serde_json::Error),

    /// Transport-level failure from the HTTP client
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
}

/// Errors raised while saving a response body to a file
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Destination file could not be created
    #[error("cannot create file: {path}")]
    FileCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a body chunk to the destination failed
    #[error("cannot write response body to file")]
    Io(#[from] std::io::Error),

    /// The body stream failed mid-transfer
    #[error("response body stream failed")]
    Http(#[from] reqwest::Error),
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for errors that should show usage instead of a plain message
    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::Request(RequestError::MissingUrl))
    }

    /// Process exit status for this error (usage errors exit 2)
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() { 2 } else { 1 }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Request-phase result type alias
pub type RequestResult<T> = std::result::Result<T, RequestError>;

/// Download-phase result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;
