//! Application constants for rurl
//!
//! Centralizes the constants used throughout the application, organized by
//! functional domain.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all requests
    pub const USER_AGENT: &str = concat!("rurl/", env!("CARGO_PKG_VERSION"));

    /// Overall request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum number of redirects to follow
    pub const MAX_REDIRECTS: usize = 10;
}

/// HTTP method names recognized as the leading positional token
pub mod methods {
    /// Case-sensitive match set for the classifier
    pub const KNOWN: &[&str] = &[
        "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "TRACE", "CONNECT",
    ];
}

/// Content-type handling
pub mod content {
    /// Content-Type for JSON-encoded bodies
    pub const JSON: &str = "application/json";

    /// Content-Type for form-encoded bodies
    pub const FORM: &str = "application/x-www-form-urlencoded";

    /// Pattern matching JSON response content types (e.g. application/hal+json)
    pub const JSON_PATTERN: &str = r"application/(.*)json";
}

/// Progress meter rendering
pub mod progress {
    use super::Duration;

    /// Minimum interval between terminal renders
    pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(100);

    /// Width of the proportional bar in characters
    pub const BAR_WIDTH: usize = 40;
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use progress::DEFAULT_REFRESH_RATE;
