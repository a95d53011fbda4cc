//! rurl library
//!
//! A CLI cURL-like tool for humans. The library side holds argument
//! classification, request building, HMAC envelope signing, and the
//! terminal presentation layer (colorized dumps, byte formatting, download
//! progress).

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert!(USER_AGENT.starts_with("rurl/"));
        assert!(methods::KNOWN.contains(&"GET"));
        assert_eq!(progress::BAR_WIDTH, 40);
    }

    #[test]
    fn test_error_exit_codes() {
        let usage = AppError::Request(errors::RequestError::MissingUrl);
        assert!(usage.is_usage());
        assert_eq!(usage.exit_code(), 2);

        let io = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.exit_code(), 1);
    }
}
