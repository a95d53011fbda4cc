//! Positional argument classification
//!
//! Splits the leftover (post-flag) command-line tokens into method, URL and
//! request items. This is a pure function: no globals, no I/O. The original
//! curl-like convention applies: an explicit method token is honored,
//! otherwise the method is GET for a bare URL and POST as soon as any item
//! follows the URL (items imply a body).

use crate::constants::methods;
use crate::errors::{RequestError, RequestResult};

/// Method, URL and remaining item tokens for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedArgs {
    pub method: String,
    pub url: String,
    pub rest: Vec<String>,
}

/// Classify the positional tokens into `{method, url, rest}`
///
/// Rules:
/// 1. An empty token list is a usage error (`MissingUrl`).
/// 2. A first token that case-sensitively matches a known HTTP method takes
///    the method slot and requires a URL token after it.
/// 3. Otherwise the first token is the URL; the method defaults to GET and
///    is forced to POST when any further tokens are present.
pub fn classify(tokens: &[String]) -> RequestResult<ClassifiedArgs> {
    let (first, remainder) = tokens.split_first().ok_or(RequestError::MissingUrl)?;

    if methods::KNOWN.contains(&first.as_str()) {
        let (url, rest) = remainder.split_first().ok_or(RequestError::MissingUrl)?;
        return Ok(ClassifiedArgs {
            method: first.clone(),
            url: url.clone(),
            rest: rest.to_vec(),
        });
    }

    let method = if remainder.is_empty() { "GET" } else { "POST" };
    Ok(ClassifiedArgs {
        method: method.to_string(),
        url: first.clone(),
        rest: remainder.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classification() {
        let cases = [
            (
                vec!["http://example.com"],
                ("GET", "http://example.com", vec![]),
            ),
            (
                vec!["http://example.com", "key=value"],
                ("POST", "http://example.com", vec!["key=value"]),
            ),
            (
                vec!["POST", "http://example.com"],
                ("POST", "http://example.com", vec![]),
            ),
            (
                vec!["http://example.com", "file@test.txt"],
                ("POST", "http://example.com", vec!["file@test.txt"]),
            ),
            (
                vec!["DELETE", "http://example.com", "key=value"],
                ("DELETE", "http://example.com", vec!["key=value"]),
            ),
        ];

        for (args, (method, url, rest)) in cases {
            let got = classify(&tokens(&args)).unwrap();
            assert_eq!(got.method, method, "args: {:?}", args);
            assert_eq!(got.url, url, "args: {:?}", args);
            assert_eq!(got.rest, tokens(&rest), "args: {:?}", args);
        }
    }

    #[test]
    fn test_method_match_is_case_sensitive() {
        // "get" is not a known method, so it is taken as the URL
        let got = classify(&tokens(&["get", "http://example.com"])).unwrap();
        assert_eq!(got.method, "POST");
        assert_eq!(got.url, "get");
        assert_eq!(got.rest, tokens(&["http://example.com"]));
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(classify(&[]), Err(RequestError::MissingUrl)));
        // Method token with nothing after it
        assert!(matches!(
            classify(&tokens(&["POST"])),
            Err(RequestError::MissingUrl)
        ));
    }
}
