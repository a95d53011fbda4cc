//! Request item parsing
//!
//! Each remaining positional token after the URL is an "item" destined for
//! the request body, query string or headers:
//!
//! - `key=value`   data field (body, or query string for GET/HEAD)
//! - `key:value`   header
//! - `key:=value`  data field with a raw JSON value
//! - `key==value`  query string parameter
//! - `key@path`    file upload (recognized, rejected as unsupported)
//!
//! The earliest separator in the token wins, with the two-character
//! separators checked first at each position so `key:=1` is a JSON item and
//! not a header named `key` with value `=1`.

use crate::errors::{RequestError, RequestResult};

/// A single parsed request item
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Body data field
    Data(String, String),
    /// HTTP header
    Header(String, String),
    /// Body data field with a typed JSON value
    RawJson(String, serde_json::Value),
    /// Query string parameter
    Query(String, String),
}

const SEPARATORS: [&str; 5] = [":=", "==", "=", ":", "@"];

/// Parse one token into an [`Item`]
pub fn parse_item(token: &str) -> RequestResult<Item> {
    let (key, separator, value) =
        split_item(token).ok_or_else(|| RequestError::InvalidItem {
            item: token.to_string(),
        })?;

    match separator {
        ":=" => {
            let value =
                serde_json::from_str(value).map_err(|source| RequestError::InvalidJsonValue {
                    key: key.to_string(),
                    source,
                })?;
            Ok(Item::RawJson(key.to_string(), value))
        }
        "==" => Ok(Item::Query(key.to_string(), value.to_string())),
        "=" => Ok(Item::Data(key.to_string(), value.to_string())),
        ":" => Ok(Item::Header(key.to_string(), value.to_string())),
        _ => Err(RequestError::UnsupportedItem {
            item: token.to_string(),
        }),
    }
}

/// Find the earliest separator, requiring a non-empty key before it
fn split_item(token: &str) -> Option<(&str, &str, &str)> {
    for (index, _) in token.char_indices().skip(1) {
        for separator in SEPARATORS {
            if token[index..].starts_with(separator) {
                return Some((
                    &token[..index],
                    separator,
                    &token[index + separator.len()..],
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_kinds() {
        assert_eq!(
            parse_item("name=john").unwrap(),
            Item::Data("name".into(), "john".into())
        );
        assert_eq!(
            parse_item("x-api-key:secret").unwrap(),
            Item::Header("x-api-key".into(), "secret".into())
        );
        assert_eq!(
            parse_item("count:=3").unwrap(),
            Item::RawJson("count".into(), json!(3))
        );
        assert_eq!(
            parse_item("page==2").unwrap(),
            Item::Query("page".into(), "2".into())
        );
    }

    #[test]
    fn test_separator_precedence() {
        // ":=" wins over ":" at the same position
        assert_eq!(
            parse_item("tags:=[\"a\",\"b\"]").unwrap(),
            Item::RawJson("tags".into(), json!(["a", "b"]))
        );
        // "==" wins over "=" at the same position
        assert_eq!(
            parse_item("q==a=b").unwrap(),
            Item::Query("q".into(), "a=b".into())
        );
        // earliest separator wins across positions
        assert_eq!(
            parse_item("a=b:c").unwrap(),
            Item::Data("a".into(), "b:c".into())
        );
    }

    #[test]
    fn test_value_may_contain_at_sign() {
        assert_eq!(
            parse_item("email=user@example.com").unwrap(),
            Item::Data("email".into(), "user@example.com".into())
        );
    }

    #[test]
    fn test_file_upload_rejected() {
        assert!(matches!(
            parse_item("file@test.txt"),
            Err(RequestError::UnsupportedItem { .. })
        ));
    }

    #[test]
    fn test_invalid_items() {
        assert!(matches!(
            parse_item("noseparator"),
            Err(RequestError::InvalidItem { .. })
        ));
        // separator at position zero means an empty key
        assert!(matches!(
            parse_item("=value"),
            Err(RequestError::InvalidItem { .. })
        ));
        assert!(matches!(
            parse_item("count:=not-json"),
            Err(RequestError::InvalidJsonValue { .. })
        ));
    }
}
