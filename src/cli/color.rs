//! ANSI colorization of terminal output
//!
//! Pure string transformations: wrapping text in bright-foreground escape
//! codes and recoloring structured text (HTTP header dumps, flat JSON
//! bodies). Callers only route text through here when stdout is an
//! interactive terminal; non-interactive output bypasses this module
//! entirely. Malformed input is handled best-effort: worst case is an
//! imperfectly colorized line, never a panic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::content;

static JSON_CONTENT_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(content::JSON_PATTERN).expect("content-type pattern is valid"));

/// Terminal color identifiers, 1:1 with ANSI bright foreground codes 90-97
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Gray = 90,
    Red = 91,
    Green = 92,
    Yellow = 93,
    Blue = 94,
    Magenta = 95,
    Cyan = 96,
    White = 97,
}

/// Wrap `text` in the escape sequence for `code`, followed by a reset
pub fn color(text: &str, code: ColorCode) -> String {
    format!("\x1b[{}m{}\x1b[0m", code as u8, text)
}

/// Recolor one `Name: Value` header line, splitting at the first colon only
pub fn colorize_header_line(line: &str) -> String {
    match line.split_once(':') {
        Some((name, value)) => format!(
            "{}:{}",
            color(name, ColorCode::Gray),
            color(value, ColorCode::Cyan)
        ),
        None => line.to_string(),
    }
}

/// Recolor a request/status dump: first line verbatim, header lines colored
///
/// The input's first line is a request or status line and is reproduced
/// unchanged; every following line is treated as a header pair. Output lines
/// always end in a newline, whether or not the input carried one.
pub fn colorize_header_dump(dump: &str) -> String {
    let mut out = String::with_capacity(dump.len() * 2);
    let mut lines = dump.lines();

    if let Some(first) = lines.next() {
        out.push_str(first);
        out.push('\n');
    }
    for line in lines {
        out.push_str(&colorize_header_line(line));
        out.push('\n');
    }
    out
}

/// How a JSON string token relates to the colon next to it
enum StringRole {
    Key,
    Value,
    Other,
}

/// Recolor a flat JSON object: keys in magenta, values in cyan
///
/// Structural characters (braces, colons, quotes) are left untouched and a
/// trailing newline is appended. Strings not adjacent to a colon are passed
/// through, so nested or non-string input comes out structurally intact.
pub fn colorize_json_body(json: &str) -> String {
    let bytes = json.as_bytes();
    let mut out = String::with_capacity(json.len() * 2);
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'"' {
            match string_end(bytes, i) {
                Some(end) => {
                    let content = &json[i + 1..end];
                    out.push('"');
                    match string_role(bytes, i, end) {
                        StringRole::Key => out.push_str(&color(content, ColorCode::Magenta)),
                        StringRole::Value => out.push_str(&color(content, ColorCode::Cyan)),
                        StringRole::Other => out.push_str(content),
                    }
                    out.push('"');
                    i = end + 1;
                    continue;
                }
                None => {
                    // unterminated string: give up on coloring the rest
                    out.push_str(&json[i..]);
                    break;
                }
            }
        }
        let next_quote = json[i..].find('"').map_or(json.len(), |offset| i + offset);
        out.push_str(&json[i..next_quote]);
        i = next_quote;
    }

    out.push('\n');
    out
}

/// Recolor a response body according to its content type
///
/// JSON content types route through the JSON colorizer; anything else is
/// passed through with a trailing newline.
pub fn colorize_response(body: &str, content_type: &str) -> String {
    if JSON_CONTENT_TYPE.is_match(content_type) {
        colorize_json_body(body)
    } else {
        let mut out = body.to_string();
        out.push('\n');
        out
    }
}

/// Index of the closing quote for a string starting at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Classify a string token by the first non-whitespace byte on either side
fn string_role(bytes: &[u8], start: usize, end: usize) -> StringRole {
    let after = bytes[end + 1..]
        .iter()
        .find(|b| !b.is_ascii_whitespace());
    if after == Some(&b':') {
        return StringRole::Key;
    }

    let before = bytes[..start]
        .iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace());
    if before == Some(&b':') {
        return StringRole::Value;
    }

    StringRole::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_wrapping() {
        assert_eq!(color("test", ColorCode::Gray), "\x1b[90mtest\x1b[0m");
        assert_eq!(color("test", ColorCode::Magenta), "\x1b[95mtest\x1b[0m");
        assert_eq!(color("test", ColorCode::White), "\x1b[97mtest\x1b[0m");
    }

    #[test]
    fn test_colorize_header_dump() {
        let input = "GET /path HTTP/1.1\nHost: example.com";
        let expected = "GET /path HTTP/1.1\n\x1b[90mHost\x1b[0m:\x1b[96m example.com\x1b[0m\n";
        assert_eq!(colorize_header_dump(input), expected);
    }

    #[test]
    fn test_colorize_header_dump_splits_first_colon_only() {
        let input = "HTTP/1.1 200 OK\nLocation: http://example.com";
        let got = colorize_header_dump(input);
        assert!(got.contains("\x1b[90mLocation\x1b[0m:\x1b[96m http://example.com\x1b[0m"));
    }

    #[test]
    fn test_colorize_header_dump_passes_odd_lines_through() {
        let input = "HTTP/1.1 200 OK\nnot a header line";
        assert_eq!(
            colorize_header_dump(input),
            "HTTP/1.1 200 OK\nnot a header line\n"
        );
    }

    #[test]
    fn test_colorize_header_dump_tolerates_trailing_newline() {
        assert_eq!(colorize_header_dump("GET / HTTP/1.1\n"), "GET / HTTP/1.1\n");
        assert_eq!(colorize_header_dump(""), "");
    }

    #[test]
    fn test_colorize_json_body() {
        let input = r#"{"key": "value"}"#;
        let expected = "{\"\x1b[95mkey\x1b[0m\": \"\x1b[96mvalue\x1b[0m\"}\n";
        assert_eq!(colorize_json_body(input), expected);
    }

    #[test]
    fn test_colorize_json_body_multiple_pairs() {
        let input = r#"{"a": "1", "b": "2"}"#;
        let got = colorize_json_body(input);
        assert_eq!(
            got,
            "{\"\x1b[95ma\x1b[0m\": \"\x1b[96m1\x1b[0m\", \"\x1b[95mb\x1b[0m\": \"\x1b[96m2\x1b[0m\"}\n"
        );
    }

    #[test]
    fn test_colorize_json_body_handles_escaped_quotes() {
        let input = r#"{"key": "a \"quoted\" value"}"#;
        let got = colorize_json_body(input);
        assert_eq!(
            got,
            "{\"\x1b[95mkey\x1b[0m\": \"\x1b[96ma \\\"quoted\\\" value\x1b[0m\"}\n"
        );
    }

    #[test]
    fn test_colorize_json_body_leaves_array_strings_alone() {
        // strings inside an array are neither keys nor values of a flat object
        let input = r#"{"tags": ["x", "y"]}"#;
        let got = colorize_json_body(input);
        assert_eq!(
            got,
            "{\"\x1b[95mtags\x1b[0m\": [\"x\", \"y\"]}\n"
        );
    }

    #[test]
    fn test_colorize_json_body_never_corrupts_structure() {
        let inputs = [
            r#"{"key": "value"}"#,
            r#"{"nested": {"inner": "v"}}"#,
            r#"{"n": 42, "b": true}"#,
        ];
        for input in inputs {
            let colored = colorize_json_body(input);
            let stripped = colored
                .replace("\x1b[95m", "")
                .replace("\x1b[96m", "")
                .replace("\x1b[0m", "");
            assert_eq!(stripped.trim_end(), input, "input: {}", input);
        }
    }

    #[test]
    fn test_colorize_json_body_survives_malformed_input() {
        // unterminated string must not panic or lose bytes
        let input = r#"{"key": "unterminated"#;
        let got = colorize_json_body(input);
        assert!(got.ends_with("\"unterminated\n"));
    }

    #[test]
    fn test_colorize_response_dispatch() {
        assert_eq!(
            colorize_response("plain text", "text/plain"),
            "plain text\n"
        );
        let json = colorize_response(r#"{"k": "v"}"#, "application/json");
        assert!(json.contains("\x1b[95mk\x1b[0m"));
        let hal = colorize_response(r#"{"k": "v"}"#, "application/hal+json");
        assert!(hal.contains("\x1b[95mk\x1b[0m"));
    }
}
