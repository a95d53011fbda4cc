//! Exchange rendering and print-section selection
//!
//! Decides which parts of the request/response exchange reach the terminal
//! (`--print`) and turns a `reqwest` response into the dump text the
//! colorizer understands. The status line gets its own colors (protocol in
//! magenta, status in green); header lines share the gray/cyan scheme with
//! request dumps.

use reqwest::Response;

use crate::cli::color::{ColorCode, color, colorize_header_line};

/// One displayable part of the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSection {
    RequestHeaders,
    RequestBody,
    ResponseHeaders,
    ResponseBody,
}

impl PrintSection {
    fn bit(self) -> u8 {
        match self {
            PrintSection::RequestHeaders => 1 << 0,
            PrintSection::RequestBody => 1 << 1,
            PrintSection::ResponseHeaders => 1 << 2,
            PrintSection::ResponseBody => 1 << 3,
        }
    }
}

/// Set of sections to display, parsed from the `--print` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSelection(u8);

impl PrintSelection {
    /// Everything: both headers and both bodies
    pub const ALL: PrintSelection = PrintSelection(0b1111);

    /// Parse the selector string: `A` all, `H` request headers, `B` request
    /// body, `h` response headers, `b` response body
    pub fn parse(selector: &str) -> Self {
        if selector.contains('A') {
            return Self::ALL;
        }
        let mut bits = 0;
        for (flag, section) in [
            ('H', PrintSection::RequestHeaders),
            ('B', PrintSection::RequestBody),
            ('h', PrintSection::ResponseHeaders),
            ('b', PrintSection::ResponseBody),
        ] {
            if selector.contains(flag) {
                bits |= section.bit();
            }
        }
        PrintSelection(bits)
    }

    pub fn contains(self, section: PrintSection) -> bool {
        self.0 & section.bit() != 0
    }
}

/// Build the plain-text head dump of a response
///
/// `HTTP/1.1 200 OK` followed by one `Name: value` line per header, no
/// trailing newline.
pub fn response_head_dump(response: &Response) -> String {
    let mut out = String::new();
    let status = response.status();
    out.push_str(&format!(
        "{:?} {}",
        response.version(),
        match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        }
    ));
    for (name, value) in response.headers() {
        out.push_str(&format!(
            "\n{}: {}",
            name.as_str(),
            value.to_str().unwrap_or("<binary>")
        ));
    }
    out
}

/// Colorize a response head dump: magenta protocol, green status, then the
/// usual gray/cyan header scheme
pub fn colorize_response_head(dump: &str) -> String {
    let mut out = String::with_capacity(dump.len() * 2);
    let mut lines = dump.lines();

    if let Some(first) = lines.next() {
        match first.split_once(' ') {
            Some((proto, status)) => {
                out.push_str(&color(proto, ColorCode::Magenta));
                out.push(' ');
                out.push_str(&color(status, ColorCode::Green));
            }
            None => out.push_str(first),
        }
        out.push('\n');
    }
    for line in lines {
        out.push_str(&colorize_header_line(line));
        out.push('\n');
    }
    out
}

/// Prepare a response body for display: pretty-print JSON when asked
pub fn format_body(text: &str, content_type: &str, pretty: bool) -> String {
    if !pretty || !content_type.contains("json") {
        return text.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string())
        }
        Err(_) => text.to_string(),
    }
}
