//! Command-line interface components
//!
//! Argument parsing, print-section selection, terminal colorization, byte
//! formatting and the download progress meter.

pub mod args;
pub mod color;
pub mod format;
pub mod output;
pub mod progress;

pub use args::{Cli, GlobalArgs};
pub use color::{
    ColorCode, color, colorize_header_dump, colorize_header_line, colorize_json_body,
    colorize_response,
};
pub use format::format_bytes;
pub use output::{
    PrintSection, PrintSelection, colorize_response_head, format_body, response_head_dump,
};
pub use progress::{MultiWriter, ProgressMeter};
