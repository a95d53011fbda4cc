//! Core application components
//!
//! Argument classification, request item parsing, request assembly, HMAC
//! envelope signing, and the HTTP transport layer.

pub mod args;
pub mod client;
pub mod items;
pub mod request;
pub mod signing;

pub use args::{ClassifiedArgs, classify};
pub use client::{ClientOptions, build_client, download_to_file, execute, filename_for};
pub use items::{Item, parse_item};
pub use request::{PrepareOptions, PreparedRequest, normalize_url, prepare};
pub use signing::{SigningAlgorithm, SigningSpec};
