//! Command-line argument parsing
//!
//! Defines the CLI surface with clap derive macros. The positional tokens
//! after the flags are passed untouched to the argument classifier.

use clap::{ArgAction, Args, Parser};

/// rurl - a CLI cURL-like tool for humans
#[derive(Parser, Debug)]
#[command(
    name = "rurl",
    version,
    about = "A CLI cURL-like tool for humans",
    long_about = "Issue one HTTP request and render it for a human reading a terminal.

METHOD defaults to GET without request data and POST with it.
The URL scheme defaults to http://; a leading ':' expands to localhost.",
    after_help = "ITEM forms:
  key=value    data field (query string for GET/HEAD)
  key:value    header
  key:=json    data field with a raw JSON value
  key==value   query string parameter

HMAC:
  --hmac names an environment variable holding 'algorithm:header:secret',
  e.g. sha256:x-my-signature:very_secret. The signature of the request body
  is sent under that header. Algorithms: sha1, sha256 (default), sha512."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Submit data items as a form instead of a JSON object
    #[arg(short, long)]
    pub form: bool,

    /// Pretty-print JSON response bodies
    #[arg(
        short,
        long,
        default_value_t = true,
        action = ArgAction::Set,
        value_name = "BOOL"
    )]
    pub pretty: bool,

    /// Download the response body to a file
    #[arg(short, long)]
    pub download: bool,

    /// Allow connections to TLS sites without valid certificates
    #[arg(short, long)]
    pub insecure: bool,

    /// HTTP basic authentication as USER[:PASS]
    #[arg(short, long, value_name = "USER[:PASS]")]
    pub auth: Option<String>,

    /// Proxy host and port
    #[arg(long, value_name = "PROXY_URL")]
    pub proxy: Option<String>,

    /// Sections to print: A all, H request headers, B request body,
    /// h response headers, b response body
    #[arg(long, default_value = "A", value_name = "SECTIONS")]
    pub print: String,

    /// Send raw data as the request body
    #[arg(long, value_name = "DATA")]
    pub body: Option<String>,

    /// Name of the environment variable holding the HMAC signing spec
    #[arg(long, value_name = "ENV_VAR")]
    pub hmac: Option<String>,

    /// [METHOD] URL [ITEM [ITEM]]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Logging verbosity options
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_tokens_pass_through() {
        let cli = Cli::parse_from(["rurl", "POST", "http://example.com", "key=value"]);
        assert_eq!(cli.args, ["POST", "http://example.com", "key=value"]);
        assert!(!cli.form);
        assert!(cli.pretty);
        assert_eq!(cli.print, "A");
    }

    #[test]
    fn test_flags_before_positionals() {
        let cli = Cli::parse_from([
            "rurl",
            "--download",
            "--hmac",
            "HMAC_SPEC",
            "--print",
            "hb",
            "http://example.com/file.bin",
        ]);
        assert!(cli.download);
        assert_eq!(cli.hmac.as_deref(), Some("HMAC_SPEC"));
        assert_eq!(cli.print, "hb");
        assert_eq!(cli.args, ["http://example.com/file.bin"]);
    }

    #[test]
    fn test_pretty_takes_a_value() {
        let cli = Cli::parse_from(["rurl", "--pretty", "false", "http://example.com"]);
        assert!(!cli.pretty);
    }

    #[test]
    fn test_log_level() {
        let quiet = Cli::parse_from(["rurl", "-q", "x"]);
        assert_eq!(quiet.log_level(), tracing::Level::ERROR);

        let verbose = Cli::parse_from(["rurl", "-v", "x"]);
        assert_eq!(verbose.log_level(), tracing::Level::INFO);

        let normal = Cli::parse_from(["rurl", "x"]);
        assert_eq!(normal.log_level(), tracing::Level::WARN);
    }
}
