//! rurl CLI application
//!
//! One-shot HTTP client for humans: classify the positional arguments,
//! build and optionally sign the request, execute it, then either render
//! the exchange on the terminal or stream the body to a file behind a
//! progress meter.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use clap::CommandFactory;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use rurl::app::{self, ClientOptions, PrepareOptions, SigningSpec};
use rurl::cli::{self, Cli, PrintSection, PrintSelection, ProgressMeter};
use rurl::errors::{RequestError, Result};

#[tokio::main]
async fn main() {
    // Load environment variables from .env if present; the HMAC spec may
    // live there
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        if e.is_usage() {
            let _ = Cli::command().print_help();
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    info!("rurl v{} starting", env!("CARGO_PKG_VERSION"));

    let classified = app::classify(&cli.args)?;
    let selection = PrintSelection::parse(&cli.print);

    let signing = match &cli.hmac {
        Some(var) => SigningSpec::parse(&std::env::var(var).unwrap_or_default()),
        None => SigningSpec::default(),
    };

    let stdin_body = read_stdin_body()?;
    let prepared = app::prepare(
        &classified,
        PrepareOptions {
            form: cli.form,
            raw_body: cli.body.as_deref(),
            stdin_body,
            auth: cli.auth.as_deref(),
            signing,
        },
    )?;

    let client = app::build_client(&ClientOptions {
        insecure: cli.insecure,
        proxy: cli.proxy.clone(),
    })?;
    let is_tty = atty::is(atty::Stream::Stdout);

    if is_tty && !cli.download {
        if selection.contains(PrintSection::RequestHeaders) {
            println!("{}", cli::colorize_header_dump(&prepared.dump_headers()));
        }
        if selection.contains(PrintSection::RequestBody) && !prepared.body.is_empty() {
            println!("{}", prepared.body_text());
            println!();
        }
    }

    let response = app::execute(&client, &prepared).await?;

    if cli.download {
        return download(response, is_tty).await;
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let head_dump = cli::response_head_dump(&response);
    let body = response.text().await.map_err(RequestError::from)?;
    let formatted = cli::format_body(&body, &content_type, cli.pretty);

    if is_tty {
        if selection.contains(PrintSection::ResponseHeaders) {
            println!("{}", cli::colorize_response_head(&head_dump));
        }
        if selection.contains(PrintSection::ResponseBody) {
            print!("{}", cli::colorize_response(&formatted, &content_type));
        }
    } else {
        io::stdout().write_all(formatted.as_bytes())?;
    }
    Ok(())
}

/// Stream the response body to a file named after the response
async fn download(response: reqwest::Response, is_tty: bool) -> Result<()> {
    let head_dump = cli::response_head_dump(&response);
    if is_tty {
        println!("{}", cli::colorize_response_head(&head_dump));
    } else {
        println!("{}", head_dump);
        println!();
    }

    let total = response.content_length().unwrap_or(0);
    let filename = app::filename_for(&response);
    println!("Downloading to \"{}\"", filename);

    let mut meter = ProgressMeter::new(total);
    meter.set_visible(is_tty);
    app::download_to_file(response, Path::new(&filename), &mut meter).await?;
    Ok(())
}

/// Read a piped request body from stdin
///
/// Interactive stdin is never read; an empty pipe counts as no body.
fn read_stdin_body() -> io::Result<Option<Vec<u8>>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(if buffer.is_empty() { None } else { Some(buffer) })
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("rurl={}", log_level).parse().unwrap());

    // Diagnostics go to stderr so piped stdout stays clean
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(io::stderr)
        .init();
}
