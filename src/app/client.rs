//! HTTP client construction, execution and download streaming
//!
//! Wraps `reqwest` with the client policy this tool needs (timeouts,
//! redirect cap, optional insecure TLS and proxy) and streams download
//! bodies through a fan-out writer so the destination file and the progress
//! meter see the same bytes.

use std::io::Write;
use std::path::Path;

use futures::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::redirect::Policy;
use reqwest::{Client, Proxy, Response};
use tracing::{debug, info};
use url::Url;

use crate::app::request::PreparedRequest;
use crate::cli::progress::{MultiWriter, ProgressMeter};
use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult, RequestError, RequestResult};

/// Transport-level options from the command line
#[derive(Debug, Default)]
pub struct ClientOptions {
    /// Allow TLS connections without valid certificates
    pub insecure: bool,
    /// Proxy every request through this URL
    pub proxy: Option<String>,
}

/// Build the `reqwest` client with this tool's transport policy
pub fn build_client(options: &ClientOptions) -> RequestResult<Client> {
    let mut builder = Client::builder()
        .user_agent(http::USER_AGENT)
        .timeout(http::DEFAULT_TIMEOUT)
        .connect_timeout(http::CONNECT_TIMEOUT)
        .redirect(Policy::limited(http::MAX_REDIRECTS));

    if options.insecure {
        debug!("TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some(proxy) = &options.proxy {
        let proxy = Proxy::all(proxy).map_err(|_| RequestError::InvalidProxy {
            url: proxy.clone(),
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(RequestError::from)
}

/// Execute a prepared request and return the response
pub async fn execute(client: &Client, prepared: &PreparedRequest) -> RequestResult<Response> {
    let request = prepared.to_reqwest(client)?;
    debug!(method = %prepared.method, url = %prepared.url, "sending request");
    client.execute(request).await.map_err(RequestError::from)
}

/// Pick a destination filename for a download
///
/// Prefers the `filename=` token of a `Content-Disposition` header, then the
/// last non-empty path segment of the final URL, then `index.html`.
pub fn filename_for(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(disposition_filename)
        .or_else(|| path_filename(response.url()))
        .unwrap_or_else(|| "index.html".to_string())
}

/// Extract `filename=` from a Content-Disposition value
fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches(|c| c == '"' || c == '\'' || c == ' ').to_string())
        .filter(|name| !name.is_empty())
}

/// Last non-empty path segment of a URL
fn path_filename(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| segment.to_string())
}

/// Stream the response body into a file while feeding the progress meter
///
/// Each chunk goes through a fan-out writer: the file branch can fail, the
/// meter branch never does. Returns the number of bytes written.
pub async fn download_to_file(
    response: Response,
    destination: &Path,
    meter: &mut ProgressMeter,
) -> DownloadResult<u64> {
    let mut file =
        std::fs::File::create(destination).map_err(|source| DownloadError::FileCreate {
            path: destination.display().to_string(),
            source,
        })?;

    meter.start();
    let mut stream = response.bytes_stream();
    {
        let mut sinks = MultiWriter::new(vec![&mut file, meter]);
        while let Some(chunk) = stream.next().await {
            sinks.write_all(&chunk?)?;
        }
        sinks.flush()?;
    }
    meter.finish();

    let written = meter.current();
    info!(bytes = written, path = %destination.display(), "download complete");
    Ok(written)
}
