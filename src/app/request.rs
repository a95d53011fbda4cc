//! Request assembly
//!
//! Turns classified arguments plus CLI options into a fully prepared
//! request: normalized URL, headers, encoded body and, last of all, the HMAC
//! envelope header. The body is finalized (items, `--body` flag or piped
//! stdin) before the signature is computed; signing a partial body would be
//! a correctness violation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use tracing::debug;
use url::Url;

use crate::app::args::ClassifiedArgs;
use crate::app::items::{Item, parse_item};
use crate::app::signing::SigningSpec;
use crate::constants::{content, http};
use crate::errors::{RequestError, RequestResult};

/// Options influencing body encoding and credentials
#[derive(Debug, Default)]
pub struct PrepareOptions<'a> {
    /// Encode data items as a form instead of a JSON object
    pub form: bool,
    /// Raw body from the `--body` flag
    pub raw_body: Option<&'a str>,
    /// Body piped in on stdin; overrides items and the raw body
    pub stdin_body: Option<Vec<u8>>,
    /// Basic-auth credentials as `USER[:PASS]`
    pub auth: Option<&'a str>,
    /// Envelope signing specification (disabled spec means "do not sign")
    pub signing: SigningSpec,
}

/// A request ready to hand to the HTTP client, inspectable for dumping
#[derive(Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Expand URL shorthand and parse
///
/// `:` becomes `http://localhost/`, `:3000` becomes `http://localhost:3000`,
/// `:/path` becomes `http://localhost/path`, and a missing scheme defaults
/// to `http://`.
pub fn normalize_url(raw: &str) -> RequestResult<Url> {
    let expanded = if let Some(rest) = raw.strip_prefix(':') {
        if rest.is_empty() {
            "http://localhost/".to_string()
        } else if rest.starts_with('/') {
            format!("http://localhost{}", rest)
        } else {
            format!("http://localhost:{}", rest)
        }
    } else if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    Url::parse(&expanded).map_err(|source| RequestError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Build a [`PreparedRequest`] from classified arguments
pub fn prepare(args: &ClassifiedArgs, options: PrepareOptions) -> RequestResult<PreparedRequest> {
    let method = Method::from_bytes(args.method.as_bytes()).map_err(|_| {
        RequestError::InvalidMethod {
            method: args.method.clone(),
        }
    })?;
    let mut url = normalize_url(&args.url)?;
    let mut headers = HeaderMap::new();

    // GET and HEAD carry no body, so their data items address the query string
    let data_to_query = method == Method::GET || method == Method::HEAD;

    let mut json_fields = serde_json::Map::new();
    let mut form_fields: Vec<(String, String)> = Vec::new();

    for token in &args.rest {
        match parse_item(token)? {
            Item::Header(name, value) => {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
                let value = HeaderValue::from_str(&value)
                    .map_err(|_| RequestError::InvalidHeader {
                        name: name.to_string(),
                    })?;
                headers.append(name, value);
            }
            Item::Query(key, value) => {
                url.query_pairs_mut().append_pair(&key, &value);
            }
            Item::Data(key, value) => {
                if data_to_query {
                    url.query_pairs_mut().append_pair(&key, &value);
                } else if options.form {
                    form_fields.push((key, value));
                } else {
                    json_fields.insert(key, serde_json::Value::String(value));
                }
            }
            Item::RawJson(key, value) => {
                if options.form {
                    // form values are plain strings; serialize compactly
                    form_fields.push((key, value.to_string()));
                } else {
                    json_fields.insert(key, value);
                }
            }
        }
    }

    // Body precedence: piped stdin, then --body, then encoded items
    let (body, body_content_type): (Vec<u8>, Option<&str>) =
        if let Some(stdin) = options.stdin_body {
            (stdin, None)
        } else if let Some(raw) = options.raw_body {
            (raw.as_bytes().to_vec(), None)
        } else if options.form && !form_fields.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&form_fields)
                .finish();
            (encoded.into_bytes(), Some(content::FORM))
        } else if !json_fields.is_empty() {
            let value = serde_json::Value::Object(json_fields);
            (serde_json::to_vec(&value)?, Some(content::JSON))
        } else {
            (Vec::new(), None)
        };

    if let Some(content_type) = body_content_type {
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(content_type));
    }
    if !options.form {
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static(content::JSON));
    }
    headers
        .entry(USER_AGENT)
        .or_insert(HeaderValue::from_static(http::USER_AGENT));

    if let Some(auth) = options.auth {
        let credentials = match auth.split_once(':') {
            Some((user, password)) => format!("{}:{}", user, password),
            None => format!("{}:", auth),
        };
        let value = format!("Basic {}", BASE64.encode(credentials));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(|_| RequestError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            })?,
        );
    }

    // The body is final from here on: apply the envelope signature
    if let Some(signature) = options.signing.sign(&body) {
        debug!(header = %options.signing.header, "signing request body");
        let name = HeaderName::from_bytes(options.signing.header.as_bytes()).map_err(|_| {
            RequestError::InvalidHeader {
                name: options.signing.header.clone(),
            }
        })?;
        let value =
            HeaderValue::from_str(&signature).map_err(|_| RequestError::InvalidHeader {
                name: options.signing.header.clone(),
            })?;
        headers.insert(name, value);
    }

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}

impl PreparedRequest {
    /// Render the request line and headers as a plain-text dump
    ///
    /// `METHOD /path?query HTTP/1.1` followed by one `Name: value` line per
    /// header, Host first, no trailing newline. This is the text later fed
    /// through the header-dump colorizer.
    pub fn dump_headers(&self) -> String {
        let mut out = String::new();
        let target = match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        };
        out.push_str(&format!("{} {} HTTP/1.1", self.method, target));

        if let Some(host) = self.url.host_str() {
            let host = match self.url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            out.push_str(&format!("\nHost: {}", host));
        }
        for (name, value) in &self.headers {
            out.push_str(&format!(
                "\n{}: {}",
                canonical_name(name.as_str()),
                value.to_str().unwrap_or("<binary>")
            ));
        }
        out
    }

    /// Body as text for terminal display (lossy for non-UTF-8 bodies)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Convert into a sendable `reqwest` request
    pub fn to_reqwest(&self, client: &reqwest::Client) -> RequestResult<reqwest::Request> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        if !self.body.is_empty() {
            builder = builder.body(self.body.clone());
        }
        builder.build().map_err(RequestError::from)
    }
}

/// Canonicalize a header name for display: `user-agent` -> `User-Agent`
fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
