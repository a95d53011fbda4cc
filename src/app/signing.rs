//! HMAC envelope signing of request bodies
//!
//! A signing specification is read from a single environment variable as
//! `algorithm:header-name:secret` and, when valid, produces an HTTP header
//! value authenticating the body, in the style of GitHub and GitLab webhook
//! signatures (`sha256=<hex digest>`).
//!
//! Invalid specifications never raise: they leave the spec disabled and the
//! request goes out unsigned. Disabled is a valid, silent terminal state.
//!
//! Signing must happen only after the body is fully assembled (flag, items
//! or stdin) and before the request is sent.

use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use regex::Regex;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Header names must look like RFC-style extension headers
static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^x-[a-z0-9_-]+$").expect("header pattern is valid"));

/// Restricted set of signing algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl SigningAlgorithm {
    /// Label used as the digest prefix in the header value
    pub fn label(self) -> &'static str {
        match self {
            SigningAlgorithm::Sha1 => "sha1",
            SigningAlgorithm::Sha256 => "sha256",
            SigningAlgorithm::Sha512 => "sha512",
        }
    }
}

/// Validated signing parameters with an overall enabled flag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SigningSpec {
    pub enabled: bool,
    pub algorithm: SigningAlgorithm,
    pub header: String,
    pub secret: String,
}

impl SigningSpec {
    /// Parse a colon-delimited `algorithm:header:secret` specification
    ///
    /// The spec is enabled only when all three fields are present and valid.
    /// Unknown or empty algorithm names fall through to SHA-256; `sha1` and
    /// `sha512` are recognized by exact match.
    pub fn parse(raw: &str) -> Self {
        let fields: Vec<&str> = raw.split(':').collect();
        let [algorithm, header, secret] = fields[..] else {
            return SigningSpec::default();
        };

        let algorithm = match algorithm {
            "sha1" => SigningAlgorithm::Sha1,
            "sha512" => SigningAlgorithm::Sha512,
            _ => SigningAlgorithm::Sha256,
        };

        if !HEADER_PATTERN.is_match(header) || secret.is_empty() {
            return SigningSpec::default();
        }

        SigningSpec {
            enabled: true,
            algorithm,
            header: header.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Compute the envelope header value for a finalized body
    ///
    /// Returns `None` when the spec is disabled, otherwise
    /// `<algorithm>=<lowercase hex digest>`.
    pub fn sign(&self, body: &[u8]) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let secret = self.secret.as_bytes();
        let digest = match self.algorithm {
            SigningAlgorithm::Sha1 => {
                let mut mac = Hmac::<Sha1>::new_from_slice(secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
            SigningAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
            SigningAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(body);
                hex::encode(mac.finalize().into_bytes())
            }
        };

        Some(format!("{}={}", self.algorithm.label(), digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cases = [
            ("empty string", "", SigningSpec::default()),
            ("insufficient fields", "a:h", SigningSpec::default()),
            ("missing secret", "a:h::", SigningSpec::default()),
            ("excessive fields", "a:h:s:garbage", SigningSpec::default()),
            ("empty secret", "sha256:x-sig:", SigningSpec::default()),
            ("bad header pattern", "sha256:content-type:s", SigningSpec::default()),
            (
                "plain example",
                "sha512:x-hub-signature:squirrel",
                SigningSpec {
                    enabled: true,
                    algorithm: SigningAlgorithm::Sha512,
                    header: "x-hub-signature".to_string(),
                    secret: "squirrel".to_string(),
                },
            ),
            (
                "fall-through defaults",
                ":x-lol:squirrel",
                SigningSpec {
                    enabled: true,
                    algorithm: SigningAlgorithm::Sha256,
                    header: "x-lol".to_string(),
                    secret: "squirrel".to_string(),
                },
            ),
        ];

        for (name, input, want) in cases {
            assert_eq!(SigningSpec::parse(input), want, "case: {}", name);
        }
    }

    #[test]
    fn test_header_pattern_case_insensitive() {
        let spec = SigningSpec::parse("sha1:X-Hub-Signature:s");
        assert!(spec.enabled);
        assert_eq!(spec.algorithm, SigningAlgorithm::Sha1);
        assert_eq!(spec.header, "X-Hub-Signature");
    }

    #[test]
    fn test_sign_known_vectors() {
        // printf 'content' | openssl dgst -sha256 -hmac squirrel
        let sha256 = SigningSpec::parse("sha256:x-sig:squirrel");
        assert_eq!(
            sha256.sign(b"content").unwrap(),
            "sha256=82134a1023b182184567609ca9c7dd1c3f0c875fbfff9ad876664f78d5ec2f8d"
        );

        let sha512 = SigningSpec::parse("sha512:x-sig:squirrel");
        assert_eq!(
            sha512.sign(b"content").unwrap(),
            "sha512=f0a6e25b31bccdfcf75ab00918838c2fcf7d5c6c498da23fbf09276f375d0d38d4f18c06ffb3f02e6e4123040b2b6845f96b5afc6b071648d5909e33e4bb430f"
        );
    }

    #[test]
    fn test_sign_disabled_returns_none() {
        assert_eq!(SigningSpec::default().sign(b"content"), None);
        assert_eq!(SigningSpec::parse("bad").sign(b"content"), None);
    }
}
