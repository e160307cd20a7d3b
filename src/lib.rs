//! # authkey
//!
//! A Rust library for generating CDN-compatible `auth_key` signed URLs.
//!
//! The CDN authorizes access to private image resources by checking an
//! `auth_key` query parameter carrying an expiry timestamp and an MD5
//! digest over the resource path, the expiry, two reserved fields, and a
//! shared secret.
//!
//! ## Quick Start
//!
//! ```rust
//! use authkey::UrlSigner;
//!
//! let signer = UrlSigner::new();
//!
//! // Sign an image URL with the current time as expiry
//! let signed = signer.sign("https://cag-ac.ltfc.net/cagstore/17/1_0.jpg");
//! println!("{}", signed);
//! // Output: https://cag-ac.ltfc.net/cagstore/17/1_0.jpg?auth_key=<expiry>-0-0-<digest>
//!
//! // Non-image URLs pass through untouched
//! assert_eq!(signer.sign("https://example.com/page.html"), "https://example.com/page.html");
//! ```
//!
//! ## URL format
//!
//! Signed URLs follow the format:
//! `<prefix><path>?[<existing-query>&]auth_key=<expiry>-0-0-<32-hex-digest>`
//!
//! Only URLs whose path ends in `.jpeg`, `.jpg`, or `.png` (case-sensitive)
//! are signed; everything else, including empty input, is returned as-is.

mod md5;
mod secret;

pub use md5::digest;

use regex::Regex;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Image URL shape the CDN protects: scheme and host, a path ending in an
/// image extension, and an optional query string.
const IMAGE_URL_PATTERN: &str = r"^(https*://[\w.-]*)(/.*\.(jpeg|jpg|png))\?*(.*)$";

/// Reserved token fields. The scheme defines slots for an access count and
/// an IP binding; this deployment always sends zero for both.
const RESERVED_A: u32 = 0;
const RESERVED_B: u32 = 0;

/// The token carried by the `auth_key` query parameter.
///
/// Renders as `<expiry>-0-0-<digest>` via [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthKey {
    /// Unix-epoch seconds after which the CDN rejects the URL.
    pub expiry: u64,
    /// MD5 digest of the string-to-sign, 32 lowercase hex characters.
    pub digest: String,
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.expiry, RESERVED_A, RESERVED_B, self.digest
        )
    }
}

/// `auth_key` URL signer
///
/// # Example
///
/// ```rust
/// use authkey::UrlSigner;
///
/// let signer = UrlSigner::new();
/// let signed = signer.sign_with_expiry(
///     "https://cag-ac.ltfc.net/cagstore/673df804e7502048b9867b18/17/1_0.jpg",
///     1763383278,
/// );
/// assert!(signed.ends_with("?auth_key=1763383278-0-0-84f75eacab9ddd69491e5391ee185613"));
/// ```
#[derive(Debug, Clone)]
pub struct UrlSigner {
    secret: &'static str,
    pattern: Regex,
}

impl UrlSigner {
    /// Create a signer holding the deployment's fixed secret.
    pub fn new() -> Self {
        Self {
            secret: secret::SIGNING_SECRET,
            pattern: Regex::new(IMAGE_URL_PATTERN).expect("image URL pattern is valid"),
        }
    }

    /// Sign `url` with the current wall-clock time as expiry.
    ///
    /// Empty input and URLs that do not match the protected image pattern
    /// are returned unchanged.
    pub fn sign(&self, url: impl AsRef<str>) -> String {
        self.sign_with_expiry(url, unix_now())
    }

    /// Sign `url` with an explicit expiry timestamp.
    ///
    /// Output is fully deterministic for a given `url` and `expiry`, which
    /// is what the CDN verifier relies on.
    pub fn sign_with_expiry(&self, url: impl AsRef<str>, expiry: u64) -> String {
        let url = url.as_ref();
        if url.is_empty() {
            return url.to_string();
        }

        let Some(caps) = self.pattern.captures(url) else {
            debug!(url, "not a protected image URL, passing through");
            return url.to_string();
        };
        let prefix = &caps[1];
        let path = &caps[2];
        let remainder = &caps[4];

        let key = self.auth_key(path, expiry);
        debug!(path, %key, "signed");

        // An existing query string stays first, joined with '&'.
        if remainder.is_empty() {
            format!("{prefix}{path}?auth_key={key}")
        } else {
            format!("{prefix}{path}?{remainder}&auth_key={key}")
        }
    }

    /// Build the [`AuthKey`] for a resource path and expiry.
    ///
    /// The digest covers `path`, `expiry`, the two reserved zero fields,
    /// and the shared secret, joined by `-`.
    pub fn auth_key(&self, path: &str, expiry: u64) -> AuthKey {
        let string_to_sign = format!(
            "{path}-{expiry}-{RESERVED_A}-{RESERVED_B}-{}",
            self.secret
        );
        AuthKey {
            expiry,
            digest: digest(string_to_sign.as_bytes()),
        }
    }
}

impl Default for UrlSigner {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since the Unix epoch. A clock set before 1970 maps to zero
/// rather than an error path.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Sign a URL with the current time (convenience function)
///
/// This is a shorthand for creating a [`UrlSigner`] and calling
/// [`UrlSigner::sign`].
///
/// # Example
///
/// ```rust
/// let signed = authkey::sign_url("https://cag-ac.ltfc.net/cagstore/17/1_0.jpg");
/// assert!(signed.contains("auth_key="));
/// ```
pub fn sign_url(url: &str) -> String {
    UrlSigner::new().sign(url)
}
