//! Canonical request strings.
//!
//! The canonical string is the newline-joined text the signature covers:
//!
//! ```text
//! <method>
//! <base64(md5(body))>
//! <timestamp>
//! [<forwarded ip>]
//! <api version>
//! <resource path>
//! ```
//!
//! The forwarded-IP line exists only when an address was supplied; it is
//! never emitted empty. There is no trailing newline.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use md5::{Digest, Md5};

use crate::error::{LinkhubError, LinkhubResult};

/// API version sent in `x-lh-version` and covered by the signature.
pub const API_VERSION: &str = "1.0";

/// UTC timestamp layout: second precision, literal `Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render `at` in the wire timestamp layout.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time in the wire timestamp layout.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

/// Parse a wire timestamp.
///
/// Anything other than `YYYY-MM-DDTHH:MM:SSZ` is a configuration error;
/// fractional seconds and offsets are not accepted.
pub fn parse_timestamp(text: &str) -> LinkhubResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| LinkhubError::config(format!("invalid timestamp '{}': {}", text, e)))
}

/// Base64 of the MD5 digest of `body`.
pub fn body_digest(body: &[u8]) -> String {
    BASE64.encode(Md5::digest(body))
}

/// Every input of one signature, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method literal.
    pub method: String,
    /// Base64 MD5 digest of the request body.
    pub body_digest: String,
    /// Wire timestamp.
    pub timestamp: String,
    /// Original client address when the call is proxied.
    pub forwarded_ip: Option<String>,
    /// API version literal.
    pub version: String,
    /// Resource path, starting with `/`.
    pub path: String,
}

impl CanonicalRequest {
    /// Describe a request with the current API version and no forwarded IP.
    pub fn new(
        method: impl Into<String>,
        body: &[u8],
        timestamp: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let digest = Md5::digest(body);
        let request = CanonicalRequest {
            method: method.into(),
            body_digest: BASE64.encode(digest),
            timestamp: timestamp.into(),
            forwarded_ip: None,
            version: API_VERSION.to_string(),
            path: path.into(),
        };
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            timestamp = %request.timestamp,
            body_len = body.len(),
            body_md5 = %hex::encode(digest),
            "canonical request"
        );
        request
    }

    /// Token-issuance request for `service_id`: `POST /<service_id>/Token`.
    pub fn token(service_id: &str, body: &[u8], timestamp: impl Into<String>) -> Self {
        CanonicalRequest::new("POST", body, timestamp, token_path(service_id))
    }

    /// Attach a forwarded client address; `None` leaves the line out.
    pub fn with_forwarded_ip(mut self, forwarded_ip: Option<&str>) -> Self {
        self.forwarded_ip = forwarded_ip.map(str::to_string);
        if let Some(ip) = &self.forwarded_ip {
            tracing::debug!(forwarded_ip = %ip, "forwarded address included in signature");
        }
        self
    }

    /// The newline-joined text the signature is computed over.
    pub fn canonical_string(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(6);
        lines.push(&self.method);
        lines.push(&self.body_digest);
        lines.push(&self.timestamp);
        if let Some(ip) = &self.forwarded_ip {
            lines.push(ip);
        }
        lines.push(&self.version);
        lines.push(&self.path);
        lines.join("\n")
    }
}

/// Signed resource path of the token endpoint.
pub fn token_path(service_id: &str) -> String {
    format!("/{}/Token", service_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BODY: &[u8] = br#"{"access_id":"abc","scope":["a"]}"#;

    #[test]
    fn test_body_digest() {
        assert_eq!(body_digest(BODY), "AN2mtdyndF1q7wW/3x4vTg==");
        assert_eq!(body_digest(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_canonical_string_without_forwarded_ip() {
        let request = CanonicalRequest::token("SVC", BODY, "2024-01-01T00:00:00Z");
        assert_eq!(
            request.canonical_string(),
            "POST\nAN2mtdyndF1q7wW/3x4vTg==\n2024-01-01T00:00:00Z\n1.0\n/SVC/Token"
        );
    }

    #[test]
    fn test_forwarded_ip_inserted_before_version() {
        let request = CanonicalRequest::token("SVC", BODY, "2024-01-01T00:00:00Z")
            .with_forwarded_ip(Some("1.2.3.4"));
        let text = request.canonical_string();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "1.2.3.4");
        assert_eq!(lines[4], "1.0");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_none_forwarded_ip_adds_nothing() {
        let request = CanonicalRequest::token("SVC", BODY, "t").with_forwarded_ip(None);
        assert_eq!(request.canonical_string().lines().count(), 5);
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-01-01T00:00:00Z");
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z").unwrap(), at);
    }

    #[test]
    fn test_timestamp_now_shape() {
        let now = timestamp_now();
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
        assert!(parse_timestamp(&now).is_ok());
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        for text in ["2024-01-01", "2024-01-01T00:00:00.123Z", "2024-01-01T00:00:00+09:00", ""] {
            let err = parse_timestamp(text).unwrap_err();
            assert_eq!(err.name(), "ConfigurationError", "{}", text);
        }
    }
}
