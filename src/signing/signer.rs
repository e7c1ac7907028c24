//! HMAC-SHA1 request signer.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::canonical::CanonicalRequest;
use crate::error::{LinkhubError, LinkhubResult};

type HmacSha1 = Hmac<Sha1>;

/// Authorization scheme of signed requests.
pub const AUTH_SCHEME: &str = "LINKHUB";

/// Header carrying the request timestamp.
pub const HEADER_DATE: &str = "x-lh-date";
/// Header carrying the API version.
pub const HEADER_VERSION: &str = "x-lh-version";
/// Header carrying the forwarded client address.
pub const HEADER_FORWARDED: &str = "x-lh-forwarded";
/// Standard authorization header.
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Signs canonical requests for one link id.
///
/// The secret is decoded and keyed once at construction; signing clones the
/// keyed state, so a `Signer` can be shared across threads.
#[derive(Clone)]
pub struct Signer {
    link_id: String,
    mac: HmacSha1,
}

impl Signer {
    /// Build a signer from a link id and a Base64 secret key.
    ///
    /// Empty credentials and secrets that are not valid Base64 are
    /// configuration errors.
    pub fn new(link_id: &str, secret_key: &str) -> LinkhubResult<Self> {
        if link_id.is_empty() {
            return Err(LinkhubError::config("link id is empty"));
        }
        if secret_key.is_empty() {
            return Err(LinkhubError::config("secret key is empty"));
        }
        let key = BASE64
            .decode(secret_key)
            .map_err(|e| LinkhubError::config(format!("secret key is not valid base64: {}", e)))?;
        let mac = HmacSha1::new_from_slice(&key)
            .map_err(|e| LinkhubError::config(format!("secret key rejected: {}", e)))?;
        Ok(Signer {
            link_id: link_id.to_string(),
            mac,
        })
    }

    /// Link id the signatures are issued for.
    pub fn link_id(&self) -> &str {
        &self.link_id
    }

    /// Base64 HMAC-SHA1 over the canonical string of `request`.
    pub fn sign(&self, request: &CanonicalRequest) -> String {
        let mut mac = self.mac.clone();
        mac.update(request.canonical_string().as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// `Authorization` header value: `LINKHUB <link id> <signature>`.
    pub fn authorization(&self, request: &CanonicalRequest) -> String {
        format!("{} {} {}", AUTH_SCHEME, self.link_id, self.sign(request))
    }

    /// Every header a signed request carries, in send order.
    pub fn headers(&self, request: &CanonicalRequest) -> Vec<(String, String)> {
        let mut headers = vec![
            (HEADER_DATE.to_string(), request.timestamp.clone()),
            (HEADER_VERSION.to_string(), request.version.clone()),
        ];
        if let Some(ip) = &request.forwarded_ip {
            headers.push((HEADER_FORWARDED.to_string(), ip.clone()));
        }
        headers.push((HEADER_AUTHORIZATION.to_string(), self.authorization(request)));
        headers
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("link_id", &self.link_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "bGlua2h1Yi10ZXN0LXNlY3JldC1rZXk=";
    const BODY: &[u8] = br#"{"access_id":"abc","scope":["a"]}"#;
    const DATE: &str = "2024-01-01T00:00:00Z";

    fn signer() -> Signer {
        Signer::new("LINK", SECRET).unwrap()
    }

    #[test]
    fn test_known_signature() {
        let request = CanonicalRequest::token("SVC", BODY, DATE);
        assert_eq!(signer().sign(&request), "ckavTeZ8sTLnIf+NKGLZMlM+IBg=");
    }

    #[test]
    fn test_known_signature_with_forwarded_ip() {
        let request = CanonicalRequest::token("SVC", BODY, DATE).with_forwarded_ip(Some("1.2.3.4"));
        assert_eq!(signer().sign(&request), "xDotges6q2/p4R+rQAy+t8eSJkg=");
    }

    #[test]
    fn test_signature_is_repeatable() {
        let request = CanonicalRequest::token("SVC", BODY, DATE);
        let s = signer();
        assert_eq!(s.sign(&request), s.sign(&request));
    }

    #[test]
    fn test_authorization_value() {
        let request = CanonicalRequest::token("SVC", BODY, DATE);
        assert_eq!(
            signer().authorization(&request),
            "LINKHUB LINK ckavTeZ8sTLnIf+NKGLZMlM+IBg="
        );
    }

    #[test]
    fn test_headers_without_forwarded_ip() {
        let request = CanonicalRequest::token("SVC", BODY, DATE);
        let headers = signer().headers(&request);
        let names: Vec<&str> = headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["x-lh-date", "x-lh-version", "Authorization"]);
        assert_eq!(headers[0].1, DATE);
        assert_eq!(headers[1].1, "1.0");
    }

    #[test]
    fn test_headers_with_forwarded_ip() {
        let request = CanonicalRequest::token("SVC", BODY, DATE).with_forwarded_ip(Some("10.0.0.1"));
        let headers = signer().headers(&request);
        assert!(headers.contains(&("x-lh-forwarded".to_string(), "10.0.0.1".to_string())));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert_eq!(Signer::new("", SECRET).unwrap_err().name(), "ConfigurationError");
        let err = Signer::new("LINK", "").unwrap_err();
        assert_eq!(err.name(), "ConfigurationError");
        assert_eq!(err.code(), crate::error::LOCAL_ERROR_CODE);
    }

    #[test]
    fn test_invalid_base64_secret_rejected() {
        let err = Signer::new("LINK", "not base64!").unwrap_err();
        assert_eq!(err.name(), "ConfigurationError");
    }

    #[test]
    fn test_debug_hides_secret() {
        let text = format!("{:?}", signer());
        assert!(text.contains("LINK"));
        assert!(!text.contains(SECRET));
    }
}
