//! Request signing.
//!
//! A token request is authenticated by an HMAC-SHA1 signature over a
//! canonical string built from the request (see [`canonical`]). Everything
//! here is a pure function of its inputs: no I/O, no clocks except
//! [`timestamp_now`], no shared state.
//!
//! ```
//! use linkhub::signing::{CanonicalRequest, Signer};
//!
//! let signer = Signer::new("LINK", "bGlua2h1Yi10ZXN0LXNlY3JldC1rZXk=").unwrap();
//! let body = br#"{"access_id":"abc","scope":["a"]}"#;
//! let request = CanonicalRequest::token("SVC", body, "2024-01-01T00:00:00Z");
//! assert_eq!(signer.sign(&request), "ckavTeZ8sTLnIf+NKGLZMlM+IBg=");
//! ```

pub mod canonical;
pub mod signer;

pub use canonical::{
    body_digest, format_timestamp, parse_timestamp, timestamp_now, token_path, CanonicalRequest,
    API_VERSION, TIMESTAMP_FORMAT,
};
pub use signer::{
    Signer, AUTH_SCHEME, HEADER_AUTHORIZATION, HEADER_DATE, HEADER_FORWARDED, HEADER_VERSION,
};
