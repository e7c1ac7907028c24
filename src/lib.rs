//! Linkhub - client for the Linkhub authority service.
//!
//! This crate issues session tokens and reads point balances from the
//! Linkhub authority, together with the JSON machinery it needs.
//!
//! # Architecture
//!
//! The implementation is organized into modules, leaves first:
//!
//! - [`json`] - JSON value model, parser and serializer
//! - [`mapper`] - Typed values to and from JSON trees, without reflection
//! - [`signing`] - Canonical request strings and HMAC-SHA1 signatures
//! - [`authority`] - Token and balance calls over a pluggable transport
//! - [`config`] - TOML client configuration
//! - [`error`] - Error taxonomy with numeric codes
//!
//! # Signing
//!
//! Signatures must match the remote verifier bit for bit. The canonical
//! string layout lives in [`signing::canonical`]; known-answer vectors are
//! checked in the crate's tests.

// Library code must not panic on bad input or server responses.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod authority;
pub mod config;
pub mod error;
pub mod json;
pub mod mapper;
pub mod signing;

// Re-export commonly used types
pub use authority::{Authority, Token};
pub use config::AuthorityConfig;
pub use error::{LinkhubError, LinkhubResult, LOCAL_ERROR_CODE};
pub use json::{JsonArray, JsonObject, JsonValue};
pub use mapper::{FromJson, JsonRecord, ToJson};
pub use signing::{CanonicalRequest, Signer};
