//! HTTP transport seam.
//!
//! The authority client hands fully prepared requests to a [`Transport`]
//! and gets raw status and body back; everything protocol-related stays on
//! the client side, so tests can swap in an in-memory transport.

use std::fmt;

use crate::error::LinkhubResult;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Method literal as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers in send order.
    pub headers: Vec<(String, String)>,
    /// Body bytes; empty for `GET`.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Executes prepared requests.
///
/// A non-success status is not an error at this level; implementations
/// return `Err` only when no response was obtained at all.
pub trait Transport: Send + Sync {
    /// Send `request` and read the whole response.
    fn execute(&self, request: &HttpRequest) -> LinkhubResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> LinkhubResult<HttpResponse> {
        (**self).execute(request)
    }
}

#[cfg(feature = "http")]
pub use self::http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::error::{LinkhubError, LinkhubResult};

    /// Blocking HTTPS transport backed by `reqwest`.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::blocking::Client,
    }

    impl HttpTransport {
        /// Build a transport whose requests time out after `timeout`.
        pub fn new(timeout: Duration) -> LinkhubResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("linkhub/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| LinkhubError::Transport(format!("failed to build HTTP client: {}", e)))?;
            Ok(HttpTransport { client })
        }
    }

    impl Transport for HttpTransport {
        fn execute(&self, request: &HttpRequest) -> LinkhubResult<HttpResponse> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url).body(request.body.clone()),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let response = builder
                .send()
                .map_err(|e| LinkhubError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .map_err(|e| LinkhubError::Transport(e.to_string()))?;
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        }
    }
}
