//! Authority client.
//!
//! Issues session tokens and reads point balances from the Linkhub
//! authority service. Each call builds its body through the mapper, signs
//! token requests with [`Signer`], hands the request to a [`Transport`] and
//! maps the response back; non-success responses become
//! [`LinkhubError::RemoteApi`] when the body carries `{code, message}` and
//! [`LinkhubError::Transport`] otherwise.
//!
//! ```
//! use linkhub::authority::{Authority, HttpRequest, HttpResponse, Transport};
//! use linkhub::LinkhubResult;
//!
//! struct Fixed;
//!
//! impl Transport for Fixed {
//!     fn execute(&self, _: &HttpRequest) -> LinkhubResult<HttpResponse> {
//!         Ok(HttpResponse { status: 200, body: br#"{"remainPoint":"42.5"}"#.to_vec() })
//!     }
//! }
//!
//! let authority =
//!     Authority::with_transport("LINK", "bGlua2h1Yi10ZXN0LXNlY3JldC1rZXk=", Fixed).unwrap();
//! assert_eq!(authority.get_balance("token", "POPBILL").unwrap(), 42.5);
//! ```

pub mod models;
pub mod transport;

use std::fmt;

pub use models::{ErrorResponse, PointResult, Token, TokenRequest};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

#[cfg(feature = "http")]
use crate::config::AuthorityConfig;
use crate::config::DEFAULT_SERVICE_URL;
use crate::error::{LinkhubError, LinkhubResult};
use crate::json;
use crate::mapper::{self, FromJson};
use crate::signing::{self, CanonicalRequest, Signer};

/// Longest body excerpt quoted in a transport error.
const BODY_EXCERPT: usize = 200;

/// Client for the authority endpoints.
pub struct Authority {
    signer: Signer,
    service_url: String,
    transport: Box<dyn Transport>,
}

impl Authority {
    /// Client for the production service over HTTPS with a 10 second timeout.
    #[cfg(feature = "http")]
    pub fn new(link_id: &str, secret_key: &str) -> LinkhubResult<Self> {
        Self::from_config(&AuthorityConfig {
            link_id: link_id.to_string(),
            secret_key: secret_key.to_string(),
            ..AuthorityConfig::default()
        })
    }

    /// Client built from a validated configuration.
    #[cfg(feature = "http")]
    pub fn from_config(config: &AuthorityConfig) -> LinkhubResult<Self> {
        config.validate()?;
        let transport =
            HttpTransport::new(std::time::Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(&config.link_id, &config.secret_key, transport)?
            .with_service_url(&config.service_url))
    }

    /// Client that sends requests through `transport`.
    pub fn with_transport<T>(link_id: &str, secret_key: &str, transport: T) -> LinkhubResult<Self>
    where
        T: Transport + 'static,
    {
        Ok(Authority {
            signer: Signer::new(link_id, secret_key)?,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            transport: Box::new(transport),
        })
    }

    /// Point the client at another base URL.
    pub fn with_service_url(mut self, service_url: &str) -> Self {
        self.service_url = service_url.trim_end_matches('/').to_string();
        self
    }

    /// Base URL requests go to.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Link id requests are signed for.
    pub fn link_id(&self) -> &str {
        self.signer.link_id()
    }

    /// Issue a session token for `access_id` on `service_id`.
    pub fn get_token(
        &self,
        service_id: &str,
        access_id: &str,
        scope: &[String],
    ) -> LinkhubResult<Token> {
        self.get_token_forwarded(service_id, access_id, scope, None)
    }

    /// Issue a session token, attesting `forwarded_ip` as the original
    /// client when given.
    pub fn get_token_forwarded(
        &self,
        service_id: &str,
        access_id: &str,
        scope: &[String],
        forwarded_ip: Option<&str>,
    ) -> LinkhubResult<Token> {
        let request = self.token_request(
            service_id,
            access_id,
            scope,
            forwarded_ip,
            &signing::timestamp_now(),
        )?;
        self.call(&request)
    }

    /// Remaining points of the account behind `bearer_token`.
    pub fn get_balance(&self, bearer_token: &str, service_id: &str) -> LinkhubResult<f64> {
        self.balance(bearer_token, service_id, "Point")
    }

    /// Remaining points of the partner behind `bearer_token`.
    pub fn get_partner_balance(&self, bearer_token: &str, service_id: &str) -> LinkhubResult<f64> {
        self.balance(bearer_token, service_id, "PartnerPoint")
    }

    /// Build the signed token request without sending it.
    pub fn token_request(
        &self,
        service_id: &str,
        access_id: &str,
        scope: &[String],
        forwarded_ip: Option<&str>,
        timestamp: &str,
    ) -> LinkhubResult<HttpRequest> {
        require(service_id, "service id")?;
        require(access_id, "access id")?;

        let body = mapper::stringify(&TokenRequest {
            access_id: access_id.to_string(),
            scope: scope.to_vec(),
        })?
        .into_bytes();
        let canonical =
            CanonicalRequest::token(service_id, &body, timestamp).with_forwarded_ip(forwarded_ip);

        Ok(HttpRequest {
            method: Method::Post,
            url: format!("{}{}", self.service_url, canonical.path),
            headers: self.signer.headers(&canonical),
            body,
        })
    }

    fn balance(&self, bearer_token: &str, service_id: &str, resource: &str) -> LinkhubResult<f64> {
        require(service_id, "service id")?;
        require(bearer_token, "bearer token")?;

        let request = HttpRequest {
            method: Method::Get,
            url: format!("{}/{}/{}", self.service_url, service_id, resource),
            headers: vec![(
                signing::HEADER_AUTHORIZATION.to_string(),
                format!("Bearer {}", bearer_token),
            )],
            body: Vec::new(),
        };
        let result: PointResult = self.call(&request)?;
        parse_points(&result.remain_point)
    }

    fn call<R: FromJson>(&self, request: &HttpRequest) -> LinkhubResult<R> {
        let response = self.transport.execute(request)?;
        tracing::info!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "authority request"
        );
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        mapper::from_json_bytes(&response.body)
    }
}

impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("signer", &self.signer)
            .field("service_url", &self.service_url)
            .finish_non_exhaustive()
    }
}

fn require(value: &str, what: &str) -> LinkhubResult<()> {
    if value.is_empty() {
        Err(LinkhubError::config(format!("{} is empty", what)))
    } else {
        Ok(())
    }
}

fn parse_points(text: &str) -> LinkhubResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(points) if points.is_finite() => Ok(points),
        _ => Err(LinkhubError::TypeMismatch {
            expected: "decimal",
            found: format!("string {:?}", text),
        }),
    }
}

/// Classify a non-success response.
fn error_from_response(response: &HttpResponse) -> LinkhubError {
    let remote = json::parse(&response.body)
        .ok()
        .filter(|value| value.get("code").and_then(|code| code.as_i64()).is_some())
        .and_then(|value| ErrorResponse::from_json(&value).ok());

    match remote {
        Some(error) => {
            tracing::warn!(
                status = response.status,
                code = error.code,
                message = %error.message,
                "authority rejected request"
            );
            LinkhubError::RemoteApi {
                code: error.code,
                message: error.message,
            }
        }
        None => {
            let text = String::from_utf8_lossy(&response.body);
            let excerpt: String = text.chars().take(BODY_EXCERPT).collect();
            LinkhubError::Transport(format!("HTTP {}: {}", response.status, excerpt))
        }
    }
}
