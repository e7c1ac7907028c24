//! Request and response bodies of the authority endpoints.

use crate::json_record;

json_record! {
    /// Session token issued by the token endpoint.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Token {
        /// Bearer token for subsequent calls.
        pub session_token: String,
        /// Service the token was issued for.
        pub service_id as "serviceID": String,
        /// Link id of the partner that requested it.
        pub link_id as "linkID": String,
        /// Member code of the account.
        pub user_code as "usercode": String,
        /// Address the token is bound to.
        pub ip_address as "ipaddress": String,
        /// Expiry timestamp as sent by the server.
        pub expiration: String,
        /// Granted scopes.
        pub scope: Vec<String>,
    }
}

json_record! {
    /// Body of a token request.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct TokenRequest {
        /// Account the token is requested for.
        pub access_id: String,
        /// Requested scopes.
        pub scope: Vec<String>,
    }
}

json_record! {
    /// Balance response; the amount travels as decimal text.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PointResult {
        /// Remaining points.
        pub remain_point as "remainPoint": String,
    }
}

impl Default for PointResult {
    fn default() -> Self {
        PointResult {
            remain_point: "0".to_string(),
        }
    }
}

json_record! {
    /// Error body returned with a non-success status.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ErrorResponse {
        /// Server-issued error code.
        pub code: i64,
        /// Human-readable reason.
        pub message: String,
    }
}
