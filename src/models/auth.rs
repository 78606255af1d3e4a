//! Request and response bodies for the login endpoint.

use serde::{Deserialize, Serialize};

/// Body accepted by `POST /login`.
///
/// Both fields are optional at the parsing layer so the handler can report
/// which one is missing.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub role: Option<String>,
}

/// Body returned by a successful login.
#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Lifetime of the token in seconds.
    pub expires_in: i64,
}
