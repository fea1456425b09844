//! Wire types for the login endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /api/login`; both fields travel as strings
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub numero: &'a str,
    pub password: &'a str,
}

/// Response of `POST /api/login`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub token: Option<String>,
}
