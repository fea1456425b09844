//! Authenticated API session

use super::client::ApiClient;
use super::models::{LoginRequest, LoginResponse};
use super::traits::CampApi;
use crate::config::{secret_string, SecretString};
use crate::domain::{CampdocError, Result};
use async_trait::async_trait;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::path::Path;

/// Holds the bearer token obtained at login
///
/// Every call made through a session carries `Authorization: Bearer {token}`.
pub struct Session {
    client: ApiClient,
    token: SecretString,
}

impl Session {
    /// Logs in with a member number and password
    ///
    /// # Errors
    ///
    /// Returns [`CampdocError::Authentication`] when the server answers
    /// without a token. Transport failures surface as API errors after the
    /// client's retry.
    pub async fn authenticate(
        client: ApiClient,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<Self> {
        tracing::info!(base_url = %client.base_url(), "Logging in");

        let body = serde_json::to_value(LoginRequest {
            numero: identifier,
            password: secret.expose_secret().as_ref(),
        })?;

        let response = client
            .request(Method::POST, "/api/login", Some(&body), None)
            .await?;

        let login: LoginResponse = serde_json::from_value(response).map_err(|e| {
            CampdocError::Authentication(format!("Unexpected login response: {e}"))
        })?;

        match login.token.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                tracing::info!("Login succeeded");
                Ok(Self {
                    client,
                    token: secret_string(token),
                })
            }
            None => Err(CampdocError::Authentication(
                "login response did not contain a token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CampApi for Session {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.client
            .request(Method::GET, path, None, Some(&self.token))
            .await
    }

    async fn download(&self, path: &str, destination: &Path) -> Result<u64> {
        self.client
            .download(Method::GET, path, destination, Some(&self.token))
            .await
    }
}
