//! Login against the auth service, local logout

use shared::client::{AuthEnvelope, LoginData, LoginRequest};

use super::BfinitClient;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

impl BfinitClient {
    /// Log in and store the issued token in the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "email and password are required".into(),
            ));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: AuthEnvelope<LoginData> = self.auth.post("login", &request).await?;
        if !resp.is_success() {
            let message = resp.message.unwrap_or_else(|| "Login failed".into());
            tracing::warn!(%message, "Login refused");
            return Err(ClientError::Auth(message));
        }
        let token = resp
            .data
            .map(|d| d.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("Missing login token".into()))?;

        self.session.sign_in(token)?;
        tracing::info!("Logged in");
        Ok(())
    }

    /// Forget the token locally; the auth service keeps no logout endpoint
    pub fn logout(&self) {
        self.session.logout();
        tracing::info!("Logged out");
    }
}
