// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Login and logout

use super::models::{LoginRequest, TokenResponse};
use super::{ApiClient, Endpoint};
use crate::error::Result;

impl ApiClient {
    /// Exchange credentials for a session token and start the session
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let endpoint = Endpoint::login();
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .client
            .call(endpoint.method, &endpoint.path, Some(&body))
            .await?;

        self.store.set(&token.token);
        tracing::info!(user_id = token.user_id, "Logged in");
        Ok(token)
    }

    /// End the session locally; the backend is not contacted
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("Logged out");
    }
}
