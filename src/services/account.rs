// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Account lifecycle: login, signup, logout, profile updates.

use std::sync::Arc;

use validator::Validate;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::UserRecord;
use crate::store::SessionStore;

#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

#[derive(Debug, Validate)]
pub struct SignupInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

#[derive(Clone)]
pub struct AccountService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl AccountService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Authenticate and store the returned user record wholesale.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserRecord> {
        credentials.validate()?;
        let user = self
            .client
            .login(&credentials.email, &credentials.password)
            .await?;
        self.session.login(user.clone()).await?;
        tracing::info!(email = %user.email, "Logged in");
        Ok(user)
    }

    /// Create an account; the server logs the new user straight in.
    pub async fn signup(&self, input: &SignupInput) -> Result<UserRecord> {
        input.validate()?;
        let user = self
            .client
            .signup(&input.name, &input.email, &input.password)
            .await?;
        self.session.login(user.clone()).await?;
        tracing::info!(email = %user.email, "Account created");
        Ok(user)
    }

    /// Drop the session; event lists reset to their logged-out state.
    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await
    }

    /// Change display name and email, keeping the local copy in step.
    pub async fn update_profile(&self, input: &UpdateProfileInput) -> Result<UserRecord> {
        input.validate()?;
        let mut user = self.session.require_user().await?;

        self.client
            .update_user(&user.token, &input.name, &input.email)
            .await?;

        user.name = input.name.clone();
        user.email = input.email.clone();
        self.session.replace(user.clone()).await?;
        Ok(user)
    }
}
