//! Account registration and session tokens.

use std::sync::Arc;

use smartoffer_api::{LoginRequest, RegisterRequest, UserProfile};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::AUTH_TOKEN_STORAGE_KEY;

/// Authentication service
pub struct AuthService {
    ctx: Arc<ServiceContext>,
}

impl AuthService {
    /// Create an auth service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Register a new account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> CoreResult<UserProfile> {
        if !request.email.contains('@') {
            return Err(CoreError::InvalidEmail(request.email.clone()));
        }
        if request.password.len() < 8 {
            return Err(CoreError::ValidationError(
                "password must be at least 8 characters".to_string(),
            ));
        }
        Ok(self.ctx.backend.register(request).await?)
    }

    /// Log in and persist the bearer token in the settings store.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<String> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.ctx.backend.login(&request).await?;
        self.ctx
            .settings_store
            .set(AUTH_TOKEN_STORAGE_KEY, &response.access_token)
            .await?;
        Ok(response.access_token)
    }

    /// Drop the persisted token. No backend call; tokens are stateless.
    pub async fn logout(&self) -> CoreResult<()> {
        self.ctx.settings_store.remove(AUTH_TOKEN_STORAGE_KEY).await
    }

    /// The persisted token from an earlier login, if any.
    pub async fn stored_token(&self) -> CoreResult<Option<String>> {
        self.ctx.settings_store.get(AUTH_TOKEN_STORAGE_KEY).await
    }

    /// The profile behind the current token.
    pub async fn me(&self) -> CoreResult<UserProfile> {
        Ok(self.ctx.backend.me().await?)
    }
}
