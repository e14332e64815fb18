//! Authentication and profile endpoints.

use serde::de::IgnoredAny;
use tracing::{debug, info, instrument, warn};

use kmtracker_core::model::{LoginResponse, ProfileUpdate, RegisterRequest, User};
use kmtracker_core::{Credentials, Result};

use crate::client::ApiClient;
use crate::endpoints::{
    CHANGE_PASSWORD, ChangePasswordRequest, LOGIN, LOGOUT, MessageResponse, PROFILE, REGISTER,
    RefreshRequest,
};
use crate::request::ApiRequest;
use crate::session::EndReason;

impl ApiClient {
    /// Authenticate and store the returned credential pair.
    ///
    /// A rejected login is reported as a credential error and never triggers
    /// a token refresh.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Result<LoginResponse> {
        info!("Logging in");

        let response: LoginResponse = self
            .execute(ApiRequest::post(LOGIN).json(&credentials)?)
            .await?;
        self.store().save(&response.tokens)?;

        debug!(user_id = response.user.id, "Login succeeded");
        Ok(response)
    }

    /// Create an account and log in with it.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse> {
        info!("Registering account");

        let response: LoginResponse = self
            .execute(ApiRequest::post(REGISTER).json(request)?)
            .await?;
        self.store().save(&response.tokens)?;

        debug!(user_id = response.user.id, "Registration succeeded");
        Ok(response)
    }

    /// Revoke the refresh token on the server and clear local credentials.
    ///
    /// The server call is best-effort; local credentials are cleared and the
    /// session-ended signal raised whatever its outcome.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Some(pair) = self.store().load() {
            let request = ApiRequest::post(LOGOUT).json(&RefreshRequest {
                refresh: pair.refresh.as_str(),
            });
            let result = match request {
                Ok(request) => self.dispatch_once::<IgnoredAny>(request).await.map(|_| ()),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                warn!(error = %e, "Server logout failed, clearing local session anyway");
            }
        }

        self.end_session(EndReason::LoggedOut).await;
    }

    /// Fetch the current user's profile.
    pub async fn profile(&self) -> Result<User> {
        self.execute(ApiRequest::get(PROFILE)).await
    }

    /// Update selected profile fields.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.execute(ApiRequest::patch(PROFILE).json(update)?).await
    }

    /// Change the account password. Returns the server's confirmation message.
    #[instrument(skip_all)]
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<String> {
        let request = ApiRequest::post(CHANGE_PASSWORD).json(&ChangePasswordRequest {
            old_password,
            new_password,
        })?;
        let response: MessageResponse = self.execute(request).await?;
        Ok(response.message)
    }
}
