//! Login Use Case
//!
//! Verifies credentials and issues a token scoped to one app.

use std::sync::Arc;

use platform::context::RequestContext;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AppProvider, StorageError, TokenSigner, UserProvider};
use crate::domain::value_object::{
    AppId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Verified against when the email is unknown
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: RawPassword,
    pub app_id: AppId,
}

/// Login use case
pub struct LoginUseCase<P, A, T>
where
    P: UserProvider,
    A: AppProvider,
    T: TokenSigner + ?Sized,
{
    user_provider: Arc<P>,
    app_provider: Arc<A>,
    signer: Arc<T>,
    config: Arc<AuthConfig>,
    /// Same cost as real hashes, so an unknown email takes as long as a
    /// wrong password
    dummy_hash: Option<UserPassword>,
}

impl<P, A, T> LoginUseCase<P, A, T>
where
    P: UserProvider,
    A: AppProvider,
    T: TokenSigner + ?Sized,
{
    pub fn new(
        user_provider: Arc<P>,
        app_provider: Arc<A>,
        signer: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        let dummy_hash = UserPassword::from_raw(
            &RawPassword::new(DUMMY_PASSWORD),
            &config.password_params,
            config.pepper(),
        )
        .inspect_err(|e| tracing::error!(error = %e, "failed to build dummy password hash"))
        .ok();

        Self {
            user_provider,
            app_provider,
            signer,
            config,
            dummy_hash,
        }
    }

    /// Returns the signed token
    ///
    /// Unknown email, wrong password and unknown app all surface as
    /// [`AuthError::InvalidCredentials`] so callers cannot tell which
    /// accounts or apps exist. The distinction is only logged.
    #[tracing::instrument(
        name = "auth.login",
        skip_all,
        fields(email = %input.email, app_id = %input.app_id)
    )]
    pub async fn execute(&self, ctx: &RequestContext, input: LoginInput) -> AuthResult<String> {
        tracing::info!("attempting to login user");

        let user = match ctx.run(self.user_provider.user(&input.email)).await? {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!("user not found");
                ctx.check()?;
                if let Some(dummy_hash) = &self.dummy_hash {
                    dummy_hash.verify(&input.password, self.config.pepper());
                }
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get user");
                return Err(AuthError::Storage(e));
            }
        };

        ctx.check()?;
        if !user.pass_hash.verify(&input.password, self.config.pepper()) {
            tracing::warn!(user_id = %user.id, "invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match ctx.run(self.app_provider.app(input.app_id)).await? {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                tracing::warn!("app not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to get app");
                return Err(AuthError::InvalidCredentials);
            }
        };

        ctx.check()?;
        let token = self
            .signer
            .sign(&user, &app, self.config.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create token");
                AuthError::Token(e)
            })?;

        tracing::info!(user_id = %user.id, "user logged in successfully");

        Ok(token)
    }
}
