//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::context::RequestContext;

use crate::application::config::AuthConfig;
use crate::domain::repository::{StorageError, UserSaver};
use crate::domain::value_object::{
    UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: RawPassword,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: UserSaver,
{
    user_saver: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterUseCase<S>
where
    S: UserSaver,
{
    pub fn new(user_saver: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { user_saver, config }
    }

    #[tracing::instrument(name = "auth.register_new_user", skip_all, fields(email = %input.email))]
    pub async fn execute(&self, ctx: &RequestContext, input: RegisterInput) -> AuthResult<UserId> {
        tracing::info!("registering new user");

        ctx.check()?;
        let pass_hash = UserPassword::from_raw(
            &input.password,
            &self.config.password_params,
            self.config.pepper(),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            AuthError::PasswordHash(e)
        })?;

        let user_id = match ctx
            .run(self.user_saver.save_user(&input.email, &pass_hash))
            .await?
        {
            Ok(user_id) => user_id,
            Err(StorageError::UserExists) => {
                tracing::warn!("user already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save user");
                return Err(AuthError::Storage(e));
            }
        };

        tracing::info!(user_id = %user_id, "user registered");

        Ok(user_id)
    }
}
