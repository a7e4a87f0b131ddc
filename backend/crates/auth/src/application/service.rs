//! Auth Service
//!
//! Entry point for the three auth operations. Holds only immutable
//! configuration and shared handles to its collaborators, so one instance
//! can serve any number of concurrent calls without locking.

use std::sync::Arc;

use platform::context::RequestContext;

use crate::application::config::AuthConfig;
use crate::application::is_admin::IsAdminUseCase;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::repository::{AppProvider, TokenSigner, UserProvider, UserSaver};
use crate::domain::value_object::{AppId, UserId, user_password::RawPassword};
use crate::error::AuthResult;

pub struct AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenSigner + ?Sized,
{
    login: LoginUseCase<P, A, T>,
    register: RegisterUseCase<S>,
    is_admin: IsAdminUseCase<P>,
    config: Arc<AuthConfig>,
}

impl<S, P, A, T> AuthService<S, P, A, T>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    T: TokenSigner + ?Sized,
{
    pub fn new(
        user_saver: Arc<S>,
        user_provider: Arc<P>,
        app_provider: Arc<A>,
        signer: Arc<T>,
        config: AuthConfig,
    ) -> Self {
        let config = Arc::new(config);

        Self {
            login: LoginUseCase::new(
                user_provider.clone(),
                app_provider,
                signer,
                config.clone(),
            ),
            register: RegisterUseCase::new(user_saver, config.clone()),
            is_admin: IsAdminUseCase::new(user_provider),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate and return a token for `app_id`
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: impl Into<String>,
        password: impl Into<RawPassword>,
        app_id: AppId,
    ) -> AuthResult<String> {
        let input = LoginInput {
            email: email.into(),
            password: password.into(),
            app_id,
        };
        self.login.execute(ctx, input).await
    }

    /// Create a user and return the assigned ID
    pub async fn register_new_user(
        &self,
        ctx: &RequestContext,
        email: impl Into<String>,
        password: impl Into<RawPassword>,
    ) -> AuthResult<UserId> {
        let input = RegisterInput {
            email: email.into(),
            password: password.into(),
        };
        self.register.execute(ctx, input).await
    }

    pub async fn is_admin(&self, ctx: &RequestContext, user_id: UserId) -> AuthResult<bool> {
        self.is_admin.execute(ctx, user_id).await
    }
}
