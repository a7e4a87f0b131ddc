//! Is Admin Use Case
//!
//! Authorization metadata lookup. The caller is expected to have
//! authenticated the user already; no credentials are checked here.

use std::sync::Arc;

use platform::context::RequestContext;

use crate::domain::repository::UserProvider;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub struct IsAdminUseCase<P>
where
    P: UserProvider,
{
    user_provider: Arc<P>,
}

impl<P> IsAdminUseCase<P>
where
    P: UserProvider,
{
    pub fn new(user_provider: Arc<P>) -> Self {
        Self { user_provider }
    }

    #[tracing::instrument(name = "auth.is_admin", skip_all, fields(user_id = %user_id))]
    pub async fn execute(&self, ctx: &RequestContext, user_id: UserId) -> AuthResult<bool> {
        tracing::info!("checking if user is admin");

        let is_admin = ctx
            .run(self.user_provider.is_admin(user_id))
            .await?
            .map_err(|e| {
                tracing::error!(error = %e, "failed to check if user is admin");
                AuthError::Storage(e)
            })?;

        tracing::info!(is_admin, "checked if user is admin");

        Ok(is_admin)
    }
}
