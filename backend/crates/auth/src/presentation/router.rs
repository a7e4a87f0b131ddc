//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::{AuthService, config::AuthConfig};
use crate::domain::repository::TokenSigner;
use crate::infra::{jwt_signer::JwtTokenSigner, postgres::PgAuthStore};
use crate::presentation::handlers::{self, AuthAppState, AuthStore};

/// Create the Auth router with PostgreSQL storage
pub fn auth_router(store: PgAuthStore, config: AuthConfig) -> Router {
    auth_router_generic(Arc::new(store), Arc::new(JwtTokenSigner), config)
}

/// Create a generic Auth router for any storage and signer
pub fn auth_router_generic<R>(
    store: Arc<R>,
    signer: Arc<dyn TokenSigner>,
    config: AuthConfig,
) -> Router
where
    R: AuthStore,
{
    let service = AuthService::new(store.clone(), store.clone(), store, signer, config);

    let state = AuthAppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/users/{user_id}/is-admin", get(handlers::is_admin::<R>))
        .with_state(state)
}
