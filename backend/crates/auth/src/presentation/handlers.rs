//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use platform::context::RequestContext;

use crate::application::AuthService;
use crate::domain::repository::{AppProvider, TokenSigner, UserProvider, UserSaver};
use crate::domain::value_object::{AppId, UserId, email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

/// Storage backing every auth handler
pub trait AuthStore: UserSaver + UserProvider + AppProvider + Send + Sync + 'static {}

impl<R> AuthStore for R where R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static {}

pub type SharedAuthService<R> = AuthService<R, R, R, dyn TokenSigner>;

/// Shared state for auth handlers
pub struct AuthAppState<R: AuthStore> {
    pub service: Arc<SharedAuthService<R>>,
}

// derive(Clone) would require R: Clone
impl<R: AuthStore> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<R: AuthStore> AuthAppState<R> {
    /// Context for one request, bounded by the configured timeout
    fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.service.config().request_timeout)
    }
}

fn invalid_json(rejection: JsonRejection) -> AuthError {
    AuthError::InvalidRequest(rejection.body_text())
}

fn validate_email(email: String) -> AuthResult<String> {
    Email::new(email)
        .map(Email::into_inner)
        .map_err(|e| AuthError::InvalidRequest(e.message().to_string()))
}

fn validate_password(password: String) -> AuthResult<RawPassword> {
    let password = RawPassword::new(password);
    if password.is_empty() {
        return Err(AuthError::InvalidRequest("Password is required".to_string()));
    }
    Ok(password)
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload.map_err(invalid_json)?;

    let email = validate_email(req.email)?;
    let password = validate_password(req.password)?;

    let ctx = state.request_context();
    let user_id = state
        .service
        .register_new_user(&ctx, email, password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user_id.value(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(invalid_json)?;

    let email = validate_email(req.email)?;
    let password = validate_password(req.password)?;

    let app_id = AppId::new(req.app_id);
    if !app_id.is_valid() {
        return Err(AuthError::InvalidRequest("appId is required".to_string()));
    }

    let ctx = state.request_context();
    let token = state
        .service
        .login(&ctx, email, password, app_id)
        .await?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Is Admin
// ============================================================================

/// GET /auth/users/{user_id}/is-admin
///
/// An unknown user ID is a storage failure and answers 500, not 404 or
/// `false`. Callers only ask about users they have already authenticated.
pub async fn is_admin<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> AuthResult<Json<IsAdminResponse>> {
    let Path(raw_id) = path.map_err(|e| AuthError::InvalidRequest(e.body_text()))?;

    let user_id = UserId::new(raw_id);
    if !user_id.is_valid() {
        return Err(AuthError::InvalidRequest("userId is required".to_string()));
    }

    let ctx = state.request_context();
    let is_admin = state.service.is_admin(&ctx, user_id).await?;

    Ok(Json(IsAdminResponse { is_admin }))
}
