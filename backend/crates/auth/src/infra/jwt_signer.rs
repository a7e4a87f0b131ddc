//! JWT Token Signer
//!
//! Issues HS256 tokens signed with the requesting app's secret.

use std::time::Duration;

use platform::jwt::{JwtError, TokenClaims, issue_token};

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::TokenSigner;

#[derive(Debug, Clone, Copy, Default)]
pub struct JwtTokenSigner;

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
        let claims = TokenClaims::new(user.id.value(), user.email.as_str(), app.id.value(), ttl);
        issue_token(&claims, app.secret.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        AppId, UserId,
        user_password::{RawPassword, UserPassword},
    };
    use platform::jwt::verify_token;
    use platform::password::HashingParams;

    fn user() -> User {
        let hash = UserPassword::from_raw(
            &RawPassword::new("pw"),
            &HashingParams::new(1024, 1, 1),
            None,
        )
        .unwrap();
        User::new(UserId::new(3), "bob@example.com", hash)
    }

    #[test]
    fn test_token_bound_to_app_secret() {
        let app = App::new(AppId::new(10), "web", "web-secret");
        let token = JwtTokenSigner
            .sign(&user(), &app, Duration::from_secs(600))
            .unwrap();

        let claims = verify_token(&token, b"web-secret").unwrap();
        assert_eq!(claims.uid, 3);
        assert_eq!(claims.email, "bob@example.com");
        assert_eq!(claims.app_id, 10);
        assert_eq!(claims.exp - claims.iat, 600);

        assert!(verify_token(&token, b"other-secret").is_err());
    }

    #[test]
    fn test_app_without_secret_fails() {
        let app = App::new(AppId::new(10), "web", "");
        let result = JwtTokenSigner.sign(&user(), &app, Duration::from_secs(600));
        assert!(matches!(result, Err(JwtError::MissingSecret)));
    }
}
