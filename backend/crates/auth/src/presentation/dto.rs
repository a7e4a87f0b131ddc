//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// No `Debug`: carries a clear-text password.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: i64,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Is Admin
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_uses_camel_case() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"email":"alice@example.com","password":"s3cret","appId":10}"#,
        )
        .unwrap();
        assert_eq!(req.email, "alice@example.com");
        assert_eq!(req.app_id, 10);
    }

    #[test]
    fn test_responses_serialize_camel_case() {
        let json = serde_json::to_value(RegisterResponse { user_id: 1 }).unwrap();
        assert_eq!(json, serde_json::json!({ "userId": 1 }));

        let json = serde_json::to_value(IsAdminResponse { is_admin: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "isAdmin": true }));
    }
}
