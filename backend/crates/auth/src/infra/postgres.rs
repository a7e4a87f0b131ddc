//! PostgreSQL Store Implementation

use kernel::error::conversions::{DbErrorClass, classify_sqlx};
use sqlx::PgPool;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{AppProvider, StorageError, UserProvider, UserSaver};
use crate::domain::value_object::{AppId, UserId, user_password::UserPassword};

/// PostgreSQL-backed auth store
#[derive(Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register or update a client application
    pub async fn upsert_app(&self, app: &App) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO apps (id, name, secret)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, secret = EXCLUDED.secret
            "#,
        )
        .bind(app.id.value())
        .bind(&app.name)
        .bind(&app.secret)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }
}

fn backend(err: sqlx::Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

// ============================================================================
// User Saver Implementation
// ============================================================================

impl UserSaver for PgAuthStore {
    async fn save_user(
        &self,
        email: &str,
        pass_hash: &UserPassword,
    ) -> Result<UserId, StorageError> {
        // Uniqueness is enforced by the users_email_key constraint
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, pass_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(pass_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match classify_sqlx(&e) {
            DbErrorClass::UniqueViolation => StorageError::UserExists,
            _ => backend(e),
        })?;

        Ok(UserId::new(id))
    }
}

// ============================================================================
// User Provider Implementation
// ============================================================================

impl UserProvider for PgAuthStore {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.ok_or(StorageError::UserNotFound)?.into_user()
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StorageError::UserNotFound)
    }
}

// ============================================================================
// App Provider Implementation
// ============================================================================

impl AppProvider for PgAuthStore {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        let row = sqlx::query_as::<_, AppRow>("SELECT id, name, secret FROM apps WHERE id = $1")
            .bind(app_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.map(AppRow::into_app).ok_or(StorageError::AppNotFound)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, StorageError> {
        let pass_hash = UserPassword::from_phc_string(self.pass_hash).map_err(|_| {
            StorageError::Backend(format!("invalid password hash stored for user {}", self.id))
        })?;

        Ok(User::new(UserId::new(self.id), self.email, pass_hash))
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl AppRow {
    fn into_app(self) -> App {
        App::new(AppId::new(self.id), self.name, self.secret)
    }
}
