//! In-memory store
//!
//! Implements every storage capability behind one lock. Used by tests and
//! local demos; state is lost when the process exits.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{AppProvider, StorageError, UserProvider, UserSaver};
use crate::domain::value_object::{AppId, UserId, user_password::UserPassword};

struct StoredUser {
    user: User,
    is_admin: bool,
}

#[derive(Default)]
struct Inner {
    /// Keyed by exact email
    users: HashMap<String, StoredUser>,
    apps: HashMap<AppId, App>,
    last_user_id: i64,
}

#[derive(Default)]
pub struct InMemoryAuthStore {
    inner: RwLock<Inner>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|_| StorageError::Backend("in-memory store lock poisoned".to_string()))
    }

    /// Register a client application, replacing one with the same ID
    pub fn insert_app(&self, app: App) -> Result<(), StorageError> {
        self.write()?.apps.insert(app.id, app);
        Ok(())
    }

    pub fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        let stored = inner
            .users
            .values_mut()
            .find(|stored| stored.user.id == user_id)
            .ok_or(StorageError::UserNotFound)?;
        stored.is_admin = is_admin;
        Ok(())
    }

    /// Stored hash for `email`, if registered
    pub fn password_hash(&self, email: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .read()?
            .users
            .get(email)
            .map(|stored| stored.user.pass_hash.as_phc_string().to_string()))
    }

    pub fn user_count(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.users.len())
    }
}

impl UserSaver for InMemoryAuthStore {
    async fn save_user(
        &self,
        email: &str,
        pass_hash: &UserPassword,
    ) -> Result<UserId, StorageError> {
        // Check and insert under one write lock so concurrent
        // registrations of the same email cannot both succeed
        let mut inner = self.write()?;
        if inner.users.contains_key(email) {
            return Err(StorageError::UserExists);
        }

        inner.last_user_id += 1;
        let user_id = UserId::new(inner.last_user_id);
        inner.users.insert(
            email.to_string(),
            StoredUser {
                user: User::new(user_id, email, pass_hash.clone()),
                is_admin: false,
            },
        );

        Ok(user_id)
    }
}

impl UserProvider for InMemoryAuthStore {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        self.read()?
            .users
            .get(email)
            .map(|stored| stored.user.clone())
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        self.read()?
            .users
            .values()
            .find(|stored| stored.user.id == user_id)
            .map(|stored| stored.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

impl AppProvider for InMemoryAuthStore {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        self.read()?
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use platform::password::HashingParams;
    use std::sync::Arc;

    fn hash(password: &str) -> UserPassword {
        UserPassword::from_raw(
            &RawPassword::new(password),
            &HashingParams::new(1024, 1, 1),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ids_assigned_from_one() {
        let store = InMemoryAuthStore::new();
        let pass_hash = hash("pw");

        let first = store.save_user("a@example.com", &pass_hash).await.unwrap();
        let second = store.save_user("b@example.com", &pass_hash).await.unwrap();

        assert_eq!(first, UserId::new(1));
        assert_eq!(second, UserId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let store = InMemoryAuthStore::new();
        let pass_hash = hash("pw");

        store.save_user("a@example.com", &pass_hash).await.unwrap();
        let result = store.save_user("a@example.com", &pass_hash).await;

        assert_eq!(result, Err(StorageError::UserExists));
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryAuthStore::new();
        store.save_user("Alice@example.com", &hash("pw")).await.unwrap();

        assert!(store.user("Alice@example.com").await.is_ok());
        assert!(matches!(
            store.user("alice@example.com").await,
            Err(StorageError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_admin_flag() {
        let store = InMemoryAuthStore::new();
        let user_id = store.save_user("a@example.com", &hash("pw")).await.unwrap();

        assert_eq!(store.is_admin(user_id).await, Ok(false));
        store.set_admin(user_id, true).unwrap();
        assert_eq!(store.is_admin(user_id).await, Ok(true));

        assert_eq!(
            store.is_admin(UserId::new(99)).await,
            Err(StorageError::UserNotFound)
        );
        assert_eq!(
            store.set_admin(UserId::new(99), true),
            Err(StorageError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_app_lookup() {
        let store = InMemoryAuthStore::new();
        store
            .insert_app(App::new(AppId::new(10), "web", "secret"))
            .unwrap();

        assert_eq!(store.app(AppId::new(10)).await.unwrap().name, "web");
        assert!(matches!(
            store.app(AppId::new(11)).await,
            Err(StorageError::AppNotFound)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_registration_same_email() {
        let store = Arc::new(InMemoryAuthStore::new());
        let pass_hash = hash("pw");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let pass_hash = pass_hash.clone();
            handles.push(tokio::spawn(async move {
                store.save_user("race@example.com", &pass_hash).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.user_count().unwrap(), 1);
    }
}
