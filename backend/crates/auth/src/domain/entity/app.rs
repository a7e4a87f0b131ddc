//! App Entity

use std::fmt;

use crate::domain::value_object::AppId;

/// Client application that tokens are issued for
#[derive(Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    /// HS256 key for tokens issued on this app's behalf
    pub secret: String,
}

impl App {
    pub fn new(id: AppId, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let app = App::new(AppId::new(10), "web", "super-secret-key");
        let debug = format!("{:?}", app);
        assert!(debug.contains("web"));
        assert!(!debug.contains("super-secret-key"));
    }
}
