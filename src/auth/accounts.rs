//! Password-backed accounts that can obtain tokens.

use tokio::task;

use crate::db::{User, UserStore};
use crate::error::{AuthError, StoreError};

/// Creates users and checks their passwords against stored bcrypt hashes.
#[derive(Clone)]
pub struct Accounts {
    users: UserStore,
    bcrypt_cost: u32,
}

impl Accounts {
    pub fn new(users: UserStore, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let hash = self.hash_password(password).await?;
        Ok(self.users.insert(username, &hash).await?)
    }

    /// Returns the existing user with this name, creating it if absent.
    ///
    /// The password of an existing user is left untouched.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if let Some(user) = self.users.find_by_username(username).await? {
            return Ok(user);
        }
        match self.create_user(username, password).await {
            // Lost a race with a concurrent bootstrap
            Err(AuthError::Store(StoreError::Conflict(_))) => self
                .users
                .find_by_username(username)
                .await?
                .ok_or(AuthError::InvalidCredentials),
            other => other,
        }
    }

    /// Verifies a username/password pair.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if valid {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_accounts() -> Accounts {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        Accounts::new(UserStore::new(db.pool().clone()), 4)
    }

    #[tokio::test]
    async fn test_authenticate_valid_password() {
        let accounts = setup_accounts().await;
        let created = accounts.create_user("testuser", "testpass").await.unwrap();

        let user = accounts.authenticate("testuser", "testpass").await.unwrap();
        assert_eq!(user.id, created.id);
        assert_ne!(user.password_hash, "testpass");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let accounts = setup_accounts().await;
        accounts.create_user("testuser", "testpass").await.unwrap();

        let result = accounts.authenticate("testuser", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let accounts = setup_accounts().await;

        let result = accounts.authenticate("ghost", "testpass").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let accounts = setup_accounts().await;

        let first = accounts.ensure_user("admin", "one").await.unwrap();
        let second = accounts.ensure_user("admin", "two").await.unwrap();
        assert_eq!(first.id, second.id);

        // Original password still applies
        assert!(accounts.authenticate("admin", "one").await.is_ok());
        assert!(accounts.authenticate("admin", "two").await.is_err());
    }
}
