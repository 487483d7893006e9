//! Login accounts.
//!
//! [`AccountService`] keeps accounts indexed by ID, username, and email.
//! Passwords are only ever stored as bcrypt hashes; hashing and
//! verification run on tokio's blocking pool.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::AuthError;
use crate::password::{self, DEFAULT_COST};

/// A login account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique ID
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Registry {
    by_id: HashMap<Uuid, Account>,
    order: Vec<Uuid>,
    by_username: HashMap<String, Uuid>,
    by_email: HashMap<String, Uuid>,
}

impl Registry {
    fn check_unique(&self, username: &str, email: &str) -> Result<(), AuthError> {
        if self.by_username.contains_key(username) {
            return Err(AuthError::DuplicateUsername(username.to_string()));
        }
        if self.by_email.contains_key(email) {
            return Err(AuthError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }
}

/// Registry of login accounts.
pub struct AccountService {
    registry: RwLock<Registry>,
    cost: u32,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountService {
    /// Create an empty registry hashing with bcrypt's default cost.
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    /// Create an empty registry with a custom bcrypt cost.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            cost,
        }
    }

    /// Register a new account.
    ///
    /// Usernames and emails must be unique.
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }
        tienda_core::types::validate_email(email)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Fail fast before paying for a hash.
        self.read().check_unique(username, email)?;

        let password_hash =
            password::hash_password_blocking(password.to_string(), self.cost).await?;

        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        let mut registry = self.write();
        // Re-check: another registration may have won the race while hashing.
        registry.check_unique(username, email)?;
        registry
            .by_username
            .insert(account.username.clone(), account.id);
        registry.by_email.insert(account.email.clone(), account.id);
        registry.order.push(account.id);
        registry.by_id.insert(account.id, account.clone());

        log::info!("Created account '{}'", account.username);
        Ok(account)
    }

    /// Check credentials, returning the account when they match.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let account = self.get_by_username(username)?;
        let ok =
            password::verify_password_blocking(password.to_string(), account.password_hash.clone())
                .await;
        if ok {
            Some(account)
        } else {
            log::debug!("Rejected credentials for '{username}'");
            None
        }
    }

    /// Look up an account by username.
    pub fn get_by_username(&self, username: &str) -> Option<Account> {
        let registry = self.read();
        let id = registry.by_username.get(username)?;
        registry.by_id.get(id).cloned()
    }

    /// All accounts in registration order.
    pub fn list_accounts(&self) -> Vec<Account> {
        let registry = self.read();
        registry
            .order
            .iter()
            .filter_map(|id| registry.by_id.get(id).cloned())
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}
