//! Account repository for Amora.
//!
//! This module provides CRUD operations for accounts in the database.

use super::account::{Account, NewAccount};
use super::DbPool;
use crate::{AmoraError, Result};

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account in the database.
    ///
    /// Returns the created account with the assigned ID.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO accounts (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new_account.username)
        .bind(&new_account.email)
        .bind(&new_account.password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| AmoraError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AmoraError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, password, created_at, last_login
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| AmoraError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get an account by username.
    ///
    /// The match is exact and case-sensitive against the stored value.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, password, created_at, last_login
             FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| AmoraError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get an account by email address.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, password, created_at, last_login
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| AmoraError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Check if a username is already taken (exact match).
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(self.pool)
                .await
                .map_err(|e| AmoraError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool)
                .await
                .map_err(|e| AmoraError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// Update the last login timestamp for an account.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE accounts SET last_login = datetime('now') WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| AmoraError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| AmoraError::Database(e.to_string()))?;
        Ok(count)
    }
}
