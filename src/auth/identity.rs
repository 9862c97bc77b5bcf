//! Identity resolution for login.
//!
//! Login accepts either an email address or a username in a single
//! field. An input containing `@` is treated as an email and passed
//! through unchanged; anything else is treated as a username and
//! resolved to the account's email via an exact, case-sensitive
//! lookup.

use thiserror::Error;

use crate::db::AccountRepository;

/// Errors produced while resolving a login identifier to an email.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The input was a username and no account carries it.
    #[error("Username not found")]
    UsernameNotFound,

    /// The matched account row has no email on file.
    #[error("Account not found")]
    EmailUnavailable,

    /// The username lookup failed at the database layer.
    #[error("database error: {0}")]
    Database(String),
}

/// Classification of a raw login identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    Email,
    Username,
}

/// Classify a login identifier without touching storage.
///
/// The presence of `@` anywhere in the input marks it as an email,
/// even if the address is malformed; malformed emails fail later at
/// credential verification, not here.
pub fn classify(input: &str) -> LoginKind {
    if input.contains('@') {
        LoginKind::Email
    } else {
        LoginKind::Username
    }
}

/// Resolve a login identifier to the email used for credential checks.
///
/// Email inputs pass through untouched. Username inputs are trimmed
/// and looked up byte-for-byte; there is no case folding, so `Maria`
/// does not resolve an account named `maria`.
pub async fn resolve(repo: &AccountRepository<'_>, input: &str) -> Result<String, ResolveError> {
    if classify(input) == LoginKind::Email {
        return Ok(input.to_string());
    }

    let username = input.trim();
    let account = repo
        .get_by_username(username)
        .await
        .map_err(|e| ResolveError::Database(e.to_string()))?
        .ok_or(ResolveError::UsernameNotFound)?;

    if account.email.is_empty() {
        return Err(ResolveError::EmailUnavailable);
    }

    Ok(account.email)
}
