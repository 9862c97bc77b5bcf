//! Database schema and migrations for Amora.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - accounts table
    r#"
-- Accounts table for authentication
CREATE TABLE accounts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,    -- set once at sign-up, immutable
    email       TEXT NOT NULL UNIQUE,    -- credential-verification key
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    last_login  TEXT
);

CREATE INDEX idx_accounts_username ON accounts(username);
CREATE INDEX idx_accounts_email ON accounts(email);
"#,
    // v2: Letters table
    r#"
-- Letters table; the id doubles as the public share token
CREATE TABLE letters (
    id                TEXT PRIMARY KEY,
    owner_id          INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    title             TEXT,
    content           TEXT NOT NULL,
    background_color  TEXT NOT NULL DEFAULT '#fff5f7',
    text_color        TEXT NOT NULL DEFAULT '#1f2937',
    icon              TEXT NOT NULL DEFAULT '💕',
    created_at        TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_letters_owner_id ON letters(owner_id);
CREATE INDEX idx_letters_created_at ON letters(created_at);
"#,
    // v3: Refresh tokens for JWT sessions
    r#"
CREATE TABLE refresh_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id  INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    revoked_at  TEXT
);

CREATE INDEX idx_refresh_tokens_token ON refresh_tokens(token);
CREATE INDEX idx_refresh_tokens_account_id ON refresh_tokens(account_id);
"#,
];
