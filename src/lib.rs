//! Amora - a tiny letter-sharing service
//!
//! Accounts write short styled letters and share them by link; anyone
//! holding a letter's id can read it, only the owner can change it.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod letter;
pub mod logging;
pub mod reveal;
pub mod web;

pub use auth::{
    authorize, classify, hash_password, resolve, validate_email, validate_password,
    validate_username, verify_password, Decision, LoginKind, Operation, PasswordError, Requester,
    ResolveError, ValidationError, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};
pub use config::Config;
pub use db::{Account, AccountRepository, Database, NewAccount};
pub use error::{AmoraError, Result};
pub use letter::{Letter, LetterDraft, LetterRepository, LetterService, LetterUpdate};
pub use reveal::{RevealMachine, RevealState, CLOSE_DELAY, OPEN_DELAY};
pub use web::WebServer;
