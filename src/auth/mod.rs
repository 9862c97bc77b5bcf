//! Authentication and authorization.
//!
//! Covers password hashing, registration input validation, login
//! identity resolution (email-or-username), and the ownership guard
//! used by the letter endpoints.

pub mod guard;
pub mod identity;
pub mod password;
pub mod validation;

pub use guard::{authorize, Decision, Operation, Requester};
pub use identity::{classify, resolve, LoginKind, ResolveError};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use validation::{
    validate_email, validate_username, ValidationError, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH,
};
