//! API handlers for the Amora web API.

pub mod auth;
pub mod letter;

pub use auth::*;
pub use letter::*;
