//! Web API module for Amora.
//!
//! A REST API over the letter store: account signup and login,
//! token refresh, and the letter CRUD endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
