//! CORS middleware configuration.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer from the configured origins.
///
/// With no origins configured (dev mode) any origin is allowed but
/// without credentials. With origins configured, only those origins
/// are allowed and credentials mode is enabled.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let permissive = || {
        CorsLayer::new()
            .allow_methods(methods.clone())
            .allow_headers(Any)
            .allow_origin(Any)
    };

    if origins.is_empty() {
        return permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    if parsed_origins.is_empty() {
        // No valid origins parsed, fall back to dev mode
        return permissive();
    }

    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(parsed_origins)
}
