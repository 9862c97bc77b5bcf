//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{hex_color, not_empty_trimmed};

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username.
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,
    /// Email address.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
}

/// Login request. The identifier field accepts either an email
/// address or a username.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or username.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub email_or_username: String,
    /// Password.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub password: String,
}

/// Logout request.
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    /// Refresh token to invalidate.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub refresh_token: String,
}

/// Token refresh request.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub refresh_token: String,
}

/// Letter creation request. Only the content is required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLetterRequest {
    /// Letter title.
    #[serde(default)]
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,
    /// Letter content.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 5000, message = "Content must be at most 5000 characters")
    )]
    pub content: String,
    /// Envelope background color.
    #[serde(default)]
    #[validate(custom(function = "hex_color"))]
    pub background_color: Option<String>,
    /// Text color.
    #[serde(default)]
    #[validate(custom(function = "hex_color"))]
    pub text_color: Option<String>,
    /// Envelope icon.
    #[serde(default)]
    pub icon: Option<String>,
}

/// Letter update request. All fields optional; only set fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLetterRequest {
    /// Letter title. An empty title clears it.
    #[serde(default)]
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,
    /// Letter content.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 5000, message = "Content must be at most 5000 characters")
    )]
    pub content: Option<String>,
    /// Envelope background color.
    #[serde(default)]
    #[validate(custom(function = "hex_color"))]
    pub background_color: Option<String>,
    /// Text color.
    #[serde(default)]
    #[validate(custom(function = "hex_color"))]
    pub text_color: Option<String>,
    /// Envelope icon.
    #[serde(default)]
    pub icon: Option<String>,
}
