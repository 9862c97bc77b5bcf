//! Response DTOs for the Web API.

use serde::Serialize;

use crate::letter::Letter;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Account information.
    pub account: AccountInfo,
}

/// Account information in responses.
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Token refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Expiry in seconds.
    pub expires_in: u64,
}

/// Current account response (for /api/auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Number of letters owned.
    pub letter_count: i64,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

// ============================================================================
// Letter DTOs
// ============================================================================

/// Letter response.
#[derive(Debug, Serialize)]
pub struct LetterResponse {
    /// Letter ID (also the share token).
    pub id: String,
    /// Owning account ID.
    pub owner_id: i64,
    /// Title, if one was set.
    pub title: Option<String>,
    /// Content.
    pub content: String,
    /// Envelope background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
    /// Envelope icon.
    pub icon: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<Letter> for LetterResponse {
    fn from(letter: Letter) -> Self {
        Self {
            id: letter.id,
            owner_id: letter.owner_id,
            title: letter.title,
            content: letter.content,
            background_color: letter.background_color,
            text_color: letter.text_color,
            icon: letter.icon,
            created_at: letter.created_at,
            updated_at: letter.updated_at,
        }
    }
}

/// Letter deletion response.
#[derive(Debug, Serialize)]
pub struct DeleteLetterResponse {
    /// Whether the deletion succeeded.
    pub success: bool,
}
