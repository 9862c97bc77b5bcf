//! Letter data types and presentation constants.

use serde::{Deserialize, Serialize};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Default envelope background color.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#fff5f7";

/// Default text color.
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";

/// Default envelope icon.
pub const DEFAULT_ICON: &str = "💕";

/// Icons offered by the letter editor.
pub const STICKERS: [&str; 15] = [
    "💕", "❤️", "💖", "💝", "💌", "🌹", "🌷", "🌸", "✨", "🦋", "🕊️", "🎀", "🍀", "⭐", "🌙",
];

/// A stored letter.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Letter {
    /// Opaque letter id, also used as the share token.
    pub id: String,
    pub owner_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub background_color: String,
    pub text_color: String,
    pub icon: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a letter. The title is optional; unset styling
/// fields fall back to the defaults when the row is inserted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LetterDraft {
    pub title: Option<String>,
    pub content: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub icon: Option<String>,
}

/// A fully-resolved new letter, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewLetter {
    pub owner_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub background_color: String,
    pub text_color: String,
    pub icon: String,
}

impl NewLetter {
    /// Resolve a draft against the defaults. A blank title is stored
    /// as no title at all.
    pub fn from_draft(owner_id: i64, draft: LetterDraft) -> Self {
        Self {
            owner_id,
            title: draft.title.filter(|t| !t.trim().is_empty()),
            content: draft.content,
            background_color: draft
                .background_color
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            text_color: draft
                .text_color
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            icon: draft.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
        }
    }
}

/// Partial update to a letter. Only set fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LetterUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub icon: Option<String>,
}

impl LetterUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.background_color.is_none()
            && self.text_color.is_none()
            && self.icon.is_none()
    }
}

/// Check whether `value` is a `#rrggbb` hex color.
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
