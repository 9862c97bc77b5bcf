//! Letters: the core domain objects of Amora.
//!
//! A letter is a short styled message owned by one account and
//! readable by anyone who holds its id.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::LetterRepository;
pub use service::LetterService;
pub use types::{
    is_hex_color, Letter, LetterDraft, LetterUpdate, NewLetter, DEFAULT_BACKGROUND_COLOR,
    DEFAULT_ICON, DEFAULT_TEXT_COLOR, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH, STICKERS,
};
