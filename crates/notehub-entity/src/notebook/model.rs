//! Notebook entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::{NotebookId, UserId};

/// Default notebook card background colour.
pub const DEFAULT_BG_COLOR: &str = "#4d4dff";
/// Default notebook card text colour.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// A notebook: the top-level container for files, folders, and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notebook {
    /// Unique notebook identifier.
    pub id: NotebookId,
    /// The owning user.
    pub user_id: UserId,
    /// Emoji shown on the notebook card.
    pub emoji: String,
    /// Notebook title; also names the export archive.
    pub title: String,
    /// Free-form date label shown on the card.
    pub date: String,
    /// Card background colour.
    pub bg_color: String,
    /// Card text colour.
    pub text_color: String,
    /// When the notebook was created.
    pub created_at: DateTime<Utc>,
    /// When the notebook was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotebook {
    /// The owning user.
    pub user_id: UserId,
    /// Card emoji.
    pub emoji: String,
    /// Title.
    pub title: String,
    /// Date label.
    pub date: String,
    /// Background colour.
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    /// Text colour.
    #[serde(default = "default_text_color")]
    pub text_color: String,
}

impl CreateNotebook {
    /// Creates a request with the default card colours.
    pub fn new(
        user_id: UserId,
        emoji: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            emoji: emoji.into(),
            title: title.into(),
            date: date.into(),
            bg_color: default_bg_color(),
            text_color: default_text_color(),
        }
    }
}

/// Partial notebook update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotebook {
    /// New emoji.
    pub emoji: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New date label.
    pub date: Option<String>,
    /// New background colour.
    pub bg_color: Option<String>,
    /// New text colour.
    pub text_color: Option<String>,
}

impl UpdateNotebook {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.emoji.is_none()
            && self.title.is_none()
            && self.date.is_none()
            && self.bg_color.is_none()
            && self.text_color.is_none()
    }
}

fn default_bg_color() -> String {
    DEFAULT_BG_COLOR.to_string()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}
