//! Typed identifiers for notebooks, folders, files, tasks, and users.
//!
//! Identifiers arrive in several textual shapes (hyphenated, simple,
//! braced, upper-case). They are parsed into their canonical UUID form at
//! the boundary, so that everything past it compares with plain `==`.
//! With the `sqlx` feature each type also encodes and decodes as a
//! PostgreSQL `UUID`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Normalize any accepted textual form into the canonical identifier.
            pub fn parse(raw: &str) -> AppResult<Self> {
                Uuid::parse_str(raw.trim()).map(Self).map_err(|e| {
                    AppError::validation(format!("Invalid {} id '{}': {e}", $label, raw))
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user (file and folder owner).
    UserId, "user"
);

define_id!(
    /// Unique identifier for a notebook.
    NotebookId, "notebook"
);

define_id!(
    /// Unique identifier for a folder.
    FolderId, "folder"
);

define_id!(
    /// Unique identifier for a file.
    FileId, "file"
);

define_id!(
    /// Unique identifier for a Kanban task.
    TaskId, "task"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_differ() {
        assert_ne!(FolderId::new(), FolderId::new());
    }

    #[test]
    fn test_parse_normalizes_representations() {
        let uuid = Uuid::new_v4();
        let hyphenated = FolderId::parse(&uuid.hyphenated().to_string()).unwrap();
        let simple = FolderId::parse(&uuid.simple().to_string()).unwrap();
        let braced = FolderId::parse(&uuid.braced().to_string().to_uppercase()).unwrap();
        assert_eq!(hyphenated, simple);
        assert_eq!(hyphenated, braced);
        assert_eq!(braced.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = NotebookId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
        assert!(err.message.contains("notebook"));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = FileId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: FileId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
