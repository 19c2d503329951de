//! # notehub-entity
//!
//! Domain entity models for NoteHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; enums stored in columns derive `sqlx::Type`.

pub mod file;
pub mod folder;
pub mod notebook;
pub mod task;
