//! # notehub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for notebooks, folders, files, and tasks.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
