//! Notebook domain entities.

pub mod model;
pub mod seed;

pub use model::{CreateNotebook, Notebook, UpdateNotebook};
pub use seed::{NotebookSeed, SeedFile, SeedSummary};
