//! File domain entities.

pub mod model;
pub mod processing;

pub use model::{CreateFile, File, FileChanges, ProcessingStatus};
pub use processing::ProcessingResult;
