//! Starter content written into a notebook as one unit.

use serde::{Deserialize, Serialize};

use crate::file::CreateFile;
use crate::task::CreateTask;

/// Folders, files and tasks to insert into a fresh notebook.
///
/// Folders are created at the notebook root. Files refer to them by name;
/// the `folder_id` and `notebook_id` of each [`CreateFile`] are filled in
/// when the seed is applied.
#[derive(Debug, Clone, Default)]
pub struct NotebookSeed {
    pub folders: Vec<String>,
    pub files: Vec<SeedFile>,
    pub tasks: Vec<CreateTask>,
}

/// A file placed in the notebook root or in one of the seed's folders.
#[derive(Debug, Clone)]
pub struct SeedFile {
    /// Name of a folder listed in [`NotebookSeed::folders`], or `None`.
    pub folder: Option<String>,
    pub file: CreateFile,
}

/// Row counts written by a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub folders: usize,
    pub files: usize,
    pub tasks: usize,
}
