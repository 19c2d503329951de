//! Repository implementations for all NoteHub entities.

pub mod file;
pub mod folder;
pub mod notebook;
pub mod task;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use notebook::NotebookRepository;
pub use task::TaskRepository;
