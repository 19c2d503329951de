//! Notebook lifecycle and starter templates.

pub mod service;
pub mod template;

pub use service::NotebookService;
pub use template::{TemplateService, content_creation_seed, template_content, template_tasks};
