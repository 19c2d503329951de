//! Starter content applied to new notebooks.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use tracing::info;

use notehub_core::result::AppResult;
use notehub_core::types::NotebookId;
use notehub_database::repositories::NotebookRepository;
use notehub_entity::file::{CreateFile, ProcessingStatus};
use notehub_entity::notebook::{NotebookSeed, SeedFile, SeedSummary};
use notehub_entity::task::{CreateTask, TaskPriority, TaskStatus};

use crate::context::RequestContext;
use crate::file::generate_unique_filename;

/// Files created at the notebook root.
pub const ROOT_FILES: [&str; 2] = ["tasks.md", "voiceover.md"];
/// Folder created at the notebook root.
pub const RESOURCES_FOLDER: &str = "Resources";
/// File created inside the resources folder.
pub const RESOURCES_FILE: &str = "links.md";

const TEMPLATE_CONTENT_TYPE: &str = "text/markdown";

const TASKS_MD: &str = "# Task Planning\n\n## Project Goals\nDefine what you want to achieve with this project.\n\n## Checklist\n- [ ] Brainstorm ideas\n- [ ] Conduct research\n- [ ] Draft content\n- [ ] Review and refine\n\n## Notes\n- Deadline: TBD\n- Priority: High\n";

const VOICEOVER_MD: &str = "# Voiceover Script\n\n## Introduction (0:00 - 0:30)\n**Speaker:** \"Hello and welcome to...\"\n\n## Key Point 1 (0:30 - 2:00)\n**Speaker:** \"The most important thing to remember is...\"\n\n## Conclusion (2:00 - End)\n**Speaker:** \"Thank you for watching.\"\n";

const LINKS_MD: &str = "# Resources\n\n## References\n- [Google](https://google.com)\n- [Research Paper](https://example.com)\n\n## Media Assets\n- [Images](https://unsplash.com)\n- [Icons](https://lucide.dev)\n";

/// Markdown body for a template file. Unknown names get a bare heading.
pub fn template_content(filename: &str) -> &'static str {
    match filename {
        "tasks.md" => TASKS_MD,
        "voiceover.md" => VOICEOVER_MD,
        "links.md" => LINKS_MD,
        _ => "# New File\n",
    }
}

/// The starter Kanban board, with due dates relative to `today`.
pub fn template_tasks(today: NaiveDate) -> Vec<CreateTask> {
    let due = |days: u64| today.checked_add_days(Days::new(days));
    let task = |title: &str,
                description: &str,
                status: TaskStatus,
                priority: TaskPriority,
                due_date: Option<NaiveDate>,
                tags: &[&str],
                position: i32| CreateTask {
        title: title.to_string(),
        description: Some(description.to_string()),
        status,
        priority,
        due_date,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        position,
    };

    vec![
        task(
            "Initial Brainstorming",
            "Come up with 5 solid ideas for the content. Focus on audience engagement.",
            TaskStatus::Todo,
            TaskPriority::High,
            due(1),
            &["planning", "creative"],
            0,
        ),
        task(
            "Market Research",
            "Analyze competitors and gather reference links in Resources/links.md.",
            TaskStatus::Todo,
            TaskPriority::Medium,
            due(2),
            &["research", "market-analysis"],
            1,
        ),
        task(
            "Create Outline",
            "Draft the structure in tasks.md using the Checklist section.",
            TaskStatus::Todo,
            TaskPriority::Medium,
            due(3),
            &["planning", "structure"],
            2,
        ),
        task(
            "Write First Draft",
            "Start writing the script in voiceover.md. Focus on the introduction first.",
            TaskStatus::InProgress,
            TaskPriority::High,
            Some(today),
            &["writing", "core-work"],
            0,
        ),
        task(
            "Self Review",
            "Read through the draft out loud to check for flow and timing.",
            TaskStatus::Review,
            TaskPriority::Low,
            due(5),
            &["editing", "quality-control"],
            0,
        ),
        task(
            "Setup Notebook",
            "Notebook initialized with default templates and folder structure.",
            TaskStatus::Done,
            TaskPriority::Low,
            Some(today),
            &["system", "setup"],
            0,
        ),
    ]
}

/// The content-creation starter: two root files, a resources folder with
/// a links file, and the starter Kanban board.
pub fn content_creation_seed(ctx: &RequestContext, today: NaiveDate) -> NotebookSeed {
    let file = |folder: Option<&str>, filename: &str| {
        let content = template_content(filename);
        SeedFile {
            folder: folder.map(str::to_string),
            file: CreateFile {
                user_id: ctx.user_id,
                filename: filename.to_string(),
                unique_filename: generate_unique_filename(filename),
                url: None,
                content_type: Some(TEMPLATE_CONTENT_TYPE.to_string()),
                file_size_bytes: Some(content.len() as i64),
                notebook_id: None,
                processing_status: ProcessingStatus::Pending,
                content: Some(content.to_string()),
                folder_id: None,
            },
        }
    };

    let mut files: Vec<SeedFile> = ROOT_FILES.iter().map(|name| file(None, name)).collect();
    files.push(file(Some(RESOURCES_FOLDER), RESOURCES_FILE));

    NotebookSeed {
        folders: vec![RESOURCES_FOLDER.to_string()],
        files,
        tasks: template_tasks(today),
    }
}

/// Applies the content-creation template to notebooks.
#[derive(Debug, Clone)]
pub struct TemplateService {
    notebook_repo: Arc<NotebookRepository>,
}

impl TemplateService {
    /// Creates a new template service.
    pub fn new(notebook_repo: Arc<NotebookRepository>) -> Self {
        Self { notebook_repo }
    }

    /// Create the root files, the resources folder, and the starter tasks.
    ///
    /// The template is written atomically: on error the notebook is left
    /// empty.
    pub async fn apply_content_creation_template(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<SeedSummary> {
        let seed = content_creation_seed(ctx, Local::now().date_naive());
        let summary = self
            .notebook_repo
            .apply_seed(&ctx.user_id, notebook_id, &seed)
            .await?;

        info!(
            request_id = %ctx.request_id,
            notebook_id = %notebook_id,
            folders = summary.folders,
            files = summary.files,
            tasks = summary.tasks,
            "Applied content-creation template"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use notehub_core::types::UserId;

    use super::*;

    #[test]
    fn test_template_content_lookup() {
        assert!(template_content("tasks.md").starts_with("# Task Planning\n"));
        assert!(template_content("voiceover.md").contains("**Speaker:** \"Thank you for watching.\""));
        assert!(template_content("links.md").ends_with("- [Icons](https://lucide.dev)\n"));
        assert_eq!(template_content("other.md"), "# New File\n");
    }

    #[test]
    fn test_content_creation_seed_layout() {
        let ctx = RequestContext::new(UserId::new());
        let today = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let seed = content_creation_seed(&ctx, today);

        assert_eq!(seed.folders, vec![RESOURCES_FOLDER]);
        assert_eq!(seed.tasks.len(), 6);

        let placed: Vec<_> = seed
            .files
            .iter()
            .map(|f| (f.folder.as_deref(), f.file.filename.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![
                (None, "tasks.md"),
                (None, "voiceover.md"),
                (Some("Resources"), "links.md"),
            ]
        );

        for entry in &seed.files {
            let body = entry.file.content.as_deref().unwrap();
            assert_eq!(body, template_content(&entry.file.filename));
            assert_eq!(entry.file.file_size_bytes, Some(body.len() as i64));
            assert_eq!(entry.file.user_id, ctx.user_id);
            assert!(entry.file.unique_filename.ends_with(".md"));
        }
    }

    #[test]
    fn test_template_tasks_board() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let tasks = template_tasks(today);
        assert_eq!(tasks.len(), 6);

        let count = |status| tasks.iter().filter(|t| t.status == status).count();
        assert_eq!(count(TaskStatus::Todo), 3);
        assert_eq!(count(TaskStatus::InProgress), 1);
        assert_eq!(count(TaskStatus::Review), 1);
        assert_eq!(count(TaskStatus::Done), 1);

        let due: Vec<_> = tasks.iter().map(|t| t.due_date).collect();
        assert_eq!(
            due,
            vec![
                NaiveDate::from_ymd_opt(2025, 12, 31),
                NaiveDate::from_ymd_opt(2026, 1, 1),
                NaiveDate::from_ymd_opt(2026, 1, 2),
                Some(today),
                NaiveDate::from_ymd_opt(2026, 1, 4),
                Some(today),
            ]
        );

        assert_eq!(tasks[1].tags, vec!["research", "market-analysis"]);
        assert_eq!(tasks[2].position, 2);
        assert_eq!(tasks[3].priority, TaskPriority::High);
    }
}
