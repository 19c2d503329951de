//! Multi-statement repository writes against a live PostgreSQL.
//!
//! Set `NOTEHUB_TEST_DATABASE_URL` to run these; without it every test
//! returns early.

use sqlx::PgPool;

use notehub_core::config::DatabaseConfig;
use notehub_core::error::ErrorKind;
use notehub_core::traits::NotebookListing;
use notehub_core::types::{FolderId, NotebookId, UserId};
use notehub_database::DatabasePool;
use notehub_database::migration::run_migrations;
use notehub_database::repositories::{
    FileRepository, FolderRepository, NotebookRepository, TaskRepository,
};
use notehub_entity::file::{CreateFile, File};
use notehub_entity::folder::{CreateFolder, Folder};
use notehub_entity::notebook::{CreateNotebook, NotebookSeed, SeedFile};
use notehub_entity::task::{CreateTask, TaskPriority, TaskStatus};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("NOTEHUB_TEST_DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 0,
        connect_timeout_seconds: 10,
        idle_timeout_seconds: 60,
    };
    let pool = DatabasePool::connect(&config).await.unwrap().into_pool();
    run_migrations(&pool).await.unwrap();
    Some(pool)
}

struct Repos {
    notebooks: NotebookRepository,
    folders: FolderRepository,
    files: FileRepository,
    tasks: TaskRepository,
}

impl Repos {
    fn new(pool: &PgPool) -> Self {
        Self {
            notebooks: NotebookRepository::new(pool.clone()),
            folders: FolderRepository::new(pool.clone()),
            files: FileRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
        }
    }

    async fn notebook(&self, owner: UserId) -> NotebookId {
        self.notebooks
            .create(&CreateNotebook {
                user_id: owner,
                emoji: "📓".into(),
                title: "Scratch".into(),
                date: "2025-01-01".into(),
                bg_color: "#4d4dff".into(),
                text_color: "#ffffff".into(),
            })
            .await
            .unwrap()
            .id
    }

    async fn folder(
        &self,
        owner: UserId,
        notebook: NotebookId,
        name: &str,
        parent: Option<FolderId>,
    ) -> Folder {
        self.folders
            .create(&CreateFolder {
                notebook_id: notebook,
                parent_id: parent,
                name: name.into(),
                user_id: owner,
            })
            .await
            .unwrap()
    }

    async fn file(
        &self,
        owner: UserId,
        notebook: NotebookId,
        name: &str,
        folder: Option<FolderId>,
    ) -> File {
        self.files.create(&note(owner, Some(notebook), name, folder)).await.unwrap()
    }

    async fn counts(&self, owner: UserId, notebook: NotebookId) -> (usize, usize, usize) {
        (
            self.folders.list_by_notebook(&owner, &notebook).await.unwrap().len(),
            self.files.list_by_notebook(&owner, &notebook).await.unwrap().len(),
            self.tasks.list_by_notebook(&owner, &notebook).await.unwrap().len(),
        )
    }
}

fn note(
    owner: UserId,
    notebook: Option<NotebookId>,
    name: &str,
    folder: Option<FolderId>,
) -> CreateFile {
    CreateFile {
        user_id: owner,
        filename: name.into(),
        notebook_id: notebook,
        content: Some(format!("# {name}\n")),
        folder_id: folder,
        ..Default::default()
    }
}

fn task(title: &str, position: i32) -> CreateTask {
    CreateTask {
        title: title.into(),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: vec![],
        position,
    }
}

#[tokio::test]
async fn test_folder_delete_releases_files_and_children() {
    let Some(pool) = test_pool().await else { return };
    let repos = Repos::new(&pool);
    let owner = UserId::new();
    let notebook = repos.notebook(owner).await;

    let projects = repos.folder(owner, notebook, "Projects", None).await;
    let drafts = repos.folder(owner, notebook, "Drafts", Some(projects.id)).await;
    let old = repos.folder(owner, notebook, "Old", Some(drafts.id)).await;
    let inside = repos.file(owner, notebook, "outline.md", Some(drafts.id)).await;

    let release = repos
        .folders
        .delete_releasing_contents(&owner, &drafts.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(release.files_moved, 1);
    assert_eq!(release.folders_moved, 1);

    assert!(repos.folders.find_by_id(&owner, &drafts.id).await.unwrap().is_none());
    let old = repos.folders.find_by_id(&owner, &old.id).await.unwrap().unwrap();
    assert_eq!(old.parent_id, Some(projects.id));
    let inside = repos.files.find_by_id(&owner, &inside.id).await.unwrap().unwrap();
    assert_eq!(inside.folder_id, None);
}

#[tokio::test]
async fn test_folder_delete_by_other_owner_changes_nothing() {
    let Some(pool) = test_pool().await else { return };
    let repos = Repos::new(&pool);
    let owner = UserId::new();
    let notebook = repos.notebook(owner).await;

    let drafts = repos.folder(owner, notebook, "Drafts", None).await;
    let child = repos.folder(owner, notebook, "Ideas", Some(drafts.id)).await;
    let inside = repos.file(owner, notebook, "idea.md", Some(drafts.id)).await;

    let release = repos
        .folders
        .delete_releasing_contents(&UserId::new(), &drafts.id)
        .await
        .unwrap();
    assert!(release.is_none());

    assert!(repos.folders.find_by_id(&owner, &drafts.id).await.unwrap().is_some());
    let child = repos.folders.find_by_id(&owner, &child.id).await.unwrap().unwrap();
    assert_eq!(child.parent_id, Some(drafts.id));
    let inside = repos.files.find_by_id(&owner, &inside.id).await.unwrap().unwrap();
    assert_eq!(inside.folder_id, Some(drafts.id));
}

#[tokio::test]
async fn test_seed_writes_folders_files_and_tasks() {
    let Some(pool) = test_pool().await else { return };
    let repos = Repos::new(&pool);
    let owner = UserId::new();
    let notebook = repos.notebook(owner).await;

    let seed = NotebookSeed {
        folders: vec!["Resources".into()],
        files: vec![
            SeedFile {
                folder: None,
                file: note(owner, None, "tasks.md", None),
            },
            SeedFile {
                folder: Some("Resources".into()),
                file: note(owner, None, "links.md", None),
            },
        ],
        tasks: vec![task("Brainstorm", 0), task("Research", 1)],
    };

    let summary = repos.notebooks.apply_seed(&owner, &notebook, &seed).await.unwrap();
    assert_eq!((summary.folders, summary.files, summary.tasks), (1, 2, 2));
    assert_eq!(repos.counts(owner, notebook).await, (1, 2, 2));

    let resources = repos.folders.list_by_notebook(&owner, &notebook).await.unwrap();
    let files = repos.files.list_by_notebook(&owner, &notebook).await.unwrap();
    let links = files.iter().find(|f| f.filename == "links.md").unwrap();
    assert_eq!(links.folder_id, Some(resources[0].id));
    assert_eq!(links.notebook_id, Some(notebook));
}

#[tokio::test]
async fn test_failed_seed_leaves_notebook_empty() {
    let Some(pool) = test_pool().await else { return };
    let repos = Repos::new(&pool);
    let owner = UserId::new();
    let notebook = repos.notebook(owner).await;

    let seed = NotebookSeed {
        folders: vec!["Resources".into()],
        files: vec![SeedFile {
            folder: Some("Resources".into()),
            file: note(owner, None, "links.md", None),
        }],
        tasks: vec![task("Brainstorm", 0), task("Broken", -1)],
    };

    let err = repos.notebooks.apply_seed(&owner, &notebook, &seed).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);
    assert_eq!(repos.counts(owner, notebook).await, (0, 0, 0));
}

#[tokio::test]
async fn test_seed_with_unknown_folder_is_rejected() {
    let Some(pool) = test_pool().await else { return };
    let repos = Repos::new(&pool);
    let owner = UserId::new();
    let notebook = repos.notebook(owner).await;

    let seed = NotebookSeed {
        folders: vec!["Resources".into()],
        files: vec![SeedFile {
            folder: Some("Archive".into()),
            file: note(owner, None, "old.md", None),
        }],
        tasks: vec![],
    };

    let err = repos.notebooks.apply_seed(&owner, &notebook, &seed).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(repos.counts(owner, notebook).await, (0, 0, 0));
}
