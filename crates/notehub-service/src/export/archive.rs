//! In-memory ZIP assembly for notebook exports.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use bytes::Bytes;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::ExportError;

/// Root directory name used when a notebook has no usable name.
pub const DEFAULT_ARCHIVE_ROOT: &str = "notebook";

const INVALID_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace characters that are invalid in file names with `_` and trim
/// surrounding whitespace.
pub fn sanitize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().to_string()
}

/// The top-level directory name of an export archive.
pub fn archive_root_name(notebook_name: Option<&str>) -> String {
    let sanitized = sanitize_name(notebook_name.unwrap_or_default());
    if sanitized.is_empty() {
        DEFAULT_ARCHIVE_ROOT.to_string()
    } else {
        sanitized
    }
}

/// The entries of an archive, collected before any compression happens.
#[derive(Debug)]
pub struct ArchivePlan {
    root: String,
    directories: Vec<String>,
    files: Vec<PlannedFile>,
}

#[derive(Debug)]
struct PlannedFile {
    /// `None` when the filename is unusable as an entry name.
    path: Option<String>,
    filename: String,
    data: Bytes,
}

/// A finished archive.
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    /// ZIP bytes, starting at offset 0.
    pub data: Bytes,
    /// Entries written, directories included.
    pub entries: usize,
    /// File entries that could not be written.
    pub skipped: usize,
}

impl ArchivePlan {
    /// Start a plan whose entries all live below `root/`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// The top-level directory name.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Add a directory entry for a resolved folder path.
    pub fn add_directory(&mut self, folder_path: &str) {
        self.directories
            .push(format!("{}/{}/", self.root, folder_path));
    }

    /// Add a file entry, inside `folder_path` or at the archive root.
    ///
    /// Trailing `/` are stripped from `filename` so the entry is not read
    /// back as a directory. A name that is empty after stripping is skipped
    /// when the archive is written.
    pub fn add_file(&mut self, folder_path: Option<&str>, filename: &str, data: Bytes) {
        let name = filename.trim_end_matches('/');
        let path = (!name.trim().is_empty()).then(|| match folder_path {
            Some(folder) => format!("{}/{}/{}", self.root, folder, name),
            None => format!("{}/{}", self.root, name),
        });
        self.files.push(PlannedFile {
            path,
            filename: filename.to_string(),
            data,
        });
    }

    /// Compress every planned entry into a ZIP buffer.
    ///
    /// The top-level directory is always written. A file entry that fails,
    /// has no usable name, or whose name was already written, is logged and
    /// skipped. Level 0 stores files uncompressed; levels 1 to 9 deflate.
    pub fn write(self, compression_level: i64) -> Result<ArchiveOutput, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let dir_options = SimpleFileOptions::default();
        let file_options = file_options(compression_level);

        let mut written: HashSet<String> = HashSet::new();
        let mut entries = 0usize;
        let mut skipped = 0usize;

        let root_dir = format!("{}/", self.root);
        zip.add_directory(root_dir.as_str(), dir_options)?;
        written.insert(root_dir);
        entries += 1;

        for dir in self.directories {
            if written.contains(&dir) {
                debug!(entry = %dir, "Directory entry already present");
                continue;
            }
            match zip.add_directory(dir.as_str(), dir_options) {
                Ok(()) => {
                    written.insert(dir);
                    entries += 1;
                }
                Err(e) => warn!(entry = %dir, error = %e, "Failed to add directory entry"),
            }
        }

        for file in self.files {
            let Some(path) = file.path else {
                warn!(filename = %file.filename, "File has no usable entry name, skipping");
                skipped += 1;
                continue;
            };
            if written.contains(&path) {
                warn!(entry = %path, "Duplicate archive entry, skipping file");
                skipped += 1;
                continue;
            }
            let result = zip
                .start_file(path.as_str(), file_options)
                .and_then(|()| zip.write_all(&file.data).map_err(Into::into));
            match result {
                Ok(()) => {
                    written.insert(path);
                    entries += 1;
                }
                Err(e) => {
                    warn!(entry = %path, error = %e, "Failed to add file entry");
                    skipped += 1;
                }
            }
        }

        let cursor = zip.finish()?;
        Ok(ArchiveOutput {
            data: Bytes::from(cursor.into_inner()),
            entries,
            skipped,
        })
    }
}

fn file_options(compression_level: i64) -> SimpleFileOptions {
    if compression_level <= 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level.min(9)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn names(data: &Bytes) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(data.to_vec())).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize_name(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_name("  My Notebook  "), "My Notebook");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["Plans: 2025/Q1?", "  spaced  ", "plain", "***"] {
            let once = sanitize_name(raw);
            assert_eq!(sanitize_name(&once), once);
            assert!(!once.contains(INVALID_NAME_CHARS));
        }
    }

    #[test]
    fn test_root_name_fallback() {
        assert_eq!(archive_root_name(None), "notebook");
        assert_eq!(archive_root_name(Some("")), "notebook");
        assert_eq!(archive_root_name(Some("   ")), "notebook");
        assert_eq!(archive_root_name(Some("a/b")), "a_b");
    }

    #[test]
    fn test_write_deflates_files_and_keeps_empty_dirs() {
        let mut plan = ArchivePlan::new("Root");
        plan.add_directory("Empty");
        plan.add_directory("Docs");
        plan.add_file(Some("Docs"), "a.md", Bytes::from("# A\n".repeat(64)));
        plan.add_file(None, "b.txt", Bytes::from_static(b"b"));

        let out = plan.write(6).unwrap();
        assert_eq!(out.entries, 5);
        assert_eq!(out.skipped, 0);

        let mut archive = ZipArchive::new(Cursor::new(out.data.to_vec())).unwrap();
        assert!(archive.by_name("Root/Empty/").unwrap().is_dir());

        let mut entry = archive.by_name("Root/Docs/a.md").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "# A\n".repeat(64));
    }

    #[test]
    fn test_duplicate_file_entries_are_skipped() {
        let mut plan = ArchivePlan::new("Root");
        plan.add_file(None, "same.md", Bytes::from_static(b"first"));
        plan.add_file(None, "same.md", Bytes::from_static(b"second"));
        plan.add_file(None, "", Bytes::new());

        let out = plan.write(6).unwrap();
        assert_eq!(out.skipped, 2);

        let mut archive = ZipArchive::new(Cursor::new(out.data.to_vec())).unwrap();
        let mut text = String::new();
        archive
            .by_name("Root/same.md")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "first");
    }

    #[test]
    fn test_every_configurable_level_keeps_file_content() {
        for level in 0..=9 {
            let mut plan = ArchivePlan::new("nb");
            plan.add_file(None, "a.md", Bytes::from_static(b"hello hello hello"));

            let out = plan.write(level).unwrap();
            assert_eq!(out.skipped, 0, "level {level}");
            assert_eq!(out.entries, 2, "level {level}");

            let mut archive = ZipArchive::new(Cursor::new(out.data.to_vec())).unwrap();
            let mut entry = archive.by_name("nb/a.md").unwrap();
            let expected = if level == 0 {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            assert_eq!(entry.compression(), expected, "level {level}");
            let mut text = String::new();
            entry.read_to_string(&mut text).unwrap();
            assert_eq!(text, "hello hello hello", "level {level}");
        }
    }

    #[test]
    fn test_trailing_slash_filename_stays_a_file() {
        let mut plan = ArchivePlan::new("nb");
        plan.add_directory("Docs");
        plan.add_file(None, "dir/", Bytes::from_static(b"z"));
        plan.add_file(Some("Docs"), "/", Bytes::from_static(b"lost"));

        let out = plan.write(6).unwrap();
        assert_eq!(out.entries, 3);
        assert_eq!(out.skipped, 1);
        assert_eq!(names(&out.data), vec!["nb/", "nb/Docs/", "nb/dir"]);

        let mut archive = ZipArchive::new(Cursor::new(out.data.to_vec())).unwrap();
        let mut entry = archive.by_name("nb/dir").unwrap();
        assert!(entry.is_file());
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "z");
    }

    #[test]
    fn test_empty_plan_has_only_root_directory() {
        let out = ArchivePlan::new("notebook").write(6).unwrap();
        assert_eq!(names(&out.data), vec!["notebook/".to_string()]);
    }
}
