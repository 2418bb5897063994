use super::document_record::{
    DocumentRecord, FLAG_DIR_SUPPORTS_CREATE, FLAG_PARTIAL, FLAG_SUPPORTS_DELETE,
    FLAG_SUPPORTS_RENAME, FLAG_SUPPORTS_WRITE,
};
use super::mime_predicate::{self, MIME_TYPE_DIR};
use ignore::{WalkBuilder, overrides::OverrideBuilder};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/*
 * This module turns a directory on disk into document records, so a selection
 * session can run against real files. Capabilities are derived from file
 * permissions: an entry can be deleted or renamed when both it and its parent
 * directory are writable, a writable directory accepts new children, and files
 * whose extension marks an unfinished download are flagged as partial.
 */

#[derive(Debug)]
pub enum FileSystemError {
    Io(io::Error),
    IgnoreError(ignore::Error),
    InvalidPath(PathBuf),
}

impl From<io::Error> for FileSystemError {
    fn from(err: io::Error) -> Self {
        FileSystemError::Io(err)
    }
}

impl From<ignore::Error> for FileSystemError {
    fn from(err: ignore::Error) -> Self {
        FileSystemError::IgnoreError(err)
    }
}

impl std::fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSystemError::Io(e) => write!(f, "I/O error: {e}"),
            FileSystemError::IgnoreError(e) => write!(f, "Ignore pattern processing error: {e}"),
            FileSystemError::InvalidPath(p) => write!(f, "Not a directory: {p:?}"),
        }
    }
}

impl std::error::Error for FileSystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileSystemError::Io(e) => Some(e),
            FileSystemError::IgnoreError(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    // Gitignore-style exclusion globs.
    pub exclude_patterns: Vec<String>,
    // Extensions (without the dot, case-insensitive) that mark a partial file.
    pub partial_extensions: Vec<String>,
    pub respect_ignore_files: bool,
}

pub trait DocumentScannerOperations {
    /*
     * Scans `root_path` recursively and returns one record per entry below it
     * (the root itself is not included). Document ids are root-relative paths
     * joined with '/'. Records come back sorted by id.
     */
    fn scan_documents(&self, root_path: &Path, options: &ScanOptions) -> Result<Vec<DocumentRecord>>;
}

pub struct CoreDocumentScanner {}

impl CoreDocumentScanner {
    pub fn new() -> Self {
        CoreDocumentScanner {}
    }
}

impl Default for CoreDocumentScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentScannerOperations for CoreDocumentScanner {
    fn scan_documents(&self, root_path: &Path, options: &ScanOptions) -> Result<Vec<DocumentRecord>> {
        if !root_path.is_dir() {
            return Err(FileSystemError::InvalidPath(root_path.to_path_buf()));
        }
        log::debug!(
            "DocumentScanner: Scanning {root_path:?} (respect_ignore_files={}).",
            options.respect_ignore_files
        );

        let mut walker_builder = WalkBuilder::new(root_path);
        walker_builder
            .standard_filters(options.respect_ignore_files)
            .git_global(false)
            .sort_by_file_path(|a, b| a.cmp(b));
        if let Some(overrides) = build_exclude_overrides(root_path, &options.exclude_patterns) {
            walker_builder.overrides(overrides);
        }

        let mut directory_writable: HashMap<PathBuf, bool> = HashMap::new();
        directory_writable.insert(root_path.to_path_buf(), is_writable(&fs::metadata(root_path)?));

        let mut records = Vec::new();
        for entry_result in walker_builder.build() {
            let entry = entry_result?;
            let path = entry.path();
            if path == root_path {
                continue;
            }

            let metadata = entry.metadata()?;
            let writable = is_writable(&metadata);
            let is_dir = metadata.is_dir();
            if is_dir {
                directory_writable.insert(path.to_path_buf(), writable);
            }

            // The walker yields parents before children, so the parent is already known.
            let parent_writable = path
                .parent()
                .and_then(|parent| directory_writable.get(parent).copied())
                .unwrap_or(false);

            let Some(document_id) = document_id_for(root_path, path) else {
                log::warn!("DocumentScanner: Skipping {path:?}, not representable as a document id.");
                continue;
            };
            let display_name = entry.file_name().to_string_lossy().into_owned();
            let mime_type = if is_dir {
                MIME_TYPE_DIR
            } else {
                mime_predicate::guess_mime_type(path)
            };

            let mut flags = 0;
            if writable && parent_writable {
                flags |= FLAG_SUPPORTS_DELETE | FLAG_SUPPORTS_RENAME;
            }
            if writable {
                flags |= if is_dir {
                    FLAG_DIR_SUPPORTS_CREATE
                } else {
                    FLAG_SUPPORTS_WRITE
                };
            }
            if !is_dir && has_partial_extension(path, &options.partial_extensions) {
                flags |= FLAG_PARTIAL;
            }

            records.push(DocumentRecord::new(
                document_id,
                display_name,
                mime_type.to_string(),
                flags,
            ));
        }

        records.sort_by(|a, b| a.document_id.cmp(&b.document_id));
        log::debug!(
            "DocumentScanner: Scan complete. Found {} document(s) under {root_path:?}.",
            records.len()
        );
        Ok(records)
    }
}

fn build_exclude_overrides(
    root_path: &Path,
    exclude_patterns: &[String],
) -> Option<ignore::overrides::Override> {
    if exclude_patterns.is_empty() {
        return None;
    }
    let mut override_builder = OverrideBuilder::new(root_path);
    for pattern in exclude_patterns {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // A whitelist override would hide every entry it does not match.
        if trimmed.starts_with('!') {
            log::warn!("DocumentScanner: Re-include pattern '{pattern}' is not supported, skipping.");
            continue;
        }
        // Override globs whitelist by default, so exclusion is the negated form.
        if let Err(err) = override_builder.add(&format!("!{trimmed}")) {
            log::warn!("DocumentScanner: Invalid exclude pattern '{pattern}': {err}");
        }
    }
    match override_builder.build() {
        Ok(overrides) => Some(overrides),
        Err(err) => {
            log::warn!("DocumentScanner: Failed to build overrides for exclude patterns: {err}");
            None
        }
    }
}

fn is_writable(metadata: &fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

fn has_partial_extension(path: &Path, partial_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| partial_extensions.iter().any(|p| p.eq_ignore_ascii_case(ext)))
}

fn document_id_for(root_path: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root_path).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document_record::ItemAttributes;
    use std::fs::File;
    use tempfile::tempdir;

    fn setup_test_dir(base_path: &Path) -> io::Result<()> {
        fs::create_dir_all(base_path.join("docs"))?;
        fs::create_dir_all(base_path.join("locked"))?;
        File::create(base_path.join("docs/notes.txt"))?.sync_all()?;
        File::create(base_path.join("docs/video.mp4.crdownload"))?.sync_all()?;
        File::create(base_path.join("locked/inner.txt"))?.sync_all()?;
        File::create(base_path.join("readme.md"))?.sync_all()?;
        File::create(base_path.join("frozen.txt"))?.sync_all()?;

        set_readonly(&base_path.join("frozen.txt"))?;
        set_readonly(&base_path.join("locked"))?;
        Ok(())
    }

    fn set_readonly(path: &Path) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_readonly(true);
        fs::set_permissions(path, permissions)
    }

    fn restore_writable(path: &Path) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_readonly(false);
        fs::set_permissions(path, permissions)
    }

    fn default_options() -> ScanOptions {
        ScanOptions {
            exclude_patterns: Vec::new(),
            partial_extensions: vec!["crdownload".to_string(), "part".to_string()],
            respect_ignore_files: true,
        }
    }

    fn attributes_of(records: &[DocumentRecord], id: &str) -> ItemAttributes {
        records
            .iter()
            .find(|r| r.document_id == id)
            .unwrap_or_else(|| panic!("Missing record for '{id}'"))
            .attributes()
    }

    #[test]
    fn test_scan_documents_derives_capabilities() -> Result<()> {
        crate::initialize_logging();
        let dir = tempdir()?;
        setup_test_dir(dir.path())?;

        let scan_result = CoreDocumentScanner::new().scan_documents(dir.path(), &default_options());
        // Restore before inspecting the result so tempdir cleanup can always remove `locked/`.
        restore_writable(&dir.path().join("locked"))?;
        let records = scan_result?;

        let ids: Vec<&str> = records.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "docs",
                "docs/notes.txt",
                "docs/video.mp4.crdownload",
                "frozen.txt",
                "locked",
                "locked/inner.txt",
                "readme.md",
            ]
        );

        let docs = attributes_of(&records, "docs");
        assert!(docs.is_directory && docs.supports_create_child);
        assert!(docs.supports_delete && docs.supports_rename);

        let notes = attributes_of(&records, "docs/notes.txt");
        assert!(!notes.is_directory && !notes.is_partial);
        assert!(notes.supports_delete && notes.supports_rename);

        assert!(attributes_of(&records, "docs/video.mp4.crdownload").is_partial);

        let frozen = attributes_of(&records, "frozen.txt");
        assert!(!frozen.supports_delete && !frozen.supports_rename);

        let locked = attributes_of(&records, "locked");
        assert!(locked.is_directory && !locked.supports_create_child);

        // Writable file inside a read-only directory cannot be removed from it.
        let inner = attributes_of(&records, "locked/inner.txt");
        assert!(!inner.supports_delete && !inner.supports_rename);

        assert_eq!(
            records.iter().find(|r| r.document_id == "readme.md").map(|r| r.mime_type.as_str()),
            Some("text/markdown")
        );
        Ok(())
    }

    #[test]
    fn test_scan_documents_applies_exclude_patterns() -> Result<()> {
        crate::initialize_logging();
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("build"))?;
        File::create(dir.path().join("build/out.bin"))?.sync_all()?;
        File::create(dir.path().join("keep.txt"))?.sync_all()?;
        File::create(dir.path().join("skip.log"))?.sync_all()?;

        let options = ScanOptions {
            exclude_patterns: vec!["build/".to_string(), "*.log".to_string(), "# comment".to_string()],
            ..default_options()
        };
        let records = CoreDocumentScanner::new().scan_documents(dir.path(), &options)?;

        let ids: Vec<&str> = records.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["keep.txt"]);
        Ok(())
    }

    #[test]
    fn test_scan_documents_rejects_non_directory() -> io::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("plain.txt");
        File::create(&file_path)?.sync_all()?;

        let result = CoreDocumentScanner::new().scan_documents(&file_path, &default_options());
        assert!(matches!(result, Err(FileSystemError::InvalidPath(p)) if p == file_path));
        Ok(())
    }

    #[test]
    fn test_document_id_for() {
        let root = Path::new("/data/root");
        assert_eq!(
            document_id_for(root, Path::new("/data/root/a/b.txt")),
            Some("a/b.txt".to_string())
        );
        assert_eq!(document_id_for(root, root), None);
        assert_eq!(document_id_for(root, Path::new("/elsewhere/x")), None);
    }
}
