/*
 * Classification helpers for MIME types attached to document records.
 * The directory predicate is what the selection metadata uses to decide whether
 * an item counts as a directory; the extension table is only used by the
 * filesystem scanner when it has to invent a MIME type for a plain file.
 */
use std::path::Path;

pub const MIME_TYPE_DIR: &str = "vnd.android.document/directory";
pub const MIME_TYPE_INODE_DIR: &str = "inode/directory";
pub const MIME_TYPE_OCTET_STREAM: &str = "application/octet-stream";

const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("rs", "text/x-rust"),
    ("toml", "application/toml"),
    ("json", "application/json"),
    ("html", "text/html"),
    ("csv", "text/csv"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
];

/// Returns true when `mime_type` denotes a directory entry.
pub fn is_directory_type(mime_type: &str) -> bool {
    mime_type == MIME_TYPE_DIR || mime_type == MIME_TYPE_INODE_DIR
}

/*
 * Guesses a MIME type for a regular file from its extension (case-insensitive).
 * Unknown or missing extensions fall back to `application/octet-stream`.
 */
pub fn guess_mime_type(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return MIME_TYPE_OCTET_STREAM;
    };
    let extension = extension.to_ascii_lowercase();
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or(MIME_TYPE_OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_directory_type_accepts_both_directory_types() {
        assert!(is_directory_type(MIME_TYPE_DIR));
        assert!(is_directory_type(MIME_TYPE_INODE_DIR));
        assert!(!is_directory_type("text/plain"));
        assert!(!is_directory_type(""));
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(&PathBuf::from("a/b/notes.TXT")), "text/plain");
        assert_eq!(guess_mime_type(&PathBuf::from("photo.jpeg")), "image/jpeg");
        assert_eq!(
            guess_mime_type(&PathBuf::from("Makefile")),
            MIME_TYPE_OCTET_STREAM
        );
        assert_eq!(
            guess_mime_type(&PathBuf::from("archive.unknownext")),
            MIME_TYPE_OCTET_STREAM
        );
    }
}
