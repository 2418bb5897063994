use super::mime_predicate;
use serde::{Deserialize, Serialize};

/*
 * Capability bits carried by a document record. The values follow the
 * documents-provider convention so that manifests exported from such a provider
 * can be loaded without translation.
 */
pub const FLAG_SUPPORTS_WRITE: u32 = 1 << 1;
pub const FLAG_SUPPORTS_DELETE: u32 = 1 << 2;
pub const FLAG_DIR_SUPPORTS_CREATE: u32 = 1 << 3;
pub const FLAG_SUPPORTS_RENAME: u32 = 1 << 6;
pub const FLAG_PARTIAL: u32 = 1 << 16;

/*
 * The per-item attributes the selection metadata cares about. This is the
 * resolved, flattened view of a `DocumentRecord`; it carries no identity.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub is_directory: bool,
    // Not fully materialized/downloaded locally.
    pub is_partial: bool,
    pub supports_create_child: bool,
    pub supports_delete: bool,
    pub supports_rename: bool,
}

/*
 * One row of document metadata, as provided by a document source (filesystem
 * scan or JSON manifest). The selection machinery identifies items by
 * `document_id` only.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub display_name: String,
    pub mime_type: String,
    #[serde(default)]
    pub flags: u32,
}

impl DocumentRecord {
    pub fn new(document_id: String, display_name: String, mime_type: String, flags: u32) -> Self {
        DocumentRecord {
            document_id,
            display_name,
            mime_type,
            flags,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) != 0
    }

    pub fn is_directory(&self) -> bool {
        mime_predicate::is_directory_type(&self.mime_type)
    }

    /// Derives the attribute view used by the selection metadata.
    pub fn attributes(&self) -> ItemAttributes {
        ItemAttributes {
            is_directory: self.is_directory(),
            is_partial: self.has_flag(FLAG_PARTIAL),
            supports_create_child: self.has_flag(FLAG_DIR_SUPPORTS_CREATE),
            supports_delete: self.has_flag(FLAG_SUPPORTS_DELETE),
            supports_rename: self.has_flag(FLAG_SUPPORTS_RENAME),
        }
    }

    #[cfg(test)]
    pub fn new_test(document_id: &str, mime_type: &str, flags: u32) -> Self {
        DocumentRecord {
            document_id: document_id.to_string(),
            display_name: document_id.rsplit('/').next().unwrap_or("").to_string(),
            mime_type: mime_type.to_string(),
            flags,
        }
    }
}
