/*
 * An in-memory table of document records keyed by document id. It is the
 * default attribute resolver for a selection session: the records come either
 * from a filesystem scan or from a JSON manifest (an array of `DocumentRecord`).
 * Removing a record makes its id stale, which is exactly the case the selection
 * metadata logs and skips.
 */
use super::attribute_resolver::AttributeResolverOperations;
use super::document_record::{DocumentRecord, ItemAttributes};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug)]
pub enum DocumentStoreError {
    Io(io::Error),
    Serde(serde_json::Error),
    DuplicateDocumentId(String),
}

impl From<io::Error> for DocumentStoreError {
    fn from(err: io::Error) -> Self {
        DocumentStoreError::Io(err)
    }
}

impl From<serde_json::Error> for DocumentStoreError {
    fn from(err: serde_json::Error) -> Self {
        DocumentStoreError::Serde(err)
    }
}

impl std::fmt::Display for DocumentStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStoreError::Io(e) => write!(f, "Manifest I/O error: {e}"),
            DocumentStoreError::Serde(e) => write!(f, "Manifest parse error: {e}"),
            DocumentStoreError::DuplicateDocumentId(id) => {
                write!(f, "Manifest contains document id '{id}' more than once")
            }
        }
    }
}

impl std::error::Error for DocumentStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentStoreError::Io(e) => Some(e),
            DocumentStoreError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocumentStoreError>;

#[derive(Debug, Default)]
pub struct DocumentStore {
    records: HashMap<String, DocumentRecord>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records; later duplicates replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = DocumentRecord>) -> Self {
        let mut store = DocumentStore::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /*
     * Loads a JSON manifest. Unlike `from_records`, a manifest with a repeated
     * document id is rejected, since there is no meaningful order to pick a
     * winner from.
     */
    pub fn load_manifest(path: &Path) -> Result<Self> {
        log::debug!("DocumentStore: Loading manifest from {path:?}");
        let reader = BufReader::new(File::open(path)?);
        let records: Vec<DocumentRecord> = serde_json::from_reader(reader)?;

        let mut store = DocumentStore::new();
        for record in records {
            if store.records.contains_key(&record.document_id) {
                return Err(DocumentStoreError::DuplicateDocumentId(record.document_id));
            }
            store.insert(record);
        }
        log::debug!(
            "DocumentStore: Loaded {} document(s) from {path:?}",
            store.len()
        );
        Ok(store)
    }

    pub fn insert(&mut self, record: DocumentRecord) -> Option<DocumentRecord> {
        self.records.insert(record.document_id.clone(), record)
    }

    pub fn remove(&mut self, document_id: &str) -> Option<DocumentRecord> {
        self.records.remove(document_id)
    }

    pub fn get(&self, document_id: &str) -> Option<&DocumentRecord> {
        self.records.get(document_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn document_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.records.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl AttributeResolverOperations for DocumentStore {
    fn resolve_attributes(&self, item_id: &str) -> Option<ItemAttributes> {
        self.get(item_id).map(DocumentRecord::attributes)
    }
}
