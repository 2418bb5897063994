/*
 * This module consolidates the platform-agnostic core: the incrementally
 * maintained `SelectionMetadata` and the collaborators it is driven by. The
 * selection side is abstracted by `SelectionStoreOperations` and
 * `ItemStateListener`, attribute lookups by `AttributeResolverOperations`.
 * Concrete implementations cover an in-memory `DocumentStore`, a transition-only
 * `SelectionSet`, a filesystem `CoreDocumentScanner` and a file-backed
 * `CoreConfigManager`.
 */
pub mod attribute_resolver;
pub mod config;
pub mod document_record;
pub mod document_store;
pub mod file_system;
pub mod mime_predicate;
pub mod selection_metadata;
pub mod selection_store;


pub use attribute_resolver::{AttributeResolverOperations, ResolverFn};

pub use config::{AppConfig, ConfigError, ConfigManagerOperations, CoreConfigManager};

pub use document_record::{DocumentRecord, ItemAttributes};

pub use document_store::{DocumentStore, DocumentStoreError};

pub use file_system::{
    CoreDocumentScanner, DocumentScannerOperations, FileSystemError, ScanOptions,
};

pub use selection_metadata::{
    SelectionCounters, SelectionDetails, SelectionMetadata, SelectionSummary,
};

pub use selection_store::{
    ItemStateListener, SelectionSet, SelectionStoreOperations, SharedItemStateListener,
};
