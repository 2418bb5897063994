/*
 * A selection session wires the pieces together for one list view: the
 * document store (attribute lookups), the selection set (transition tracking)
 * and the selection metadata registered as a listener on that set. Callers
 * drive the session with select/deselect and read back a `SelectionSummary`
 * whenever menu or toolbar state needs refreshing.
 */
use crate::core::{
    DocumentStore, ItemStateListener, SelectionCounters, SelectionMetadata, SelectionSet,
    SelectionSummary, SharedItemStateListener,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type SessionSelectionMetadata = SelectionMetadata<Rc<SelectionSet>, Rc<DocumentStore>>;

pub struct SelectionSession {
    documents: Rc<DocumentStore>,
    selection: Rc<SelectionSet>,
    metadata: Rc<RefCell<SessionSelectionMetadata>>,
}

impl SelectionSession {
    pub fn new(documents: DocumentStore) -> Self {
        log::debug!(
            "SelectionSession::new called with {} document(s).",
            documents.len()
        );
        let documents = Rc::new(documents);
        let selection = Rc::new(SelectionSet::new());
        let metadata = Rc::new(RefCell::new(SelectionMetadata::new(
            Rc::clone(&selection),
            Rc::clone(&documents),
        )));
        let listener: SharedItemStateListener = metadata.clone();
        selection.add_item_state_listener(&listener);

        SelectionSession {
            documents,
            selection,
            metadata,
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /*
     * Metadata is only handed out as copies. A borrow held across `select` or
     * `deselect` would collide with the listener notification.
     */
    pub fn counters(&self) -> SelectionCounters {
        self.metadata.borrow().counters()
    }

    pub fn skipped_event_count(&self) -> usize {
        self.metadata.borrow().skipped_event_count()
    }

    pub fn select(&self, item_id: &str) -> bool {
        self.selection.select(item_id)
    }

    pub fn deselect(&self, item_id: &str) -> bool {
        self.selection.deselect(item_id)
    }

    /// Flips the selection state of `item_id`; returns the new state.
    pub fn toggle(&self, item_id: &str) -> bool {
        if self.selection.is_selected(item_id) {
            self.selection.deselect(item_id);
            false
        } else {
            self.selection.select(item_id);
            true
        }
    }

    pub fn clear(&self) {
        self.selection.clear();
    }

    pub fn summary(&self) -> SelectionSummary {
        self.metadata.borrow().summary()
    }
}

/*
 * A session is also usable as a listener in its own right, e.g. when an outer
 * selection model already de-duplicates transitions and only needs the
 * metadata to follow along.
 */
impl ItemStateListener for SelectionSession {
    fn on_item_state_changed(&mut self, item_id: &str, selected: bool) {
        let changed = if selected {
            self.selection.select(item_id)
        } else {
            self.selection.deselect(item_id)
        };
        if !changed {
            log::debug!(
                "SelectionSession: Ignoring repeated '{item_id}' selected={selected} notification."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document_record::{
        DocumentRecord, FLAG_DIR_SUPPORTS_CREATE, FLAG_SUPPORTS_DELETE, FLAG_SUPPORTS_RENAME,
    };
    use crate::core::mime_predicate::MIME_TYPE_DIR;
    use crate::core::SelectionStoreOperations;

    fn create_test_session() -> SelectionSession {
        SelectionSession::new(DocumentStore::from_records(vec![
            DocumentRecord::new_test(
                "photos",
                MIME_TYPE_DIR,
                FLAG_DIR_SUPPORTS_CREATE | FLAG_SUPPORTS_DELETE | FLAG_SUPPORTS_RENAME,
            ),
            DocumentRecord::new_test(
                "photos/cat.jpg",
                "image/jpeg",
                FLAG_SUPPORTS_DELETE | FLAG_SUPPORTS_RENAME,
            ),
            DocumentRecord::new_test("system.bin", "application/octet-stream", 0),
        ]))
    }

    #[test]
    fn test_session_tracks_selection_through_metadata() {
        crate::initialize_logging();
        let session = create_test_session();

        assert!(session.select("photos"));
        let summary = session.summary();
        assert!(summary.contains_directories);
        assert!(summary.can_paste_into);
        assert!(summary.can_rename);

        // A repeated select is not a transition and must not double count.
        assert!(!session.select("photos"));
        assert_eq!(session.counters().directory_count, 1);

        assert!(session.toggle("system.bin"));
        let summary = session.summary();
        assert!(!summary.can_delete);
        assert!(!summary.can_rename);
        assert!(!summary.can_paste_into);

        assert!(!session.toggle("system.bin"));
        assert!(session.summary().can_delete);

        session.clear();
        assert_eq!(session.selection().selection_size(), 0);
        assert_eq!(session.counters(), SelectionCounters::default());
        assert!(!session.summary().contains_directories);
    }

    #[test]
    fn test_session_skips_unknown_ids() {
        crate::initialize_logging();
        let session = create_test_session();

        assert!(session.select("ghost"));
        assert_eq!(session.skipped_event_count(), 1);
        assert_eq!(session.counters(), SelectionCounters::default());
        // Skipped items still count towards the selection size but block nothing.
        assert_eq!(session.selection().selection_size(), 1);
        assert!(session.summary().can_rename);
        assert!(session.summary().can_delete);
        assert_eq!(session.documents().len(), 3);
    }

    #[test]
    fn test_session_as_listener_deduplicates() {
        crate::initialize_logging();
        let mut session = create_test_session();

        session.on_item_state_changed("photos/cat.jpg", true);
        session.on_item_state_changed("photos/cat.jpg", true);
        assert_eq!(session.selection().selection_size(), 1);
        assert!(session.summary().can_rename);

        session.on_item_state_changed("photos/cat.jpg", false);
        session.on_item_state_changed("photos/cat.jpg", false);
        assert_eq!(session.counters(), SelectionCounters::default());
    }

    #[test]
    fn test_reading_metadata_between_selections() {
        crate::initialize_logging();
        let session = create_test_session();

        let summary_before = session.summary();
        let counters_before = session.counters();
        assert!(session.select("photos"));
        assert!(session.select("system.bin"));
        assert!(session.deselect("photos"));
        session.clear();

        assert!(summary_before.can_delete);
        assert!(!summary_before.can_rename);
        assert_eq!(counters_before, SelectionCounters::default());
        assert_eq!(session.counters(), counters_before);
        assert_eq!(session.summary(), summary_before);
    }
}
