/*
 * Incrementally maintained metadata about the current selection. Instead of
 * rescanning every selected item whenever the UI needs to decide whether
 * delete, rename or paste are available, `SelectionMetadata` keeps five
 * counters that are adjusted as single items enter or leave the selection.
 * Every query is then a constant-time comparison.
 *
 * Transitions arrive through `ItemStateListener`; queries are exposed through
 * `SelectionDetails`. The selection store and the attribute resolver are
 * borrowed collaborators, consulted synchronously and never owned.
 *
 * Caller contract: `on_item_state_changed` must be called exactly once per real
 * selected <-> deselected transition of an item. Duplicate or out-of-order
 * notifications leave the counters stale; this is not detected here.
 * `SelectionSet` is a store that honours the contract.
 */
use super::attribute_resolver::AttributeResolverOperations;
use super::document_record::ItemAttributes;
use super::selection_store::{ItemStateListener, SelectionStoreOperations};
use serde::Serialize;

/*
 * The UI-facing questions answered about the current selection.
 */
pub trait SelectionDetails {
    fn contains_directories(&self) -> bool;
    fn contains_partial_files(&self) -> bool;
    fn can_delete(&self) -> bool;
    // Rename is single-item only.
    fn can_rename(&self) -> bool;
    fn can_paste_into(&self) -> bool;
}

/*
 * Among the currently selected items, how many satisfy (or for the `no_*`
 * counters, fail) each predicate. Signed so that a contract violation shows up
 * as a negative count instead of an arithmetic panic.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCounters {
    pub directory_count: i64,
    // Partial files are files that haven't been fully downloaded.
    pub partial_count: i64,
    pub writable_directory_count: i64,
    pub no_delete_count: i64,
    pub no_rename_count: i64,
}

impl SelectionCounters {
    fn apply(&mut self, attributes: &ItemAttributes, delta: i64) {
        if attributes.is_directory {
            self.directory_count += delta;
        }
        if attributes.is_partial {
            self.partial_count += delta;
        }
        if attributes.supports_create_child {
            self.writable_directory_count += delta;
        }
        if !attributes.supports_delete {
            self.no_delete_count += delta;
        }
        if !attributes.supports_rename {
            self.no_rename_count += delta;
        }
    }
}

/// A point-in-time copy of every `SelectionDetails` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub contains_directories: bool,
    pub contains_partial_files: bool,
    pub can_delete: bool,
    pub can_rename: bool,
    pub can_paste_into: bool,
}

impl SelectionSummary {
    pub fn from_details(details: &dyn SelectionDetails) -> Self {
        SelectionSummary {
            contains_directories: details.contains_directories(),
            contains_partial_files: details.contains_partial_files(),
            can_delete: details.can_delete(),
            can_rename: details.can_rename(),
            can_paste_into: details.can_paste_into(),
        }
    }
}

pub struct SelectionMetadata<S, R> {
    selection: S,
    attribute_resolver: R,
    counters: SelectionCounters,
    skipped_event_count: usize,
}

impl<S, R> SelectionMetadata<S, R>
where
    S: SelectionStoreOperations,
    R: AttributeResolverOperations,
{
    pub fn new(selection: S, attribute_resolver: R) -> Self {
        log::debug!("SelectionMetadata::new called - counters start at zero.");
        SelectionMetadata {
            selection,
            attribute_resolver,
            counters: SelectionCounters::default(),
            skipped_event_count: 0,
        }
    }

    pub fn counters(&self) -> SelectionCounters {
        self.counters
    }

    /// Number of transitions ignored because the item's attributes could not be resolved.
    pub fn skipped_event_count(&self) -> usize {
        self.skipped_event_count
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary::from_details(self)
    }

    fn selection_size(&self) -> usize {
        self.selection.selection_size()
    }
}

impl<S, R> ItemStateListener for SelectionMetadata<S, R>
where
    S: SelectionStoreOperations,
    R: AttributeResolverOperations,
{
    fn on_item_state_changed(&mut self, item_id: &str, selected: bool) {
        let Some(attributes) = self.attribute_resolver.resolve_attributes(item_id) else {
            log::warn!(
                "SelectionMetadata: No attributes found for document '{item_id}'. Ignoring {} event.",
                if selected { "selected" } else { "deselected" }
            );
            self.skipped_event_count += 1;
            return;
        };

        let delta = if selected { 1 } else { -1 };
        self.counters.apply(&attributes, delta);
        log::trace!(
            "SelectionMetadata: '{item_id}' selected={selected}, counters now {:?}",
            self.counters
        );
    }
}

impl<S, R> SelectionDetails for SelectionMetadata<S, R>
where
    S: SelectionStoreOperations,
    R: AttributeResolverOperations,
{
    fn contains_directories(&self) -> bool {
        self.counters.directory_count > 0
    }

    fn contains_partial_files(&self) -> bool {
        self.counters.partial_count > 0
    }

    fn can_delete(&self) -> bool {
        self.counters.no_delete_count == 0
    }

    fn can_rename(&self) -> bool {
        self.counters.no_rename_count == 0 && self.selection_size() == 1
    }

    fn can_paste_into(&self) -> bool {
        self.counters.directory_count == 1
            && self.counters.writable_directory_count == 1
            && self.selection_size() == 1
    }
}
