/*
 * The selection side of the selection metadata: a read-only view of the current
 * selection size (`SelectionStoreOperations`), the listener contract through
 * which item transitions are delivered (`ItemStateListener`), and `SelectionSet`,
 * a minimal store that only notifies on real transitions.
 *
 * Everything here is single-threaded. Shared handles are `Rc`, listeners are held
 * as `Weak` so a listener that itself holds the store does not form a cycle.
 */
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

pub trait SelectionStoreOperations {
    fn selection_size(&self) -> usize;
}

impl<T: SelectionStoreOperations + ?Sized> SelectionStoreOperations for &T {
    fn selection_size(&self) -> usize {
        (**self).selection_size()
    }
}

impl<T: SelectionStoreOperations + ?Sized> SelectionStoreOperations for Rc<T> {
    fn selection_size(&self) -> usize {
        (**self).selection_size()
    }
}

/*
 * Receives per-item selection transitions. Implementors may assume each call
 * corresponds to an actual selected <-> deselected transition of `item_id`.
 */
pub trait ItemStateListener {
    fn on_item_state_changed(&mut self, item_id: &str, selected: bool);
}

pub type SharedItemStateListener = Rc<RefCell<dyn ItemStateListener>>;

#[derive(Default)]
pub struct SelectionSet {
    selected: RefCell<BTreeSet<String>>,
    listeners: RefCell<Vec<Weak<RefCell<dyn ItemStateListener>>>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item_state_listener(&self, listener: &SharedItemStateListener) {
        self.listeners.borrow_mut().push(Rc::downgrade(listener));
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.borrow().contains(item_id)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.borrow().iter().cloned().collect()
    }

    /// Returns true if `item_id` was not selected before.
    pub fn select(&self, item_id: &str) -> bool {
        let inserted = self.selected.borrow_mut().insert(item_id.to_string());
        if inserted {
            self.notify_item_state_changed(item_id, true);
        } else {
            log::trace!("SelectionSet: '{item_id}' already selected, no transition.");
        }
        inserted
    }

    /// Returns true if `item_id` was selected before.
    pub fn deselect(&self, item_id: &str) -> bool {
        let removed = self.selected.borrow_mut().remove(item_id);
        if removed {
            self.notify_item_state_changed(item_id, false);
        } else {
            log::trace!("SelectionSet: '{item_id}' not selected, no transition.");
        }
        removed
    }

    pub fn clear(&self) {
        let previously_selected = std::mem::take(&mut *self.selected.borrow_mut());
        log::debug!(
            "SelectionSet: Clearing {} selected item(s).",
            previously_selected.len()
        );
        for item_id in &previously_selected {
            self.notify_item_state_changed(item_id, false);
        }
    }

    /*
     * Delivers a transition to every live listener. The listener list is copied
     * out first so a listener may register further listeners or query the store
     * while being notified. Dropped listeners are pruned afterwards.
     */
    fn notify_item_state_changed(&self, item_id: &str, selected: bool) {
        let live_listeners: Vec<SharedItemStateListener> = self
            .listeners
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for listener in live_listeners {
            listener.borrow_mut().on_item_state_changed(item_id, selected);
        }
        self.listeners
            .borrow_mut()
            .retain(|listener| listener.strong_count() > 0);
    }
}

impl SelectionStoreOperations for SelectionSet {
    fn selection_size(&self) -> usize {
        self.selected.borrow().len()
    }
}
