/*
 * The application logic layer: `SelectionSession` binds a document store, a
 * selection set and the selection metadata into one unit per list view.
 */
pub mod session;

pub use session::{SelectionSession, SessionSelectionMetadata};
