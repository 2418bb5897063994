/*
 * selection_metadata keeps constant-time answers to "can the current selection
 * be deleted / renamed / pasted into?" by maintaining a handful of counters as
 * items enter and leave a selection. See `core::selection_metadata` for the
 * mechanism and `app_logic::SelectionSession` for a ready-wired session.
 */
pub mod app_logic;
pub mod core;
pub mod logging;

#[cfg(test)]
pub use logging::initialize_logging;
