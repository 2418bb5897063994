// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use selection_metadata::app_logic::SelectionSession;
use selection_metadata::core::{
    AppConfig, ConfigManagerOperations, CoreConfigManager, CoreDocumentScanner,
    DocumentScannerOperations, DocumentStore, SelectionCounters, SelectionSummary,
};
use selection_metadata::logging;
use std::path::PathBuf;

const APP_NAME: &str = "SelectionMetadata";

/// Replays a selection over a directory (or a document manifest) and reports
/// which file actions the resulting selection allows.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan for documents
    #[arg(value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Load documents from a JSON manifest instead of scanning DIR
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Document ids (root-relative paths) to select, applied in order
    #[arg(long, value_name = "ID")]
    select: Vec<String>,

    /// Document ids to deselect, applied after all selections
    #[arg(long, value_name = "ID")]
    deselect: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Override the configured log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// List the known document ids and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = CoreConfigManager::new();
    let (mut config, config_error) = match config_manager.load_config(APP_NAME) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    logging::init_application_logger(config.log_level_filter(), config.log_file.as_deref())
        .context("Failed to initialize logging")?;
    if let Some(e) = config_error {
        log::warn!("Main: Could not load configuration, using defaults: {e}");
    }

    let documents = match &cli.manifest {
        Some(manifest_path) => DocumentStore::load_manifest(manifest_path)
            .with_context(|| format!("Failed to load manifest {manifest_path:?}"))?,
        None => {
            let records = CoreDocumentScanner::new()
                .scan_documents(&cli.root, &config.scan_options())
                .with_context(|| format!("Failed to scan {:?}", cli.root))?;
            DocumentStore::from_records(records)
        }
    };

    if cli.list {
        for document_id in documents.document_ids() {
            println!("{document_id}");
        }
        return Ok(());
    }

    let session = SelectionSession::new(documents);
    for item_id in &cli.select {
        if !session.select(item_id) {
            log::info!("Main: '{item_id}' was already selected.");
        }
    }
    for item_id in &cli.deselect {
        if !session.deselect(item_id) {
            log::info!("Main: '{item_id}' was not selected.");
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_report(&session))?);
    } else {
        print_report(
            &session.selection().selected_ids(),
            &session.summary(),
            &session.counters(),
        );
    }
    Ok(())
}

fn json_report(session: &SelectionSession) -> serde_json::Value {
    serde_json::json!({
        "selected": session.selection().selected_ids(),
        "skipped_events": session.skipped_event_count(),
        "summary": session.summary(),
    })
}

fn print_report(selected: &[String], summary: &SelectionSummary, counters: &SelectionCounters) {
    println!("Selected ({}): {}", selected.len(), selected.join(", "));
    println!("  contains directories:   {}", summary.contains_directories);
    println!("  contains partial files: {}", summary.contains_partial_files);
    println!("  can delete:             {}", summary.can_delete);
    println!("  can rename:             {}", summary.can_rename);
    println!("  can paste into:         {}", summary.can_paste_into);
    log::debug!("Main: Final counters {counters:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_report_from_manifest_session() -> Result<()> {
        let mut manifest = NamedTempFile::new()?;
        manifest.write_all(
            br#"[
                {"document_id": "inbox", "display_name": "inbox", "mime_type": "inode/directory", "flags": 76},
                {"document_id": "inbox/draft.txt", "display_name": "draft.txt", "mime_type": "text/plain", "flags": 65536}
            ]"#,
        )?;
        manifest.flush()?;

        let session = SelectionSession::new(DocumentStore::load_manifest(manifest.path())?);
        session.select("inbox");
        session.select("ghost");
        session.deselect("ghost");

        assert_eq!(
            json_report(&session),
            serde_json::json!({
                "selected": ["inbox"],
                "skipped_events": 2,
                "summary": {
                    "contains_directories": true,
                    "contains_partial_files": false,
                    "can_delete": true,
                    "can_rename": true,
                    "can_paste_into": true,
                },
            })
        );

        session.select("inbox/draft.txt");
        let report = json_report(&session);
        assert_eq!(report["selected"], serde_json::json!(["inbox", "inbox/draft.txt"]));
        assert_eq!(report["summary"]["contains_partial_files"], true);
        assert_eq!(report["summary"]["can_delete"], false);
        assert_eq!(report["summary"]["can_paste_into"], false);
        Ok(())
    }
}
