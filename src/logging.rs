/*
 * Logger installation. The library itself only talks to the `log` facade; this
 * module picks the `simplelog` backend. The binary gets a terminal logger,
 * optionally combined with a file logger. Tests get a `TestLogger`, installed at
 * most once per process.
 */
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io;
use std::path::Path;

#[cfg(test)]
static TEST_LOGGER_INIT: std::sync::Once = std::sync::Once::new();

#[derive(Debug)]
pub enum LoggingError {
    Io(io::Error),
    SetLogger(log::SetLoggerError),
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> Self {
        LoggingError::Io(err)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(err: log::SetLoggerError) -> Self {
        LoggingError::SetLogger(err)
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Io(e) => write!(f, "Could not open log file: {e}"),
            LoggingError::SetLogger(e) => write!(f, "Could not install logger: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(e) => Some(e),
            LoggingError::SetLogger(e) => Some(e),
        }
    }
}

/*
 * Installs a debug-level `TestLogger` the first time it is called. Safe to call
 * from every test; later calls are no-ops.
 */
#[cfg(test)]
pub fn initialize_logging() {
    TEST_LOGGER_INIT.call_once(|| {
        let _ = simplelog::TestLogger::init(LevelFilter::Debug, simplelog::Config::default());
    });
}

/*
 * Installs the application logger: warnings and errors always reach stderr via
 * the terminal logger, everything up to `level` goes to the terminal, and when
 * `log_file` is given the same records are also written there.
 */
pub fn init_application_logger(
    level: LevelFilter,
    log_file: Option<&Path>,
) -> Result<(), LoggingError> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, config, File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    log::debug!("Logging initialized at level {level}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_application_logger_reports_unopenable_log_file() -> io::Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("missing_dir").join("app.log");

        // Fails before any logger is installed, so the test logger stays in place.
        let result = init_application_logger(LevelFilter::Info, Some(&log_path));

        assert!(matches!(&result, Err(LoggingError::Io(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Could not open log file"), "{message}");
        Ok(())
    }
}
