//! Logging initialization

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Initialize logging based on the debug flag
///
/// With `--debug`, everything at `debug` and above goes to a temp log file and
/// its path is returned. Otherwise logging stays silent unless `RUST_LOG` is
/// set, in which case it goes to stderr. Stdout only ever carries the tree.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if debug {
        let log_path = tempfile::Builder::new()
            .prefix("kubectl-tree-")
            .suffix(".log")
            .tempfile()
            .and_then(|f| f.keep().map_err(|e| e.error))
            .map(|(_, path)| path)
            .unwrap_or_else(|_| {
                std::env::temp_dir().join(format!("kubectl-tree-{}.log", std::process::id()))
            });

        let file = match std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&log_path)
        {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", log_path.display(), e);
                return None;
            }
        };

        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .init();

        Some(log_path)
    } else {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
        None
    }
}
