use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "SPELLRIGHT_LOG";

/// Route `log` output to `path`. The terminal is owned by the TUI, so
/// nothing is ever written to stderr. Without a path, logging stays off.
pub fn init(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
