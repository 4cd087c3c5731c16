use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::cli::Cli;

/// `RUST_LOG` filtering, `warn` by default. The interactive screen owns the
/// terminal, so there records go to `--log-file` or nowhere; headless modes
/// log to stderr.
pub fn init(cli: &Cli) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();

    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if cli.is_interactive() => return Ok(()),
        None => {
            builder.target(Target::Stderr);
        }
    }

    if let Err(err) = builder.try_init() {
        log::debug!("logger already initialized: {err}");
    }
    Ok(())
}
