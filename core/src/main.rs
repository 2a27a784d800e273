//! Entry point for frame-runner.
//!
//! Takes no arguments. Set `FRAME_RUNNER_CONFIG` to a YAML file to change the
//! library, model, or validation settings, and `RUST_LOG` to adjust logging.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use frame_runner::{Config, Runner};

const CONFIG_ENV: &str = "FRAME_RUNNER_CONFIG";

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("Loading config: {}", path.to_string_lossy());
            Config::from_yaml_file(&path)
                .with_context(|| format!("Failed to load config: {}", path.to_string_lossy()))?
        }
        None => Config::default(),
    };

    let runner = Runner::from_config(config).context("Failed to locate base directory")?;
    info!(
        "Library: {} ({})",
        runner.config().library.library_path().display(),
        runner.config().library.entry_point
    );

    let run = runner
        .run()
        .with_context(|| format!("Demo failed for {}", runner.config().model.filename))?;

    info!(
        "Demo complete: {} in {:.2}ms",
        run.model_path.display(),
        run.elapsed_ms
    );

    Ok(())
}
