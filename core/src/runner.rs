//! Locate a model file and hand it to the computation module.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::native::{ComputationModule, ModuleLoader, NativeLoader};
use crate::paths::{encode_path, entry_dir, resolve_model_path};
use crate::validation::preflight;

/// Outcome of a successful demo run.
#[derive(Debug, Clone)]
pub struct DemoRun {
    /// Absolute path handed to the entry point.
    pub model_path: PathBuf,
    /// Library the entry point came from.
    pub library: PathBuf,
    /// Name of the called entry point.
    pub entry_point: String,
    /// Wall time spent inside the entry point, in milliseconds.
    pub elapsed_ms: f64,
}

/// Resolves model paths and invokes the configured entry point.
///
/// # Example
///
/// ```ignore
/// use frame_runner::{Config, Runner};
///
/// let runner = Runner::from_config(Config::default())?;
/// let run = runner.demo("car.frame")?;
/// println!("{} took {:.2}ms", run.entry_point, run.elapsed_ms);
/// ```
pub struct Runner<L = NativeLoader> {
    config: Config,
    base_dir: PathBuf,
    loader: L,
}

impl Runner<NativeLoader> {
    /// Build a runner that loads libraries through the dynamic linker.
    ///
    /// The base directory is `config.model.base_dir`, or the directory of the
    /// running executable when unset.
    pub fn from_config(config: Config) -> Result<Self> {
        let base_dir = match &config.model.base_dir {
            Some(dir) => dir.clone(),
            None => entry_dir()?,
        };
        Ok(Self::with_loader(config, base_dir, NativeLoader))
    }
}

impl<L: ModuleLoader> Runner<L> {
    /// Build a runner with an explicit base directory and module loader.
    pub fn with_loader(config: Config, base_dir: impl Into<PathBuf>, loader: L) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            loader,
        }
    }

    /// Directory the models directory is resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute path of `filename` inside the models directory.
    pub fn model_path(&self, filename: &str) -> Result<PathBuf> {
        resolve_model_path(&self.base_dir, &self.config.model.directory, filename)
    }

    /// Run the entry point on `filename`.
    ///
    /// # Errors
    ///
    /// Fails if preflight rejects the model, the library cannot be loaded,
    /// the entry point is missing, or a status entry point reports failure.
    /// Nothing is called when loading fails.
    pub fn demo(&self, filename: &str) -> Result<DemoRun> {
        let model_path = self.model_path(filename)?;
        info!("Model path: {}", model_path.display());

        preflight(&model_path, self.config.validation)?;
        let encoded = encode_path(&model_path)?;

        let library = self.config.library.library_path();
        let module = self.loader.load(
            &library,
            &self.config.library.entry_point,
            self.config.library.signature,
        )?;

        info!("Calling {}", module.entry_point());
        let start = Instant::now();
        module.invoke(&encoded)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!("{} returned after {:.2}ms", module.entry_point(), elapsed_ms);

        Ok(DemoRun {
            model_path,
            library,
            entry_point: module.entry_point().to_string(),
            elapsed_ms,
        })
    }

    /// Run the configured model file.
    pub fn run(&self) -> Result<DemoRun> {
        let filename = self.config.model.filename.clone();
        self.demo(&filename)
    }
}

/// Run `filename` with the default configuration.
///
/// Equivalent to loading `build/<numerical_analysis_library>` and calling
/// `run_demo` with `<executable dir>/models/<filename>`.
pub fn demo(filename: &str) -> Result<DemoRun> {
    Runner::from_config(Config::default())?.demo(filename)
}
