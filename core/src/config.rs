//! Configuration types for frame-runner.

use serde::Deserialize;
use std::path::PathBuf;

use crate::native::EntrySignature;
use crate::validation::ValidationMode;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Computation module configuration.
    #[serde(default)]
    pub library: LibraryConfig,

    /// Model file configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Preflight check applied to the model file before the native call.
    #[serde(default)]
    pub validation: ValidationMode,
}

/// Computation module configuration.
#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding the shared library, relative to the working directory.
    #[serde(default = "default_library_directory")]
    pub directory: PathBuf,

    /// Library base name without platform prefix or extension.
    #[serde(default = "default_library_name")]
    pub name: String,

    /// Explicit library path. Overrides `directory` and `name`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Exported function to call.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Calling convention of the entry point.
    #[serde(default)]
    pub signature: EntrySignature,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            directory: default_library_directory(),
            name: default_library_name(),
            path: None,
            entry_point: default_entry_point(),
            signature: EntrySignature::default(),
        }
    }
}

impl LibraryConfig {
    /// Path handed to the dynamic linker.
    ///
    /// `numerical_analysis_library` becomes `build/libnumerical_analysis_library.so`
    /// on Linux, `.dylib` on macOS and `numerical_analysis_library.dll` on Windows.
    pub fn library_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self
                .directory
                .join(libloading::library_filename(&self.name)),
        }
    }
}

/// Model file configuration.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Subdirectory of the base directory holding model files.
    #[serde(default = "default_model_directory")]
    pub directory: PathBuf,

    /// Model file passed to the entry point.
    #[serde(default = "default_model_filename")]
    pub filename: String,

    /// Base directory. Defaults to the directory of the running executable.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            directory: default_model_directory(),
            filename: default_model_filename(),
            base_dir: None,
        }
    }
}

fn default_library_directory() -> PathBuf {
    PathBuf::from("build")
}

fn default_library_name() -> String {
    "numerical_analysis_library".to_string()
}

fn default_entry_point() -> String {
    "run_demo".to_string()
}

fn default_model_directory() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_filename() -> String {
    "car.frame".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::error::RunnerError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> crate::error::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> crate::error::Result<()> {
        if self.library.entry_point.trim().is_empty() {
            return Err(crate::error::RunnerError::config("entry_point must not be empty"));
        }
        if self.library.path.is_none() && self.library.name.trim().is_empty() {
            return Err(crate::error::RunnerError::config(
                "library needs either a name or an explicit path",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunnerError;

    #[test]
    fn defaults_match_demo_layout() {
        let config = Config::default();
        assert_eq!(config.library.entry_point, "run_demo");
        assert_eq!(config.library.signature, EntrySignature::Void);
        assert_eq!(config.model.filename, "car.frame");
        assert_eq!(config.model.directory, PathBuf::from("models"));
        assert_eq!(config.validation, ValidationMode::None);

        #[cfg(target_os = "linux")]
        assert_eq!(
            config.library.library_path(),
            PathBuf::from("build/libnumerical_analysis_library.so")
        );
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str(
            r#"
model:
  filename: bridge.frame
  base_dir: /app
validation: parse
"#,
        )
        .unwrap();
        assert_eq!(config.model.filename, "bridge.frame");
        assert_eq!(config.model.base_dir, Some(PathBuf::from("/app")));
        assert_eq!(config.model.directory, PathBuf::from("models"));
        assert_eq!(config.validation, ValidationMode::Parse);
        assert_eq!(config.library.entry_point, "run_demo");
    }

    #[test]
    fn explicit_path_overrides_name() {
        let config = Config::from_yaml_str(
            r#"
library:
  path: /opt/analysis/libcustom.so
  entry_point: run_demo_status
  signature: status
"#,
        )
        .unwrap();
        assert_eq!(
            config.library.library_path(),
            PathBuf::from("/opt/analysis/libcustom.so")
        );
        assert_eq!(config.library.signature, EntrySignature::Status);
    }

    #[test]
    fn example_config_parses() {
        let config =
            Config::from_yaml_str(include_str!("../../frame-runner.example.yaml")).unwrap();
        assert_eq!(config.model.base_dir, Some(PathBuf::from(".")));
        assert_eq!(config.library.path, None);
        assert_eq!(config.validation, ValidationMode::None);
    }

    #[test]
    fn empty_entry_point_is_rejected() {
        let err = Config::from_yaml_str("library:\n  entry_point: \"\"\n").unwrap_err();
        assert!(matches!(err, RunnerError::Config(_)));
    }

    #[test]
    fn unknown_validation_mode_is_a_yaml_error() {
        let err = Config::from_yaml_str("validation: strict\n").unwrap_err();
        assert!(matches!(err, RunnerError::Yaml(_)));
    }
}
