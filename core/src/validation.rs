//! Optional model file checks run before the native call.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{Result, RunnerError};
use crate::frame::Frame;

/// How much to verify about the model file before handing it to the library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Pass the path through untouched.
    #[default]
    None,
    /// Require the file to exist.
    Exists,
    /// Require the file to exist and read as a well-formed frame.
    Parse,
}

impl FromStr for ValidationMode {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "exists" => Ok(Self::Exists),
            "parse" => Ok(Self::Parse),
            other => Err(RunnerError::config(format!(
                "Invalid validation mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Exists => write!(f, "exists"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// Check `model_path` according to `mode`.
///
/// Returns the parsed frame in [`ValidationMode::Parse`].
pub fn preflight(model_path: &Path, mode: ValidationMode) -> Result<Option<Frame>> {
    match mode {
        ValidationMode::None => {
            if !model_path.exists() {
                warn!(
                    "Model file {} does not exist; passing it through",
                    model_path.display()
                );
            }
            Ok(None)
        }
        ValidationMode::Exists => {
            if !model_path.is_file() {
                return Err(RunnerError::FileNotFound(model_path.to_path_buf()));
            }
            debug!("Model file present: {}", model_path.display());
            Ok(None)
        }
        ValidationMode::Parse => {
            let frame = Frame::from_file(model_path)?;
            frame.check_references()?;
            debug!(
                "Model file parsed: {} nodes, {} elements, {} boundary conditions",
                frame.nodes.len(),
                frame.elements.len(),
                frame.boundary_conditions.len()
            );
            Ok(Some(frame))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_modes() {
        assert_eq!("none".parse::<ValidationMode>().unwrap(), ValidationMode::None);
        assert_eq!("EXISTS".parse::<ValidationMode>().unwrap(), ValidationMode::Exists);
        assert_eq!("parse".parse::<ValidationMode>().unwrap(), ValidationMode::Parse);
        assert!("strict".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::Exists.to_string(), "exists");
    }

    #[test]
    fn none_passes_missing_files() {
        let result = preflight(Path::new("/nonexistent/car.frame"), ValidationMode::None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn exists_rejects_missing_files() {
        let err = preflight(Path::new("/nonexistent/car.frame"), ValidationMode::Exists).unwrap_err();
        assert!(matches!(err, RunnerError::FileNotFound(_)));
    }

    #[test]
    fn exists_accepts_unparsable_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.frame");
        fs::write(&path, "not a frame").unwrap();
        assert!(preflight(&path, ValidationMode::Exists).unwrap().is_none());
    }

    #[test]
    fn parse_returns_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beam.frame");
        fs::write(
            &path,
            "nodes 2\n0 0 0 0\n1 1 0 0\nelements 1\n0 1 200 80 0.1\n",
        )
        .unwrap();
        let frame = preflight(&path, ValidationMode::Parse).unwrap().unwrap();
        assert_eq!(frame.elements.len(), 1);
    }

    #[test]
    fn parse_rejects_bad_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.frame");
        fs::write(&path, "not a frame").unwrap();
        let err = preflight(&path, ValidationMode::Parse).unwrap_err();
        assert!(matches!(err, RunnerError::FrameFormat { line: 1, .. }));
    }
}
