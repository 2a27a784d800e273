//! Model path resolution and encoding for the native boundary.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use crate::error::{Result, RunnerError};

/// Directory containing the running executable.
pub fn entry_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| RunnerError::invalid_path(format!("{} has no parent", exe.display())))
}

/// Compose `<base_dir>/<models_dir>/<filename>` as an absolute path.
///
/// The filesystem is not consulted: the file does not have to exist and
/// symlinks are left alone.
pub fn resolve_model_path(
    base_dir: &Path,
    models_dir: &Path,
    filename: impl AsRef<Path>,
) -> Result<PathBuf> {
    let joined = base_dir.join(models_dir).join(filename);
    Ok(std::path::absolute(&joined)?)
}

/// Encode a path as a NUL-terminated byte string.
#[cfg(unix)]
pub fn encode_path(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| RunnerError::invalid_path(format!("interior NUL in {}", path.display())))
}

/// Encode a path as a NUL-terminated UTF-8 string.
#[cfg(not(unix))]
pub fn encode_path(path: &Path) -> Result<CString> {
    let utf8 = path
        .to_str()
        .ok_or_else(|| RunnerError::invalid_path(format!("{} is not UTF-8", path.display())))?;
    CString::new(utf8)
        .map_err(|_| RunnerError::invalid_path(format!("interior NUL in {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn resolves_under_models_directory() {
        let path = resolve_model_path(Path::new("/app"), Path::new("models"), "car.frame").unwrap();
        assert_eq!(path, PathBuf::from("/app/models/car.frame"));
    }

    #[test]
    fn relative_base_becomes_absolute() {
        let path = resolve_model_path(Path::new("demo"), Path::new("models"), "car.frame").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("demo/models/car.frame"));
    }

    #[test]
    fn missing_file_still_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_model_path(dir.path(), Path::new("models"), "absent.frame").unwrap();
        assert!(!path.exists());
        assert_eq!(path, dir.path().join("models").join("absent.frame"));
    }

    #[cfg(unix)]
    #[test]
    fn encodes_raw_bytes() {
        let encoded = encode_path(Path::new("/app/models/car.frame")).unwrap();
        assert_eq!(encoded.as_bytes(), b"/app/models/car.frame");
    }

    #[cfg(unix)]
    #[test]
    fn interior_nul_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/app/models/car\0.frame"));
        let err = encode_path(path).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidPath(_)));
    }

    #[test]
    fn entry_dir_is_a_directory() {
        let dir = entry_dir().unwrap();
        assert!(dir.is_dir());
    }
}
