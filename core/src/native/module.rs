//! Safe wrappers for dynamically loaded computation modules.
//!
//! Libraries are opened once per path and kept alive for the rest of the
//! process, so repeated loads hand back the same handle and resolved entry
//! points never outlive the code they point into.

use libloading::Library;
use std::collections::HashMap;
use std::ffi::CStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

use super::ffi::{EntrySignature, StatusEntryFn, VoidEntryFn};
use crate::error::{Result, RunnerError};

/// Libraries opened by this process, keyed by the path given to the linker.
static LOADED: OnceLock<Mutex<HashMap<PathBuf, Arc<Library>>>> = OnceLock::new();

/// Open `path`, reusing the handle if this process already loaded it.
///
/// Returns the handle and whether it came from the registry.
pub fn open_library(path: &Path) -> Result<(Arc<Library>, bool)> {
    let registry = LOADED.get_or_init(|| Mutex::new(HashMap::new()));
    let mut loaded = registry.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(library) = loaded.get(path) {
        return Ok((Arc::clone(library), true));
    }

    // SAFETY: running the library's initialisers is the point of loading it;
    // we trust the configured computation module.
    let library =
        unsafe { Library::new(path) }.map_err(|e| RunnerError::library_load(path, e))?;
    let library = Arc::new(library);
    loaded.insert(path.to_path_buf(), Arc::clone(&library));
    Ok((library, false))
}

/// A function that accepts a model path.
///
/// Implementations may be native libraries or in-process stand-ins.
pub trait ComputationModule: Send + Sync {
    /// Run the computation on the model at `model_path`.
    fn invoke(&self, model_path: &CStr) -> Result<()>;

    /// Name of the entry point being called.
    fn entry_point(&self) -> &str;
}

/// Produces computation modules from a library location and entry point.
pub trait ModuleLoader {
    type Module: ComputationModule;

    /// Load `library` and resolve `entry_point` with the given calling convention.
    fn load(
        &self,
        library: &Path,
        entry_point: &str,
        signature: EntrySignature,
    ) -> Result<Self::Module>;
}

#[derive(Clone, Copy)]
enum EntryFn {
    Void(VoidEntryFn),
    Status(StatusEntryFn),
}

/// An entry point resolved from a loaded shared library.
pub struct NativeModule {
    // Keeps the code behind `entry` mapped.
    _library: Arc<Library>,
    library_path: PathBuf,
    entry_point: String,
    entry: EntryFn,
}

impl NativeModule {
    /// Load `library` and resolve `entry_point`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LibraryLoad`] if the library cannot be opened and
    /// [`RunnerError::SymbolResolution`] if it does not export `entry_point`.
    pub fn load(library: &Path, entry_point: &str, signature: EntrySignature) -> Result<Self> {
        let (handle, reused) = open_library(library)?;
        if reused {
            debug!("Reusing loaded library: {}", library.display());
        } else {
            info!("Loaded library: {}", library.display());
        }

        let resolve_err = |e: libloading::Error| {
            RunnerError::symbol_resolution(entry_point, library, e)
        };

        // SAFETY: the symbol is trusted to match `signature`; the pointer is
        // copied out and stays valid while `handle` is held.
        let entry = unsafe {
            match signature {
                EntrySignature::Void => EntryFn::Void(
                    *handle
                        .get::<VoidEntryFn>(entry_point.as_bytes())
                        .map_err(resolve_err)?,
                ),
                EntrySignature::Status => EntryFn::Status(
                    *handle
                        .get::<StatusEntryFn>(entry_point.as_bytes())
                        .map_err(resolve_err)?,
                ),
            }
        };

        Ok(Self {
            _library: handle,
            library_path: library.to_path_buf(),
            entry_point: entry_point.to_string(),
            entry,
        })
    }

    /// Path the library was loaded from.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }
}

impl ComputationModule for NativeModule {
    fn invoke(&self, model_path: &CStr) -> Result<()> {
        match self.entry {
            EntryFn::Void(f) => {
                unsafe { f(model_path.as_ptr()) };
                Ok(())
            }
            EntryFn::Status(f) => {
                let status = unsafe { f(model_path.as_ptr()) };
                if status == 0 {
                    Ok(())
                } else {
                    Err(RunnerError::native_call(format!(
                        "`{}` returned status {}",
                        self.entry_point, status
                    )))
                }
            }
        }
    }

    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// Loads computation modules through the platform dynamic linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLoader;

impl ModuleLoader for NativeLoader {
    type Module = NativeModule;

    fn load(
        &self,
        library: &Path,
        entry_point: &str,
        signature: EntrySignature,
    ) -> Result<Self::Module> {
        NativeModule::load(library, entry_point, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_a_load_error() {
        let path = Path::new("build/definitely_missing_library.so");
        let err = NativeLoader
            .load(path, "run_demo", EntrySignature::Void)
            .err()
            .unwrap();
        match err {
            RunnerError::LibraryLoad { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_load_is_not_cached() {
        let path = Path::new("/nonexistent/libnothing.so");
        assert!(open_library(path).is_err());
        assert!(open_library(path).is_err());
    }
}
