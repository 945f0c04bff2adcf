//! OS-backed [`Loader`] built on `libloading`.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use crate::errors::AutoItError;
use crate::native::{Loader, NativeLibrary, Thunk};
use crate::types::{Arg, Signature, Value};

/// Loads libraries through the platform loader (`LoadLibraryExW` on
/// Windows, `dlopen` elsewhere).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

impl Loader for SystemLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, AutoItError> {
        if !path.exists() {
            return Err(AutoItError::LoadError {
                path: path.to_path_buf(),
                reason: "file not found".to_owned(),
            });
        }

        // SAFETY: loading runs the library's initialisers.  AutoItX3 has no
        // initialiser side effects beyond its own state.
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| AutoItError::LoadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Box::new(DynamicLibrary {
            path: path.to_path_buf(),
            library,
        }))
    }
}

/// A library opened by [`SystemLoader`].
pub struct DynamicLibrary {
    path: PathBuf,
    library: libloading::Library,
}

impl DynamicLibrary {
    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl NativeLibrary for DynamicLibrary {
    fn resolve(&self, signature: &Signature) -> Result<Box<dyn Thunk>, AutoItError> {
        let not_found = |reason: String| {
            log::debug!("resolve {} failed: {reason}", signature.name);
            AutoItError::SymbolNotFound {
                name: signature.name.to_owned(),
                library: self.display_name(),
            }
        };

        // SAFETY: the symbol is only read as an address here; it is called
        // through `ForeignThunk` with the declared signature.
        let address = unsafe {
            self.library
                .get::<*mut c_void>(signature.name.as_bytes())
                .map(|sym| *sym as usize)
                .map_err(|e| not_found(e.to_string()))?
        };
        if address == 0 {
            return Err(not_found("null address".to_owned()));
        }

        Ok(Box::new(ForeignThunk {
            signature: *signature,
            address,
        }))
    }

    fn close(self: Box<Self>) -> Result<(), AutoItError> {
        let DynamicLibrary { path, library } = *self;
        library.close().map_err(|e| AutoItError::LoadError {
            path,
            reason: format!("unload failed: {e}"),
        })
    }
}

/// Address of a native export plus the signature it was resolved with.
pub struct ForeignThunk {
    signature: Signature,
    address: usize,
}

impl Thunk for ForeignThunk {
    #[cfg(windows)]
    fn invoke(&self, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        // SAFETY: `address` came from the currently loaded library and the
        // caller vouches that `signature` matches the export.
        unsafe { super::ffi::call(self.address, &self.signature, args) }
    }

    #[cfg(not(windows))]
    fn invoke(&self, _args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        let _ = self.address;
        Err(AutoItError::Unsupported(format!(
            "{}: foreign calls need a Windows host",
            self.signature.name
        )))
    }
}
