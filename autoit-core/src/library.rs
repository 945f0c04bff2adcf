//! Library Lifecycle Controller.
//!
//! A [`Library`] is either `Unloaded` or `Loaded`, and the open OS handle
//! exists only inside the `Loaded` state, so no call can reach a thunk
//! while the library is unloaded.  Loading twice or unloading twice logs a
//! warning and does nothing.
//!
//! ```text
//!   Unloaded --load()--> Loaded --unload()--> Unloaded
//! ```
//!
//! Unloading clears the [`FunctionCache`]; after a reload every name is
//! resolved again against the new handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{FunctionBinding, FunctionCache};
use crate::config::LibraryConfig;
use crate::errors::AutoItError;
use crate::native::dynamic::SystemLoader;
use crate::native::{Loader, NativeLibrary};
use crate::types::{Arg, Signature, Value};

/// Runs right after the library is opened and marked loaded.  An error
/// rolls the library back to `Unloaded`.
pub type PostLoadHook = fn(&mut Library) -> Result<(), AutoItError>;

enum State {
    Unloaded,
    Loaded(Box<dyn NativeLibrary>),
}

pub struct Library {
    name: String,
    path: PathBuf,
    loader: Box<dyn Loader>,
    state: State,
    cache: FunctionCache,
    post_load: Option<PostLoadHook>,
}

impl Library {
    /// Library at `config.path`, opened through the OS loader.
    pub fn new(config: LibraryConfig) -> Self {
        Self::with_loader(config, Box::new(SystemLoader))
    }

    pub fn with_loader(config: LibraryConfig, loader: Box<dyn Loader>) -> Self {
        Self {
            name: config.name,
            path: config.path,
            loader,
            state: State::Unloaded,
            cache: FunctionCache::new(),
            post_load: None,
        }
    }

    /// Set the hook run after every successful load.
    pub fn on_load(mut self, hook: PostLoadHook) -> Self {
        self.post_load = Some(hook);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Open the library and run the post-load hook.
    pub fn load(&mut self) -> Result<(), AutoItError> {
        if self.is_loaded() {
            log::warn!("{} is already loaded", self.name);
            return Ok(());
        }

        let handle = self.loader.open(&self.path)?;
        self.state = State::Loaded(handle);
        log::debug!("loaded {} from {}", self.name, self.path.display());

        if let Some(hook) = self.post_load {
            if let Err(err) = hook(self) {
                self.unload();
                return Err(AutoItError::PostLoad {
                    library: self.name.clone(),
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    /// Release the library and drop every cached binding.
    ///
    /// A refusal from the OS is logged; the library counts as unloaded
    /// either way.
    pub fn unload(&mut self) {
        let handle = match std::mem::replace(&mut self.state, State::Unloaded) {
            State::Loaded(handle) => handle,
            State::Unloaded => {
                log::warn!("{} is not loaded", self.name);
                return;
            }
        };

        self.cache.clear();
        if let Err(err) = handle.close() {
            log::warn!("{}: {err}", self.name);
        }
        log::debug!("unloaded {}", self.name);
    }

    /// Resolve `signature` against the open library, through the cache.
    pub fn resolve(&mut self, signature: &Signature) -> Result<Arc<FunctionBinding>, AutoItError> {
        match &self.state {
            State::Loaded(handle) => self.cache.get_or_resolve(handle.as_ref(), signature),
            State::Unloaded => Err(AutoItError::NotLoaded {
                name: signature.name.to_owned(),
            }),
        }
    }

    /// Dispatch one native call.  Only the generated wrappers use this.
    pub(crate) fn call(&mut self, signature: &Signature, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        if !self.is_loaded() {
            return Err(AutoItError::NotLoaded {
                name: signature.name.to_owned(),
            });
        }
        let binding = self.resolve(signature)?;
        binding.signature().check_args(args)?;
        log::trace!("call {}", binding.name());
        binding.invoke(args)
    }

    /// Names resolved since the last load, sorted.
    pub fn cached_bindings(&self) -> Vec<&'static str> {
        self.cache.names()
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if self.is_loaded() {
            self.unload();
        }
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .field("cached", &self.cache.len())
            .finish()
    }
}
