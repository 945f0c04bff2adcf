//! Function Binding Cache: name -> resolved thunk, per loaded library.
//!
//! The first request for a name resolves it against the open library and
//! stores the result; later requests return the same [`FunctionBinding`]
//! without looking at the signature again.  Callers must use one signature
//! per name.
//!
//! The cache is owned by [`crate::library::Library`] and cleared as a unit
//! on every unload, since its thunks point into the released image.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::AutoItError;
use crate::native::{NativeLibrary, Thunk};
use crate::types::{Arg, Signature, Value};

/// One resolved native entry point.
pub struct FunctionBinding {
    signature: Signature,
    thunk: Box<dyn Thunk>,
}

impl FunctionBinding {
    pub fn name(&self) -> &'static str {
        self.signature.name
    }

    /// The signature the thunk was resolved with.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    // Crate-private: only the lifecycle gate may dispatch.
    pub(crate) fn invoke(&self, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        self.thunk.invoke(args)
    }
}

impl fmt::Debug for FunctionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionBinding")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct FunctionCache {
    entries: HashMap<&'static str, Arc<FunctionBinding>>,
}

impl FunctionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached binding for `signature.name`, resolving it against
    /// `library` on first use.
    pub fn get_or_resolve(
        &mut self,
        library: &dyn NativeLibrary,
        signature: &Signature,
    ) -> Result<Arc<FunctionBinding>, AutoItError> {
        if let Some(binding) = self.entries.get(signature.name) {
            return Ok(Arc::clone(binding));
        }

        let thunk = library.resolve(signature)?;
        log::debug!("resolved {signature}");

        let binding = Arc::new(FunctionBinding {
            signature: *signature,
            thunk,
        });
        self.entries.insert(signature.name, Arc::clone(&binding));
        Ok(binding)
    }

    pub fn get(&self, name: &str) -> Option<Arc<FunctionBinding>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
