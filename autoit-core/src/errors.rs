//! Error types for `autoit_core`.
//!
//! All Rust-side failures are funnelled through [`AutoItError`], which
//! uses `thiserror` for `Display` and `Error` derives.  Failures reported by
//! AutoItX3 itself through `AU3_error` are never raised automatically; see
//! [`crate::autoit::AutoIt::last_error`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `autoit_core` library.
///
/// Each variant corresponds to a distinct stage of a binding call.
#[derive(Debug, Error)]
pub enum AutoItError {
    /// The shared library is missing or the OS loader rejected it (wrong
    /// architecture, missing dependency).
    #[error("LoadError: cannot load {}: {reason}", path.display())]
    LoadError { path: PathBuf, reason: String },

    /// The loaded library has no export with the requested name.  This is a
    /// declaration bug, not a runtime condition.
    #[error("SymbolNotFound: {name} is not exported by {library}")]
    SymbolNotFound { name: String, library: String },

    /// A call was attempted while the library is unloaded.  No native code
    /// ran.
    #[error("NotLoaded: cannot call {name} before load()")]
    NotLoaded { name: String },

    /// Failure signalled by the native library's own error channel.
    #[error("NativeCallError: {0}")]
    NativeCall(String),

    /// A host value could not be encoded for (or decoded from) its
    /// declared native type.
    #[error("MarshalError: {0}")]
    Marshal(String),

    /// The library-specific post-load hook failed.  The library has been
    /// unloaded again.
    #[error("PostLoadError: initialisation of {library} failed: {source}")]
    PostLoad {
        library: String,
        #[source]
        source: Box<AutoItError>,
    },

    /// Foreign calls are not possible on this host.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl From<std::ffi::NulError> for AutoItError {
    fn from(err: std::ffi::NulError) -> Self {
        AutoItError::Marshal(format!("string argument contains NUL at byte {}", err.nul_position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = AutoItError::NotLoaded {
            name: "AU3_WinActivate".into(),
        };
        assert_eq!(err.to_string(), "NotLoaded: cannot call AU3_WinActivate before load()");

        let err = AutoItError::SymbolNotFound {
            name: "Probe".into(),
            library: "AutoItX3".into(),
        };
        assert!(err.to_string().starts_with("SymbolNotFound:"));
    }

    #[test]
    fn test_post_load_keeps_source() {
        let err = AutoItError::PostLoad {
            library: "AutoItX3".into(),
            source: Box::new(AutoItError::Marshal("bad".into())),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("MarshalError: bad"));
    }

    #[test]
    fn test_nul_error_conversion() {
        let nul = std::ffi::CString::new("a\0b").unwrap_err();
        let err: AutoItError = nul.into();
        assert!(matches!(err, AutoItError::Marshal(ref m) if m.contains("byte 1")));
    }
}
