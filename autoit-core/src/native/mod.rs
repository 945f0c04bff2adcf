//! Dynamic Library Handle: the seam between the binding core and the OS
//! loader.
//!
//! [`Loader`] opens a shared library, [`NativeLibrary`] resolves a
//! [`Signature`] into a callable [`Thunk`], and [`NativeLibrary::close`]
//! releases the OS handle.  The production implementation is
//! [`dynamic::SystemLoader`] (`libloading` + `libffi`); unit tests plug in a
//! recording stub.
//!
//! All three traits require `Send` so the lifecycle controller can live in
//! the process-wide `parking_lot::Mutex` returned by
//! [`crate::autoit::shared`].  Thunks are also `Sync` because bindings are
//! handed out behind `Arc`.

pub mod dynamic;
#[cfg(windows)]
mod ffi;

use std::path::Path;

use crate::errors::AutoItError;
use crate::types::{Arg, Signature, Value};

/// A resolved, directly callable binding to one native export.
///
/// A thunk is only valid while the library that produced it is open; the
/// lifecycle controller guarantees it is never invoked afterwards.
pub trait Thunk: Send + Sync {
    /// Dispatch the native call.  `args` have already been checked against
    /// the signature the thunk was resolved with.
    fn invoke(&self, args: &mut [Arg<'_>]) -> Result<Value, AutoItError>;
}

/// An open shared library.
pub trait NativeLibrary: Send {
    /// Resolve `signature.name` and bind it to `signature`.
    fn resolve(&self, signature: &Signature) -> Result<Box<dyn Thunk>, AutoItError>;

    /// Release the OS loader handle.
    fn close(self: Box<Self>) -> Result<(), AutoItError>;
}

/// Opens shared libraries.
pub trait Loader: Send {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, AutoItError>;
}
