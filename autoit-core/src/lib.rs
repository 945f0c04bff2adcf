//! `autoit_core` -- Rust bindings for the AutoItX3 automation DLL.
//!
//! The crate loads `AutoItX3.dll` / `AutoItX3_x64.dll` at runtime, resolves
//! exports on first use and marshals arguments and by-reference buffers
//! across the `WINAPI` boundary.  It has no CLI concerns; `autoit-cli`
//! builds on top of it.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `AutoItError` enum via `thiserror` |
//! | [`types`] | `TypeTag`, `Signature`, `Value`, `Arg` |
//! | [`layout`] | Offset-exact `POINT` / `RECT` layouts |
//! | [`marshal`] | `CallBuffer` output strings and struct buffers |
//! | [`native`] | `Loader` seam; `libloading` + `libffi` implementation |
//! | [`cache`] | Per-load function binding cache |
//! | [`library`] | Load/unload state machine and the call gate |
//! | [`config`] | DLL location from the environment |
//! | [`autoit`] | Typed `AutoIt` surface, one method per export |
//!
//! # Example
//!
//! ```no_run
//! use autoit_core::autoit::AutoIt;
//!
//! let mut au3 = AutoIt::new();
//! au3.load()?;
//! au3.run("notepad.exe", "", None)?;
//! au3.win_wait("Untitled - Notepad", "", Some(5))?;
//! au3.send("hello", None)?;
//! au3.unload();
//! # Ok::<(), autoit_core::errors::AutoItError>(())
//! ```

pub mod autoit;
pub mod cache;
pub mod config;
pub mod errors;
pub mod layout;
pub mod library;
pub mod marshal;
pub mod native;
pub mod types;

#[cfg(test)]
mod testing;
