//! Where the AutoItX3 DLL lives.
//!
//! The DLL ships in two builds; the 64-bit one carries an `_x64` suffix.
//! [`LibraryConfig::from_env`] resolves the path in this order:
//!
//! 1. `AUTOITX_DLL`: full path to the DLL.
//! 2. `AUTOITX_DIR`: directory holding the architecture-specific DLL.
//! 3. `lib/` next to the running executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub const ENV_DLL: &str = "AUTOITX_DLL";
pub const ENV_DIR: &str = "AUTOITX_DIR";

/// Logical name used in logs and errors.
pub const AUTOIT_NAME: &str = "AutoItX3";

// ---------------------------------------------------------------------------
// Architecture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    /// Architecture of the running process.
    pub const fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            Arch::X64
        } else {
            Arch::X86
        }
    }

    /// File name of the AutoItX3 build for this architecture.
    pub const fn autoit_dll(self) -> &'static str {
        match self {
            Arch::X86 => "AutoItX3.dll",
            Arch::X64 => "AutoItX3_x64.dll",
        }
    }
}

// ---------------------------------------------------------------------------
// Library location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryConfig {
    pub name: String,
    pub path: PathBuf,
}

impl LibraryConfig {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// AutoItX3 in `dir`, host architecture.
    pub fn autoit(dir: impl AsRef<Path>) -> Self {
        Self::autoit_for(dir, Arch::host())
    }

    pub fn autoit_for(dir: impl AsRef<Path>, arch: Arch) -> Self {
        Self::new(AUTOIT_NAME, dir.as_ref().join(arch.autoit_dll()))
    }

    /// Resolve the AutoItX3 location from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        if let Some(path) = lookup(ENV_DLL).filter(|v| !v.is_empty()) {
            return Self::new(AUTOIT_NAME, path);
        }
        if let Some(dir) = lookup(ENV_DIR).filter(|v| !v.is_empty()) {
            return Self::autoit(PathBuf::from(dir));
        }
        Self::autoit(default_dir())
    }
}

fn default_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("lib")))
        .unwrap_or_else(|| PathBuf::from("lib"))
}
