//! Recording stub for the native seam, used by unit tests.
//!
//! [`StubLoader`] hands out [`StubLibrary`] instances that export every
//! `AU3_*` name, return a fixed sentinel for every call, and record opens,
//! resolutions and calls in a shared [`StubLog`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::errors::AutoItError;
use crate::native::{Loader, NativeLibrary, Thunk};
use crate::types::{Arg, Signature, TypeTag, Value};

/// Handle value returned by every pointer-returning stub call.
pub(crate) const SENTINEL_HANDLE: usize = 0x1234;

#[derive(Debug, Default)]
pub(crate) struct StubLog {
    pub opens: usize,
    pub closes: usize,
    /// (library generation, name) per resolution.
    pub resolved: Vec<(usize, &'static str)>,
    pub calls: Vec<&'static str>,
}

impl StubLog {
    pub fn resolve_count(&self, name: &str) -> usize {
        self.resolved.iter().filter(|(_, n)| *n == name).count()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.iter().filter(|n| **n == name).count()
    }
}

#[derive(Debug, Default)]
struct StubBehaviour {
    returns: HashMap<&'static str, Value>,
    outputs: HashMap<&'static str, Vec<u8>>,
    fail_open: bool,
    fail_close: bool,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct StubLoader {
    log: Arc<Mutex<StubLog>>,
    behaviour: Arc<Mutex<StubBehaviour>>,
}

impl StubLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> MutexGuard<'_, StubLog> {
        self.log.lock()
    }

    /// Make `name` return `value` instead of the sentinel.
    pub fn with_return(self, name: &'static str, value: Value) -> Self {
        self.behaviour.lock().returns.insert(name, value);
        self
    }

    /// Make `name` copy `bytes` into its last buffer argument.
    pub fn with_output(self, name: &'static str, bytes: Vec<u8>) -> Self {
        self.behaviour.lock().outputs.insert(name, bytes);
        self
    }

    pub fn failing_open(self) -> Self {
        self.behaviour.lock().fail_open = true;
        self
    }

    pub fn failing_close(self) -> Self {
        self.behaviour.lock().fail_close = true;
        self
    }
}

impl Loader for StubLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, AutoItError> {
        if self.behaviour.lock().fail_open {
            return Err(AutoItError::LoadError {
                path: path.to_path_buf(),
                reason: "stub refused".to_owned(),
            });
        }
        let generation = {
            let mut log = self.log.lock();
            log.opens += 1;
            log.opens
        };
        Ok(Box::new(StubLibrary {
            generation,
            log: Arc::clone(&self.log),
            behaviour: Arc::clone(&self.behaviour),
        }))
    }
}

#[derive(Debug, Default)]
pub(crate) struct StubLibrary {
    generation: usize,
    log: Arc<Mutex<StubLog>>,
    behaviour: Arc<Mutex<StubBehaviour>>,
}

impl StubLibrary {
    pub fn log(&self) -> MutexGuard<'_, StubLog> {
        self.log.lock()
    }
}

impl NativeLibrary for StubLibrary {
    fn resolve(&self, signature: &Signature) -> Result<Box<dyn Thunk>, AutoItError> {
        if !signature.name.starts_with("AU3_") {
            return Err(AutoItError::SymbolNotFound {
                name: signature.name.to_owned(),
                library: "stub".to_owned(),
            });
        }
        self.log.lock().resolved.push((self.generation, signature.name));
        Ok(Box::new(StubThunk {
            signature: *signature,
            log: Arc::clone(&self.log),
            behaviour: Arc::clone(&self.behaviour),
        }))
    }

    fn close(self: Box<Self>) -> Result<(), AutoItError> {
        self.log.lock().closes += 1;
        if self.behaviour.lock().fail_close {
            return Err(AutoItError::LoadError {
                path: "stub".into(),
                reason: "unload refused".to_owned(),
            });
        }
        Ok(())
    }
}

struct StubThunk {
    signature: Signature,
    log: Arc<Mutex<StubLog>>,
    behaviour: Arc<Mutex<StubBehaviour>>,
}

fn sentinel(tag: TypeTag) -> Value {
    match tag {
        TypeTag::Void => Value::Void,
        TypeTag::I8 | TypeTag::I16 | TypeTag::I32 | TypeTag::I64 => Value::Int(1),
        TypeTag::U8 | TypeTag::U16 | TypeTag::U32 | TypeTag::U64 => Value::UInt(1),
        TypeTag::F32 | TypeTag::F64 => Value::Float(1.0),
        TypeTag::Bool => Value::Bool(true),
        TypeTag::Str | TypeTag::WStr => Value::Text("stub".to_owned()),
        TypeTag::Pointer => Value::Pointer(SENTINEL_HANDLE),
    }
}

impl Thunk for StubThunk {
    fn invoke(&self, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        self.log.lock().calls.push(self.signature.name);

        let behaviour = self.behaviour.lock();
        if let Some(bytes) = behaviour.outputs.get(self.signature.name) {
            if let Some(buf) = args.iter_mut().rev().find_map(|a| match a {
                Arg::Buffer(buf) => Some(buf),
                _ => None,
            }) {
                let n = bytes.len().min(buf.len());
                buf.as_bytes_mut()[..n].copy_from_slice(&bytes[..n]);
            }
        }
        Ok(behaviour
            .returns
            .get(self.signature.name)
            .cloned()
            .unwrap_or_else(|| sentinel(self.signature.ret)))
    }
}

/// UTF-16LE bytes of `text` plus terminator, as the DLL would write them.
pub(crate) fn wide_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}
