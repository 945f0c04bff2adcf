//! Foreign call dispatch via `libffi`.
//!
//! Builds a CIF from the declared [`TypeTag`]s, lowers each [`Arg`] into a
//! slot whose storage outlives the call, then reads the return value back
//! according to the declared return tag.

use std::ffi::{c_char, c_void, CStr, CString};

use libffi::middle::{Arg as FfiArg, Cif, CodePtr, Type};

use crate::errors::AutoItError;
use crate::types::{Arg, Signature, TypeTag, Value};

fn ffi_type(tag: TypeTag) -> Type {
    match tag {
        TypeTag::I8 => Type::i8(),
        TypeTag::U8 | TypeTag::Bool => Type::u8(),
        TypeTag::I16 => Type::i16(),
        TypeTag::U16 => Type::u16(),
        TypeTag::I32 => Type::i32(),
        TypeTag::U32 => Type::u32(),
        TypeTag::I64 => Type::i64(),
        TypeTag::U64 => Type::u64(),
        TypeTag::F32 => Type::f32(),
        TypeTag::F64 => Type::f64(),
        TypeTag::Str | TypeTag::WStr | TypeTag::Pointer => Type::pointer(),
        TypeTag::Void => Type::void(),
    }
}

/// Prepare a CIF for `sig`.  AutoItX3 exports are `WINAPI`, which is
/// `stdcall` on 32-bit Windows and the only convention on x64.
fn prepare_cif(sig: &Signature) -> Cif {
    let arg_types: Vec<Type> = sig.params.iter().copied().map(ffi_type).collect();
    #[allow(unused_mut)]
    let mut cif = Cif::new(arg_types, ffi_type(sig.ret));
    #[cfg(target_arch = "x86")]
    cif.set_abi(libffi::raw::ffi_abi_FFI_STDCALL);
    cif
}

/// Argument storage kept alive for the duration of the call.
enum Slot {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Ptr(*const c_void),
    // The pointer targets the heap allocation owned alongside it.
    Wide { _units: Vec<u16>, ptr: *const c_void },
    Narrow { _text: CString, ptr: *const c_void },
}

impl Slot {
    fn as_arg(&self) -> FfiArg {
        match self {
            Slot::I8(v) => FfiArg::new(v),
            Slot::U8(v) => FfiArg::new(v),
            Slot::I16(v) => FfiArg::new(v),
            Slot::U16(v) => FfiArg::new(v),
            Slot::I32(v) => FfiArg::new(v),
            Slot::U32(v) => FfiArg::new(v),
            Slot::I64(v) => FfiArg::new(v),
            Slot::U64(v) => FfiArg::new(v),
            Slot::F32(v) => FfiArg::new(v),
            Slot::F64(v) => FfiArg::new(v),
            Slot::Ptr(ptr) | Slot::Wide { ptr, .. } | Slot::Narrow { ptr, .. } => FfiArg::new(ptr),
        }
    }
}

fn integer(arg: &Arg<'_>, tag: TypeTag) -> Result<i128, AutoItError> {
    match *arg {
        Arg::Int(n) => Ok(n as i128),
        Arg::UInt(n) => Ok(n as i128),
        Arg::Bool(b) if tag == TypeTag::Bool => Ok(b as i128),
        _ => Err(AutoItError::Marshal(format!("{arg:?} is not an integer for {tag}"))),
    }
}

fn lower(arg: &mut Arg<'_>, tag: TypeTag) -> Result<Slot, AutoItError> {
    macro_rules! int_slot {
        ($variant:ident, $ty:ty) => {{
            let n = integer(arg, tag)?;
            let v = <$ty>::try_from(n)
                .map_err(|_| AutoItError::Marshal(format!("{n} is out of range for {tag}")))?;
            Slot::$variant(v)
        }};
    }

    let slot = match tag {
        TypeTag::I8 => int_slot!(I8, i8),
        TypeTag::U8 => int_slot!(U8, u8),
        TypeTag::Bool => int_slot!(U8, u8),
        TypeTag::I16 => int_slot!(I16, i16),
        TypeTag::U16 => int_slot!(U16, u16),
        TypeTag::I32 => int_slot!(I32, i32),
        TypeTag::U32 => int_slot!(U32, u32),
        TypeTag::I64 => int_slot!(I64, i64),
        TypeTag::U64 => int_slot!(U64, u64),
        TypeTag::F32 | TypeTag::F64 => {
            let f = match *arg {
                Arg::Float(f) => f,
                Arg::Int(n) => n as f64,
                Arg::UInt(n) => n as f64,
                _ => return Err(AutoItError::Marshal(format!("{arg:?} is not a number for {tag}"))),
            };
            if tag == TypeTag::F32 {
                Slot::F32(f as f32)
            } else {
                Slot::F64(f)
            }
        }
        TypeTag::WStr => match *arg {
            Arg::Text(s) => {
                let units: Vec<u16> = s.encode_utf16().chain(std::iter::once(0)).collect();
                let ptr = units.as_ptr().cast();
                Slot::Wide { _units: units, ptr }
            }
            _ => return Err(AutoItError::Marshal(format!("{arg:?} is not text"))),
        },
        TypeTag::Str => match *arg {
            Arg::Text(s) => {
                let text = CString::new(s)?;
                let ptr = text.as_ptr().cast();
                Slot::Narrow { _text: text, ptr }
            }
            _ => return Err(AutoItError::Marshal(format!("{arg:?} is not text"))),
        },
        TypeTag::Pointer => match arg {
            Arg::Pointer(p) => Slot::Ptr(*p as *const c_void),
            Arg::Buffer(buf) => Slot::Ptr(buf.as_mut_ptr().cast_const()),
            _ => return Err(AutoItError::Marshal(format!("{arg:?} is not a pointer"))),
        },
        TypeTag::Void => {
            return Err(AutoItError::Marshal("void is not a parameter type".to_owned()));
        }
    };
    Ok(slot)
}

/// Read a NUL-terminated UTF-16 string returned by the DLL.
unsafe fn read_wide_ptr(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let mut len = 0usize;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    String::from_utf16_lossy(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Call the export at `address` with `args`.
///
/// # Safety
///
/// `address` must be a live export of a loaded library whose real
/// signature is `sig`.  Buffers in `args` must be large enough for what the
/// export writes.
pub(super) unsafe fn call(address: usize, sig: &Signature, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
    sig.check_args(args)?;
    let slots = args
        .iter_mut()
        .zip(sig.params.iter().copied())
        .map(|(arg, tag)| lower(arg, tag))
        .collect::<Result<Vec<Slot>, AutoItError>>()?;
    let ffi_args: Vec<FfiArg> = slots.iter().map(Slot::as_arg).collect();

    let cif = prepare_cif(sig);
    let code = CodePtr::from_ptr(address as *const c_void);

    let value = unsafe {
        match sig.ret {
            TypeTag::Void => {
                cif.call::<()>(code, &ffi_args);
                Value::Void
            }
            TypeTag::I8 => Value::Int(cif.call::<i8>(code, &ffi_args) as i64),
            TypeTag::U8 => Value::UInt(cif.call::<u8>(code, &ffi_args) as u64),
            TypeTag::Bool => Value::Bool(cif.call::<u8>(code, &ffi_args) != 0),
            TypeTag::I16 => Value::Int(cif.call::<i16>(code, &ffi_args) as i64),
            TypeTag::U16 => Value::UInt(cif.call::<u16>(code, &ffi_args) as u64),
            TypeTag::I32 => Value::Int(cif.call::<i32>(code, &ffi_args) as i64),
            TypeTag::U32 => Value::UInt(cif.call::<u32>(code, &ffi_args) as u64),
            TypeTag::I64 => Value::Int(cif.call::<i64>(code, &ffi_args)),
            TypeTag::U64 => Value::UInt(cif.call::<u64>(code, &ffi_args)),
            TypeTag::F32 => Value::Float(cif.call::<f32>(code, &ffi_args) as f64),
            TypeTag::F64 => Value::Float(cif.call::<f64>(code, &ffi_args)),
            TypeTag::Pointer => Value::Pointer(cif.call::<*const c_void>(code, &ffi_args) as usize),
            TypeTag::WStr => Value::Text(read_wide_ptr(cif.call::<*const u16>(code, &ffi_args))),
            TypeTag::Str => {
                let ptr = cif.call::<*const c_char>(code, &ffi_args);
                if ptr.is_null() {
                    Value::Text(String::new())
                } else {
                    Value::Text(CStr::from_ptr(ptr).to_string_lossy().into_owned())
                }
            }
        }
    };

    // `slots` owns the argument storage `ffi_args` points into.
    drop(ffi_args);
    drop(slots);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marshal::CallBuffer;

    #[test]
    fn test_prepare_cif() {
        let sig = Signature::new("AU3_WinWait", TypeTag::I32, &[TypeTag::WStr, TypeTag::WStr, TypeTag::I32]);
        let _cif = prepare_cif(&sig);
        let sig = Signature::new("AU3_Init", TypeTag::Void, &[]);
        let _cif = prepare_cif(&sig);
    }

    #[test]
    fn test_lower_range_checks() {
        assert!(lower(&mut Arg::Int(300), TypeTag::U8).is_err());
        assert!(lower(&mut Arg::Int(-1), TypeTag::U32).is_err());
        assert!(matches!(lower(&mut Arg::Int(-1), TypeTag::I32), Ok(Slot::I32(-1))));
        assert!(lower(&mut Arg::Text("x"), TypeTag::I32).is_err());
    }

    #[test]
    fn test_lower_agrees_with_fits() {
        let tags = [
            TypeTag::I8,
            TypeTag::U8,
            TypeTag::I16,
            TypeTag::U16,
            TypeTag::I32,
            TypeTag::U32,
            TypeTag::I64,
            TypeTag::U64,
            TypeTag::F32,
            TypeTag::F64,
            TypeTag::Bool,
            TypeTag::Void,
            TypeTag::Str,
            TypeTag::WStr,
            TypeTag::Pointer,
        ];
        let mut buf = CallBuffer::output_string(4);
        for tag in tags {
            let args = [
                Arg::Int(1),
                Arg::UInt(1),
                Arg::Float(1.0),
                Arg::Bool(true),
                Arg::Text("x"),
                Arg::Pointer(0),
            ];
            for mut arg in args {
                assert_eq!(arg.fits(tag), lower(&mut arg, tag).is_ok(), "{arg:?} as {tag}");
            }
            let mut arg = Arg::Buffer(&mut buf);
            assert_eq!(arg.fits(tag), lower(&mut arg, tag).is_ok(), "buffer as {tag}");
        }
    }

    #[test]
    fn test_call_rejects_wrong_arity() {
        let sig = Signature::new("AU3_MouseMove", TypeTag::I32, &[TypeTag::I32, TypeTag::I32, TypeTag::I32]);
        let err = unsafe { call(0, &sig, &mut [Arg::Int(1)]) }.unwrap_err();
        assert!(matches!(err, AutoItError::Marshal(_)));
    }

    #[test]
    fn test_lower_wide_text_is_terminated() {
        let slot = lower(&mut Arg::Text("ab"), TypeTag::WStr).unwrap();
        match slot {
            Slot::Wide { ref _units, ptr } => {
                assert_eq!(_units.as_slice(), &[b'a' as u16, b'b' as u16, 0]);
                assert_eq!(ptr, _units.as_ptr().cast());
            }
            _ => panic!("expected wide slot"),
        }
    }

    #[test]
    fn test_lower_buffer_passes_address() {
        let mut buf = CallBuffer::output_string(4);
        let expected = buf.as_mut_ptr().cast_const();
        let slot = lower(&mut Arg::Buffer(&mut buf), TypeTag::Pointer).unwrap();
        assert!(matches!(slot, Slot::Ptr(p) if p == expected));
    }

    #[test]
    fn test_call_win32_export() {
        extern "system" {
            fn GetCurrentProcessId() -> u32;
        }
        let sig = Signature::new("GetCurrentProcessId", TypeTag::U32, &[]);
        let value = unsafe { call(GetCurrentProcessId as usize, &sig, &mut []) }.unwrap();
        assert_eq!(value.as_u32().unwrap(), std::process::id());
    }
}
