//! Type Descriptor Table: native ABI type tags and their host representation.
//!
//! [`TypeTag`] is the closed set of primitive kinds a binding signature may
//! mention.  Every tag maps to exactly one [`HostKind`], resolved by a single
//! `match` in [`TypeTag::host_kind`].  Return values come back as [`Value`];
//! arguments go in as [`Arg`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AutoItError;
use crate::marshal::CallBuffer;

const POINTER_SIZE: usize = std::mem::size_of::<usize>();

// ---------------------------------------------------------------------------
// Type tags
// ---------------------------------------------------------------------------

/// ABI-level primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// C `bool` (one byte).
    Bool,
    Void,
    /// NUL-terminated narrow (UTF-8) string, passed by pointer.
    Str,
    /// NUL-terminated UTF-16 string, passed by pointer (`LPCWSTR`).
    WStr,
    /// Opaque pointer: handles and by-reference buffers.
    Pointer,
}

/// Host-side representation a [`TypeTag`] decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostKind {
    Number,
    Boolean,
    Text,
    Pointer,
    Nothing,
}

impl TypeTag {
    /// Native width in bytes.
    pub const fn size(self) -> usize {
        match self {
            TypeTag::Void => 0,
            TypeTag::I8 | TypeTag::U8 | TypeTag::Bool => 1,
            TypeTag::I16 | TypeTag::U16 => 2,
            TypeTag::I32 | TypeTag::U32 | TypeTag::F32 => 4,
            TypeTag::I64 | TypeTag::U64 | TypeTag::F64 => 8,
            TypeTag::Str | TypeTag::WStr | TypeTag::Pointer => POINTER_SIZE,
        }
    }

    /// Native alignment in bytes.  Scalars are naturally aligned.
    pub const fn align(self) -> usize {
        match self {
            TypeTag::Void => 1,
            other => other.size(),
        }
    }

    pub const fn host_kind(self) -> HostKind {
        match self {
            TypeTag::I8
            | TypeTag::U8
            | TypeTag::I16
            | TypeTag::U16
            | TypeTag::I32
            | TypeTag::U32
            | TypeTag::I64
            | TypeTag::U64
            | TypeTag::F32
            | TypeTag::F64 => HostKind::Number,
            TypeTag::Bool => HostKind::Boolean,
            TypeTag::Str | TypeTag::WStr => HostKind::Text,
            TypeTag::Pointer => HostKind::Pointer,
            TypeTag::Void => HostKind::Nothing,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, TypeTag::I8 | TypeTag::I16 | TypeTag::I32 | TypeTag::I64)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, TypeTag::F32 | TypeTag::F64)
    }

    /// Canonical spelling, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::I8 => "int8",
            TypeTag::U8 => "uint8",
            TypeTag::I16 => "int16",
            TypeTag::U16 => "uint16",
            TypeTag::I32 => "int32",
            TypeTag::U32 => "uint32",
            TypeTag::I64 => "int64",
            TypeTag::U64 => "uint64",
            TypeTag::F32 => "float32",
            TypeTag::F64 => "float64",
            TypeTag::Bool => "bool",
            TypeTag::Void => "void",
            TypeTag::Str => "str",
            TypeTag::WStr => "str16",
            TypeTag::Pointer => "pointer",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = AutoItError;

    /// Parse a C-style type name.  `long` is 32 bits (Windows LLP64) and the
    /// `intptr` family follows the host pointer width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pointer_int = if POINTER_SIZE == 8 { TypeTag::I64 } else { TypeTag::I32 };
        let pointer_uint = if POINTER_SIZE == 8 { TypeTag::U64 } else { TypeTag::U32 };

        let tag = match s.trim() {
            "bool" => TypeTag::Bool,
            "void" => TypeTag::Void,
            "int8" | "int8_t" | "char" => TypeTag::I8,
            "uint8" | "uint8_t" | "uchar" | "unsigned char" => TypeTag::U8,
            "int16" | "int16_t" | "short" => TypeTag::I16,
            "uint16" | "uint16_t" | "ushort" | "unsigned short" | "wchar_t" | "char16"
            | "char16_t" => TypeTag::U16,
            "int32" | "int32_t" | "int" | "long" => TypeTag::I32,
            "uint32" | "uint32_t" | "uint" | "unsigned int" | "ulong" | "unsigned long"
            | "char32" | "char32_t" => TypeTag::U32,
            "int64" | "int64_t" | "longlong" | "long long" => TypeTag::I64,
            "uint64" | "uint64_t" | "ulonglong" | "unsigned long long" => TypeTag::U64,
            "intptr" | "intptr_t" => pointer_int,
            "uintptr" | "uintptr_t" => pointer_uint,
            "float32" | "float" => TypeTag::F32,
            "float64" | "double" => TypeTag::F64,
            "str" | "string" => TypeTag::Str,
            "str16" | "string16" | "char16*" => TypeTag::WStr,
            "pointer" | "void*" | "void *" => TypeTag::Pointer,
            other => {
                return Err(AutoItError::Marshal(format!("unknown type name {other:?}")));
            }
        };
        Ok(tag)
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Binding contract for one native export: name, return tag, parameter tags.
///
/// Must match the DLL's actual export exactly or the call is undefined
/// behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub name: &'static str,
    pub ret: TypeTag,
    pub params: &'static [TypeTag],
}

impl Signature {
    pub const fn new(name: &'static str, ret: TypeTag, params: &'static [TypeTag]) -> Self {
        Self { name, ret, params }
    }

    /// Check `args` against the declared parameter list.
    pub fn check_args(&self, args: &[Arg<'_>]) -> Result<(), AutoItError> {
        if args.len() != self.params.len() {
            return Err(AutoItError::Marshal(format!(
                "{}: expected {} arguments, got {}",
                self.name,
                self.params.len(),
                args.len()
            )));
        }
        for (index, (arg, &tag)) in args.iter().zip(self.params).enumerate() {
            if !arg.fits(tag) {
                return Err(AutoItError::Marshal(format!(
                    "{}: argument {index} ({}) does not fit {tag}",
                    self.name,
                    arg.describe()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.ret, self.name)?;
        for (i, tag) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Host values
// ---------------------------------------------------------------------------

/// A decoded native return value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Void,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Pointer(usize),
}

impl Value {
    fn mismatch(&self, wanted: &str) -> AutoItError {
        AutoItError::Marshal(format!("expected {wanted}, got {self:?}"))
    }

    pub fn as_i64(&self) -> Result<i64, AutoItError> {
        match *self {
            Value::Int(n) => Ok(n),
            Value::UInt(n) => i64::try_from(n).map_err(|_| self.mismatch("i64")),
            _ => Err(self.mismatch("integer")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, AutoItError> {
        let n = self.as_i64()?;
        i32::try_from(n).map_err(|_| self.mismatch("i32"))
    }

    pub fn as_u32(&self) -> Result<u32, AutoItError> {
        let n = match *self {
            Value::UInt(n) => n,
            Value::Int(n) => u64::try_from(n).map_err(|_| self.mismatch("u32"))?,
            _ => return Err(self.mismatch("integer")),
        };
        u32::try_from(n).map_err(|_| self.mismatch("u32"))
    }

    pub fn as_f64(&self) -> Result<f64, AutoItError> {
        match *self {
            Value::Float(f) => Ok(f),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, AutoItError> {
        match *self {
            Value::Bool(b) => Ok(b),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_pointer(&self) -> Result<usize, AutoItError> {
        match *self {
            Value::Pointer(p) => Ok(p),
            Value::UInt(n) => usize::try_from(n).map_err(|_| self.mismatch("pointer")),
            _ => Err(self.mismatch("pointer")),
        }
    }

    pub fn into_text(self) -> Result<String, AutoItError> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch("text")),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }
}

/// A host argument for one native parameter.
#[derive(Debug)]
pub enum Arg<'a> {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Encoded as UTF-16 or narrow depending on the declared tag.
    Text(&'a str),
    Pointer(usize),
    /// Passed by address; read back by the caller after the call.
    Buffer(&'a mut CallBuffer),
}

impl Arg<'_> {
    /// Whether this argument can be encoded as `tag`.
    pub fn fits(&self, tag: TypeTag) -> bool {
        match self {
            Arg::Int(_) | Arg::UInt(_) => {
                matches!(tag.host_kind(), HostKind::Number | HostKind::Boolean)
            }
            Arg::Float(_) => tag.is_float(),
            Arg::Bool(_) => tag == TypeTag::Bool,
            Arg::Text(_) => tag.host_kind() == HostKind::Text,
            Arg::Pointer(_) | Arg::Buffer(_) => tag == TypeTag::Pointer,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Arg::Int(_) => "int",
            Arg::UInt(_) => "uint",
            Arg::Float(_) => "float",
            Arg::Bool(_) => "bool",
            Arg::Text(_) => "text",
            Arg::Pointer(_) => "pointer",
            Arg::Buffer(_) => "buffer",
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(n: i32) -> Self {
        Arg::Int(n as i64)
    }
}

impl From<u32> for Arg<'_> {
    fn from(n: u32) -> Self {
        Arg::UInt(n as u64)
    }
}

impl From<bool> for Arg<'_> {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Text(s)
    }
}

impl<'a> From<&'a mut CallBuffer> for Arg<'a> {
    fn from(buf: &'a mut CallBuffer) -> Self {
        Arg::Buffer(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_sizes() {
        assert_eq!(TypeTag::Void.size(), 0);
        assert_eq!(TypeTag::Bool.size(), 1);
        assert_eq!(TypeTag::I16.size(), 2);
        assert_eq!(TypeTag::I32.size(), 4);
        assert_eq!(TypeTag::F32.size(), 4);
        assert_eq!(TypeTag::U64.size(), 8);
        assert_eq!(TypeTag::Pointer.size(), std::mem::size_of::<*const ()>());
        assert_eq!(TypeTag::WStr.size(), TypeTag::Pointer.size());
        assert_eq!(TypeTag::Void.align(), 1);
    }

    #[test]
    fn test_host_kind_is_total() {
        let all = [
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
        for tag in all {
            let parsed: TypeTag = tag.name().parse().unwrap();
            assert_eq!(parsed, tag);
        }
        assert_eq!(TypeTag::U16.host_kind(), HostKind::Number);
        assert_eq!(TypeTag::Str.host_kind(), HostKind::Text);
        assert_eq!(TypeTag::WStr.host_kind(), HostKind::Text);
        assert_eq!(TypeTag::Void.host_kind(), HostKind::Nothing);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("unsigned long long".parse::<TypeTag>().unwrap(), TypeTag::U64);
        assert_eq!("long".parse::<TypeTag>().unwrap(), TypeTag::I32);
        assert_eq!("string16".parse::<TypeTag>().unwrap(), TypeTag::WStr);
        assert_eq!("char16*".parse::<TypeTag>().unwrap(), TypeTag::WStr);
        assert_eq!("double".parse::<TypeTag>().unwrap(), TypeTag::F64);
        assert_eq!("char".parse::<TypeTag>().unwrap(), TypeTag::I8);
        assert_eq!("wchar_t".parse::<TypeTag>().unwrap(), TypeTag::U16);
        assert_eq!("char32_t".parse::<TypeTag>().unwrap(), TypeTag::U32);
        assert!("string32".parse::<TypeTag>().is_err());
        assert!("str32".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_signature_display() {
        const SIG: Signature =
            Signature::new("AU3_WinWait", TypeTag::I32, &[TypeTag::WStr, TypeTag::WStr, TypeTag::I32]);
        assert_eq!(SIG.to_string(), "int32 AU3_WinWait(str16, str16, int32)");
    }

    #[test]
    fn test_check_args() {
        const SIG: Signature = Signature::new("AU3_MouseMove", TypeTag::I32, &[TypeTag::I32, TypeTag::I32]);
        assert!(SIG.check_args(&[Arg::from(1), Arg::from(2)]).is_ok());
        assert!(SIG.check_args(&[Arg::from(1)]).is_err());
        assert!(SIG.check_args(&[Arg::from(1), Arg::Text("x")]).is_err());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(-5).as_i32().unwrap(), -5);
        assert!(Value::Int(i64::MAX).as_i32().is_err());
        assert!(Value::Int(-1).as_u32().is_err());
        assert_eq!(Value::UInt(7).as_pointer().unwrap(), 7);
        assert_eq!(Value::Text("a".into()).into_text().unwrap(), "a");
        assert!(Value::Void.into_text().is_err());
        assert!(Value::Void.is_void());
    }
}
