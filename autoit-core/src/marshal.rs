//! Buffer Marshaller: scoped byte regions for by-reference parameters.
//!
//! A [`CallBuffer`] is created right before the call that uses it, passed
//! as [`Arg::Buffer`](crate::types::Arg::Buffer), decoded, then dropped.
//! Buffers are never shared between calls.
//!
//! Overflow is not guarded here: if the DLL writes past the capacity it
//! was told about, that is a native buffer overflow.

use std::fmt;

use crate::errors::AutoItError;
use crate::layout::{NativeStruct, StructLayout};
use crate::types::{TypeTag, Value};

/// Capacity (UTF-16 units) used for every string output parameter.
pub const DEFAULT_STRING_CAPACITY: usize = 1024;

const WORD: usize = std::mem::size_of::<u64>();

/// Zeroed, 8-byte-aligned scratch memory exclusively owned by one call.
pub struct CallBuffer {
    // u64 backing gives the alignment every layout field needs.
    words: Vec<u64>,
    len: usize,
}

impl CallBuffer {
    /// Zeroed buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(WORD).max(1)],
            len,
        }
    }

    /// Buffer for `capacity` UTF-16 units plus the NUL terminator.
    pub fn output_string(capacity: usize) -> Self {
        Self::zeroed((capacity + 1) * 2)
    }

    /// Buffer sized exactly to `layout`.
    pub fn for_layout(layout: &StructLayout) -> Self {
        Self::zeroed(layout.size)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `words` owns at least `len` initialised bytes and u8 has
        // no alignment requirement.
        unsafe { std::slice::from_raw_parts(self.words.as_ptr().cast::<u8>(), self.len) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.words.as_mut_ptr().cast::<u8>(), self.len) }
    }

    /// Address handed to the native call.
    pub fn as_mut_ptr(&mut self) -> *mut std::ffi::c_void {
        self.words.as_mut_ptr().cast()
    }

    /// Value for the native `nBufSize` parameter: UTF-16 units including
    /// the terminator.
    pub fn capacity_arg(&self) -> i32 {
        i32::try_from(self.len / 2).unwrap_or(i32::MAX)
    }

    // -----------------------------------------------------------------------
    // Strings
    // -----------------------------------------------------------------------

    /// Store `text` as NUL-terminated UTF-16.  Used by stubs that emulate
    /// the native side writing an output string.
    pub fn write_wide_string(&mut self, text: &str) -> Result<(), AutoItError> {
        let units: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        if units.len() * 2 > self.len {
            return Err(AutoItError::Marshal(format!(
                "string of {} units does not fit a {}-unit buffer",
                units.len(),
                self.len / 2
            )));
        }
        let bytes = self.as_bytes_mut();
        for (i, unit) in units.iter().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
        Ok(())
    }

    /// Decode as UTF-16 up to the first NUL, or the whole buffer if the
    /// native side filled it without terminating.
    pub fn read_wide_string(&self) -> String {
        let units: Vec<u16> = self
            .as_bytes()
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&u| u != 0)
            .collect();
        String::from_utf16_lossy(&units)
    }

    // -----------------------------------------------------------------------
    // Structs
    // -----------------------------------------------------------------------

    /// Write `values` at the offsets declared by `layout` into a fresh buffer.
    pub fn encode_struct_buffer(layout: &StructLayout, values: &[Value]) -> Result<Self, AutoItError> {
        if values.len() != layout.fields.len() {
            return Err(AutoItError::Marshal(format!(
                "{} expects {} fields, got {}",
                layout.name,
                layout.fields.len(),
                values.len()
            )));
        }
        let mut buf = Self::for_layout(layout);
        for (field, value) in layout.fields.iter().zip(values) {
            write_scalar(buf.as_bytes_mut(), field.offset, field.tag, value)
                .map_err(|e| AutoItError::Marshal(format!("{}.{}: {e}", layout.name, field.name)))?;
        }
        Ok(buf)
    }

    /// Read every field of `layout` back, in declaration order.
    pub fn decode_struct(&self, layout: &StructLayout) -> Result<Vec<Value>, AutoItError> {
        if self.len < layout.size {
            return Err(AutoItError::Marshal(format!(
                "{}-byte buffer is too small for {} ({} bytes)",
                self.len, layout.name, layout.size
            )));
        }
        layout
            .fields
            .iter()
            .map(|f| read_scalar(self.as_bytes(), f.offset, f.tag))
            .collect()
    }

    pub fn encode<T: NativeStruct>(value: &T) -> Result<Self, AutoItError> {
        Self::encode_struct_buffer(T::LAYOUT, &value.to_values())
    }

    pub fn decode<T: NativeStruct>(&self) -> Result<T, AutoItError> {
        T::from_values(&self.decode_struct(T::LAYOUT)?)
    }
}

impl fmt::Debug for CallBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallBuffer").field("len", &self.len).finish()
    }
}

// ---------------------------------------------------------------------------
// Scalar field access (little-endian, x86 / x64 only)
// ---------------------------------------------------------------------------

fn field_bytes<'b>(bytes: &'b [u8], offset: usize, tag: TypeTag) -> Result<&'b [u8], AutoItError> {
    offset
        .checked_add(tag.size())
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| out_of_bounds(offset, tag))
}

fn out_of_bounds(offset: usize, tag: TypeTag) -> AutoItError {
    AutoItError::Marshal(format!("{tag} at offset {offset} is out of bounds"))
}

/// Read one `tag`-typed value at `offset`.
pub fn read_scalar(bytes: &[u8], offset: usize, tag: TypeTag) -> Result<Value, AutoItError> {
    let b = field_bytes(bytes, offset, tag)?;
    let value = match tag {
        TypeTag::I8 => Value::Int(b[0] as i8 as i64),
        TypeTag::U8 => Value::UInt(b[0] as u64),
        TypeTag::Bool => Value::Bool(b[0] != 0),
        TypeTag::I16 => Value::Int(i16::from_le_bytes([b[0], b[1]]) as i64),
        TypeTag::U16 => Value::UInt(u16::from_le_bytes([b[0], b[1]]) as u64),
        TypeTag::I32 => Value::Int(i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as i64),
        TypeTag::U32 => Value::UInt(u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u64),
        TypeTag::F32 => Value::Float(f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64),
        TypeTag::I64 => Value::Int(i64::from_le_bytes(to_array(b))),
        TypeTag::U64 => Value::UInt(u64::from_le_bytes(to_array(b))),
        TypeTag::F64 => Value::Float(f64::from_le_bytes(to_array(b))),
        TypeTag::Pointer => {
            let mut raw = [0u8; 8];
            raw[..b.len()].copy_from_slice(b);
            Value::Pointer(u64::from_le_bytes(raw) as usize)
        }
        TypeTag::Void | TypeTag::Str | TypeTag::WStr => {
            return Err(AutoItError::Marshal(format!("{tag} cannot be stored in a struct field")));
        }
    };
    Ok(value)
}

fn to_array(b: &[u8]) -> [u8; 8] {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&b[..8]);
    raw
}

/// Write `value` as `tag` at `offset`, rejecting out-of-range integers.
pub fn write_scalar(bytes: &mut [u8], offset: usize, tag: TypeTag, value: &Value) -> Result<(), AutoItError> {
    let size = tag.size();
    let out = match offset.checked_add(size) {
        Some(end) if end <= bytes.len() => &mut bytes[offset..end],
        _ => return Err(out_of_bounds(offset, tag)),
    };

    let range = |_| AutoItError::Marshal(format!("{value:?} is out of range for {tag}"));
    match tag {
        TypeTag::I8 => out.copy_from_slice(&i8::try_from(value.as_i64()?).map_err(range)?.to_le_bytes()),
        TypeTag::U8 => out.copy_from_slice(&u8::try_from(value.as_i64()?).map_err(range)?.to_le_bytes()),
        TypeTag::I16 => out.copy_from_slice(&i16::try_from(value.as_i64()?).map_err(range)?.to_le_bytes()),
        TypeTag::U16 => out.copy_from_slice(&u16::try_from(value.as_i64()?).map_err(range)?.to_le_bytes()),
        TypeTag::I32 => out.copy_from_slice(&value.as_i32()?.to_le_bytes()),
        TypeTag::U32 => out.copy_from_slice(&value.as_u32()?.to_le_bytes()),
        TypeTag::I64 => out.copy_from_slice(&value.as_i64()?.to_le_bytes()),
        TypeTag::U64 => {
            let n = match *value {
                Value::UInt(n) => n,
                _ => u64::try_from(value.as_i64()?).map_err(range)?,
            };
            out.copy_from_slice(&n.to_le_bytes())
        }
        TypeTag::F32 => out.copy_from_slice(&(value.as_f64()? as f32).to_le_bytes()),
        TypeTag::F64 => out.copy_from_slice(&value.as_f64()?.to_le_bytes()),
        TypeTag::Bool => out[0] = value.as_bool()? as u8,
        TypeTag::Pointer => {
            let p = value.as_pointer()? as u64;
            out.copy_from_slice(&p.to_le_bytes()[..size]);
        }
        TypeTag::Void | TypeTag::Str | TypeTag::WStr => {
            return Err(AutoItError::Marshal(format!("{tag} cannot be stored in a struct field")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Point, Rect, POINT, RECT};

    #[test]
    fn test_rect_round_trip() {
        let values = [1, 2, 3, 4].map(Value::Int);
        let buf = CallBuffer::encode_struct_buffer(&RECT, &values).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(
            buf.decode::<Rect>().unwrap(),
            Rect {
                left: 1,
                top: 2,
                right: 3,
                bottom: 4
            }
        );
    }

    #[test]
    fn test_rect_bytes_are_little_endian_at_offsets() {
        let buf = CallBuffer::encode(&Rect {
            left: 1,
            top: -1,
            right: 0x0102_0304,
            bottom: 0,
        })
        .unwrap();
        let bytes = buf.as_bytes();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0xFF; 4]);
        assert_eq!(&bytes[8..12], &[4, 3, 2, 1]);
    }

    #[test]
    fn test_struct_buffer_starts_zeroed() {
        let buf = CallBuffer::for_layout(&POINT);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.decode::<Point>().unwrap(), Point::default());
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert!(CallBuffer::encode_struct_buffer(&POINT, &[Value::Int(1)]).is_err());
        let too_big = [Value::Int(i64::from(i32::MAX) + 1), Value::Int(0)];
        assert!(CallBuffer::encode_struct_buffer(&POINT, &too_big).is_err());
        let wrong_type = [Value::Text("x".into()), Value::Int(0)];
        assert!(CallBuffer::encode_struct_buffer(&POINT, &wrong_type).is_err());
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let buf = CallBuffer::for_layout(&POINT);
        assert!(buf.decode::<Rect>().is_err());
    }

    #[test]
    fn test_output_string_shorter_than_capacity() {
        let mut buf = CallBuffer::output_string(16);
        assert_eq!(buf.capacity_arg(), 17);
        buf.write_wide_string("Notepad").unwrap();
        assert_eq!(buf.read_wide_string(), "Notepad");
    }

    #[test]
    fn test_output_string_no_trailing_garbage() {
        let mut buf = CallBuffer::output_string(16);
        buf.write_wide_string("a much longer one").unwrap_err();
        buf.write_wide_string("longer text").unwrap();
        buf.write_wide_string("ab").unwrap();
        assert_eq!(buf.read_wide_string(), "ab");
    }

    #[test]
    fn test_output_string_empty() {
        let buf = CallBuffer::output_string(DEFAULT_STRING_CAPACITY);
        assert_eq!(buf.read_wide_string(), "");
    }

    #[test]
    fn test_output_string_unterminated_uses_full_capacity() {
        let mut buf = CallBuffer::output_string(2);
        let bytes = buf.as_bytes_mut();
        for (i, unit) in "abc".encode_utf16().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(buf.read_wide_string(), "abc");
    }

    #[test]
    fn test_output_string_non_ascii() {
        let mut buf = CallBuffer::output_string(8);
        buf.write_wide_string("Größe 😀").unwrap();
        assert_eq!(buf.read_wide_string(), "Größe 😀");
    }

    #[test]
    fn test_scalar_widths() {
        let mut bytes = [0u8; 16];
        write_scalar(&mut bytes, 0, TypeTag::I16, &Value::Int(-2)).unwrap();
        write_scalar(&mut bytes, 8, TypeTag::F64, &Value::Float(1.5)).unwrap();
        assert_eq!(read_scalar(&bytes, 0, TypeTag::I16).unwrap(), Value::Int(-2));
        assert_eq!(read_scalar(&bytes, 8, TypeTag::F64).unwrap(), Value::Float(1.5));
        assert!(write_scalar(&mut bytes, 0, TypeTag::U8, &Value::Int(256)).is_err());
        assert!(read_scalar(&bytes, 12, TypeTag::U64).is_err());
        assert!(read_scalar(&bytes, 0, TypeTag::WStr).is_err());
    }

    #[test]
    fn test_offset_overflow_is_an_error() {
        let mut bytes = [0u8; 16];
        let offset = usize::MAX - 1;
        assert!(matches!(read_scalar(&bytes, offset, TypeTag::I32), Err(AutoItError::Marshal(_))));
        assert!(matches!(
            write_scalar(&mut bytes, offset, TypeTag::I32, &Value::Int(1)),
            Err(AutoItError::Marshal(_))
        ));
    }
}
