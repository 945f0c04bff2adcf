//! Struct Layout Registry: fixed native structures used by reference.
//!
//! Offsets reproduce what MSVC emits for `POINT` and `RECT`.  A mismatch
//! does not raise an error, it silently corrupts decoded values, so the
//! Windows build cross-checks them against `windows-rs` in tests.

use serde::Serialize;

use crate::errors::AutoItError;
use crate::types::{TypeTag, Value};

// ---------------------------------------------------------------------------
// Layout descriptors
// ---------------------------------------------------------------------------

/// One field of a native structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    pub name: &'static str,
    pub tag: TypeTag,
    pub offset: usize,
}

/// Named, offset-exact description of a fixed native structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructLayout {
    pub name: &'static str,
    /// Total size including trailing padding.
    pub size: usize,
    pub fields: &'static [FieldLayout],
}

impl StructLayout {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Largest field alignment.
    pub fn align(&self) -> usize {
        self.fields.iter().map(|f| f.tag.align()).max().unwrap_or(1)
    }
}

/// Pointer-to-struct alias as it appears in native signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerAlias {
    pub name: &'static str,
    pub target: &'static StructLayout,
}

impl PointerAlias {
    /// ABI tag of the alias itself.
    pub const fn tag(&self) -> TypeTag {
        TypeTag::Pointer
    }
}

const fn field(name: &'static str, offset: usize) -> FieldLayout {
    FieldLayout {
        name,
        tag: TypeTag::I32,
        offset,
    }
}

/// Win32 `POINT` (`LONG x, y`).
pub const POINT: StructLayout = StructLayout {
    name: "POINT",
    size: 8,
    fields: &[field("x", 0), field("y", 4)],
};

/// Win32 `RECT` (`LONG left, top, right, bottom`).
pub const RECT: StructLayout = StructLayout {
    name: "RECT",
    size: 16,
    fields: &[
        field("left", 0),
        field("top", 4),
        field("right", 8),
        field("bottom", 12),
    ],
};

pub const LPPOINT: PointerAlias = PointerAlias {
    name: "LPPOINT",
    target: &POINT,
};

pub const LPRECT: PointerAlias = PointerAlias {
    name: "LPRECT",
    target: &RECT,
};

const LAYOUTS: &[&StructLayout] = &[&POINT, &RECT];
const ALIASES: &[&PointerAlias] = &[&LPPOINT, &LPRECT];

/// Look up a layout by struct name (`RECT`) or pointer alias (`LPRECT`).
pub fn lookup(name: &str) -> Option<&'static StructLayout> {
    LAYOUTS
        .iter()
        .copied()
        .find(|l| l.name == name)
        .or_else(|| ALIASES.iter().find(|a| a.name == name).map(|a| a.target))
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

/// A host record with a fixed native layout.
pub trait NativeStruct: Sized {
    const LAYOUT: &'static StructLayout;

    /// Field values in layout order.
    fn to_values(&self) -> Vec<Value>;

    /// Build from field values in layout order.
    fn from_values(values: &[Value]) -> Result<Self, AutoItError>;
}

fn expect_fields(layout: &StructLayout, values: &[Value]) -> Result<(), AutoItError> {
    if values.len() != layout.fields.len() {
        return Err(AutoItError::Marshal(format!(
            "{} expects {} fields, got {}",
            layout.name,
            layout.fields.len(),
            values.len()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl NativeStruct for Point {
    const LAYOUT: &'static StructLayout = &POINT;

    fn to_values(&self) -> Vec<Value> {
        vec![Value::Int(self.x as i64), Value::Int(self.y as i64)]
    }

    fn from_values(values: &[Value]) -> Result<Self, AutoItError> {
        expect_fields(Self::LAYOUT, values)?;
        Ok(Point {
            x: values[0].as_i32()?,
            y: values[1].as_i32()?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl NativeStruct for Rect {
    const LAYOUT: &'static StructLayout = &RECT;

    fn to_values(&self) -> Vec<Value> {
        [self.left, self.top, self.right, self.bottom]
            .into_iter()
            .map(|v| Value::Int(v as i64))
            .collect()
    }

    fn from_values(values: &[Value]) -> Result<Self, AutoItError> {
        expect_fields(Self::LAYOUT, values)?;
        Ok(Rect {
            left: values[0].as_i32()?,
            top: values[1].as_i32()?,
            right: values[2].as_i32()?,
            bottom: values[3].as_i32()?,
        })
    }
}
