//! Primitive element types

use half::f16;
use std::fmt;

/// Primitive element stored in an array or in one field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
    Bool,
}

impl ElementType {
    /// Every supported element type, in declaration order
    pub const ALL: [ElementType; 12] = [
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::I64,
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::U64,
        ElementType::F16,
        ElementType::F32,
        ElementType::F64,
        ElementType::Bool,
    ];

    /// Size in bytes of a single element
    pub const fn width(self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 | ElementType::Bool => 1,
            ElementType::I16 | ElementType::U16 | ElementType::F16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    /// Kind character used in type strings (`i`, `u`, `f` or `b`)
    pub const fn kind(self) -> char {
        match self {
            ElementType::I8 | ElementType::I16 | ElementType::I32 | ElementType::I64 => 'i',
            ElementType::U8 | ElementType::U16 | ElementType::U32 | ElementType::U64 => 'u',
            ElementType::F16 | ElementType::F32 | ElementType::F64 => 'f',
            ElementType::Bool => 'b',
        }
    }

    /// Look up the element type for a kind character and a width
    pub fn from_kind(kind: char, width: usize) -> Option<Self> {
        match (kind, width) {
            ('i', 1) => Some(ElementType::I8),
            ('i', 2) => Some(ElementType::I16),
            ('i', 4) => Some(ElementType::I32),
            ('i', 8) => Some(ElementType::I64),
            ('u', 1) => Some(ElementType::U8),
            ('u', 2) => Some(ElementType::U16),
            ('u', 4) => Some(ElementType::U32),
            ('u', 8) => Some(ElementType::U64),
            ('f', 2) => Some(ElementType::F16),
            ('f', 4) => Some(ElementType::F32),
            ('f', 8) => Some(ElementType::F64),
            ('b', 1) => Some(ElementType::Bool),
            _ => None,
        }
    }

    /// NumPy-style name (`int8`, `float64`, `bool`, ...)
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::I8 => "int8",
            ElementType::I16 => "int16",
            ElementType::I32 => "int32",
            ElementType::I64 => "int64",
            ElementType::U8 => "uint8",
            ElementType::U16 => "uint16",
            ElementType::U32 => "uint32",
            ElementType::U64 => "uint64",
            ElementType::F16 => "float16",
            ElementType::F32 => "float32",
            ElementType::F64 => "float64",
            ElementType::Bool => "bool",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust types that can be stored as array elements
///
/// Values are converted to and from host byte order; byte order on disk is
/// handled by the encoder and decoder.
pub trait Element: Copy + 'static {
    const ELEMENT_TYPE: ElementType;

    /// Append the host-order bytes of `self`
    fn write_ne(self, out: &mut Vec<u8>);

    /// Read a value from exactly `ELEMENT_TYPE.width()` host-order bytes
    fn read_ne(bytes: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const ELEMENT_TYPE: ElementType = ElementType::$tag;

                fn write_ne(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }

                fn read_ne(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(buf)
                }
            }
        )*
    };
}

impl_element! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f16 => F16,
    f32 => F32,
    f64 => F64,
}

impl Element for bool {
    const ELEMENT_TYPE: ElementType = ElementType::Bool;

    fn write_ne(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }

    fn read_ne(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}
