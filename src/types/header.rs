//! Header constants and format versions

/// Magic bytes opening every array file
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// The magic, version and header text together fill a multiple of this many bytes
pub const HEADER_ALIGNMENT: usize = 16;

/// File extension for single arrays
pub const NPY_EXTENSION: &str = "npy";

/// File extension for archives
pub const NPZ_EXTENSION: &str = "npz";

/// Array file format version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// 2-byte header length, ASCII header
    V1,
    /// 4-byte header length, ASCII header
    V2,
    /// 4-byte header length, UTF-8 header
    V3,
}

impl FormatVersion {
    pub fn from_bytes(major: u8, minor: u8) -> Option<Self> {
        match (major, minor) {
            (1, 0) => Some(FormatVersion::V1),
            (2, 0) => Some(FormatVersion::V2),
            (3, 0) => Some(FormatVersion::V3),
            _ => None,
        }
    }

    /// `[major, minor]` as written after the magic
    pub fn to_bytes(self) -> [u8; 2] {
        match self {
            FormatVersion::V1 => [1, 0],
            FormatVersion::V2 => [2, 0],
            FormatVersion::V3 => [3, 0],
        }
    }

    /// Size in bytes of the little-endian header length field
    pub fn length_field_size(self) -> usize {
        match self {
            FormatVersion::V1 => 2,
            FormatVersion::V2 | FormatVersion::V3 => 4,
        }
    }

    /// Bytes preceding the header text
    pub fn preamble_size(self) -> usize {
        MAGIC.len() + 2 + self.length_field_size()
    }
}
