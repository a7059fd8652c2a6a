//! Byte order tags and per-width byte swapping

/// Byte order of multi-byte values in a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// `<`
    Little,
    /// `>`
    Big,
    /// `|`, for payloads made only of single-byte values
    NotApplicable,
}

impl ByteOrder {
    /// Byte order of the host
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Symbol used in type strings
    pub const fn symbol(self) -> char {
        match self {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::NotApplicable => '|',
        }
    }

    /// Parse a type string prefix; `=` means native order
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '<' => Some(ByteOrder::Little),
            '>' => Some(ByteOrder::Big),
            '|' => Some(ByteOrder::NotApplicable),
            '=' => Some(ByteOrder::native()),
            _ => None,
        }
    }

    /// Whether values in this order must be reversed to be read on the host
    pub fn needs_swap(self) -> bool {
        match self {
            ByteOrder::NotApplicable => false,
            order => order != ByteOrder::native(),
        }
    }
}

/// Reverse every `width`-byte element of `data` in place
///
/// Widths of 0 and 1 leave the data untouched.
pub fn swap_elements(data: &mut [u8], width: usize) {
    if width <= 1 {
        return;
    }
    for element in data.chunks_exact_mut(width) {
        element.reverse();
    }
}
