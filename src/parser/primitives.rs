//! Primitive little-endian readers built on `take`

use super::take::ByteCursor;
use crate::error::Result;

/// Parse a u8
pub fn u8_parser(cursor: ByteCursor<'_>) -> Result<(u8, ByteCursor<'_>)> {
    let (bytes, cursor) = cursor.take(1)?;
    Ok((bytes[0], cursor))
}

/// Parse a u16 (little-endian)
pub fn u16_le(cursor: ByteCursor<'_>) -> Result<(u16, ByteCursor<'_>)> {
    let (bytes, cursor) = cursor.take(2)?;
    Ok((u16::from_le_bytes([bytes[0], bytes[1]]), cursor))
}

/// Parse a u32 (little-endian)
pub fn u32_le(cursor: ByteCursor<'_>) -> Result<(u32, ByteCursor<'_>)> {
    let (bytes, cursor) = cursor.take(4)?;
    Ok((
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        cursor,
    ))
}
