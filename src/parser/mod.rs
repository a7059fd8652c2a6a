//! Binary parser for array files
//!
//! Zero-copy parsing that returns views into the original byte buffer.

mod descr;
mod header;
mod literal;
mod primitives;
mod take;

pub use descr::parse_type_string;
pub use header::parse_header;
pub use literal::{Literal, parse_literal};
pub use take::ByteCursor;

use crate::error::{Error, Result};
use crate::types::{Array, ArrayView, FormatVersion, MAGIC};
use primitives::{u8_parser, u16_le, u32_le};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Magic, version and header text; returns the cursor at the payload
fn parse_preamble(cursor: ByteCursor<'_>) -> Result<(FormatVersion, Cow<'_, str>, ByteCursor<'_>)> {
    let (magic, cursor) = cursor.take(MAGIC.len())?;
    if magic != MAGIC {
        return Err(Error::format("invalid magic bytes, not an array file"));
    }

    let (major, cursor) = u8_parser(cursor)?;
    let (minor, cursor) = u8_parser(cursor)?;
    let version = FormatVersion::from_bytes(major, minor).ok_or_else(|| {
        Error::format(format!("unsupported format version {}.{}", major, minor))
    })?;

    let (header_len, cursor) = match version {
        FormatVersion::V1 => {
            let (len, cursor) = u16_le(cursor)?;
            (len as usize, cursor)
        }
        FormatVersion::V2 | FormatVersion::V3 => {
            let (len, cursor) = u32_le(cursor)?;
            (len as usize, cursor)
        }
    };
    let (header_bytes, cursor) = cursor.take(header_len)?;

    let header = match version {
        FormatVersion::V3 => Cow::Borrowed(
            std::str::from_utf8(header_bytes)
                .map_err(|_| Error::format("header is not valid UTF-8"))?,
        ),
        // Versions 1 and 2 are latin-1
        FormatVersion::V1 | FormatVersion::V2 => match std::str::from_utf8(header_bytes) {
            Ok(text) if text.is_ascii() => Cow::Borrowed(text),
            _ => Cow::Owned(header_bytes.iter().map(|&b| b as char).collect()),
        },
    };

    Ok((version, header, cursor))
}

/// Parse an array file
///
/// Returns an ArrayView that borrows its payload from the input bytes.
/// The payload must be exactly as long as the header declares.
pub fn parse(bytes: &[u8]) -> Result<ArrayView<'_>> {
    let (version, header, cursor) = parse_preamble(ByteCursor::new(bytes))?;
    let descriptor = parse_header(&header)?;

    let expected = descriptor.checked_expected_size().ok_or_else(|| {
        Error::format(format!(
            "shape {:?} overflows the addressable payload size",
            descriptor.shape
        ))
    })?;
    let payload = cursor.remaining();
    if payload.len() as u64 != expected {
        return Err(Error::format(format!(
            "payload length mismatch: header declares {} bytes, found {}",
            expected,
            payload.len()
        )));
    }

    debug!(
        ?version,
        shape = ?descriptor.shape,
        byte_order = ?descriptor.byte_order(),
        payload_offset = cursor.position(),
        "parsed array header"
    );
    Ok(ArrayView {
        descriptor,
        payload,
    })
}

/// Decode an array file into an owned array in host byte order
pub fn decode(bytes: &[u8]) -> Result<Array> {
    Ok(parse(bytes)?.to_owned())
}

/// Read and decode an array file from disk
pub fn read_file(path: impl AsRef<Path>) -> Result<Array> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
