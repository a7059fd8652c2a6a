//! Serialization of arrays into array files

mod array;
mod descr;
mod file;
mod header;

pub use file::write_file;
pub use header::header_dict;

pub(crate) use file::parent_dir;

use crate::error::{Error, Result};
use crate::types::{ArrayDescriptor, EncodedArray};
use std::io::Write;
use tracing::debug;

use array::write_payload;
use header::build_preamble;

/// Check that `data` is exactly as long as the descriptor says
fn check_length(descriptor: &ArrayDescriptor, data: &[u8]) -> Result<()> {
    let expected = descriptor.checked_expected_size().ok_or_else(|| {
        Error::format(format!(
            "shape {:?} overflows the addressable payload size",
            descriptor.shape
        ))
    })?;
    if data.len() as u64 != expected {
        return Err(Error::format(format!(
            "payload length mismatch: shape {:?} with itemsize {} needs {} bytes, got {}",
            descriptor.shape,
            descriptor.dtype().itemsize(),
            expected,
            data.len()
        )));
    }
    Ok(())
}

/// Write an array file for host-order `data` to a writer
pub fn write<W: Write>(writer: &mut W, descriptor: &ArrayDescriptor, data: &[u8]) -> Result<()> {
    check_length(descriptor, data)?;

    let preamble = build_preamble(descriptor)?;
    writer.write_all(&preamble)?;
    write_payload(writer, descriptor, data)?;
    Ok(())
}

/// Encode host-order `data` into an array file blob
pub fn encode(descriptor: &ArrayDescriptor, data: &[u8]) -> Result<EncodedArray> {
    check_length(descriptor, data)?;

    let mut bytes = build_preamble(descriptor)?;
    let payload_offset = bytes.len();
    bytes.reserve(data.len());
    write_payload(&mut bytes, descriptor, data)?;

    debug!(
        shape = ?descriptor.shape,
        byte_order = ?descriptor.byte_order(),
        header_len = payload_offset,
        payload_len = data.len(),
        "encoded array"
    );
    Ok(EncodedArray::from_parts(bytes, payload_offset))
}

/// Encode into plain bytes
pub fn to_bytes(descriptor: &ArrayDescriptor, data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(descriptor, data)?.into_bytes())
}
