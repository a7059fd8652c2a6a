//! Payload serialization

use crate::types::ArrayDescriptor;
use std::io::{self, Write};

/// Write host-order `data` in the descriptor's byte order
pub fn write_payload<W: Write>(
    writer: &mut W,
    descriptor: &ArrayDescriptor,
    data: &[u8],
) -> io::Result<()> {
    if descriptor.byte_order().needs_swap() {
        let mut swapped = data.to_vec();
        descriptor.dtype().swap_bytes(&mut swapped);
        writer.write_all(&swapped)
    } else {
        writer.write_all(data)
    }
}
