//! Header construction: dict text, version choice and alignment padding

use super::descr::{descr_literal, shape_literal};
use crate::error::{Error, Result};
use crate::types::{ArrayDescriptor, FormatVersion, HEADER_ALIGNMENT, MAGIC};

/// Header dict text, keys in sorted order as NumPy writes them
pub fn header_dict(descriptor: &ArrayDescriptor) -> String {
    format!(
        "{{'descr': {}, 'fortran_order': {}, 'shape': {}, }}",
        descr_literal(descriptor.dtype(), descriptor.byte_order()),
        if descriptor.fortran_order {
            "True"
        } else {
            "False"
        },
        shape_literal(&descriptor.shape)
    )
}

/// Header text padded with spaces and closed with `\n`
///
/// The pad is at least one space and is chosen so the preamble plus header
/// fill a whole number of alignment blocks.
fn pad(dict: &str, version: FormatVersion) -> String {
    let unpadded = version.preamble_size() + dict.len() + 1;
    let padding = HEADER_ALIGNMENT - unpadded % HEADER_ALIGNMENT;

    let mut header = String::with_capacity(dict.len() + padding + 1);
    header.push_str(dict);
    header.extend(std::iter::repeat_n(' ', padding));
    header.push('\n');
    header
}

/// Pick the oldest version able to carry the header
fn choose_version(dict: &str) -> FormatVersion {
    if !dict.is_ascii() {
        return FormatVersion::V3;
    }
    if pad(dict, FormatVersion::V1).len() <= u16::MAX as usize {
        FormatVersion::V1
    } else {
        FormatVersion::V2
    }
}

/// Magic, version, header length and padded header text
pub fn build_preamble(descriptor: &ArrayDescriptor) -> Result<Vec<u8>> {
    let dict = header_dict(descriptor);
    let version = choose_version(&dict);
    let header = pad(&dict, version);

    let mut out = Vec::with_capacity(version.preamble_size() + header.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&version.to_bytes());
    match version {
        FormatVersion::V1 => out.extend_from_slice(&(header.len() as u16).to_le_bytes()),
        FormatVersion::V2 | FormatVersion::V3 => {
            let len = u32::try_from(header.len()).map_err(|_| {
                Error::format(format!("header of {} bytes is too long", header.len()))
            })?;
            out.extend_from_slice(&len.to_le_bytes());
        }
    }
    out.extend_from_slice(header.as_bytes());
    Ok(out)
}
