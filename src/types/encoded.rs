//! Serialized array blobs

use super::{Array, ArrayView};
use crate::error::Result;

/// A complete array file: magic, version, padded header text, then payload
///
/// Immutable once built. Construct with [`crate::writer::encode`] or
/// validate foreign bytes with [`EncodedArray::from_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArray {
    bytes: Vec<u8>,
    payload_offset: usize,
}

impl EncodedArray {
    pub(crate) fn from_parts(bytes: Vec<u8>, payload_offset: usize) -> Self {
        Self {
            bytes,
            payload_offset,
        }
    }

    /// Validate array file bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let payload_offset = {
            let view = crate::parser::parse(&bytes)?;
            bytes.len() - view.payload.len()
        };
        Ok(Self {
            bytes,
            payload_offset,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Magic, version, length field and padded header text
    pub fn header(&self) -> &[u8] {
        &self.bytes[..self.payload_offset]
    }

    /// Offset of the first payload byte; always a multiple of the header alignment
    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    /// Payload bytes as stored
    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.payload_offset..]
    }

    pub fn view(&self) -> Result<ArrayView<'_>> {
        crate::parser::parse(&self.bytes)
    }

    pub fn decode(&self) -> Result<Array> {
        crate::parser::decode(&self.bytes)
    }
}

impl AsRef<[u8]> for EncodedArray {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
