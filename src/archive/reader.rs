//! Random-access archive reader

use super::member_name;
use crate::error::{Error, Result};
use crate::types::{Array, EncodedArray};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::{CompressionMethod, ZipArchive};

/// Index entry for one archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    /// Member name without the `.npy` suffix
    pub name: String,
    /// Offset of the first byte of the member's array file
    pub data_offset: u64,
    /// Uncompressed length in bytes
    pub length: u64,
    /// Length as stored in the container
    pub compressed_length: u64,
    /// Stored raw; anything else cannot be read
    pub stored: bool,
    index: usize,
}

/// Reads members out of an archive using its index
pub struct ArchiveReader<R: Read + Seek> {
    zip: ZipArchive<R>,
    entries: Vec<MemberEntry>,
}

impl ArchiveReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = Self::new(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), members = reader.len(), "opened archive");
        Ok(reader)
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Read the index of an archive
    ///
    /// Only the central directory and the local entry headers are read;
    /// member data is left alone until requested.
    pub fn new(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;

        let mut entries = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let file = zip.by_index_raw(index)?;
            if file.is_dir() {
                continue;
            }
            entries.push(MemberEntry {
                name: member_name(file.name()).to_string(),
                data_offset: file.data_start(),
                length: file.size(),
                compressed_length: file.compressed_size(),
                stored: file.compression() == CompressionMethod::Stored,
                index,
            });
        }

        Ok(Self { zip, entries })
    }

    /// Index entries in container order
    pub fn index(&self) -> &[MemberEntry] {
        &self.entries
    }

    pub fn list_members(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entry(&self, name: &str) -> Option<&MemberEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read one member's array file
    ///
    /// Only that member's bytes are read. Compressed members are rejected.
    pub fn get_member(&mut self, name: &str) -> Result<EncodedArray> {
        let entry = self
            .entry(name)
            .ok_or_else(|| Error::NotFound(format!("archive member {:?}", name)))?;
        if !entry.stored {
            return Err(Error::unsupported(format!(
                "archive member {:?} is compressed",
                name
            )));
        }
        let index = entry.index;
        let length = entry.length;

        let mut file = self.zip.by_index(index)?;
        let mut bytes = Vec::with_capacity(length as usize);
        file.read_to_end(&mut bytes).map_err(|e| match e.kind() {
            // Checksum mismatch
            io::ErrorKind::InvalidData => {
                Error::format(format!("archive member {:?}: {}", name, e))
            }
            _ => Error::Io(e),
        })?;

        debug!(name, bytes = bytes.len(), "read archive member");
        EncodedArray::from_bytes(bytes)
    }

    /// Read and decode one member
    pub fn get_array(&mut self, name: &str) -> Result<Array> {
        self.get_member(name)?.decode()
    }
}
