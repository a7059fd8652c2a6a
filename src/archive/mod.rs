//! Multi-array archives
//!
//! An archive is a ZIP container holding one stored `<name>.npy` member per
//! array. The central directory at the end of the container is the index
//! readers use to locate any member without touching the others.

mod file;
mod reader;
mod writer;

pub use file::ArchiveFile;
pub use reader::{ArchiveReader, MemberEntry};
pub use writer::ArchiveWriter;

use crate::error::{Error, Result};
use crate::types::{EncodedArray, NPY_EXTENSION};
use std::fmt;
use std::io::Cursor;

/// Lifecycle of an archive being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// Accepting members
    Open,
    /// Index written, read-only
    Finalized,
    /// An I/O error occurred; nothing more can be written
    Failed,
}

impl fmt::Display for ArchiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveState::Open => "open",
            ArchiveState::Finalized => "finalized",
            ArchiveState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Check a member name before it is added
pub fn validate_member_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('/') {
        "name contains '/'"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Container entry name for a member
fn entry_name(name: &str) -> String {
    format!("{}.{}", name, NPY_EXTENSION)
}

/// Member name for a container entry
fn member_name(entry: &str) -> &str {
    entry
        .strip_suffix(NPY_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(entry)
}

/// Pack named arrays into an in-memory archive
pub fn pack<'a, I, N>(members: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (N, &'a EncodedArray)>,
    N: AsRef<str>,
{
    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
    for (name, member) in members {
        writer.add_member(name.as_ref(), member)?;
    }
    Ok(writer.finalize()?.into_inner())
}
