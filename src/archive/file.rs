//! Archive files written atomically to disk

use super::{ArchiveState, ArchiveWriter};
use crate::error::{Error, Result};
use crate::types::{Array, EncodedArray, NPZ_EXTENSION};
use crate::writer::parent_dir;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, info, warn};

/// Archive being written to a file
///
/// Members go to a temporary file next to the destination. Only a successful
/// [`ArchiveFile::finalize`] renames it into place; dropping the archive
/// before that, or any failure, deletes the temporary file and leaves the
/// destination untouched.
pub struct ArchiveFile {
    // Dropped before `temp` so the container is closed before deletion
    writer: ArchiveWriter<File>,
    temp: Option<TempPath>,
    destination: PathBuf,
}

impl ArchiveFile {
    pub fn create(destination: impl AsRef<Path>) -> Result<Self> {
        let destination = destination.as_ref().to_path_buf();
        let suffix = format!(".{}.tmp", NPZ_EXTENSION);
        let temp = tempfile::Builder::new()
            .prefix(".numfix-")
            .suffix(&suffix)
            .tempfile_in(parent_dir(&destination))?;
        let (file, temp) = temp.into_parts();

        debug!(destination = %destination.display(), temp = %temp.display(), "opened archive");
        Ok(Self {
            writer: ArchiveWriter::new(file),
            temp: Some(temp),
            destination,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn state(&self) -> ArchiveState {
        self.writer.state()
    }

    pub fn list_members(&self) -> &[String] {
        self.writer.list_members()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.writer.contains(name)
    }

    pub fn add_member(&mut self, name: &str, member: &EncodedArray) -> Result<()> {
        self.writer.add_member(name, member)
    }

    pub fn add_array(&mut self, name: &str, array: &Array) -> Result<()> {
        self.writer.add_array(name, array)
    }

    /// Write the index, sync, and move the archive to its destination
    pub fn finalize(mut self) -> Result<PathBuf> {
        let file = self.writer.finalize()?;
        file.sync_all()?;
        drop(file);

        let temp = self.temp.take().ok_or(Error::ArchiveState {
            state: ArchiveState::Finalized,
            operation: "finalize",
        })?;
        temp.persist(&self.destination).map_err(|e| e.error)?;

        info!(
            path = %self.destination.display(),
            members = self.writer.len(),
            "wrote archive"
        );
        Ok(self.destination.clone())
    }
}

impl Drop for ArchiveFile {
    fn drop(&mut self) {
        if self.writer.state() == ArchiveState::Open {
            warn!(
                destination = %self.destination.display(),
                "archive dropped before finalize, discarding"
            );
        }
    }
}
