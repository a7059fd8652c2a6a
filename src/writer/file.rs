//! Writing array files to disk

use crate::error::Result;
use crate::types::Array;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Directory a temporary sibling of `path` should live in
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write an array file to `path`
///
/// The file is written next to its destination and renamed into place, so
/// `path` either keeps its old content or holds the complete new file.
pub fn write_file(path: impl AsRef<Path>, array: &Array) -> Result<()> {
    let path = path.as_ref();
    let mut temp = NamedTempFile::new_in(parent_dir(path))?;

    super::write(temp.as_file_mut(), &array.descriptor, &array.data)?;
    temp.as_file_mut().flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = array.data.len(), "wrote array file");
    Ok(())
}
