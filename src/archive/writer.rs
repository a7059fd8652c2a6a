//! Streaming archive writer

use super::{ArchiveState, entry_name, validate_member_name};
use crate::error::{Error, Result};
use crate::types::{Array, EncodedArray};
use std::io::{Seek, Write};
use tracing::{debug, info, warn};
use zip::{CompressionMethod, DateTime};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes named array files into a ZIP container
///
/// Members are stored uncompressed in insertion order. The index is written
/// by [`ArchiveWriter::finalize`]; after that, or after any I/O error, the
/// writer accepts nothing more.
pub struct ArchiveWriter<W: Write + Seek> {
    zip: Option<ZipWriter<W>>,
    members: Vec<String>,
    state: ArchiveState,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            zip: Some(ZipWriter::new(sink)),
            members: Vec::new(),
            state: ArchiveState::Open,
        }
    }

    pub fn state(&self) -> ArchiveState {
        self.state
    }

    /// Member names in insertion order
    pub fn list_members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn open_zip(&mut self, operation: &'static str) -> Result<&mut ZipWriter<W>> {
        match (self.state, self.zip.as_mut()) {
            (ArchiveState::Open, Some(zip)) => Ok(zip),
            (state, _) => Err(Error::ArchiveState { state, operation }),
        }
    }

    fn fail(&mut self, error: &Error, operation: &'static str) {
        warn!(%error, operation, members = self.members.len(), "archive failed");
        self.state = ArchiveState::Failed;
        self.zip = None;
    }

    /// Add an encoded array under `name`
    ///
    /// Name errors leave the archive unchanged. An I/O error moves the
    /// archive to [`ArchiveState::Failed`].
    pub fn add_member(&mut self, name: &str, member: &EncodedArray) -> Result<()> {
        self.open_zip("add member")?;
        validate_member_name(name)?;
        if self.contains(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        // Entries carry the DOS epoch as their timestamp
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default())
            .large_file(member.len() as u64 >= u32::MAX as u64);

        let zip = self.open_zip("add member")?;
        let written = zip
            .start_file(entry_name(name), options)
            .map_err(Error::from)
            .and_then(|()| zip.write_all(member.as_bytes()).map_err(Error::from));
        if let Err(e) = written {
            self.fail(&e, "add member");
            return Err(e);
        }

        self.members.push(name.to_string());
        debug!(name, bytes = member.len(), "added archive member");
        Ok(())
    }

    /// Encode `array` and add it under `name`
    pub fn add_array(&mut self, name: &str, array: &Array) -> Result<()> {
        self.open_zip("add member")?;
        let encoded = array.encode()?;
        self.add_member(name, &encoded)
    }

    /// Write the index and hand back the sink
    pub fn finalize(&mut self) -> Result<W> {
        self.open_zip("finalize")?;
        let zip = match self.zip.take() {
            Some(zip) => zip,
            None => {
                return Err(Error::ArchiveState {
                    state: self.state,
                    operation: "finalize",
                });
            }
        };

        let finished = zip.finish().map_err(Error::from).and_then(|mut sink| {
            sink.flush()?;
            Ok(sink)
        });
        match finished {
            Ok(sink) => {
                self.state = ArchiveState::Finalized;
                info!(members = self.members.len(), "finalized archive");
                Ok(sink)
            }
            Err(e) => {
                self.fail(&e, "finalize");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveReader;
    use std::io::{self, Cursor, SeekFrom};

    fn sample(values: &[i64]) -> EncodedArray {
        Array::from_values(vec![values.len() as u64], values)
            .unwrap()
            .encode()
            .unwrap()
    }

    /// Sink that fails every write once `limit` bytes have been accepted
    struct LimitedSink {
        inner: Cursor<Vec<u8>>,
        limit: u64,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.inner.position() + buf.len() as u64 > self.limit {
                return Err(io::Error::other("device full"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for LimitedSink {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn members_keep_insertion_order() {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        for name in ["zeta", "alpha", "mid"] {
            writer.add_member(name, &sample(&[1, 2])).unwrap();
        }
        assert_eq!(writer.list_members(), ["zeta", "alpha", "mid"]);
        assert_eq!(writer.len(), 3);

        let bytes = writer.finalize().unwrap().into_inner();
        let reader = ArchiveReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.list_members(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_leaves_archive_unchanged() {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        let first = sample(&[1]);
        writer.add_member("a", &first).unwrap();

        let result = writer.add_member("a", &sample(&[2]));
        assert!(matches!(result, Err(Error::DuplicateName(ref n)) if n == "a"));
        assert_eq!(writer.state(), ArchiveState::Open);
        assert_eq!(writer.list_members(), ["a"]);

        let bytes = writer.finalize().unwrap().into_inner();
        let mut reader = ArchiveReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.get_member("a").unwrap(), first);
    }

    #[test]
    fn invalid_names_rejected() {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        assert!(matches!(
            writer.add_member("", &sample(&[1])),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            writer.add_member("dir/a", &sample(&[1])),
            Err(Error::InvalidName { .. })
        ));
        assert!(writer.is_empty());
        assert_eq!(writer.state(), ArchiveState::Open);
    }

    #[test]
    fn finalized_archive_is_read_only() {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        writer.add_member("a", &sample(&[1])).unwrap();
        writer.finalize().unwrap();
        assert_eq!(writer.state(), ArchiveState::Finalized);

        assert!(matches!(
            writer.add_member("b", &sample(&[2])),
            Err(Error::ArchiveState {
                state: ArchiveState::Finalized,
                ..
            })
        ));
        assert!(matches!(
            writer.finalize(),
            Err(Error::ArchiveState { .. })
        ));
    }

    #[test]
    fn empty_archive() {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        let bytes = writer.finalize().unwrap().into_inner();
        let reader = ArchiveReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.is_empty());
    }

    #[test]
    fn io_failure_moves_to_failed() {
        let sink = LimitedSink {
            inner: Cursor::new(Vec::new()),
            limit: 200,
        };
        let mut writer = ArchiveWriter::new(sink);
        let big = sample(&[7; 64]);

        let result = writer.add_member("big", &big);
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(writer.state(), ArchiveState::Failed);
        assert!(writer.is_empty());

        assert!(matches!(
            writer.add_member("small", &sample(&[1])),
            Err(Error::ArchiveState {
                state: ArchiveState::Failed,
                ..
            })
        ));
        assert!(matches!(
            writer.finalize(),
            Err(Error::ArchiveState { .. })
        ));
    }
}
