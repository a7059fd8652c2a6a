//! Deterministic fixture files
//!
//! Writes one array file per element type, two archives of those arrays,
//! and a weather series both as a record array file and as an archive of
//! per-field columns.

mod config;
mod datasets;

pub use config::{ConfigError, FixtureConfig};
pub use datasets::{
    TYPE_SEQUENCE, WEATHER_FIELDS, type_array, type_arrays, weather_columns, weather_layout,
    weather_records,
};

use crate::archive::ArchiveFile;
use crate::error::Result;
use crate::types::{Array, ElementType, NPY_EXTENSION, NPZ_EXTENSION};
use crate::writer::write_file;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory holding the per-type array files
pub const TYPES_DIR: &str = "numpy-types";
pub const ALL_TYPES_ARCHIVE: &str = "npz-all-types";
pub const F16_ARCHIVE: &str = "npz-with-f16";
/// Stem of the weather record file and its column archive
pub const WEATHER: &str = "huge";

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureReport {
    /// Every file written, in order
    pub files: Vec<PathBuf>,
    pub weather_records: u64,
}

fn npy_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, NPY_EXTENSION))
}

fn npz_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, NPZ_EXTENSION))
}

fn write_archive<'a, I>(path: PathBuf, members: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = (&'a str, &'a Array)>,
{
    let mut archive = ArchiveFile::create(path)?;
    for (name, array) in members {
        archive.add_array(name, array)?;
    }
    archive.finalize()
}

/// Write the full fixture set under `config.output_dir`
pub fn generate(config: &FixtureConfig) -> Result<FixtureReport> {
    let out = config.output_dir.as_path();
    let types_dir = out.join(TYPES_DIR);
    std::fs::create_dir_all(&types_dir)?;

    let mut report = FixtureReport::default();

    let arrays = type_arrays();
    for (name, array) in &arrays {
        let path = npy_path(&types_dir, name);
        write_file(&path, array)?;
        report.files.push(path);
    }
    info!(dir = %types_dir.display(), count = arrays.len(), "wrote type arrays");

    if config.write_float16_archive {
        let members = arrays.iter().map(|(name, array)| (*name, array));
        report
            .files
            .push(write_archive(npz_path(out, F16_ARCHIVE), members)?);
    }

    let f16_name = ElementType::F16.name();
    let members = arrays
        .iter()
        .filter(|(name, _)| *name != f16_name)
        .map(|(name, array)| (*name, array));
    report
        .files
        .push(write_archive(npz_path(out, ALL_TYPES_ARCHIVE), members)?);

    let records = weather_records(config)?;
    report.weather_records = records.num_elements();
    let path = npy_path(out, WEATHER);
    write_file(&path, &records)?;
    report.files.push(path);

    let columns = weather_columns(&records)?;
    let members = columns.iter().map(|(name, array)| (name.as_str(), array));
    report
        .files
        .push(write_archive(npz_path(out, WEATHER), members)?);

    info!(
        dir = %out.display(),
        files = report.files.len(),
        weather_records = report.weather_records,
        "generated fixtures"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveReader;
    use tempfile::tempdir;

    #[test]
    fn writes_expected_layout() {
        let dir = tempdir().unwrap();
        let config = FixtureConfig {
            output_dir: dir.path().to_path_buf(),
            years: 1,
            step_hours: 12,
            ..Default::default()
        };

        let report = generate(&config).unwrap();
        assert_eq!(report.files.len(), 12 + 4);
        assert_eq!(report.weather_records, 730);
        for file in &report.files {
            assert!(file.exists(), "{} missing", file.display());
        }

        let all = ArchiveReader::open(dir.path().join("npz-all-types.npz")).unwrap();
        assert_eq!(all.len(), 11);
        assert!(!all.contains("float16"));

        let with_f16 = ArchiveReader::open(dir.path().join("npz-with-f16.npz")).unwrap();
        assert_eq!(with_f16.len(), 12);
        assert!(with_f16.contains("float16"));
    }

    #[test]
    fn float16_archive_is_optional() {
        let dir = tempdir().unwrap();
        let config = FixtureConfig {
            output_dir: dir.path().to_path_buf(),
            years: 0,
            write_float16_archive: false,
            ..Default::default()
        };

        let report = generate(&config).unwrap();
        assert_eq!(report.weather_records, 0);
        assert!(!dir.path().join("npz-with-f16.npz").exists());
        assert!(dir.path().join("huge.npy").exists());
    }
}
