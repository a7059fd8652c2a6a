//! numfix - NumPy array files and archives for deterministic test fixtures
//!
//! Reads and writes the `.npy` single-array format and the `.npz` archive
//! format (a ZIP container of stored `.npy` members), and generates a
//! standard set of fixture files covering every supported element type.
//!
//! # Features
//!
//! - Every integer width, float16/32/64 and bool
//! - Structured records with named fields, packed or with explicit offsets
//! - Little-endian, big-endian and host order on disk
//! - Zero-copy parsing into a view over the payload
//! - Archives written atomically, read member by member through the index
//!
//! # Example
//!
//! ```rust
//! use numfix::{Array, archive};
//!
//! let temps = Array::from_values(vec![2, 2], &[20.5f64, 21.0, 19.75, 22.25]).unwrap();
//! let flags = Array::from_values(vec![3], &[true, false, true]).unwrap();
//!
//! // Single array file
//! let encoded = temps.encode().unwrap();
//! assert_eq!(numfix::decode(encoded.as_bytes()).unwrap(), temps);
//!
//! // Archive of named arrays
//! let bytes = archive::pack([("temps", &encoded), ("flags", &flags.encode().unwrap())]).unwrap();
//! let mut reader = archive::ArchiveReader::new(std::io::Cursor::new(bytes)).unwrap();
//! assert_eq!(reader.list_members(), vec!["temps", "flags"]);
//! assert_eq!(reader.get_array("flags").unwrap(), flags);
//! ```

pub mod archive;
pub mod error;
pub mod fixtures;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use archive::{ArchiveFile, ArchiveReader, ArchiveState, ArchiveWriter, MemberEntry, pack};
pub use error::{Error, Result};
pub use parser::{decode, parse, read_file};
pub use types::{
    Array, ArrayDescriptor, ArrayView, ByteOrder, Dtype, Element, ElementType, EncodedArray,
    FieldDescriptor, FormatVersion, HEADER_ALIGNMENT, MAGIC, NPY_EXTENSION, NPZ_EXTENSION,
    RecordLayout,
};
pub use writer::{encode, write_file};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
