//! Core types for the array file format

mod array;
mod byte_order;
mod dtype;
mod element;
mod encoded;
mod header;
mod record;

pub use array::{Array, ArrayDescriptor, ArrayView};
pub use byte_order::{ByteOrder, swap_elements};
pub use dtype::Dtype;
pub use element::{Element, ElementType};
pub use encoded::EncodedArray;
pub use header::{FormatVersion, HEADER_ALIGNMENT, MAGIC, NPY_EXTENSION, NPZ_EXTENSION};
pub use record::{FieldDescriptor, RecordLayout};
