//! Array element descriptions

use super::byte_order::swap_elements;
use super::{ElementType, RecordLayout};

/// What one element of an array is: a primitive or a structured record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dtype {
    Scalar(ElementType),
    Record(RecordLayout),
}

impl Dtype {
    /// Size in bytes of a single element
    pub fn itemsize(&self) -> usize {
        match self {
            Dtype::Scalar(element) => element.width(),
            Dtype::Record(layout) => layout.itemsize(),
        }
    }

    /// Whether any component is wider than one byte
    pub fn has_multibyte(&self) -> bool {
        match self {
            Dtype::Scalar(element) => element.width() > 1,
            Dtype::Record(layout) => layout.fields().iter().any(|f| f.element_type.width() > 1),
        }
    }

    pub fn as_scalar(&self) -> Option<ElementType> {
        match self {
            Dtype::Scalar(element) => Some(*element),
            Dtype::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordLayout> {
        match self {
            Dtype::Scalar(_) => None,
            Dtype::Record(layout) => Some(layout),
        }
    }

    /// Reverse the bytes of every multi-byte component in `data`
    ///
    /// Records are swapped field by field; gap bytes stay where they are.
    pub fn swap_bytes(&self, data: &mut [u8]) {
        match self {
            Dtype::Scalar(element) => swap_elements(data, element.width()),
            Dtype::Record(layout) => {
                if layout.itemsize() == 0 {
                    return;
                }
                for record in data.chunks_exact_mut(layout.itemsize()) {
                    for field in layout.fields() {
                        record[field.offset..field.end()].reverse();
                    }
                }
            }
        }
    }
}

impl From<ElementType> for Dtype {
    fn from(element: ElementType) -> Self {
        Dtype::Scalar(element)
    }
}

impl From<RecordLayout> for Dtype {
    fn from(layout: RecordLayout) -> Self {
        Dtype::Record(layout)
    }
}
