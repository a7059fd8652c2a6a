//! Structured record layouts

use super::ElementType;
use crate::error::{Error, Result};

/// One named field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub element_type: ElementType,
    /// Byte offset of the field within one record
    pub offset: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, element_type: ElementType, offset: usize) -> Self {
        Self {
            name: name.into(),
            element_type,
            offset,
        }
    }

    /// Offset one past the last byte of the field
    pub fn end(&self) -> usize {
        self.offset + self.element_type.width()
    }
}

/// Validated layout of a structured record
///
/// Fields keep their declaration order. `itemsize` may be larger than the
/// space the fields cover, leaving gaps that are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    fields: Vec<FieldDescriptor>,
    itemsize: usize,
}

impl RecordLayout {
    /// Lay fields out back to back, in order, with no padding
    pub fn packed<N, I>(fields: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, ElementType)>,
    {
        let mut offset = 0;
        let fields: Vec<FieldDescriptor> = fields
            .into_iter()
            .map(|(name, element_type)| {
                let field = FieldDescriptor::new(name, element_type, offset);
                offset = field.end();
                field
            })
            .collect();
        Self::with_layout(fields, offset)
    }

    /// Use explicit field offsets and record width
    pub fn with_layout(fields: Vec<FieldDescriptor>, itemsize: usize) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::format("record layout has no fields"));
        }

        for (i, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(Error::format(format!("record field {} has an empty name", i)));
            }
            if fields[..i].iter().any(|other| other.name == field.name) {
                return Err(Error::format(format!(
                    "record field name {:?} is used twice",
                    field.name
                )));
            }
            if field.end() > itemsize {
                return Err(Error::format(format!(
                    "record field {:?} ends at byte {} past itemsize {}",
                    field.name,
                    field.end(),
                    itemsize
                )));
            }
        }

        let mut spans: Vec<&FieldDescriptor> = fields.iter().collect();
        spans.sort_by_key(|f| f.offset);
        for pair in spans.windows(2) {
            if pair[0].end() > pair[1].offset {
                return Err(Error::format(format!(
                    "record fields {:?} and {:?} overlap",
                    pair[0].name, pair[1].name
                )));
            }
        }

        Ok(Self { fields, itemsize })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Width in bytes of one record
    pub fn itemsize(&self) -> usize {
        self.itemsize
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when fields tile the record in declaration order with no gaps
    pub fn is_packed(&self) -> bool {
        let mut offset = 0;
        for field in &self.fields {
            if field.offset != offset {
                return false;
            }
            offset = field.end();
        }
        offset == self.itemsize
    }

    /// True when declaration order is also offset order
    pub fn is_ascending(&self) -> bool {
        self.fields.windows(2).all(|pair| pair[0].offset < pair[1].offset)
    }
}
