//! Array descriptors and typed array types

use super::{ByteOrder, Dtype, Element, ElementType, EncodedArray};
use crate::error::{Error, Result};
use std::borrow::Cow;

/// Everything a header records about an array
///
/// The dtype and byte order only change together, through
/// [`ArrayDescriptor::new`] and [`ArrayDescriptor::with_byte_order`], so the
/// byte order always applies to the dtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDescriptor {
    dtype: Dtype,
    byte_order: ByteOrder,
    pub shape: Vec<u64>,
    /// Payload is laid out column-major
    pub fortran_order: bool,
}

impl ArrayDescriptor {
    /// Row-major descriptor in host byte order
    pub fn new(dtype: impl Into<Dtype>, shape: Vec<u64>) -> Self {
        let dtype = dtype.into();
        let byte_order = normalize_order(&dtype, ByteOrder::native());
        Self {
            dtype,
            shape,
            byte_order,
            fortran_order: false,
        }
    }

    /// Byte order used on disk
    ///
    /// Dtypes without multi-byte components always use `NotApplicable`, and
    /// `NotApplicable` on a multi-byte dtype means host order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = normalize_order(&self.dtype, byte_order);
        self
    }

    pub fn with_fortran_order(mut self, fortran_order: bool) -> Self {
        self.fortran_order = fortran_order;
        self
    }

    pub fn dtype(&self) -> &Dtype {
        &self.dtype
    }

    /// Byte order of the stored payload
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total number of elements; an empty shape is a scalar holding one
    ///
    /// Saturates at `u64::MAX` for shapes whose product overflows.
    pub fn num_elements(&self) -> u64 {
        self.checked_num_elements().unwrap_or(u64::MAX)
    }

    /// Total number of elements, or `None` when it does not fit in a u64
    pub fn checked_num_elements(&self) -> Option<u64> {
        self.shape.iter().try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
    }

    /// Expected payload size in bytes
    ///
    /// Saturates at `u64::MAX`; [`checked_expected_size`] tells overflow
    /// apart from a real size.
    ///
    /// [`checked_expected_size`]: ArrayDescriptor::checked_expected_size
    pub fn expected_size(&self) -> u64 {
        self.checked_expected_size().unwrap_or(u64::MAX)
    }

    /// Expected payload size, or `None` when it does not fit in a u64
    pub fn checked_expected_size(&self) -> Option<u64> {
        self.shape
            .iter()
            .try_fold(self.dtype.itemsize() as u64, |acc, &dim| acc.checked_mul(dim))
    }

}

fn normalize_order(dtype: &Dtype, order: ByteOrder) -> ByteOrder {
    if !dtype.has_multibyte() {
        ByteOrder::NotApplicable
    } else if order == ByteOrder::NotApplicable {
        ByteOrder::native()
    } else {
        order
    }
}

/// Owned array with its payload in host byte order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub descriptor: ArrayDescriptor,
    pub data: Vec<u8>,
}

impl Array {
    pub fn new(descriptor: ArrayDescriptor, data: Vec<u8>) -> Self {
        Self { descriptor, data }
    }

    /// Build a row-major array from typed values
    pub fn from_values<T: Element>(shape: Vec<u64>, values: &[T]) -> Result<Self> {
        let descriptor = ArrayDescriptor::new(T::ELEMENT_TYPE, shape);
        let count = descriptor.checked_num_elements().ok_or_else(|| {
            Error::format(format!(
                "shape {:?} overflows the element count",
                descriptor.shape
            ))
        })?;
        if count != values.len() as u64 {
            return Err(Error::format(format!(
                "shape {:?} holds {} elements, got {} values",
                descriptor.shape,
                count,
                values.len()
            )));
        }
        let mut data = Vec::with_capacity(values.len() * T::ELEMENT_TYPE.width());
        for &value in values {
            value.write_ne(&mut data);
        }
        Ok(Self { descriptor, data })
    }

    /// Total number of elements
    pub fn num_elements(&self) -> u64 {
        self.descriptor.num_elements()
    }

    /// Expected data size in bytes
    pub fn expected_size(&self) -> u64 {
        self.descriptor.expected_size()
    }

    /// Element type when the array is not a record array
    pub fn element_type(&self) -> Option<ElementType> {
        self.descriptor.dtype.as_scalar()
    }

    /// Read every element as `T`, in payload order
    pub fn to_values<T: Element>(&self) -> Result<Vec<T>> {
        match &self.descriptor.dtype {
            Dtype::Scalar(element) if *element == T::ELEMENT_TYPE => Ok(self
                .data
                .chunks_exact(element.width())
                .map(T::read_ne)
                .collect()),
            other => Err(type_mismatch(T::ELEMENT_TYPE, other)),
        }
    }

    /// Read one field of every record as `T`
    pub fn field_values<T: Element>(&self, name: &str) -> Result<Vec<T>> {
        let layout = match &self.descriptor.dtype {
            Dtype::Record(layout) => layout,
            Dtype::Scalar(element) => {
                return Err(Error::TypeMismatch {
                    expected: "record".to_string(),
                    actual: element.to_string(),
                });
            }
        };
        let field = layout
            .field(name)
            .ok_or_else(|| Error::NotFound(format!("record field {:?}", name)))?;
        if field.element_type != T::ELEMENT_TYPE {
            return Err(Error::TypeMismatch {
                expected: T::ELEMENT_TYPE.to_string(),
                actual: field.element_type.to_string(),
            });
        }
        if layout.itemsize() == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .data
            .chunks_exact(layout.itemsize())
            .map(|record| T::read_ne(&record[field.offset..field.end()]))
            .collect())
    }

    /// Serialize into an array file blob
    pub fn encode(&self) -> Result<EncodedArray> {
        crate::writer::encode(&self.descriptor, &self.data)
    }
}

fn type_mismatch(expected: ElementType, actual: &Dtype) -> Error {
    let actual = match actual {
        Dtype::Scalar(element) => element.to_string(),
        Dtype::Record(_) => "record".to_string(),
    };
    Error::TypeMismatch {
        expected: expected.to_string(),
        actual,
    }
}

/// View into an array file (zero-copy)
///
/// `payload` holds the bytes exactly as stored, in `descriptor.byte_order()`.
#[derive(Debug, Clone)]
pub struct ArrayView<'a> {
    pub descriptor: ArrayDescriptor,
    pub payload: &'a [u8],
}

impl<'a> ArrayView<'a> {
    /// Total number of elements
    pub fn num_elements(&self) -> u64 {
        self.descriptor.num_elements()
    }

    /// Payload in host byte order; borrows when no swap is needed
    pub fn native_data(&self) -> Cow<'a, [u8]> {
        if self.descriptor.byte_order.needs_swap() {
            let mut data = self.payload.to_vec();
            self.descriptor.dtype.swap_bytes(&mut data);
            Cow::Owned(data)
        } else {
            Cow::Borrowed(self.payload)
        }
    }

    /// Convert to owned Array in host byte order
    pub fn to_owned(&self) -> Array {
        Array {
            descriptor: self.descriptor.clone(),
            data: self.native_data().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordLayout;

    #[test]
    fn descriptor_sizes() {
        let d = ArrayDescriptor::new(ElementType::F32, vec![2, 3]);
        assert_eq!(d.num_elements(), 6);
        assert_eq!(d.expected_size(), 24);

        let scalar = ArrayDescriptor::new(ElementType::I64, vec![]);
        assert_eq!(scalar.num_elements(), 1);
        assert_eq!(scalar.expected_size(), 8);

        let empty = ArrayDescriptor::new(ElementType::I64, vec![4, 0]);
        assert_eq!(empty.expected_size(), 0);

        let huge = ArrayDescriptor::new(ElementType::F64, vec![u64::MAX, 2]);
        assert_eq!(huge.checked_num_elements(), None);
        assert_eq!(huge.checked_expected_size(), None);
        assert_eq!(huge.num_elements(), u64::MAX);
        assert_eq!(huge.expected_size(), u64::MAX);
    }

    #[test]
    fn from_values_rejects_overflowing_shape() {
        let result = Array::from_values(vec![u64::MAX, 2], &[1i32]);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn single_byte_types_have_no_byte_order() {
        let d = ArrayDescriptor::new(ElementType::I8, vec![5]).with_byte_order(ByteOrder::Big);
        assert_eq!(d.byte_order(), ByteOrder::NotApplicable);

        let d = ArrayDescriptor::new(ElementType::I16, vec![5]).with_byte_order(ByteOrder::Big);
        assert_eq!(d.byte_order(), ByteOrder::Big);

        let d = ArrayDescriptor::new(ElementType::I16, vec![5])
            .with_byte_order(ByteOrder::NotApplicable);
        assert_eq!(d.byte_order(), ByteOrder::native());
    }

    #[test]
    fn typed_values_roundtrip() {
        let array = Array::from_values(vec![2, 2], &[1.5f64, -2.0, 0.0, 8.25]).unwrap();
        assert_eq!(array.element_type(), Some(ElementType::F64));
        assert_eq!(array.data.len(), 32);
        assert_eq!(array.to_values::<f64>().unwrap(), vec![1.5, -2.0, 0.0, 8.25]);
        assert!(matches!(
            array.to_values::<i64>(),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn from_values_checks_shape() {
        let result = Array::from_values(vec![3], &[1i32, 2]);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn record_field_values() {
        let layout =
            RecordLayout::packed([("id", ElementType::U16), ("score", ElementType::F32)]).unwrap();
        let mut data = Vec::new();
        for (id, score) in [(1u16, 0.5f32), (2, -1.25)] {
            id.write_ne(&mut data);
            score.write_ne(&mut data);
        }
        let array = Array::new(ArrayDescriptor::new(layout, vec![2]), data);

        assert_eq!(array.field_values::<u16>("id").unwrap(), vec![1, 2]);
        assert_eq!(array.field_values::<f32>("score").unwrap(), vec![0.5, -1.25]);
        assert!(matches!(
            array.field_values::<f32>("missing"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            array.field_values::<u32>("id"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            array.to_values::<u16>(),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn view_swaps_foreign_payload() {
        let stored: Vec<u8> = [1u32, 2].iter().flat_map(|v| v.to_be_bytes()).collect();
        let view = ArrayView {
            descriptor: ArrayDescriptor::new(ElementType::U32, vec![2])
                .with_byte_order(ByteOrder::Big),
            payload: &stored,
        };
        assert_eq!(view.to_owned().to_values::<u32>().unwrap(), vec![1, 2]);

        let native = view.native_data();
        assert_eq!(
            matches!(native, Cow::Borrowed(_)),
            ByteOrder::native() == ByteOrder::Big
        );
    }
}
