//! ndarray integration for numfix arrays
//!
//! This module provides conversions between numfix's Array/ArrayView types
//! and ndarray's dynamic-dimension arrays.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{Array, ArrayDescriptor, ArrayView, Dtype, Element, ElementType};
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    /// Element type of the array differs from the requested one
    #[error("element type mismatch: expected {expected}, got {actual}")]
    DTypeMismatch {
        expected: ElementType,
        actual: String,
    },

    /// Shape doesn't match data length
    #[error("shape {shape:?} doesn't match data length {data_len}")]
    ShapeMismatch { shape: Vec<u64>, data_len: usize },

    /// Array is neither C nor Fortran contiguous
    #[error("array is not contiguous; call .as_standard_layout().into_owned() first")]
    NotContiguous,
}

// =============================================================================
// From ndarray to numfix
// =============================================================================

impl Array {
    /// Create an Array from an ndarray ArrayD
    ///
    /// C-contiguous input becomes a row-major array and Fortran-contiguous
    /// input keeps its column-major layout with `fortran_order` set. Any
    /// other layout is rejected.
    pub fn from_ndarray<T: Element>(arr: ArrayD<T>) -> Result<Self, NdarrayError> {
        let shape: Vec<u64> = arr.shape().iter().map(|&d| d as u64).collect();
        let mut data = Vec::with_capacity(arr.len() * T::ELEMENT_TYPE.width());

        let fortran_order = if arr.is_standard_layout() {
            arr.iter().for_each(|&v| v.write_ne(&mut data));
            false
        } else if arr.t().is_standard_layout() {
            arr.t().iter().for_each(|&v| v.write_ne(&mut data));
            true
        } else {
            return Err(NdarrayError::NotContiguous);
        };

        let descriptor =
            ArrayDescriptor::new(T::ELEMENT_TYPE, shape).with_fortran_order(fortran_order);
        Ok(Array::new(descriptor, data))
    }
}

// =============================================================================
// From numfix to ndarray
// =============================================================================

impl Array {
    /// Convert to an ndarray ArrayD, honouring `fortran_order`
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, NdarrayError> {
        let descriptor = &self.descriptor;
        match descriptor.dtype() {
            Dtype::Scalar(element) if *element == T::ELEMENT_TYPE => {}
            Dtype::Scalar(element) => {
                return Err(NdarrayError::DTypeMismatch {
                    expected: T::ELEMENT_TYPE,
                    actual: element.to_string(),
                });
            }
            Dtype::Record(_) => {
                return Err(NdarrayError::DTypeMismatch {
                    expected: T::ELEMENT_TYPE,
                    actual: "record".to_string(),
                });
            }
        }

        let shape_mismatch = || NdarrayError::ShapeMismatch {
            shape: descriptor.shape.clone(),
            data_len: self.data.len(),
        };

        let shape: Vec<usize> = descriptor
            .shape
            .iter()
            .map(|&d| usize::try_from(d).map_err(|_| shape_mismatch()))
            .collect::<Result<_, _>>()?;
        if descriptor.checked_expected_size() != Some(self.data.len() as u64) {
            return Err(shape_mismatch());
        }

        let elements: Vec<T> = self
            .data
            .chunks_exact(T::ELEMENT_TYPE.width())
            .map(T::read_ne)
            .collect();

        let result = if descriptor.fortran_order {
            ArrayD::from_shape_vec(IxDyn(&shape).f(), elements)
        } else {
            ArrayD::from_shape_vec(IxDyn(&shape), elements)
        };
        result.map_err(|_| shape_mismatch())
    }
}

impl<'a> ArrayView<'a> {
    /// Convert to an owned ndarray ArrayD in host byte order
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, NdarrayError> {
        self.to_owned().to_ndarray()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ByteOrder;
    use half::f16;
    use ndarray::{Axis, Slice, array};

    #[test]
    fn roundtrip_1d_f32() {
        let arr = array![1.0f32, 2.0, 3.0, 4.0].into_dyn();
        let expected = arr.clone();
        let blob = Array::from_ndarray(arr).unwrap();

        assert_eq!(blob.element_type(), Some(ElementType::F32));
        assert_eq!(blob.descriptor.shape, vec![4]);
        assert!(!blob.descriptor.fortran_order);

        let back: ArrayD<f32> = blob.to_ndarray().unwrap();
        assert_eq!(expected, back);
    }

    #[test]
    fn roundtrip_2d_i32() {
        let arr = array![[1i32, 2, 3], [4, 5, 6]].into_dyn();
        let expected = arr.clone();
        let blob = Array::from_ndarray(arr).unwrap();

        assert_eq!(blob.descriptor.shape, vec![2, 3]);
        assert_eq!(blob.to_values::<i32>().unwrap(), vec![1, 2, 3, 4, 5, 6]);

        let back: ArrayD<i32> = blob.to_ndarray().unwrap();
        assert_eq!(expected, back);
    }

    #[test]
    fn fortran_layout_is_kept() {
        let arr = array![[1u16, 2, 3], [4, 5, 6]].reversed_axes().into_dyn();
        let expected = arr.clone();
        let blob = Array::from_ndarray(arr).unwrap();

        assert!(blob.descriptor.fortran_order);
        assert_eq!(blob.descriptor.shape, vec![3, 2]);
        assert_eq!(blob.to_values::<u16>().unwrap(), vec![1, 2, 3, 4, 5, 6]);

        let back: ArrayD<u16> = blob.to_ndarray().unwrap();
        assert_eq!(expected, back);
    }

    #[test]
    fn strided_view_is_rejected() {
        let mut arr = ArrayD::<u8>::zeros(IxDyn(&[4, 4]));
        arr.slice_axis_inplace(Axis(1), Slice::new(0, None, 2));
        assert_eq!(
            Array::from_ndarray(arr).unwrap_err(),
            NdarrayError::NotContiguous
        );
    }

    #[test]
    fn dtype_mismatch_error() {
        let arr = array![1.0f32, 2.0, 3.0].into_dyn();
        let blob = Array::from_ndarray(arr).unwrap();

        let result: Result<ArrayD<f64>, _> = blob.to_ndarray();
        assert!(matches!(result, Err(NdarrayError::DTypeMismatch { .. })));
    }

    #[test]
    fn shape_mismatch_error() {
        let mut blob = Array::from_ndarray(array![1i64, 2].into_dyn()).unwrap();
        blob.data.truncate(8);
        let result: Result<ArrayD<i64>, _> = blob.to_ndarray();
        assert!(matches!(result, Err(NdarrayError::ShapeMismatch { .. })));
    }

    #[test]
    fn view_converts_byte_order() {
        let stored: Vec<u8> = [1.5f64, -2.0].iter().flat_map(|v| v.to_be_bytes()).collect();
        let view = ArrayView {
            descriptor: ArrayDescriptor::new(ElementType::F64, vec![2])
                .with_byte_order(ByteOrder::Big),
            payload: &stored,
        };
        let back: ArrayD<f64> = view.to_ndarray().unwrap();
        assert_eq!(back, array![1.5, -2.0].into_dyn());
    }

    #[test]
    fn element_types() {
        let half = array![f16::ONE, f16::ZERO].into_dyn();
        assert_eq!(
            Array::from_ndarray(half).unwrap().element_type(),
            Some(ElementType::F16)
        );
        let flags = array![true, false].into_dyn();
        assert_eq!(
            Array::from_ndarray(flags).unwrap().element_type(),
            Some(ElementType::Bool)
        );
        assert_eq!(
            Array::from_ndarray(array![1u64, 2, 3].into_dyn())
                .unwrap()
                .element_type(),
            Some(ElementType::U64)
        );
    }
}
