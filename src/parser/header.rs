//! Header dict parsing

use super::descr::parse_descr;
use super::literal::{Literal, parse_literal};
use crate::error::{Error, Result};
use crate::types::ArrayDescriptor;

const REQUIRED_KEYS: [&str; 3] = ["descr", "fortran_order", "shape"];

/// Parse header text into a descriptor
pub fn parse_header(text: &str) -> Result<ArrayDescriptor> {
    let dict = parse_literal(text)?;
    let entries = match &dict {
        Literal::Dict(entries) => entries,
        other => {
            return Err(Error::format(format!(
                "header must be a dict, found {}",
                other.kind()
            )));
        }
    };

    let mut seen = Vec::with_capacity(entries.len());
    for (key, _) in entries {
        let key = key
            .as_str()
            .ok_or_else(|| Error::format("header keys must be strings"))?;
        if !REQUIRED_KEYS.contains(&key) {
            return Err(Error::format(format!("unexpected header key {:?}", key)));
        }
        if seen.contains(&key) {
            return Err(Error::format(format!("header key {:?} appears twice", key)));
        }
        seen.push(key);
    }

    let descr = required(&dict, "descr")?;
    let (dtype, byte_order) = parse_descr(descr)?;

    let fortran_order = required(&dict, "fortran_order")?
        .as_bool()
        .ok_or_else(|| Error::format("'fortran_order' must be True or False"))?;

    let shape = parse_shape(required(&dict, "shape")?)?;

    Ok(ArrayDescriptor::new(dtype, shape)
        .with_byte_order(byte_order)
        .with_fortran_order(fortran_order))
}

fn required<'a>(dict: &'a Literal, key: &str) -> Result<&'a Literal> {
    dict.get(key)
        .ok_or_else(|| Error::format(format!("header is missing {:?}", key)))
}

fn parse_shape(shape: &Literal) -> Result<Vec<u64>> {
    let dims = match shape {
        Literal::Tuple(dims) => dims,
        other => {
            return Err(Error::format(format!(
                "'shape' must be a tuple, found {}",
                other.kind()
            )));
        }
    };
    dims.iter()
        .map(|dim| {
            dim.as_int()
                .and_then(|d| u64::try_from(d).ok())
                .ok_or_else(|| Error::format("'shape' entries must be non-negative integers"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ByteOrder, Dtype, ElementType};

    #[test]
    fn parse_simple_header() {
        let d = parse_header("{'descr': '<f4', 'fortran_order': True, 'shape': (3, 2), }   \n")
            .unwrap();
        assert_eq!(*d.dtype(), Dtype::Scalar(ElementType::F32));
        assert_eq!(d.byte_order(), ByteOrder::Little);
        assert!(d.fortran_order);
        assert_eq!(d.shape, vec![3, 2]);
    }

    #[test]
    fn key_order_does_not_matter() {
        let d = parse_header("{'shape': (), 'fortran_order': False, 'descr': '|b1'}").unwrap();
        assert_eq!(*d.dtype(), Dtype::Scalar(ElementType::Bool));
        assert_eq!(d.byte_order(), ByteOrder::NotApplicable);
        assert!(d.shape.is_empty());
    }

    #[test]
    fn malformed_headers() {
        for text in [
            "['descr', '<i4']",
            "{'descr': '<i4', 'fortran_order': False}",
            "{'descr': '<i4', 'fortran_order': 0, 'shape': (1,)}",
            "{'descr': '<i4', 'fortran_order': False, 'shape': [1]}",
            "{'descr': '<i4', 'fortran_order': False, 'shape': (-1,)}",
            "{'descr': '<i4', 'fortran_order': False, 'shape': (3)}",
            "{'descr': '<i4', 'fortran_order': False, 'shape': (1,), 'extra': 1}",
            "{'descr': '<i4', 'descr': '<i4', 'fortran_order': False, 'shape': (1,)}",
            "{1: '<i4'}",
        ] {
            assert!(
                matches!(parse_header(text), Err(Error::Format(_))),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn unsupported_descr_is_reported_as_such() {
        let result = parse_header("{'descr': '<c16', 'fortran_order': False, 'shape': (1,)}");
        assert!(matches!(result, Err(Error::UnsupportedFeature(_))));
    }
}
