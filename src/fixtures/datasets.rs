//! Fixture datasets

use super::FixtureConfig;
use crate::error::{Error, Result};
use crate::types::{Array, ArrayDescriptor, Dtype, Element, ElementType, RecordLayout};
use half::f16;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Values every type array is built from
pub const TYPE_SEQUENCE: [i64; 5] = [-1, 0, 1, 2, 3];

/// Fields of one weather record
pub const WEATHER_FIELDS: [(&str, ElementType); 6] = [
    ("timestamp", ElementType::I64),
    ("wave_h", ElementType::F64),
    ("wave_p", ElementType::F64),
    ("wave_dir", ElementType::F64),
    ("wind_sp", ElementType::F64),
    ("wind_dir", ElementType::F64),
];

fn cast_sequence<T: Element>(cast: impl Fn(i64) -> T) -> Array {
    let mut data = Vec::with_capacity(TYPE_SEQUENCE.len() * T::ELEMENT_TYPE.width());
    for value in TYPE_SEQUENCE {
        cast(value).write_ne(&mut data);
    }
    let shape = vec![TYPE_SEQUENCE.len() as u64];
    Array::new(ArrayDescriptor::new(T::ELEMENT_TYPE, shape), data)
}

/// [`TYPE_SEQUENCE`] converted to `element`
///
/// Unsigned types wrap (-1 becomes the type's maximum) and bool is true for
/// every non-zero value.
pub fn type_array(element: ElementType) -> Array {
    match element {
        ElementType::I8 => cast_sequence(|v| v as i8),
        ElementType::I16 => cast_sequence(|v| v as i16),
        ElementType::I32 => cast_sequence(|v| v as i32),
        ElementType::I64 => cast_sequence(|v| v),
        ElementType::U8 => cast_sequence(|v| v as u8),
        ElementType::U16 => cast_sequence(|v| v as u16),
        ElementType::U32 => cast_sequence(|v| v as u32),
        ElementType::U64 => cast_sequence(|v| v as u64),
        ElementType::F16 => cast_sequence(|v| f16::from_f64(v as f64)),
        ElementType::F32 => cast_sequence(|v| v as f32),
        ElementType::F64 => cast_sequence(|v| v as f64),
        ElementType::Bool => cast_sequence(|v| v != 0),
    }
}

/// One array per element type, named after the type
pub fn type_arrays() -> Vec<(&'static str, Array)> {
    ElementType::ALL
        .iter()
        .map(|&element| (element.name(), type_array(element)))
        .collect()
}

pub fn weather_layout() -> Result<RecordLayout> {
    RecordLayout::packed(WEATHER_FIELDS)
}

/// Seeded weather series, one record every `step_hours`
///
/// Timestamps are seconds since the start of the series. Wave height is in
/// [0, 10), wave period in [0, 0.5), directions in [0, 360) and wind speed in
/// [0, 50).
pub fn weather_records(config: &FixtureConfig) -> Result<Array> {
    let layout = weather_layout()?;
    let steps = config.time_steps();
    let step = config.step_hours.max(1) as u64;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut unit = move || -> f64 { rng.sample(StandardUniform) };

    let mut data = Vec::with_capacity(steps as usize * layout.itemsize());
    for i in 0..steps {
        let timestamp = (i * step * 3600) as i64;
        timestamp.write_ne(&mut data);
        for value in [
            unit() * 10.0,
            unit() / 2.0,
            unit() * 360.0,
            unit() * 50.0,
            unit() * 360.0,
        ] {
            value.write_ne(&mut data);
        }
    }

    Ok(Array::new(ArrayDescriptor::new(layout, vec![steps]), data))
}

/// Split a one-dimensional record array into one array per field
pub fn weather_columns(records: &Array) -> Result<Vec<(String, Array)>> {
    let layout = match records.descriptor.dtype() {
        Dtype::Record(layout) => layout,
        Dtype::Scalar(element) => {
            return Err(Error::TypeMismatch {
                expected: "record".to_string(),
                actual: element.to_string(),
            });
        }
    };
    let count = records.num_elements();

    let columns = layout
        .fields()
        .iter()
        .map(|field| {
            let mut data = Vec::with_capacity(count as usize * field.element_type.width());
            if layout.itemsize() > 0 {
                for record in records.data.chunks_exact(layout.itemsize()) {
                    data.extend_from_slice(&record[field.offset..field.end()]);
                }
            }
            let descriptor = ArrayDescriptor::new(field.element_type, vec![count]);
            (field.name.clone(), Array::new(descriptor, data))
        })
        .collect();
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> FixtureConfig {
        FixtureConfig {
            years: 1,
            step_hours: 24,
            seed: 42,
            ..Default::default()
        }
    }

    #[test]
    fn type_arrays_follow_casting_rules() {
        let arrays = type_arrays();
        assert_eq!(arrays.len(), 12);
        assert_eq!(arrays[0].0, "int8");

        assert_eq!(
            type_array(ElementType::I16).to_values::<i16>().unwrap(),
            vec![-1, 0, 1, 2, 3]
        );
        assert_eq!(
            type_array(ElementType::U8).to_values::<u8>().unwrap(),
            vec![255, 0, 1, 2, 3]
        );
        assert_eq!(
            type_array(ElementType::U64).to_values::<u64>().unwrap()[0],
            u64::MAX
        );
        assert_eq!(
            type_array(ElementType::F16).to_values::<f16>().unwrap(),
            vec![
                f16::from_f32(-1.0),
                f16::ZERO,
                f16::ONE,
                f16::from_f32(2.0),
                f16::from_f32(3.0)
            ]
        );
        assert_eq!(
            type_array(ElementType::Bool).to_values::<bool>().unwrap(),
            vec![true, false, true, true, true]
        );
    }

    #[test]
    fn weather_series_shape() {
        let config = small_config();
        let records = weather_records(&config).unwrap();
        assert_eq!(records.descriptor.shape, vec![365]);
        assert_eq!(records.data.len(), 365 * 48);

        let timestamps = records.field_values::<i64>("timestamp").unwrap();
        assert_eq!(timestamps[0], 0);
        assert_eq!(timestamps[1], 24 * 3600);
        assert_eq!(*timestamps.last().unwrap(), 364 * 24 * 3600);

        for v in records.field_values::<f64>("wave_p").unwrap() {
            assert!((0.0..0.5).contains(&v));
        }
        for v in records.field_values::<f64>("wind_dir").unwrap() {
            assert!((0.0..360.0).contains(&v));
        }
    }

    #[test]
    fn weather_series_is_seeded() {
        let config = small_config();
        assert_eq!(
            weather_records(&config).unwrap(),
            weather_records(&config).unwrap()
        );

        let other = FixtureConfig {
            seed: 43,
            ..small_config()
        };
        assert_ne!(
            weather_records(&config).unwrap().data,
            weather_records(&other).unwrap().data
        );
    }

    #[test]
    fn columns_match_records() {
        let records = weather_records(&small_config()).unwrap();
        let columns = weather_columns(&records).unwrap();

        let names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["timestamp", "wave_h", "wave_p", "wave_dir", "wind_sp", "wind_dir"]
        );
        assert_eq!(
            columns[0].1.to_values::<i64>().unwrap(),
            records.field_values::<i64>("timestamp").unwrap()
        );
        assert_eq!(
            columns[4].1.to_values::<f64>().unwrap(),
            records.field_values::<f64>("wind_sp").unwrap()
        );
    }

    #[test]
    fn columns_need_records() {
        let result = weather_columns(&type_array(ElementType::F64));
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }
}
