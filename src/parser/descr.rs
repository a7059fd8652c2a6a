//! Dtype parsing from header literals

use super::literal::Literal;
use crate::error::{Error, Result};
use crate::types::{ByteOrder, Dtype, ElementType, FieldDescriptor, RecordLayout};

/// Parse a type string such as `<i8`, `|b1` or `>f2`
pub fn parse_type_string(s: &str) -> Result<(ElementType, ByteOrder)> {
    let mut chars = s.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::format("empty type string"))?;

    let (order, rest) = match ByteOrder::from_symbol(first) {
        Some(order) => (order, chars.as_str()),
        None => (ByteOrder::native(), s),
    };

    let mut rest_chars = rest.chars();
    let kind = rest_chars
        .next()
        .ok_or_else(|| Error::format(format!("type string {:?} has no kind", s)))?;
    let width_text = rest_chars.as_str();

    if !matches!(kind, 'i' | 'u' | 'f' | 'b') {
        return Err(Error::unsupported(format!("type code {:?}", s)));
    }
    let width: usize = width_text
        .parse()
        .map_err(|_| Error::unsupported(format!("type code {:?}", s)))?;
    let element = ElementType::from_kind(kind, width)
        .ok_or_else(|| Error::unsupported(format!("type code {:?}", s)))?;

    let order = if element.width() == 1 {
        ByteOrder::NotApplicable
    } else {
        order
    };
    Ok((element, order))
}

/// Parse the `descr` value of a header into a dtype and its byte order
pub fn parse_descr(descr: &Literal) -> Result<(Dtype, ByteOrder)> {
    match descr {
        Literal::Str(s) => {
            let (element, order) = parse_type_string(s)?;
            Ok((Dtype::Scalar(element), order))
        }
        Literal::List(items) => parse_field_list(items),
        Literal::Dict(_) => parse_layout_dict(descr),
        other => Err(Error::format(format!(
            "descr must be a string, list or dict, found {}",
            other.kind()
        ))),
    }
}

/// `[('name', '<i8'), ('', '|V4'), ...]`, fields back to back with unnamed
/// void entries standing in for gaps
fn parse_field_list(items: &[Literal]) -> Result<(Dtype, ByteOrder)> {
    let mut fields = Vec::with_capacity(items.len());
    let mut orders = Vec::with_capacity(items.len());
    let mut offset = 0;

    for (i, item) in items.iter().enumerate() {
        let parts = match item {
            Literal::Tuple(parts) => parts,
            other => {
                return Err(Error::format(format!(
                    "descr field {} must be a tuple, found {}",
                    i,
                    other.kind()
                )));
            }
        };
        match parts.len() {
            2 => {}
            3 => return Err(Error::unsupported("subarray fields")),
            n => {
                return Err(Error::format(format!(
                    "descr field {} has {} entries, expected 2",
                    i, n
                )));
            }
        }

        if let Some(width) = padding_width(&parts[0], &parts[1]) {
            offset += width;
            continue;
        }

        let name = field_name(&parts[0], fields.len())?;
        let (element, order) = field_format(&parts[1])?;
        fields.push(FieldDescriptor::new(name, element, offset));
        orders.push(order);
        offset += element.width();
    }

    let layout = RecordLayout::with_layout(fields, offset)?;
    Ok((Dtype::Record(layout), combine_orders(&orders)?))
}

/// `{'names': [...], 'formats': [...], 'offsets': [...], 'itemsize': N}`
fn parse_layout_dict(dict: &Literal) -> Result<(Dtype, ByteOrder)> {
    let names = sequence_entry(dict, "names")?
        .ok_or_else(|| Error::format("descr dict has no 'names'"))?;
    let formats = sequence_entry(dict, "formats")?
        .ok_or_else(|| Error::format("descr dict has no 'formats'"))?;
    if names.len() != formats.len() {
        return Err(Error::format(format!(
            "descr dict has {} names but {} formats",
            names.len(),
            formats.len()
        )));
    }
    let has_titles = match dict.get("titles") {
        None | Some(Literal::None) => false,
        Some(titles) => titles
            .as_sequence()
            .is_none_or(|t| t.iter().any(|t| !matches!(t, Literal::None))),
    };
    if has_titles {
        return Err(Error::unsupported("field titles"));
    }

    let offsets = match sequence_entry(dict, "offsets")? {
        Some(offsets) if offsets.len() != names.len() => {
            return Err(Error::format(format!(
                "descr dict has {} names but {} offsets",
                names.len(),
                offsets.len()
            )));
        }
        Some(offsets) => Some(
            offsets
                .iter()
                .map(|o| non_negative(o, "offset"))
                .collect::<Result<Vec<usize>>>()?,
        ),
        None => None,
    };

    let mut fields = Vec::with_capacity(names.len());
    let mut orders = Vec::with_capacity(names.len());
    let mut packed_offset = 0;
    for (i, (name, format)) in names.iter().zip(formats).enumerate() {
        let name = field_name(name, i)?;
        let (element, order) = field_format(format)?;
        let offset = offsets.as_ref().map_or(packed_offset, |o| o[i]);
        fields.push(FieldDescriptor::new(name, element, offset));
        orders.push(order);
        packed_offset = offset + element.width();
    }

    let itemsize = match dict.get("itemsize") {
        Some(size) => non_negative(size, "itemsize")?,
        None => fields.iter().map(FieldDescriptor::end).max().unwrap_or(0),
    };

    let layout = RecordLayout::with_layout(fields, itemsize)?;
    Ok((Dtype::Record(layout), combine_orders(&orders)?))
}

/// Width of an unnamed void entry such as `('', '|V4')`
fn padding_width(name: &Literal, format: &Literal) -> Option<usize> {
    let (Literal::Str(name), Literal::Str(format)) = (name, format) else {
        return None;
    };
    if !name.is_empty() {
        return None;
    }
    let format = format.trim_start_matches(['|', '<', '>', '=']);
    format.strip_prefix('V')?.parse().ok()
}

fn sequence_entry<'a>(dict: &'a Literal, key: &str) -> Result<Option<&'a [Literal]>> {
    match dict.get(key) {
        None => Ok(None),
        Some(value) => value.as_sequence().map(Some).ok_or_else(|| {
            Error::format(format!(
                "descr dict entry {:?} must be a list, found {}",
                key,
                value.kind()
            ))
        }),
    }
}

fn non_negative(value: &Literal, what: &str) -> Result<usize> {
    value
        .as_int()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| Error::format(format!("{} must be a non-negative integer", what)))
}

/// Field names; an empty name becomes `f<index>`
fn field_name(name: &Literal, index: usize) -> Result<String> {
    match name {
        Literal::Str(s) if s.is_empty() => Ok(format!("f{}", index)),
        Literal::Str(s) => Ok(s.clone()),
        Literal::Tuple(_) => Err(Error::unsupported("field titles")),
        other => Err(Error::format(format!(
            "field name must be a string, found {}",
            other.kind()
        ))),
    }
}

fn field_format(format: &Literal) -> Result<(ElementType, ByteOrder)> {
    match format {
        Literal::Str(s) => parse_type_string(s),
        Literal::List(_) | Literal::Dict(_) => Err(Error::unsupported("nested record fields")),
        other => Err(Error::format(format!(
            "field format must be a string, found {}",
            other.kind()
        ))),
    }
}

/// One byte order for the whole record; single-byte fields do not count
fn combine_orders(orders: &[ByteOrder]) -> Result<ByteOrder> {
    let mut combined = ByteOrder::NotApplicable;
    for &order in orders {
        if order == ByteOrder::NotApplicable {
            continue;
        }
        if combined == ByteOrder::NotApplicable {
            combined = order;
        } else if combined != order {
            return Err(Error::unsupported("record fields with mixed byte orders"));
        }
    }
    Ok(combined)
}
