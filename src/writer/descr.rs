//! Header text for dtypes, shapes and strings

use crate::types::{ByteOrder, Dtype, ElementType, RecordLayout};
use std::fmt::Write;

/// Type string such as `'<i8'`, without quotes
pub fn type_string(element: ElementType, order: ByteOrder) -> String {
    let order = if element.width() == 1 {
        ByteOrder::NotApplicable
    } else {
        order
    };
    format!("{}{}{}", order.symbol(), element.kind(), element.width())
}

/// Python literal for a dtype: a quoted type string, or a field list with
/// unnamed `|V<n>` entries covering gaps
///
/// A record whose fields are not declared in offset order cannot be written
/// as a list and falls back to the layout dict.
pub fn descr_literal(dtype: &Dtype, order: ByteOrder) -> String {
    match dtype {
        Dtype::Scalar(element) => quote(&type_string(*element, order)),
        Dtype::Record(layout) if layout.is_ascending() => field_list(layout, order),
        Dtype::Record(layout) => layout_dict(layout, order),
    }
}

fn field_list(layout: &RecordLayout, order: ByteOrder) -> String {
    let mut entries = Vec::with_capacity(layout.fields().len());
    let mut offset = 0;
    for f in layout.fields() {
        if f.offset > offset {
            entries.push(padding_entry(f.offset - offset));
        }
        entries.push(format!(
            "({}, {})",
            quote(&f.name),
            quote(&type_string(f.element_type, order))
        ));
        offset = f.end();
    }
    if layout.itemsize() > offset {
        entries.push(padding_entry(layout.itemsize() - offset));
    }
    format!("[{}]", entries.join(", "))
}

fn padding_entry(width: usize) -> String {
    format!("('', '|V{}')", width)
}

fn layout_dict(layout: &RecordLayout, order: ByteOrder) -> String {
    let names: Vec<String> = layout.fields().iter().map(|f| quote(&f.name)).collect();
    let formats: Vec<String> = layout
        .fields()
        .iter()
        .map(|f| quote(&type_string(f.element_type, order)))
        .collect();
    let offsets: Vec<String> = layout
        .fields()
        .iter()
        .map(|f| f.offset.to_string())
        .collect();
    format!(
        "{{'names': [{}], 'formats': [{}], 'offsets': [{}], 'itemsize': {}}}",
        names.join(", "),
        formats.join(", "),
        offsets.join(", "),
        layout.itemsize()
    )
}

/// Python tuple literal: `()`, `(5,)`, `(2, 3)`
pub fn shape_literal(shape: &[u64]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        dims => {
            let dims: Vec<String> = dims.iter().map(u64::to_string).collect();
            format!("({})", dims.join(", "))
        }
    }
}

/// Python `repr` of a string
pub fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}
