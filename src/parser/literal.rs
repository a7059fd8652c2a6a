//! Python literal parsing for header text
//!
//! Headers are Python dict literals. Only the subset that appears in array
//! headers is understood: strings, integers, booleans, `None`, tuples, lists
//! and dicts.

use crate::error::{Error, Result};

/// Nesting deeper than this is rejected
const MAX_DEPTH: usize = 32;

/// A parsed Python literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
    None,
    Tuple(Vec<Literal>),
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Short name of the literal's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Bool(_) => "boolean",
            Literal::None => "None",
            Literal::Tuple(_) => "tuple",
            Literal::List(_) => "list",
            Literal::Dict(_) => "dict",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Items of a list or tuple
    pub fn as_sequence(&self) -> Option<&[Literal]> {
        match self {
            Literal::Tuple(items) | Literal::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a string key in a dict
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Parse a complete literal; only whitespace may follow it
pub fn parse_literal(text: &str) -> Result<Literal> {
    let (literal, cursor) = value(TextCursor::new(text), 0)?;
    let cursor = cursor.skip_whitespace();
    if !cursor.eos() {
        return Err(cursor.error("unexpected text after literal"));
    }
    Ok(literal)
}

#[derive(Debug, Clone, Copy)]
struct TextCursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> TextCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn eos(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Step over the next character
    fn bump(self) -> Self {
        let width = self.peek().map_or(0, char::len_utf8);
        Self {
            text: self.text,
            position: self.position + width,
        }
    }

    fn skip_whitespace(mut self) -> Self {
        while self.peek().is_some_and(char::is_whitespace) {
            self = self.bump();
        }
        self
    }

    fn expect(self, expected: char) -> Result<Self> {
        let cursor = self.skip_whitespace();
        if cursor.peek() == Some(expected) {
            Ok(cursor.bump())
        } else {
            Err(cursor.error(&format!("expected {:?}", expected)))
        }
    }

    fn error(&self, message: &str) -> Error {
        let found = match self.peek() {
            Some(c) => format!("{:?}", c),
            None => "end of header".to_string(),
        };
        Error::format(format!(
            "invalid header text at offset {}: {}, found {}",
            self.position, message, found
        ))
    }
}

fn value(cursor: TextCursor<'_>, depth: usize) -> Result<(Literal, TextCursor<'_>)> {
    if depth > MAX_DEPTH {
        return Err(cursor.error("literal nested too deeply"));
    }
    let cursor = cursor.skip_whitespace();
    match cursor.peek() {
        Some('{') => dict(cursor.bump(), depth + 1),
        Some('[') => {
            let (items, _, cursor) = sequence(cursor.bump(), ']', depth + 1)?;
            Ok((Literal::List(items), cursor))
        }
        Some('(') => {
            let (mut items, trailing_comma, cursor) = sequence(cursor.bump(), ')', depth + 1)?;
            if items.len() == 1 && !trailing_comma {
                // `(x)` is just a parenthesized `x`
                Ok((items.remove(0), cursor))
            } else {
                Ok((Literal::Tuple(items), cursor))
            }
        }
        Some('\'' | '"') => string(cursor),
        Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => integer(cursor),
        Some(c) if c.is_alphabetic() || c == '_' => identifier(cursor),
        _ => Err(cursor.error("expected a literal")),
    }
}

/// Comma-separated items up to `close`; also reports whether the last item
/// was followed by a comma
fn sequence(
    cursor: TextCursor<'_>,
    close: char,
    depth: usize,
) -> Result<(Vec<Literal>, bool, TextCursor<'_>)> {
    let mut items = Vec::new();
    let mut trailing_comma = false;
    let mut cursor = cursor.skip_whitespace();

    loop {
        if cursor.peek() == Some(close) {
            return Ok((items, trailing_comma, cursor.bump()));
        }
        let (item, next) = value(cursor, depth)?;
        items.push(item);
        cursor = next.skip_whitespace();

        match cursor.peek() {
            Some(',') => {
                trailing_comma = true;
                cursor = cursor.bump().skip_whitespace();
            }
            Some(c) if c == close => {
                trailing_comma = false;
            }
            _ => return Err(cursor.error(&format!("expected ',' or {:?}", close))),
        }
    }
}

fn dict(cursor: TextCursor<'_>, depth: usize) -> Result<(Literal, TextCursor<'_>)> {
    let mut entries = Vec::new();
    let mut cursor = cursor.skip_whitespace();

    loop {
        if cursor.peek() == Some('}') {
            return Ok((Literal::Dict(entries), cursor.bump()));
        }
        let (key, next) = value(cursor, depth)?;
        let next = next.expect(':')?;
        let (val, next) = value(next, depth)?;
        entries.push((key, val));
        cursor = next.skip_whitespace();

        match cursor.peek() {
            Some(',') => cursor = cursor.bump().skip_whitespace(),
            Some('}') => {}
            _ => return Err(cursor.error("expected ',' or '}'")),
        }
    }
}

fn string(cursor: TextCursor<'_>) -> Result<(Literal, TextCursor<'_>)> {
    let quote = match cursor.peek() {
        Some(q) => q,
        None => return Err(cursor.error("expected a string")),
    };
    let mut cursor = cursor.bump();
    let mut out = String::new();

    loop {
        match cursor.peek() {
            None => return Err(cursor.error("unterminated string")),
            Some(c) if c == quote => return Ok((Literal::Str(out), cursor.bump())),
            Some('\\') => {
                cursor = cursor.bump();
                let escaped = cursor
                    .peek()
                    .ok_or_else(|| cursor.error("unterminated escape"))?;
                cursor = cursor.bump();
                match escaped {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '0' => out.push('\0'),
                    '\\' | '\'' | '"' => out.push(escaped),
                    'x' => {
                        let (c, next) = hex_escape(cursor, 2)?;
                        out.push(c);
                        cursor = next;
                    }
                    'u' => {
                        let (c, next) = hex_escape(cursor, 4)?;
                        out.push(c);
                        cursor = next;
                    }
                    _ => return Err(cursor.error("unsupported escape sequence")),
                }
            }
            Some(c) => {
                out.push(c);
                cursor = cursor.bump();
            }
        }
    }
}

fn hex_escape(cursor: TextCursor<'_>, digits: usize) -> Result<(char, TextCursor<'_>)> {
    let hex = cursor
        .text
        .get(cursor.position..cursor.position + digits)
        .ok_or_else(|| cursor.error("truncated escape"))?;
    let code = u32::from_str_radix(hex, 16).map_err(|_| cursor.error("invalid hex escape"))?;
    let c = char::from_u32(code).ok_or_else(|| cursor.error("invalid character escape"))?;
    Ok((
        c,
        TextCursor {
            text: cursor.text,
            position: cursor.position + digits,
        },
    ))
}

fn integer(cursor: TextCursor<'_>) -> Result<(Literal, TextCursor<'_>)> {
    let start = cursor.position;
    let mut end = cursor;
    if matches!(end.peek(), Some('-' | '+')) {
        end = end.bump();
    }
    while end.peek().is_some_and(|c| c.is_ascii_digit()) {
        end = end.bump();
    }

    let digits = &cursor.text[start..end.position];
    let number: i64 = digits
        .parse()
        .map_err(|_| cursor.error("invalid integer"))?;

    // Python 2 long suffix, written by old NumPy versions
    if matches!(end.peek(), Some('L' | 'l')) {
        end = end.bump();
    }
    Ok((Literal::Int(number), end))
}

fn identifier(cursor: TextCursor<'_>) -> Result<(Literal, TextCursor<'_>)> {
    let start = cursor.position;
    let mut end = cursor;
    while end.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
        end = end.bump();
    }

    let literal = match &cursor.text[start..end.position] {
        "True" => Literal::Bool(true),
        "False" => Literal::Bool(false),
        "None" => Literal::None,
        _ => return Err(cursor.error("unknown identifier")),
    };
    Ok((literal, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Literal {
        Literal::Str(v.to_string())
    }

    #[test]
    fn parse_numpy_header() {
        let lit =
            parse_literal("{'descr': '<i8', 'fortran_order': False, 'shape': (5,), }    \n")
                .unwrap();
        assert_eq!(lit.get("descr"), Some(&s("<i8")));
        assert_eq!(lit.get("fortran_order"), Some(&Literal::Bool(false)));
        assert_eq!(
            lit.get("shape"),
            Some(&Literal::Tuple(vec![Literal::Int(5)]))
        );
        assert_eq!(lit.get("missing"), None);
    }

    #[test]
    fn tuples() {
        assert_eq!(parse_literal("()").unwrap(), Literal::Tuple(vec![]));
        assert_eq!(
            parse_literal("(2, 3)").unwrap(),
            Literal::Tuple(vec![Literal::Int(2), Literal::Int(3)])
        );
        assert_eq!(
            parse_literal("( 4 , )").unwrap(),
            Literal::Tuple(vec![Literal::Int(4)])
        );
        assert_eq!(parse_literal("(7)").unwrap(), Literal::Int(7));
    }

    #[test]
    fn field_list() {
        let lit = parse_literal("[('a', '<i4'), (\"b\", '|b1')]").unwrap();
        let items = lit.as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Literal::Tuple(vec![s("b"), s("|b1")]));
    }

    #[test]
    fn strings_and_escapes() {
        assert_eq!(parse_literal(r#"'it\'s'"#).unwrap(), s("it's"));
        assert_eq!(parse_literal(r#""it's""#).unwrap(), s("it's"));
        assert_eq!(parse_literal(r"'a\tb\\c'").unwrap(), s("a\tb\\c"));
        assert_eq!(parse_literal(r"'\x41é'").unwrap(), s("Aé"));
        assert_eq!(parse_literal("'température'").unwrap(), s("température"));
    }

    #[test]
    fn integers() {
        assert_eq!(parse_literal("-12").unwrap(), Literal::Int(-12));
        assert_eq!(parse_literal("10L").unwrap(), Literal::Int(10));
        assert!(parse_literal("99999999999999999999").is_err());
    }

    #[test]
    fn identifiers() {
        assert_eq!(parse_literal("True").unwrap(), Literal::Bool(true));
        assert_eq!(parse_literal("None").unwrap(), Literal::None);
        assert!(parse_literal("true").is_err());
    }

    #[test]
    fn malformed() {
        for text in [
            "",
            "{",
            "{'a' 1}",
            "{'a': 1,,}",
            "[1 2]",
            "'open",
            "(1, 2",
            "{'a': 1} x",
            "{'a': @}",
        ] {
            assert!(
                matches!(parse_literal(text), Err(Error::Format(_))),
                "{:?} should fail",
                text
            );
        }
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}{}", "[".repeat(100), "]".repeat(100));
        assert!(parse_literal(&deep).is_err());
        let shallow = format!("{}{}", "[".repeat(10), "]".repeat(10));
        assert!(parse_literal(&shallow).is_ok());
    }
}
