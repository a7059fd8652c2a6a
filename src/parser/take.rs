//! Zero-copy byte cursor for binary parsing

use crate::error::{Error, Result};

/// Position in a byte buffer
///
/// Cursors are cheap copies; every read returns the value together with the
/// advanced cursor.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Unread bytes
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    pub fn eos(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Take exactly `count` bytes as a zero-copy slice
    pub fn take(self, count: usize) -> Result<(&'a [u8], Self)> {
        let available = self.data.len() - self.position;
        if count > available {
            return Err(Error::format(format!(
                "unexpected end of input at offset {}: needed {} bytes, {} left",
                self.position, count, available
            )));
        }
        let slice = &self.data[self.position..self.position + count];
        Ok((
            slice,
            Self {
                data: self.data,
                position: self.position + count,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_zero() {
        let data = b"hello";
        let cursor = ByteCursor::new(data);
        let (slice, cursor) = cursor.take(0).unwrap();
        assert_eq!(slice, b"");
        assert_eq!(cursor.remaining(), b"hello");
    }

    #[test]
    fn test_take_some() {
        let data = b"hello world";
        let (slice, cursor) = ByteCursor::new(data).take(5).unwrap();
        assert_eq!(slice, b"hello");
        assert_eq!(cursor.remaining(), b" world");
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_take_all() {
        let data = b"hello";
        let (slice, cursor) = ByteCursor::new(data).take(5).unwrap();
        assert_eq!(slice, b"hello");
        assert!(cursor.eos());
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn test_take_too_many() {
        let data = b"hi";
        let result = ByteCursor::new(data).take(10);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_take_chained() {
        let data = b"helloworld";
        let (slice1, cursor) = ByteCursor::new(data).take(5).unwrap();
        let (slice2, _) = cursor.take(5).unwrap();
        assert_eq!(slice1, b"hello");
        assert_eq!(slice2, b"world");
    }

    #[test]
    fn test_take_is_zero_copy() {
        let data = b"hello";
        let (slice, _) = ByteCursor::new(data).take(5).unwrap();
        assert!(std::ptr::eq(slice.as_ptr(), data.as_ptr()));
    }
}
