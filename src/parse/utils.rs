//! Byte cursor used by the parsers.

use crate::error::ParseDataError;

/// Remaining bytes of an input, consumed from the front
#[derive(Debug, Default, Eq, PartialEq)]
pub(super) struct Cursor<'a> {
    remaining: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(super) fn new(remaining: &'a [u8]) -> Self {
        Self { remaining }
    }

    pub(super) fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    pub(super) fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.remaining.first().copied()
    }

    /// Read exactly `count` bytes
    pub(super) fn read_exact(&mut self, count: usize) -> Result<&'a [u8], ParseDataError> {
        match self.remaining.split_at_checked(count) {
            Some((result, tail)) => {
                self.remaining = tail;
                Ok(result)
            }
            None => Err(ParseDataError::UnexpectedEof),
        }
    }

    /// Read exactly `N` bytes into an array
    pub(super) fn read_chunk<const N: usize>(&mut self) -> Result<[u8; N], ParseDataError> {
        match self.remaining.split_first_chunk::<N>() {
            Some((result, tail)) => {
                self.remaining = tail;
                Ok(*result)
            }
            None => Err(ParseDataError::UnexpectedEof),
        }
    }

    pub(super) fn read_be_u32(&mut self) -> Result<u32, ParseDataError> {
        Ok(u32::from_be_bytes(self.read_chunk()?))
    }

    /// Read bytes and compare them to the provided tag
    pub(super) fn read_tag(&mut self, tag: &[u8]) -> Result<(), ParseDataError> {
        if self.read_exact(tag.len())? == tag {
            Ok(())
        } else {
            Err(ParseDataError::InvalidData)
        }
    }

    /// Read the provided tag if the remaining data starts with it
    pub(super) fn read_optional_tag(&mut self, tag: &[u8]) -> Result<bool, ParseDataError> {
        if self.remaining.starts_with(tag) {
            self.read_exact(tag.len())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read bytes as long as the provided predicate is true
    pub(super) fn read_while<F: Fn(&u8) -> bool>(&mut self, f: F) -> Result<&'a [u8], ParseDataError> {
        self.read_exact(self.remaining.iter().position(|x| !f(x)).unwrap_or(self.remaining.len()))
    }

    /// Read bytes until the provided predicate is true
    pub(super) fn read_until<F: Fn(&u8) -> bool>(&mut self, f: F) -> Result<&'a [u8], ParseDataError> {
        self.read_exact(self.remaining.iter().position(f).unwrap_or(self.remaining.len()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor() -> Result<(), ParseDataError> {
        let mut cursor = Cursor::new(b"TZif\x00\x00\x00\x2aM10.5.0,J365");

        cursor.read_tag(b"TZif")?;
        assert_eq!(cursor.read_be_u32()?, 42);
        assert!(cursor.read_optional_tag(b"M")?);
        assert!(!cursor.read_optional_tag(b"J")?);
        assert_eq!(cursor.read_while(u8::is_ascii_digit)?, b"10");
        assert_eq!(cursor.peek(), Some(b'.'));
        assert_eq!(cursor.read_until(|&x| x == b',')?, b".5.0");
        assert_eq!(cursor.remaining(), b",J365");

        assert_eq!(cursor.read_tag(b";"), Err(ParseDataError::InvalidData));
        assert_eq!(cursor.read_exact(5), Err(ParseDataError::UnexpectedEof));
        assert_eq!(cursor.read_chunk::<8>(), Err(ParseDataError::UnexpectedEof));
        assert_eq!(cursor.read_exact(4)?, b"J365");
        assert!(cursor.is_empty());

        Ok(())
    }
}
