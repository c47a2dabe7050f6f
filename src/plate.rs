use std::borrow::Cow;

use crate::error::ParseError;

/// An addressable, seekable byte source that grammars read from.
///
/// Implementations own (or borrow) a sequence of fixed length `len()` and a
/// cursor in `0..=len()`.
pub trait Plate {
    /// Reads the byte at the cursor and moves past it, or fails with
    /// [`ParseError::EndOfInput`].
    fn next_byte(&mut self) -> Result<u8, ParseError>;

    /// As `next_byte` but leaves the cursor where it is.
    fn peek_byte(&self) -> Result<u8, ParseError>;

    /// The half-open window `start..end`. Fails with
    /// [`ParseError::OutOfBounds`] unless `start <= end <= len()`.
    fn byte_slice(&self, start: usize, end: usize) -> Result<&[u8], ParseError>;

    fn position(&self) -> usize;

    /// Moves the cursor anywhere in `0..=len()`, forwards or backwards.
    fn seek_position(&mut self, pos: usize) -> Result<(), ParseError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A plate over an in-memory buffer, either borrowed or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytePlate<'a> {
    buf: Cow<'a, [u8]>,
    pos: usize,
}

impl<'a> BytePlate<'a> {
    pub fn new(buf: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// The bytes not yet read.
    pub fn rest(&self) -> &[u8] {
        &self.buf[self.pos..]
    }
}

impl<'a> From<&'a [u8]> for BytePlate<'a> {
    #[inline]
    fn from(s: &'a [u8]) -> Self {
        Self::new(s)
    }
}

impl<'a> From<&'a str> for BytePlate<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for BytePlate<'static> {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Self::new(v)
    }
}

impl From<String> for BytePlate<'static> {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl<'a> Plate for BytePlate<'a> {
    #[inline]
    fn next_byte(&mut self) -> Result<u8, ParseError> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Ok(b)
    }

    #[inline]
    fn peek_byte(&self) -> Result<u8, ParseError> {
        self.buf.get(self.pos).copied().ok_or(ParseError::EndOfInput)
    }

    fn byte_slice(&self, start: usize, end: usize) -> Result<&[u8], ParseError> {
        if start > end || end > self.buf.len() {
            return Err(ParseError::OutOfBounds {
                start,
                end,
                len: self.buf.len(),
            });
        }
        Ok(&self.buf[start..end])
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn seek_position(&mut self, pos: usize) -> Result<(), ParseError> {
        if pos > self.buf.len() {
            return Err(ParseError::OutOfBounds {
                start: pos,
                end: pos,
                len: self.buf.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.buf.len()
    }
}
