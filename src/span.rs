//! Relevance predicates used by the quantified noms.
//!
//! A predicate is asked about one byte at a time together with the byte's
//! index inside the current unit. Set-like predicates treat every byte as a
//! unit of its own; a [`Sample`] is a fixed-length unit that has to be seen
//! whole before it counts.

use std::ops::RangeInclusive;

use crate::error::Expected;

/// Bytes still owed to finish the current unit after the byte just tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remain {
    /// Single-byte granularity; test index 0 again on the next byte.
    Unbounded,
    /// `Bytes(0)` means the byte just tested completed the unit.
    Bytes(usize),
}

impl Remain {
    /// True when the unit is finished after the tested byte.
    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Unbounded | Self::Bytes(0))
    }
}

pub trait Relevance {
    fn is_acceptable(&self, index: usize, b: u8) -> (bool, Remain);
    fn is_ineligible(&self, index: usize, b: u8) -> (bool, Remain);
    fn expected(&self) -> Expected;
}

impl<R: Relevance + ?Sized> Relevance for &R {
    #[inline]
    fn is_acceptable(&self, index: usize, b: u8) -> (bool, Remain) {
        (**self).is_acceptable(index, b)
    }

    #[inline]
    fn is_ineligible(&self, index: usize, b: u8) -> (bool, Remain) {
        (**self).is_ineligible(index, b)
    }

    fn expected(&self) -> Expected {
        (**self).expected()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Single(pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange(RangeInclusive<u8>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    variants: Vec<u8>,
}

/// Matches the n-th byte against the n-th byte of the sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    sample: Vec<u8>,
}

pub fn single(b: u8) -> Single {
    Single(b)
}

/// All bytes from `a` to `b`, both included.
pub fn range(a: u8, b: u8) -> ByteRange {
    ByteRange(a..=b)
}

pub fn set(variants: impl Into<Vec<u8>>) -> Set {
    Set {
        variants: variants.into(),
    }
}

pub fn sample(sample: impl Into<Vec<u8>>) -> Sample {
    Sample {
        sample: sample.into(),
    }
}

impl Set {
    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.variants.contains(&b)
    }
}

impl FromIterator<u8> for Set {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        set(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Relevance for Single {
    fn is_acceptable(&self, _: usize, b: u8) -> (bool, Remain) {
        (self.0 == b, Remain::Unbounded)
    }

    fn is_ineligible(&self, _: usize, b: u8) -> (bool, Remain) {
        (self.0 != b, Remain::Unbounded)
    }

    fn expected(&self) -> Expected {
        Expected::Byte(self.0)
    }
}

impl Relevance for ByteRange {
    fn is_acceptable(&self, _: usize, b: u8) -> (bool, Remain) {
        (self.0.contains(&b), Remain::Unbounded)
    }

    fn is_ineligible(&self, _: usize, b: u8) -> (bool, Remain) {
        (!self.0.contains(&b), Remain::Unbounded)
    }

    fn expected(&self) -> Expected {
        Expected::Range(*self.0.start(), *self.0.end())
    }
}

impl Relevance for Set {
    fn is_acceptable(&self, _: usize, b: u8) -> (bool, Remain) {
        (self.contains(b), Remain::Unbounded)
    }

    fn is_ineligible(&self, _: usize, b: u8) -> (bool, Remain) {
        (!self.contains(b), Remain::Unbounded)
    }

    fn expected(&self) -> Expected {
        Expected::OneOf(self.variants.clone())
    }
}

impl Relevance for Sample {
    fn is_acceptable(&self, index: usize, b: u8) -> (bool, Remain) {
        match self.sample.get(index) {
            Some(&s) => (s == b, Remain::Bytes(self.sample.len() - 1 - index)),
            None => (false, Remain::Unbounded),
        }
    }

    fn is_ineligible(&self, index: usize, b: u8) -> (bool, Remain) {
        match self.sample.get(index) {
            Some(&s) => (s != b, Remain::Bytes(self.sample.len() - 1 - index)),
            None => (false, Remain::Unbounded),
        }
    }

    fn expected(&self) -> Expected {
        Expected::Sample(self.sample.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_set_like_predicates_are_unbounded() {
        assert_eq!(single(b'a').is_acceptable(0, b'a'), (true, Remain::Unbounded));
        assert_eq!(single(b'a').is_ineligible(0, b'a'), (false, Remain::Unbounded));
        assert_eq!(range(b'0', b'9').is_acceptable(0, b'9'), (true, Remain::Unbounded));
        assert_eq!(range(b'0', b'9').is_acceptable(7, b'x'), (false, Remain::Unbounded));
        let ws: Set = b" \t".iter().copied().collect();
        assert_eq!(ws.is_acceptable(0, b'\t'), (true, Remain::Unbounded));
        assert_eq!(ws.is_ineligible(0, b'x'), (true, Remain::Unbounded));
    }

    #[test]
    fn test_sample_counts_down_the_unit() {
        let crlf = sample(*b"\r\n");
        assert_eq!(crlf.is_acceptable(0, b'\r'), (true, Remain::Bytes(1)));
        assert_eq!(crlf.is_acceptable(1, b'\n'), (true, Remain::Bytes(0)));
        assert_eq!(crlf.is_acceptable(1, b'x'), (false, Remain::Bytes(0)));
        assert_eq!(crlf.is_acceptable(2, b'\n'), (false, Remain::Unbounded));
        assert_eq!(crlf.is_ineligible(0, b'x'), (true, Remain::Bytes(1)));
        assert!(Remain::Bytes(0).is_complete());
        assert!(!Remain::Bytes(1).is_complete());

        let empty = sample(Vec::new());
        assert_eq!(empty.is_acceptable(0, b'a'), (false, Remain::Unbounded));
    }
}
