use once_cell::sync::Lazy;

use crate::{
    flow::{optional, repeat, Optional, Repeat, Sequence},
    primitive::{expect, expect_acceptable, while_acceptable, WhileSpan},
    span::{range, sample, set, ByteRange, Sample, Set},
};

static DIGITS: Lazy<ByteRange> = Lazy::new(|| range(b'0', b'9'));
static HEX_DIGITS: Lazy<Set> =
    Lazy::new(|| (b'0'..=b'9').chain(b'a'..=b'f').chain(b'A'..=b'F').collect());
static WHITESPACE: Lazy<Set> = Lazy::new(|| set(*b" \t"));
static CRLF: Lazy<Sample> = Lazy::new(|| sample(*b"\r\n"));

/// One or more decimal digits.
pub fn digits() -> WhileSpan<&'static ByteRange> {
    while_acceptable(&*DIGITS)
}

pub fn hex_digits() -> WhileSpan<&'static Set> {
    while_acceptable(&*HEX_DIGITS)
}

/// One or more spaces or tabs.
pub fn whitespace() -> WhileSpan<&'static Set> {
    while_acceptable(&*WHITESPACE)
}

/// Zero or more spaces or tabs.
pub fn blank() -> Optional<'static> {
    optional(whitespace())
}

/// Exactly `n` decimal digits; a longer run of digits is not rejected.
pub fn fixed_digits(n: usize) -> Repeat<'static> {
    repeat(n, expect_acceptable(&*DIGITS))
}

/// The bytes of `word`, in order. Unlike a [`sample`] unit, a partial match
/// is a failure.
pub fn literal(word: &'static str) -> Sequence<'static> {
    word.bytes().fold(Sequence::new(), |seq, b| seq.then(expect(b)))
}

/// One or more `\r\n` pairs.
pub fn line_breaks() -> WhileSpan<&'static Sample> {
    while_acceptable(&*CRLF)
}

#[cfg(test)]
mod tests {
    use crate::{contrib::parsers::*, prelude::*};
    use test_log::test;

    fn eaten(nom: impl Nom, s: &str) -> Option<usize> {
        let mut p = BytePlate::from(s);
        nom.eat(&Context::background(), &mut p).ok().map(|_| p.position())
    }

    #[test]
    fn test_contrib_parsers() {
        assert_eq!(eaten(digits(), "2024-01"), Some(4));
        assert_eq!(eaten(digits(), "-01"), None);
        assert_eq!(eaten(hex_digits(), "00fFz"), Some(4));
        assert_eq!(eaten(whitespace(), " \t x"), Some(3));
        assert_eq!(eaten(whitespace(), "x"), None);
        assert_eq!(eaten(blank(), "x"), Some(0));
        assert_eq!(eaten(fixed_digits(2), "123"), Some(2));
        assert_eq!(eaten(fixed_digits(2), "1x"), None);
        assert_eq!(eaten(line_breaks(), "\r\n\r\n\rx"), Some(4));
        assert_eq!(eaten(line_breaks(), "\n"), None);
        assert_eq!(eaten(literal("AM"), "AM!"), Some(2));
        assert_eq!(eaten(literal("AM"), "AX"), None);
    }
}
