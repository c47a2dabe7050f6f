//! Single-step noms: literal bytes, relevance-tested units and quantified
//! reads.
//!
//! None of these restore the cursor on failure except the windowed
//! quantifier, which never stops inside a unit. Backtracking is the job of
//! the enclosing flow combinator or rule.

use log::debug;

use crate::{
    context::Context,
    error::{Expected, ParseError},
    logging::Loggable,
    nom::{settle, Nom},
    plate::Plate,
    span::{Relevance, Remain},
    util::Escaped,
    LOG_TARGET,
};

#[derive(Debug, Clone, Copy)]
pub struct Expect(pub u8);

#[derive(Debug, Clone, Copy)]
pub struct ExpectNot(pub u8);

/// Reads one unit accepted (or, negated, rejected) by a relevance predicate.
#[derive(Debug, Clone)]
pub struct ExpectSpan<R> {
    span: R,
    negated: bool,
}

/// One or more bytes equal (or, negated, not equal) to a literal.
#[derive(Debug, Clone, Copy)]
pub struct WhileByte {
    byte: u8,
    negated: bool,
}

/// One or more whole units of a relevance predicate.
#[derive(Debug, Clone)]
pub struct WhileSpan<R> {
    span: R,
    negated: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

/// Logs the cursor position; never fails and never moves the cursor.
#[derive(Debug, Clone)]
pub struct TracePosition {
    msg: &'static str,
}

pub fn expect(b: u8) -> Expect {
    Expect(b)
}

pub fn expect_not(b: u8) -> ExpectNot {
    ExpectNot(b)
}

pub fn expect_acceptable<R: Relevance>(span: R) -> ExpectSpan<R> {
    ExpectSpan { span, negated: false }
}

pub fn expect_ineligible<R: Relevance>(span: R) -> ExpectSpan<R> {
    ExpectSpan { span, negated: true }
}

pub fn while_byte(byte: u8) -> WhileByte {
    WhileByte { byte, negated: false }
}

pub fn while_not(byte: u8) -> WhileByte {
    WhileByte { byte, negated: true }
}

pub fn while_acceptable<R: Relevance>(span: R) -> WhileSpan<R> {
    WhileSpan { span, negated: false }
}

pub fn while_ineligible<R: Relevance>(span: R) -> WhileSpan<R> {
    WhileSpan { span, negated: true }
}

pub fn any() -> Any {
    Any
}

pub fn trace_position(msg: &'static str) -> TracePosition {
    TracePosition { msg }
}

fn test_span<R: Relevance>(span: &R, negated: bool, index: usize, b: u8) -> (bool, Remain) {
    if negated {
        span.is_ineligible(index, b)
    } else {
        span.is_acceptable(index, b)
    }
}

impl Nom for Expect {
    fn name(&self) -> &'static str {
        "Expect"
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), Escaped(self.0));
        let start = plate.position();
        let res = match plate.next_byte() {
            Ok(b) if b == self.0 => Ok(()),
            Ok(b) => Err(ParseError::ExpectationFailed {
                expected: Expected::Byte(self.0),
                have: b,
                negated: false,
            }),
            Err(e) => Err(e.required()),
        };
        settle(plate, self.name(), Escaped(self.0), start, res)
    }
}

impl Nom for ExpectNot {
    fn name(&self) -> &'static str {
        "ExpectNot"
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), Escaped(self.0));
        let start = plate.position();
        let res = match plate.next_byte() {
            Ok(b) if b != self.0 => Ok(()),
            Ok(b) => Err(ParseError::ExpectationFailed {
                expected: Expected::Byte(self.0),
                have: b,
                negated: true,
            }),
            Err(e) => Err(e.required()),
        };
        settle(plate, self.name(), Escaped(self.0), start, res)
    }
}

impl<R: Relevance> Nom for ExpectSpan<R> {
    fn name(&self) -> &'static str {
        if self.negated {
            "ExpectIneligible"
        } else {
            "ExpectAcceptable"
        }
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        let expected = self.span.expected();
        plate.log_inputs(self.name(), &expected);
        let start = plate.position();
        let mut index = 0;
        let res = loop {
            let b = match plate.peek_byte() {
                Ok(b) => b,
                Err(ParseError::EndOfInput) if index > 0 => break Ok(()),
                Err(e) => break Err(e.required()),
            };
            let (matched, remain) = test_span(&self.span, self.negated, index, b);
            if !matched {
                if index > 0 {
                    break Ok(());
                }
                break Err(ParseError::ExpectationFailed {
                    expected: expected.clone(),
                    have: b,
                    negated: self.negated,
                });
            }
            if let Err(e) = plate.next_byte() {
                break Err(e);
            }
            if remain.is_complete() {
                break Ok(());
            }
            index += 1;
        };
        settle(plate, self.name(), &expected, start, res)
    }
}

impl Nom for WhileByte {
    fn name(&self) -> &'static str {
        if self.negated {
            "WhileNot"
        } else {
            "While"
        }
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), Escaped(self.byte));
        let start = plate.position();
        let mut count = 0_usize;
        let res = loop {
            if let Err(e) = ctx.check() {
                break Err(e);
            }
            let b = match plate.peek_byte() {
                Ok(b) => b,
                Err(ParseError::EndOfInput) if count > 0 => break Ok(()),
                Err(e) => break Err(e.required()),
            };
            if (b == self.byte) == self.negated {
                if count > 0 {
                    break Ok(());
                }
                break Err(ParseError::ExpectationFailed {
                    expected: Expected::Byte(self.byte),
                    have: b,
                    negated: self.negated,
                });
            }
            if let Err(e) = plate.next_byte() {
                break Err(e);
            }
            count += 1;
        };
        settle(plate, self.name(), Escaped(self.byte), start, res)
    }
}

impl<R: Relevance> Nom for WhileSpan<R> {
    fn name(&self) -> &'static str {
        if self.negated {
            "WhileIneligible"
        } else {
            "WhileAcceptable"
        }
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        let expected = self.span.expected();
        plate.log_inputs(self.name(), &expected);
        let start = plate.position();
        // end of the last whole unit
        let mut safe = start;
        let mut index = 0_usize;
        let mut iterations = 0_usize;
        let res = loop {
            if let Err(e) = ctx.check() {
                break Err(e);
            }
            let b = match plate.peek_byte() {
                Ok(b) => b,
                Err(ParseError::EndOfInput) if iterations > 0 => break Ok(()),
                Err(e) => break Err(e.required()),
            };
            let (matched, remain) = test_span(&self.span, self.negated, index, b);
            if !matched {
                if iterations > 0 {
                    break Ok(());
                }
                break Err(ParseError::ExpectationFailed {
                    expected: expected.clone(),
                    have: b,
                    negated: self.negated,
                });
            }
            if let Err(e) = plate.next_byte() {
                break Err(e);
            }
            if remain.is_complete() {
                iterations += 1;
                index = 0;
                safe = plate.position();
            } else {
                index += 1;
            }
        };
        // never leave the cursor inside a partial unit
        let res = res.and(plate.seek_position(safe));
        settle(plate, self.name(), (&expected, iterations), start, res)
    }
}

impl Nom for Any {
    fn name(&self) -> &'static str {
        "Any"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), "");
        let start = plate.position();
        let res = loop {
            if let Err(e) = ctx.check() {
                break Err(e);
            }
            match plate.next_byte() {
                Ok(_) => continue,
                Err(ParseError::EndOfInput) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        settle(plate, self.name(), "", start, res)
    }
}

impl Nom for TracePosition {
    fn name(&self) -> &'static str {
        "TracePosition"
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        debug!(target: LOG_TARGET, "[{pos:>5}] {msg}", pos = plate.position(), msg = self.msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        plate::BytePlate,
        span::{range, sample, set, single},
    };
    use test_log::test;

    fn eat(nom: impl Nom, p: &mut BytePlate) -> Result<(), ParseError> {
        nom.eat(&Context::background(), p)
    }

    #[test]
    fn test_expect() {
        let mut p = BytePlate::from("{x");
        eat(expect(b'{'), &mut p).unwrap();
        let e = eat(expect(b'}'), &mut p).unwrap_err();
        assert!(matches!(
            e.cause(),
            ParseError::ExpectationFailed { expected: Expected::Byte(b'}'), have: b'x', negated: false }
        ));
        assert_eq!(e.breadcrumbs()[0].name, "Expect");
        assert_eq!(e.breadcrumbs()[0].start_pos, Some(1));
        // no restore: the mismatching byte was consumed
        assert_eq!(p.position(), 2);
        let e = eat(expect(b'}'), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_expect_not() {
        let mut p = BytePlate::from("ab");
        eat(expect_not(b'x'), &mut p).unwrap();
        let e = eat(expect_not(b'b'), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::ExpectationFailed { negated: true, .. }));
        assert_eq!(p.position(), 2);
    }

    #[test]
    fn test_expect_acceptable_reads_one_unit() {
        let mut p = BytePlate::from("aPm");
        eat(expect_acceptable(set(b"aApP".to_vec())), &mut p).unwrap();
        assert_eq!(p.position(), 1);
        eat(expect_acceptable(set(b"aApP".to_vec())), &mut p).unwrap();
        assert_eq!(p.position(), 2);
        let e = eat(expect_acceptable(range(b'0', b'9')), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::ExpectationFailed { have: b'm', .. }));
        // peeked, not consumed
        assert_eq!(p.position(), 2);

        let mut p = BytePlate::from("\r\n\r\n");
        eat(expect_acceptable(sample(*b"\r\n")), &mut p).unwrap();
        assert_eq!(p.position(), 2);

        let mut p = BytePlate::from("");
        let e = eat(expect_acceptable(single(b'a')), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_expect_acceptable_partial_unit() {
        let mut p = BytePlate::from("aX");
        eat(expect_acceptable(sample(*b"ab")), &mut p).unwrap();
        assert_eq!(p.position(), 1);

        let mut p = BytePlate::from("a");
        eat(expect_acceptable(sample(*b"ab")), &mut p).unwrap();
        assert_eq!(p.position(), 1);

        let mut p = BytePlate::from("x");
        eat(expect_ineligible(range(b'0', b'9')), &mut p).unwrap();
        assert_eq!(p.position(), 1);
    }

    #[test]
    fn test_while_is_at_least_one() {
        let mut p = BytePlate::from("   x");
        eat(while_byte(b' '), &mut p).unwrap();
        assert_eq!(p.position(), 3);
        let e = eat(while_byte(b' '), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::ExpectationFailed { have: b'x', .. }));
        assert_eq!(p.position(), 3);

        eat(while_not(b' '), &mut p).unwrap();
        assert_eq!(p.position(), 4);
        let e = eat(while_not(b' '), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::UnexpectedEndOfInput));

        let mut p = BytePlate::from("}");
        let e = eat(while_not(b'}'), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::ExpectationFailed { negated: true, .. }));
    }

    #[test]
    fn test_while_acceptable_whole_units() {
        let mut p = BytePlate::from("ababX");
        eat(while_acceptable(sample(*b"ab")), &mut p).unwrap();
        assert_eq!(p.position(), 4);
        assert_eq!(p.rest(), b"X");

        let mut p = BytePlate::from("123abc");
        eat(while_acceptable(range(b'0', b'9')), &mut p).unwrap();
        assert_eq!(p.position(), 3);
        eat(while_ineligible(range(b'0', b'9')), &mut p).unwrap();
        assert_eq!(p.position(), 6);
    }

    #[test]
    fn test_while_acceptable_never_stops_mid_unit() {
        for (input, pos) in [
            ("ab", Some(2)),
            ("aba", Some(2)),
            ("abaX", Some(2)),
            ("ababa", Some(4)),
            ("a", None),
            ("aX", None),
            ("X", None),
            ("", None),
        ] {
            let mut p = BytePlate::from(input);
            let res = eat(while_acceptable(sample(*b"ab")), &mut p);
            match pos {
                Some(pos) => {
                    assert!(res.is_ok(), "{input}");
                    assert_eq!(p.position(), pos, "{input}");
                }
                None => {
                    assert!(res.is_err(), "{input}");
                    assert_eq!(p.position(), 0, "{input}");
                }
            }
        }

        let mut p = BytePlate::from("a");
        let e = eat(while_acceptable(sample(*b"ab")), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::UnexpectedEndOfInput));
        let mut p = BytePlate::from("aX");
        let e = eat(while_acceptable(sample(*b"ab")), &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::ExpectationFailed { have: b'X', .. }));
    }

    #[test]
    fn test_any() {
        let mut p = BytePlate::from("rest of it");
        p.seek_position(5).unwrap();
        eat(any(), &mut p).unwrap();
        assert_eq!(p.position(), 10);
        eat(any(), &mut p).unwrap();

        eat(trace_position("at end"), &mut p).unwrap();
        assert_eq!(p.position(), 10);
    }

    #[test]
    fn test_cancelled_quantifier() {
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();
        let mut p = BytePlate::from("aaaa");
        let e = while_byte(b'a').eat(&ctx, &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::Cancelled));
        let e = any().eat(&ctx, &mut p).unwrap_err();
        assert!(matches!(e.cause(), ParseError::Cancelled));
    }
}
