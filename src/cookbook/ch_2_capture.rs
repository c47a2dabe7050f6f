//! Capturing what a grammar consumed.
//!
//! [`take`](crate::take::take) hands the bytes its children consumed to a
//! [`Sink`](crate::into::Sink). The adapters in [`into`](crate::into) cover
//! the usual destinations; any closure over `&[u8]` works too.

use std::cell::RefCell;

use crate::prelude::*;

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// eg "#1e90ff"
pub fn parse_hex_color(s: &str) -> Result<Color, DiagnosticError> {
    let channels = RefCell::new(Vec::<u8>::with_capacity(3));
    let channel = |w: &[u8]| -> Result<(), ParseError> {
        let s = std::str::from_utf8(w).map_err(ParseError::conversion)?;
        let v = u8::from_str_radix(s, 16).map_err(ParseError::conversion)?;
        channels.borrow_mut().push(v);
        Ok(())
    };
    {
        let hex_pair = take(&channel, repeat(2, expect_acceptable(set(*b"0123456789abcdefABCDEF"))));
        Rule::new()
            .named("HexColor")
            .then(expect(b'#'))
            .then(repeat(3, &hex_pair))
            .eat(&Context::background(), &mut BytePlate::from(s))?;
    }
    let channels = channels.into_inner();
    Ok(Color {
        r: channels[0],
        g: channels[1],
        b: channels[2],
    })
}

/// eg "1, 2,3" - a comma separated list of numbers
pub fn parse_list(s: &str) -> Result<Vec<u32>, DiagnosticError> {
    let items = RefCell::new(vec![]);
    {
        let item = take(into::append(&items), digits());
        // a bite backtracks, so a trailing "," is left unconsumed
        let more = bite(blank()).then(expect(b',')).then(blank()).then(&item);
        Rule::new()
            .then(&item)
            .then(nom_fn("More", |ctx, p| loop {
                match more.eat(ctx, p) {
                    Ok(()) => continue,
                    Err(e) if e.is_recoverable() => return Ok(()),
                    Err(e) => return Err(e),
                }
            }))
            .eat(&Context::background(), &mut BytePlate::from(s))?;
    }
    Ok(items.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_hex_color() -> Result<(), DiagnosticError> {
        assert_eq!(parse_hex_color("#1e90FF")?, Color { r: 0x1e, g: 0x90, b: 0xff });
        assert!(parse_hex_color("#1e90F").is_err());
        assert!(parse_hex_color("1e90FF").is_err());
        Ok(())
    }

    #[test]
    fn test_parse_list() -> Result<(), DiagnosticError> {
        assert_eq!(parse_list("1, 2,3")?, [1, 2, 3]);
        assert_eq!(parse_list("42")?, [42]);
        assert!(parse_list("x").is_err());
        assert_eq!(parse_list("7, x")?, [7]);

        // a sink error surfaces as the take's failure
        let e = parse_list("99999999999").unwrap_err();
        assert!(matches!(e.cause, ParseError::Conversion(_)));
        Ok(())
    }

    #[test]
    fn test_exact_length() {
        let year = RefCell::new(0_u16);
        let rule = Rule::new().then(take(into::parsed(&year), require_len(4, digits())));
        rule.eat(&Context::background(), &mut BytePlate::from("2024"))
            .unwrap();
        assert_eq!(*year.borrow(), 2024);

        let e = rule
            .eat(&Context::background(), &mut BytePlate::from("20245"))
            .unwrap_err();
        assert!(matches!(
            e.cause,
            ParseError::RequirementNotMet { expected: 4, have: 5, .. }
        ));
    }
}
