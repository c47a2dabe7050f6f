//! Alternatives, optional parts and guards.
//!
//! `switch` tries each alternative from the same starting point; `optional`
//! and `repeat` put the cursor back when they fail; `when` only commits to
//! its children once the test has matched.

use std::cell::{Cell, RefCell};

use crate::prelude::*;

#[derive(PartialEq, Eq, Debug)]
pub struct Time {
    pub hours: u32,
    pub mins: u32,
}

impl Time {
    pub fn new(hours: u32, mins: u32) -> Self {
        Self { hours, mins }
    }
}

/// eg "11:35", "11:35 AM" or "11:59 PM". Returns the time and the number
/// of bytes it took up.
pub fn parse_clock(s: &str) -> Result<(Time, usize), DiagnosticError> {
    let hours = RefCell::new(0_u32);
    let mins = RefCell::new(0_u32);
    let pm = Cell::new(false);
    let mut plate = BytePlate::from(s);
    Rule::new()
        .named("Clock")
        .then(take(into::parsed(&hours), fixed_digits(2)))
        .then(expect(b':'))
        .then(take(into::parsed(&mins), fixed_digits(2)))
        .then(
            optional(blank()).then(
                switch(literal("AM"))
                    .or(seq(literal("PM")).then(signal(true, into_flag(&pm)))),
            ),
        )
        .eat(&Context::background(), &mut plate)?;

    let hours = *hours.borrow() + if pm.get() { 12 } else { 0 };
    let mins = *mins.borrow();
    Ok((Time::new(hours, mins), plate.position()))
}

#[derive(PartialEq, Eq, Debug)]
pub enum Number {
    Binary(u32),
    Hex(u32),
    Decimal(u32),
}

/// the prefix decides which variant is tried: once `when` has matched
/// "0b" a bad digit fails that branch, and the switch moves on to the next
pub fn parse_number(s: &str) -> Result<Number, DiagnosticError> {
    let found = RefCell::new(Number::Decimal(0));
    let dest = &found;
    let store = move |radix: u32, variant: fn(u32) -> Number| {
        move |w: &[u8]| -> Result<(), ParseError> {
            let s = std::str::from_utf8(w).map_err(ParseError::conversion)?;
            let v = u32::from_str_radix(s, radix).map_err(ParseError::conversion)?;
            *dest.borrow_mut() = variant(v);
            Ok(())
        }
    };
    let binary = take(store(2, Number::Binary), while_acceptable(set(*b"01")));
    let hex = take(store(16, Number::Hex), hex_digits());
    let decimal = take(store(10, Number::Decimal), digits());
    Rule::new()
        .named("Number")
        .then(
            switch(when(literal("0b")).then(binary))
                .or(when(literal("0x")).then(hex))
                .or(decimal),
        )
        .eat(&Context::background(), &mut BytePlate::from(s))?;
    Ok(found.into_inner())
}

/// counts the values in a list of lines, skipping `#` comments
pub fn count_values(s: &str) -> Result<usize, DiagnosticError> {
    let count = Cell::new(0);
    let counter = |_: &[u8]| -> Result<(), ParseError> {
        count.set(count.get() + 1);
        Ok(())
    };
    let line = seq(when_not(expect(b'#')).then(take(&counter, while_not(b'\n'))))
        .then(optional(while_not(b'\n')))
        .then(optional(expect(b'\n')));
    let mut plate = BytePlate::from(s);
    let rule = Rule::new().named("Line").then(&line);
    while !plate.rest().is_empty() {
        rule.eat(&Context::background(), &mut plate)?;
    }
    Ok(count.get())
}
