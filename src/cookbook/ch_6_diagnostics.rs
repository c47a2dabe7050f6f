//! Reading a failure.
//!
//! A [`DiagnosticError`] says what went wrong (`cause`), over which bytes
//! (`start_pos..end_pos` and the context window) and where in the grammar
//! (the breadcrumbs, innermost first). Its `Display` is the
//! [`TextFormatter`]; a [`HexFormatter`] suits binary input.
//!
//! ```text
//! Error:
//!   unexpected end of input
//! Range:
//!   start=0, end=12
//! Context:
//!   key =
//!   ..[2 bytes]..
//!   aluex
//! Breadcrumbs:
//!   0: Expect, start=12, end=12
//!   1: Statement[4], start=0, end=12
//! ```

use crate::prelude::*;

pub fn statement<'g>() -> Rule<'g> {
    Rule::new()
        .named("Statement")
        .then(while_acceptable(range(b'a', b'z')))
        .then(blank())
        .then(expect(b'='))
        .then(while_not(b';'))
        .then(expect(b';'))
}

/// renders the failure of `rule` over `input`, or `None` if it parsed
pub fn explain(rule: &Rule, input: &[u8], formatter: &dyn Formatter) -> Option<String> {
    let e = rule
        .eat(&Context::background(), &mut BytePlate::from(input))
        .err()?;
    let mut s = String::new();
    formatter.format(&mut s, &e).ok()?;
    Some(s)
}
