//! A first rule: `{name} = value` or `[name] = value`.
//!
//! Noms hold references to their destinations, so the grammar is built
//! after the variables it fills and can be eaten repeatedly.

use std::cell::{Cell, RefCell};

use crate::prelude::*;

#[derive(Debug, PartialEq, Eq)]
pub enum Bracket {
    Square,
    Curly,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Assignment {
    pub bracket: Bracket,
    pub name: String,
    pub value: String,
}

pub fn parse_assignment(s: &str) -> Result<Assignment, DiagnosticError> {
    let name = RefCell::new(String::new());
    let value = RefCell::new(String::new());
    let square = Cell::new(false);

    {
        let bracketed = |open, close| {
            when(expect(open))
                .then(take(into::string(&name), while_not(close)))
                .then(expect(close))
        };
        let rule = Rule::new()
            .named("Assignment")
            .then(signal(false, into_flag(&square)))
            .then(blank())
            .then(
                switch(bracketed(b'[', b']').then(signal(true, into_flag(&square))))
                    .or(bracketed(b'{', b'}')),
            )
            .then(blank())
            .then(expect(b'='))
            .then(blank())
            .then(take(into::string(&value), any()));
        rule.eat(&Context::background(), &mut BytePlate::from(s))?;
    }
    Ok(Assignment {
        bracket: if square.get() {
            Bracket::Square
        } else {
            Bracket::Curly
        },
        name: name.into_inner(),
        value: value.into_inner(),
    })
}
