//! Out-of-band state a grammar can set and test without consuming bytes.
//!
//! The state lives outside the grammar tree and is passed in by reference,
//! so independent parses never share it unless the caller wants them to.
//!
//! ```
//! use bynom::prelude::*;
//!
//! const SEEN: u64 = 1;
//! let bits = Bits::default();
//! let once = seq(require_state(SEEN, |v| bits.nothing_set(v)))
//!     .then(expect(b'x'))
//!     .then(change_state(SEEN, |v| bits.set(v)));
//! let rule = Rule::new().then(&once).then(&once);
//! assert!(rule.eat(&Context::background(), &mut BytePlate::from("xx")).is_err());
//! assert!(bits.all_set(SEEN));
//! ```

use std::cell::Cell;
use std::fmt::Debug;

use crate::{
    context::Context,
    error::ParseError,
    logging::Loggable,
    nom::{settle, Nom},
    plate::Plate,
};

/// A 64-bit mask. The mutators return `Result` so they can be passed to
/// [`change_state`] directly.
#[derive(Debug, Default, Clone)]
pub struct Bits(Cell<u64>);

impl Bits {
    pub fn new(v: u64) -> Self {
        Self(Cell::new(v))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }

    pub fn replace(&self, v: u64) -> Result<(), ParseError> {
        self.0.set(v);
        Ok(())
    }

    pub fn set(&self, v: u64) -> Result<(), ParseError> {
        self.0.set(self.0.get() | v);
        Ok(())
    }

    pub fn reset(&self, v: u64) -> Result<(), ParseError> {
        self.0.set(self.0.get() & !v);
        Ok(())
    }

    pub fn all_set(&self, v: u64) -> bool {
        self.0.get() & v == v
    }

    pub fn any_set(&self, v: u64) -> bool {
        self.0.get() & v != 0
    }

    pub fn nothing_set(&self, v: u64) -> bool {
        self.0.get() & v == 0
    }

    pub fn equal(&self, v: u64) -> bool {
        self.0.get() == v
    }
}

type Mutator<'g, T> = Box<dyn Fn(T) -> Result<(), ParseError> + 'g>;
type Test<'g> = Box<dyn Fn(u64) -> bool + 'g>;

/// Passes a value to each mutator in turn. Stops at the first failing
/// mutator; earlier mutations are not undone.
pub struct Signal<'g, T> {
    value: T,
    mutators: Vec<Mutator<'g, T>>,
}

/// Fails with [`ParseError::StateTestFailed`] on the first test that
/// rejects the value.
pub struct RequireState<'g> {
    value: u64,
    tests: Vec<Test<'g>>,
}

pub fn signal<'g, T, F>(value: T, f: F) -> Signal<'g, T>
where
    T: Copy + Debug,
    F: Fn(T) -> Result<(), ParseError> + 'g,
{
    Signal {
        value,
        mutators: vec![Box::new(f)],
    }
}

/// A [`Signal`] carrying a state mask.
pub fn change_state<'g, F>(value: u64, f: F) -> Signal<'g, u64>
where
    F: Fn(u64) -> Result<(), ParseError> + 'g,
{
    signal(value, f)
}

/// A mutator storing a signalled `bool`.
pub fn into_flag(flag: &Cell<bool>) -> impl Fn(bool) -> Result<(), ParseError> + '_ {
    move |v| {
        flag.set(v);
        Ok(())
    }
}

pub fn require_state<'g, F>(value: u64, test: F) -> RequireState<'g>
where
    F: Fn(u64) -> bool + 'g,
{
    RequireState {
        value,
        tests: vec![Box::new(test)],
    }
}

impl<'g, T: Copy + Debug> Signal<'g, T> {
    pub fn and(mut self, f: impl Fn(T) -> Result<(), ParseError> + 'g) -> Self {
        self.mutators.push(Box::new(f));
        self
    }
}

impl<'g> RequireState<'g> {
    pub fn and(mut self, test: impl Fn(u64) -> bool + 'g) -> Self {
        self.tests.push(Box::new(test));
        self
    }
}

impl<'g, T: Copy + Debug> Nom for Signal<'g, T> {
    fn name(&self) -> &'static str {
        "Signal"
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.value);
        let start = plate.position();
        let res = self.mutators.iter().try_for_each(|f| f(self.value));
        settle(plate, self.name(), self.value, start, res)
    }
}

impl<'g> Nom for RequireState<'g> {
    fn name(&self) -> &'static str {
        "RequireState"
    }

    fn eat(&self, _ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.value);
        let start = plate.position();
        let res = match self.tests.iter().all(|test| test(self.value)) {
            true => Ok(()),
            false => Err(ParseError::StateTestFailed { value: self.value }),
        };
        settle(plate, self.name(), self.value, start, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::BytePlate;
    use test_log::test;

    #[test]
    fn test_bits() {
        let bits = Bits::default();
        bits.set(0b0110).unwrap();
        assert!(bits.all_set(0b0100));
        assert!(!bits.all_set(0b0101));
        assert!(bits.any_set(0b0101));
        assert!(bits.nothing_set(0b1001));
        bits.reset(0b0010).unwrap();
        assert!(bits.equal(0b0100));
        bits.replace(7).unwrap();
        assert_eq!(bits.get(), 7);
    }

    #[test]
    fn test_signal_and_require_state() {
        let bits = Bits::default();
        let flag = Cell::new(false);
        let mut p = BytePlate::from("abc");
        let ctx = Context::background();

        change_state(0b11, |v| bits.set(v)).eat(&ctx, &mut p).unwrap();
        signal(true, into_flag(&flag)).eat(&ctx, &mut p).unwrap();
        assert!(flag.get());
        assert_eq!(bits.get(), 0b11);

        require_state(0b01, |v| bits.any_set(v))
            .and(|v| bits.all_set(v))
            .eat(&ctx, &mut p)
            .unwrap();
        let e = require_state(0b100, |v| bits.any_set(v))
            .eat(&ctx, &mut p)
            .unwrap_err();
        assert!(matches!(e.cause(), ParseError::StateTestFailed { value: 0b100 }));
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn test_failing_mutator_stops_the_chain() {
        let bits = Bits::default();
        let mut p = BytePlate::from("");
        let e = change_state(1, |v| bits.set(v))
            .and(|_| Err(ParseError::UnexpectedEndOfInput))
            .and(|v| bits.set(v << 1))
            .eat(&Context::background(), &mut p)
            .unwrap_err();
        assert!(e.is_end_of_input());
        assert_eq!(bits.get(), 1);
    }
}
