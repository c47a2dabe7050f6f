//! State bits: conditions that span alternatives.
//!
//! A date and a time may come in either order, but each at most once. The
//! grammar records what it has seen in a [`Bits`] mask and guards each
//! alternative with a test on it.

use std::cell::RefCell;

use crate::prelude::*;

const DATE: u64 = 1 << 0;
const TIME: u64 = 1 << 1;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stamp {
    pub date: Option<(u32, u32, u32)>,
    pub time: Option<(u32, u32)>,
}

/// eg "2024-01-31", "23:59" or "23:59 2024-01-31"
pub fn parse_stamp(s: &str) -> Result<Stamp, DiagnosticError> {
    let parts = Bits::default();
    let [year, month, day, hour, min] = [(); 5].map(|_| RefCell::new(0_u32));

    let bits = &parts;
    let unseen = move |part| require_state(part, move |v| bits.nothing_set(v));
    let seen = move |part| change_state(part, move |v| bits.set(v));
    let date = when(unseen(DATE))
        .then(take(into::parsed(&year), fixed_digits(4)))
        .then(expect(b'-'))
        .then(take(into::parsed(&month), fixed_digits(2)))
        .then(expect(b'-'))
        .then(take(into::parsed(&day), fixed_digits(2)))
        .then(seen(DATE));
    let time = when(unseen(TIME))
        .then(take(into::parsed(&hour), fixed_digits(2)))
        .then(expect(b':'))
        .then(take(into::parsed(&min), fixed_digits(2)))
        .then(seen(TIME));
    let part = switch(&date).or(&time);

    Rule::new()
        .named("Stamp")
        .then(change_state(DATE | TIME, |v| parts.reset(v)))
        .then(&part)
        .then(optional(whitespace()).then(&part))
        .eat(&Context::background(), &mut BytePlate::from(s))?;

    let mut stamp = Stamp::default();
    if parts.all_set(DATE) {
        stamp.date = Some((*year.borrow(), *month.borrow(), *day.borrow()));
    }
    if parts.all_set(TIME) {
        stamp.time = Some((*hour.borrow(), *min.borrow()));
    }
    Ok(stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_stamp() -> Result<(), DiagnosticError> {
        let stamp = parse_stamp("2024-01-31")?;
        assert_eq!(stamp.date, Some((2024, 1, 31)));
        assert_eq!(stamp.time, None);

        let stamp = parse_stamp("23:59 2024-01-31")?;
        assert_eq!(stamp.date, Some((2024, 1, 31)));
        assert_eq!(stamp.time, Some((23, 59)));

        // a second time is not taken
        let stamp = parse_stamp("10:30 11:00")?;
        assert_eq!(stamp.time, Some((10, 30)));
        assert_eq!(stamp.date, None);
        Ok(())
    }

    #[test]
    fn test_parse_stamp_failure() {
        let e = parse_stamp("24-01-31").unwrap_err();
        assert_eq!(e.breadcrumbs.last().map(|c| c.name), Some("Stamp"));
        assert_eq!(e.start_pos, 0);
    }
}
