//! Parses a date, a time, or both in either order from the command line.
//!
//! ```sh
//! cargo run --example parse_time -- 31.01.2024 11:35:10 pm
//! RUST_LOG=bynom=trace cargo run --example parse_time -- 01/31/24
//! ```

use std::cell::RefCell;
use std::process::ExitCode;

use bynom::prelude::*;
use bynom::take::RequireLen;
use log::info;

const PART_DATE: u64 = 1 << 0;
const PART_TIME: u64 = 1 << 1;
const PART_AMPM: u64 = 1 << 2;

#[derive(Default)]
struct Parts {
    year: RefCell<String>,
    month: RefCell<String>,
    day: RefCell<String>,
    hour: RefCell<String>,
    minute: RefCell<String>,
    second: RefCell<String>,
    am_pm: RefCell<String>,
}

fn two_digits<'g>() -> RequireLen<'g> {
    require_len(2, digits())
}

fn four_digits<'g>() -> RequireLen<'g> {
    require_len(4, digits())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("Nothing to parse");
        return ExitCode::SUCCESS;
    }
    let arg = args.join(" ");
    println!("Parse '{arg}'");

    let p = Parts::default();
    let bits = Bits::default();

    let iso_date = group(take(into::string(&p.year), four_digits()))
        .then(expect(b'-'))
        .then(take(into::string(&p.month), two_digits()))
        .then(expect(b'-'))
        .then(take(into::string(&p.day), two_digits()));
    let de_date = group(take(into::string(&p.day), two_digits()))
        .then(expect(b'.'))
        .then(take(into::string(&p.month), two_digits()))
        .then(expect(b'.'))
        .then(take(into::string(&p.year), switch(four_digits()).or(two_digits())));
    let us_date = group(take(into::string(&p.month), two_digits()))
        .then(expect(b'/'))
        .then(take(into::string(&p.day), two_digits()))
        .then(expect(b'/'))
        .then(take(into::string(&p.year), switch(four_digits()).or(two_digits())));
    let date_variants = when(require_state(PART_DATE, |v| bits.nothing_set(v)))
        .then(switch(iso_date).or(de_date).or(us_date))
        .then(change_state(PART_DATE, |v| bits.set(v)));

    let time24 = group(take(into::string(&p.hour), two_digits()))
        .then(expect(b':'))
        .then(take(into::string(&p.minute), two_digits()))
        .then(optional(expect(b':')).then(take(into::string(&p.second), two_digits())));
    let time12 = group(&time24).then(optional(while_byte(b' '))).then(
        take(into::string(&p.am_pm), expect_acceptable(set(*b"aApP")))
            .then(expect_acceptable(set(*b"mM")))
            .then(change_state(PART_AMPM, |v| bits.set(v))),
    );
    let time_variants = when(require_state(PART_TIME, |v| bits.nothing_set(v)))
        .then(switch(time12).or(&time24))
        .then(change_state(PART_TIME, |v| bits.set(v)));

    let date_time = Rule::new()
        .named("DateTime")
        .then(switch(&date_variants).or(&time_variants))
        .then(optional(while_byte(b' ')).then(switch(&date_variants).or(&time_variants)));
    info!("grammar:\n{}", date_time.describe());

    if let Err(e) = date_time.eat(&Context::background(), &mut BytePlate::from(arg.as_str())) {
        eprint!("{e}");
        return ExitCode::FAILURE;
    }

    if bits.all_set(PART_DATE) {
        println!("Year   = {}", p.year.borrow());
        println!("Month  = {}", p.month.borrow());
        println!("Day    = {}", p.day.borrow());
    }
    if bits.all_set(PART_TIME) {
        println!("Hour   = {}", p.hour.borrow());
        println!("Minute = {}", p.minute.borrow());
        println!("Second = {}", p.second.borrow());
    }
    if bits.all_set(PART_AMPM) {
        println!("AM/PM  = {}", p.am_pm.borrow());
    }
    ExitCode::SUCCESS
}
