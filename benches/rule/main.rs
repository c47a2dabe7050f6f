mod rule_bynom;
mod rule_nom;

use std::cell::RefCell;

use bynom::prelude::*;
use criterion::{black_box, criterion_group, Criterion};
use log::trace;
use rule_bynom::assignment;
use rule_nom::nom_parser;

const INPUT: &str = "  {NameHere} = some longer VALUE with spaces";

pub fn bench_nom(c: &mut Criterion) {
    c.bench_function("rule_nom", |b| b.iter(|| nom_parser(black_box(INPUT))));
}

pub fn bench_bynom(c: &mut Criterion) {
    let name = RefCell::new(String::new());
    let value = RefCell::new(String::new());
    let rule = assignment(&name, &value);
    c.bench_function("rule_bynom", |b| {
        b.iter(|| rule.eat(&Context::background(), &mut BytePlate::from(black_box(INPUT))))
    });
}

pub fn bench_bynom_failure(c: &mut Criterion) {
    let name = RefCell::new(String::new());
    let value = RefCell::new(String::new());
    let rule = assignment(&name, &value);
    let input = INPUT.replace('}', ")");
    c.bench_function("rule_bynom_failure", |b| {
        b.iter(|| rule.eat(&Context::background(), &mut BytePlate::from(black_box(input.as_str()))))
    });
}

criterion_group!(benches, bench_nom, bench_bynom, bench_bynom_failure);
// criterion_main!(benches);

fn main() {
    env_logger::init();
    trace!(target: "bynom", "Logging enabled");
    benches();
    Criterion::default().configure_from_args().final_summary();
}
