//! Composition operators.
//!
//! Every combinator notes the cursor position before running its children.
//! `Sequence` and `When` leave the cursor where a failing child left it;
//! `Switch`, `Optional` and `Repeat` put it back where they found it.

use log::warn;

use crate::{
    context::Context,
    diagnostics::Breadcrumb,
    error::{ParseError, Recoverable},
    logging::Loggable,
    nom::{describe_tree, run_all, unwind, BoxedNom, Nom},
    plate::Plate,
    LOG_TARGET,
};

/// Seeks back to a position seen earlier in the same attempt.
pub(crate) fn rewind(plate: &mut dyn Plate, pos: usize) {
    if let Err(e) = plate.seek_position(pos) {
        warn!(target: LOG_TARGET, "cannot rewind to {pos}: {e}");
    }
}

/// Runs children in order, stopping at the first failure without
/// backtracking.
#[derive(Default)]
pub struct Sequence<'g> {
    noms: Vec<BoxedNom<'g>>,
}

/// Tries each alternative from the same start; the first success wins.
#[derive(Default)]
pub struct Switch<'g> {
    noms: Vec<BoxedNom<'g>>,
}

/// Runs the children only if the test succeeds. `noms[0]` is the test.
pub struct When<'g> {
    noms: Vec<BoxedNom<'g>>,
}

/// Skips the children if the test succeeds, runs them if it fails.
/// `noms[0]` is the test.
pub struct WhenNot<'g> {
    noms: Vec<BoxedNom<'g>>,
}

/// Runs the children; a failure is swallowed and the cursor restored.
#[derive(Default)]
pub struct Optional<'g> {
    noms: Vec<BoxedNom<'g>>,
}

/// Runs the children exactly `times` times, all or nothing.
pub struct Repeat<'g> {
    times: usize,
    noms: Vec<BoxedNom<'g>>,
}

pub fn seq<'g>(nom: impl Nom + 'g) -> Sequence<'g> {
    Sequence::default().then(nom)
}

/// Alias of [`seq`] for grouping noms inside other combinators.
pub fn group<'g>(nom: impl Nom + 'g) -> Sequence<'g> {
    seq(nom)
}

pub fn switch<'g>(nom: impl Nom + 'g) -> Switch<'g> {
    Switch::default().or(nom)
}

pub fn when<'g>(test: impl Nom + 'g) -> When<'g> {
    When {
        noms: vec![Box::new(test)],
    }
}

pub fn when_not<'g>(test: impl Nom + 'g) -> WhenNot<'g> {
    WhenNot {
        noms: vec![Box::new(test)],
    }
}

pub fn optional<'g>(nom: impl Nom + 'g) -> Optional<'g> {
    Optional::default().then(nom)
}

pub fn repeat<'g>(times: usize, nom: impl Nom + 'g) -> Repeat<'g> {
    Repeat {
        times,
        noms: vec![Box::new(nom)],
    }
}

impl<'g> Sequence<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> Switch<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> When<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> WhenNot<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> Optional<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> Repeat<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> Nom for Sequence<'g> {
    fn name(&self) -> &'static str {
        "Sequence"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len());
        let start = plate.position();
        match run_all(&self.noms, ctx, plate) {
            Ok(()) => Ok(()),
            Err((i, e)) => {
                let crumb = Breadcrumb::new(self.name()).at(i).starting_at(start);
                Err(unwind(e, crumb, plate))
            }
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for Switch<'g> {
    fn name(&self) -> &'static str {
        "Switch"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len());
        let start = plate.position();
        let mut last = None;
        for (i, nom) in self.noms.iter().enumerate() {
            if i > 0 {
                rewind(plate, start);
            }
            let res = ctx.check().and_then(|_| nom.eat(ctx, plate));
            match res {
                Ok(()) => {
                    plate.log_success(self.name(), i);
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => last = Some((i, e)),
                Err(e) => {
                    last = Some((i, e));
                    break;
                }
            }
        }
        match last {
            None => Ok(()),
            Some((i, e)) => {
                let crumb = Breadcrumb::new(self.name()).at(i).starting_at(start);
                let err = unwind(e, crumb, plate);
                rewind(plate, start);
                Err(err)
            }
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for When<'g> {
    fn name(&self) -> &'static str {
        "When"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len() - 1);
        let start = plate.position();
        let crumb = Breadcrumb::new(self.name()).starting_at(start);
        let (test, noms) = match self.noms.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        if let Err(e) = ctx.check().and_then(|_| test.eat(ctx, plate)) {
            let err = unwind(e, crumb.at(0), plate);
            rewind(plate, start);
            return Err(err);
        }
        match run_all(noms, ctx, plate) {
            Ok(()) => Ok(()),
            Err((i, e)) => Err(unwind(e, crumb.at(i + 1), plate)),
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for WhenNot<'g> {
    fn name(&self) -> &'static str {
        "WhenNot"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len() - 1);
        let start = plate.position();
        let crumb = Breadcrumb::new(self.name()).starting_at(start);
        let (test, noms) = match self.noms.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        match ctx.check().and_then(|_| test.eat(ctx, plate)) {
            Ok(()) => {
                rewind(plate, start);
                plate.log_success(self.name(), "skipped");
                return Ok(());
            }
            Err(e) if !e.is_recoverable() => {
                let err = unwind(e, crumb.at(0), plate);
                rewind(plate, start);
                return Err(err);
            }
            Err(_) => rewind(plate, start),
        }
        match run_all(noms, ctx, plate) {
            Ok(()) => Ok(()),
            Err((i, e)) => Err(unwind(e, crumb.at(i + 1), plate)),
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for Optional<'g> {
    fn name(&self) -> &'static str {
        "Optional"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len());
        let start = plate.position();
        match run_all(&self.noms, ctx, plate) {
            Ok(()) => Ok(()),
            Err((i, e)) if e.is_recoverable() => {
                plate.log_failure(self.name(), i, &e);
                rewind(plate, start);
                Ok(())
            }
            Err((i, e)) => {
                let crumb = Breadcrumb::new(self.name()).at(i).starting_at(start);
                let err = unwind(e, crumb, plate);
                rewind(plate, start);
                Err(err)
            }
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for Repeat<'g> {
    fn name(&self) -> &'static str {
        "Repeat"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.times);
        let start = plate.position();
        for rep in 0..self.times {
            if let Err((_, e)) = run_all(&self.noms, ctx, plate) {
                let crumb = Breadcrumb::new(self.name()).at(rep).starting_at(start);
                let err = unwind(e, crumb, plate);
                rewind(plate, start);
                return Err(err);
            }
        }
        Ok(())
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(&format!("Repeat({})", self.times), &self.noms, indent)
    }
}
