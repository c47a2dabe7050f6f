//! Transaction boundaries.
//!
//! A [`Rule`] is the entry point of a grammar: it runs its noms in order,
//! moves the cursor all or nothing and turns a failure into a
//! [`DiagnosticError`]. A [`Bite`] gives the same all-or-nothing cursor
//! movement inside a grammar, but keeps the raw error.

use log::debug;

use crate::{
    context::Context,
    diagnostics::{Breadcrumb, ContextWindow, DiagnosticError},
    error::ParseError,
    flow::rewind,
    logging::Loggable,
    nom::{describe_tree, run_all, unwind, BoxedNom, Eater, Nom},
    plate::Plate,
    LABEL, LOG_TARGET,
};

pub const DEFAULT_CONTEXT_LEN: usize = 100;

/// How many bytes of a failed attempt a [`DiagnosticError`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextLen {
    /// [`DEFAULT_CONTEXT_LEN`] bytes.
    #[default]
    Default,
    Bounded(usize),
    /// The whole span, however long.
    Unbounded,
}

impl ContextLen {
    /// Zero selects the default, a negative length copies the whole span.
    pub fn from_len(len: isize) -> Self {
        match len {
            0 => Self::Default,
            n if n < 0 => Self::Unbounded,
            n => Self::Bounded(n.unsigned_abs()),
        }
    }

    fn chunk(self) -> Option<usize> {
        match self {
            Self::Default => Some(DEFAULT_CONTEXT_LEN),
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOptions {
    pub context_len: ContextLen,
    /// Breadcrumbs are always collected; only the context window is optional.
    pub capture_context: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            context_len: ContextLen::Default,
            capture_context: true,
        }
    }
}

pub struct Rule<'g> {
    name: &'static str,
    noms: Vec<BoxedNom<'g>>,
    options: RuleOptions,
}

impl<'g> Default for Rule<'g> {
    fn default() -> Self {
        Self {
            name: "Rule",
            noms: vec![],
            options: RuleOptions::default(),
        }
    }
}

impl<'g> Rule<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the rule in breadcrumbs and trace output.
    pub fn named(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }

    pub fn with_options(self, options: RuleOptions) -> Self {
        Self { options, ..self }
    }

    pub fn with_context_len(mut self, len: isize) -> Self {
        self.options.context_len = ContextLen::from_len(len);
        self
    }

    pub fn without_context(mut self) -> Self {
        self.options.capture_context = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn describe(&self) -> String {
        describe_tree(self.name, &self.noms, "")
    }

    fn attempt(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), DiagnosticError> {
        plate.log_inputs(self.name, self.noms.len());
        let start = plate.position();
        let (i, e) = match run_all(&self.noms, ctx, plate) {
            Ok(()) => {
                plate.log_success(self.name, start..plate.position());
                return Ok(());
            }
            Err(failure) => failure,
        };
        let err = unwind(e, Breadcrumb::new(self.name).at(i).starting_at(start), plate);
        let err_pos = err.end_pos().unwrap_or_else(|| plate.position());
        let context = if self.options.capture_context {
            Some(ContextWindow::reconstruct(
                plate,
                start,
                err_pos,
                self.options.context_len.chunk(),
            ))
        } else {
            None
        };
        rewind(plate, start);
        debug!(target: LOG_TARGET, "{} failed at {err_pos}: {err}", self.name);
        Err(DiagnosticError::new(err, start, err_pos, context))
    }
}

impl<'g> Eater for Rule<'g> {
    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), DiagnosticError> {
        let outer = LABEL.with(|l| l.replace(self.name));
        let res = self.attempt(ctx, plate);
        LABEL.with(|l| l.set(outer));
        res
    }
}

/// Runs its children in sequence; on failure the cursor goes back to where
/// it started.
#[derive(Default)]
pub struct Bite<'g> {
    noms: Vec<BoxedNom<'g>>,
}

pub fn bite<'g>(nom: impl Nom + 'g) -> Bite<'g> {
    Bite::default().then(nom)
}

impl<'g> Bite<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> Nom for Bite<'g> {
    fn name(&self) -> &'static str {
        "Bite"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len());
        let start = plate.position();
        match run_all(&self.noms, ctx, plate) {
            Ok(()) => Ok(()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        flow::seq,
        nom::nom_fn,
        plate::BytePlate,
        primitive::{expect, while_acceptable, while_not},
        span::range,
    };
    use test_log::test;

    fn braces<'g>() -> Rule<'g> {
        Rule::new()
            .then(expect(b'{'))
            .then(while_not(b'}'))
            .then(expect(b'}'))
    }

    #[test]
    fn test_rule_is_all_or_nothing() {
        let mut p = BytePlate::from("{abc}");
        braces().eat(&Context::background(), &mut p).unwrap();
        assert_eq!(p.position(), 5);

        let mut p = BytePlate::from("{abc");
        let e = braces().eat(&Context::background(), &mut p).unwrap_err();
        assert!(matches!(e.cause, ParseError::UnexpectedEndOfInput));
        assert_eq!(p.position(), 0);
        assert_eq!((e.start_pos, e.end_pos), (0, 4));
        assert_eq!(e.context_window(), b"{abc");
        let names: Vec<_> = e.breadcrumbs.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Expect", "Rule"]);
        assert_eq!(e.breadcrumbs[1].index, Some(2));
        assert_eq!(e.breadcrumbs[0].start_pos, Some(4));
        assert_eq!(e.breadcrumbs[0].end_pos, Some(4));
    }

    #[test]
    fn test_rule_starts_mid_plate() {
        let mut p = BytePlate::from("xx{ab");
        p.seek_position(2).unwrap();
        let e = braces().named("Braces").eat(&Context::background(), &mut p).unwrap_err();
        assert_eq!(p.position(), 2);
        assert_eq!(e.breadcrumbs[1].to_string(), "Braces[2], start=2, end=5");
    }

    #[test]
    fn test_context_len() {
        let rule = |len| {
            Rule::new()
                .then(while_acceptable(range(b'0', b'9')))
                .then(expect(b';'))
                .with_context_len(len)
        };
        let fail = |r: Rule<'_>| {
            let mut p = BytePlate::from("0123456789");
            r.eat(&Context::background(), &mut p).unwrap_err()
        };
        assert_eq!(fail(rule(4)).context_window(), b"01..[6 bytes]..89");
        assert_eq!(fail(rule(0)).context_window(), b"0123456789");
        assert_eq!(fail(rule(-1)).context_window(), b"0123456789");
        assert_eq!(rule(-7).options().context_len, ContextLen::Unbounded);
        assert_eq!(rule(0).options().context_len, ContextLen::Default);

        let e = fail(rule(4).without_context());
        assert!(e.context.is_none());
        assert_eq!(e.breadcrumbs.len(), 2);
    }

    #[test]
    fn test_label_is_restored() {
        let seen = std::cell::Cell::new("");
        let inner = nom_fn("Peek", |_, _| {
            seen.set(LABEL.with(|l| l.get()));
            Ok(())
        });
        LABEL.with(|l| l.set("outer"));
        Rule::new()
            .named("Inner")
            .then(&inner)
            .eat(&Context::background(), &mut BytePlate::from(""))
            .unwrap();
        assert_eq!(seen.get(), "Inner");
        assert_eq!(LABEL.with(|l| l.get()), "outer");
    }

    #[test]
    fn test_bite_backtracks_inside_a_sequence() {
        let grammar = seq(expect(b'a')).then(bite(expect(b'b')).then(expect(b'c')));
        let mut p = BytePlate::from("abd");
        let e = grammar.eat(&Context::background(), &mut p).unwrap_err();
        assert_eq!(p.position(), 1);
        let names: Vec<_> = e.breadcrumbs().iter().map(|c| c.name).collect();
        assert_eq!(names, ["Expect", "Bite", "Sequence"]);
    }

    #[test]
    fn test_cancelled_rule() {
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();
        let mut p = BytePlate::from("{abc}");
        let e = braces().eat(&ctx, &mut p).unwrap_err();
        assert!(matches!(e.cause, ParseError::Cancelled));
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn test_describe() {
        assert_eq!(braces().describe(), "Rule\n└──Expect\n└──WhileNot\n└──Expect");
    }
}
