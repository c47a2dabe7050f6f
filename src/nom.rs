use std::fmt::Debug;

use crate::{
    context::Context,
    diagnostics::{Breadcrumb, DiagnosticError},
    error::ParseError,
    logging::Loggable,
    plate::Plate,
};

/// A single parsing operation over a [`Plate`].
///
/// Noms are stateless: running one only moves the plate cursor and touches
/// destinations it was built with (sinks, state bits).
pub trait Nom {
    /// Used for breadcrumbs and trace output.
    fn name(&self) -> &'static str;

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError>;

    /// Renders the grammar below this nom as an indented tree.
    fn describe(&self, indent: &str) -> String {
        format!("{indent}{}", self.name())
    }
}

/// Parses the next piece of a plate, all or nothing, reporting failures
/// as [`DiagnosticError`]s.
pub trait Eater {
    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), DiagnosticError>;
}

pub type BoxedNom<'g> = Box<dyn Nom + 'g>;

impl<N: Nom + ?Sized> Nom for &N {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        (**self).eat(ctx, plate)
    }

    fn describe(&self, indent: &str) -> String {
        (**self).describe(indent)
    }
}

impl<N: Nom + ?Sized> Nom for Box<N> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        (**self).eat(ctx, plate)
    }

    fn describe(&self, indent: &str) -> String {
        (**self).describe(indent)
    }
}

/// A named nom from a closure.
pub struct NomFn<F> {
    name: &'static str,
    f: F,
}

pub fn nom_fn<F>(name: &'static str, f: F) -> NomFn<F>
where
    F: Fn(&Context, &mut dyn Plate) -> Result<(), ParseError>,
{
    NomFn { name, f }
}

impl<F> Nom for NomFn<F>
where
    F: Fn(&Context, &mut dyn Plate) -> Result<(), ParseError>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        (self.f)(ctx, plate)
    }
}

/// Runs each nom in turn, stopping at the first failure and reporting
/// which child failed. The cursor is left where the failing child left it.
pub(crate) fn run_all(
    noms: &[BoxedNom<'_>],
    ctx: &Context,
    plate: &mut dyn Plate,
) -> Result<(), (usize, ParseError)> {
    for (i, nom) in noms.iter().enumerate() {
        ctx.check().map_err(|e| (i, e))?;
        nom.eat(ctx, plate).map_err(|e| (i, e))?;
    }
    Ok(())
}

/// Propagates a child's failure one level up: the child's crumb learns where
/// the failure was observed, then `crumb` is pushed on top. A position
/// recorded further in wins over the cursor, which a backtracking child may
/// already have moved back. A crumb never ends before it starts.
pub(crate) fn unwind(err: ParseError, crumb: Breadcrumb, plate: &dyn Plate) -> ParseError {
    plate.log_failure(crumb.name, crumb.index, &err);
    let err = err.extend_breadcrumb(None, None, Some(plate.position()));
    let err_pos = err
        .end_pos()
        .unwrap_or_else(|| plate.position())
        .max(crumb.start_pos.unwrap_or(0));
    err.wrap_breadcrumb(crumb.ending_at(err_pos))
}

/// Logs the outcome of a primitive and wraps a failure in its crumb.
pub(crate) fn settle<Args: Debug>(
    plate: &dyn Plate,
    name: &'static str,
    args: Args,
    start: usize,
    res: Result<(), ParseError>,
) -> Result<(), ParseError> {
    match res {
        Ok(()) => {
            plate.log_success(name, args);
            Ok(())
        }
        Err(e) => {
            plate.log_failure(name, args, &e);
            Err(e.wrap_breadcrumb(Breadcrumb::new(name).starting_at(start)))
        }
    }
}

/// Tree rendering shared by the composite noms.
pub(crate) fn describe_tree(name: &str, children: &[BoxedNom<'_>], indent: &str) -> String {
    let mut s = format!("{indent}{name}");
    let nested = format!("{}└──", indent.replace("└──", "|  "));
    for child in children {
        s.push('\n');
        s.push_str(&child.describe(&nested));
    }
    s
}
