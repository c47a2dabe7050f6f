use crate::{
    context::Context,
    diagnostics::Breadcrumb,
    error::ParseError,
    into::Sink,
    logging::Loggable,
    nom::{describe_tree, run_all, unwind, BoxedNom, Nom},
    plate::Plate,
};

/// Runs its children in sequence and hands the bytes they consumed to a
/// [`Sink`]. Neither a child failure nor a sink failure moves the cursor back.
pub struct Take<'g, S> {
    sink: S,
    noms: Vec<BoxedNom<'g>>,
}

/// Runs its children in sequence and fails unless exactly `len` bytes were
/// consumed.
pub struct RequireLen<'g> {
    len: usize,
    noms: Vec<BoxedNom<'g>>,
}

pub fn take<'g, S: Sink>(sink: S, nom: impl Nom + 'g) -> Take<'g, S> {
    Take {
        sink,
        noms: vec![Box::new(nom)],
    }
}

pub fn require_len<'g>(len: usize, nom: impl Nom + 'g) -> RequireLen<'g> {
    RequireLen {
        len,
        noms: vec![Box::new(nom)],
    }
}

impl<'g, S: Sink> Take<'g, S> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g> RequireLen<'g> {
    pub fn then(mut self, nom: impl Nom + 'g) -> Self {
        self.noms.push(Box::new(nom));
        self
    }
}

impl<'g, S: Sink> Nom for Take<'g, S> {
    fn name(&self) -> &'static str {
        "Take"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.noms.len());
        let start = plate.position();
        let crumb = Breadcrumb::new(self.name()).starting_at(start);
        if let Err((i, e)) = run_all(&self.noms, ctx, plate) {
            return Err(unwind(e, crumb.at(i), plate));
        }
        let end = plate.position();
        let res = match plate.byte_slice(start, end) {
            Ok(window) => self.sink.accept(window),
            Err(e) => Err(e),
        };
        match res {
            Ok(()) => {
                plate.log_success(self.name(), start..end);
                Ok(())
            }
            Err(e) => Err(unwind(e, crumb, plate)),
        }
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(self.name(), &self.noms, indent)
    }
}

impl<'g> Nom for RequireLen<'g> {
    fn name(&self) -> &'static str {
        "RequireLen"
    }

    fn eat(&self, ctx: &Context, plate: &mut dyn Plate) -> Result<(), ParseError> {
        plate.log_inputs(self.name(), self.len);
        let start = plate.position();
        let crumb = Breadcrumb::new(self.name()).starting_at(start);
        if let Err((i, e)) = run_all(&self.noms, ctx, plate) {
            return Err(unwind(e, crumb.at(i), plate));
        }
        let end = plate.position();
        let have = match end.checked_sub(start) {
            Some(have) => have,
            None => {
                let e = ParseError::OutOfBounds {
                    start,
                    end,
                    len: plate.len(),
                };
                return Err(unwind(e, crumb, plate));
            }
        };
        if have != self.len {
            let e = ParseError::RequirementNotMet {
                expected: self.len,
                have,
                message: "invalid length",
            };
            return Err(unwind(e, crumb, plate));
        }
        Ok(())
    }

    fn describe(&self, indent: &str) -> String {
        describe_tree(&format!("RequireLen({})", self.len), &self.noms, indent)
    }
}
