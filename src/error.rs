use std::{error::Error, fmt};

use crate::diagnostics::Breadcrumb;

/// Indicates whether an error can be recovered from, and parsing can continue.
/// A cancelled parse is fatal: no alternative or optional branch may swallow it.
pub trait Recoverable {
    fn is_recoverable(&self) -> bool;
}

/// What a primitive wanted to see when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Byte(u8),
    OneOf(Vec<u8>),
    Range(u8, u8),
    Sample(Vec<u8>),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "[{}]", b.escape_ascii())?,
            Self::OneOf(set) => write!(f, "[{}]", set.escape_ascii())?,
            Self::Range(from, to) => write!(f, "[{}-{}]", from.escape_ascii(), to.escape_ascii())?,
            Self::Sample(sample) => write!(f, "({})", sample.escape_ascii())?,
        };
        Ok(())
    }
}

#[derive(Debug)]
pub enum ParseError {
    /// The plate has no more bytes.
    EndOfInput,
    /// The plate ran out before a required minimum was read.
    UnexpectedEndOfInput,
    /// Invalid slice or seek arguments. For seeks `start == end`.
    OutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
    ExpectationFailed {
        expected: Expected,
        have: u8,
        negated: bool,
    },
    StateTestFailed {
        value: u64,
    },
    RequirementNotMet {
        expected: usize,
        have: usize,
        message: &'static str,
    },
    Conversion(Box<dyn Error + Send + Sync>),
    Cancelled,
    Breadcrumb {
        crumb: Breadcrumb,
        source: Box<ParseError>,
    },
}

impl Recoverable for ParseError {
    fn is_recoverable(&self) -> bool {
        !matches!(self.cause(), Self::Cancelled)
    }
}

impl ParseError {
    #[inline]
    pub fn conversion<E: Error + Send + Sync + 'static>(e: E) -> Self {
        Self::Conversion(Box::new(e))
    }

    /// Turns a plain end of input into "needed at least one more byte".
    pub(crate) fn required(self) -> Self {
        match self {
            Self::EndOfInput => Self::UnexpectedEndOfInput,
            other => other,
        }
    }

    pub fn wrap_breadcrumb(self, crumb: Breadcrumb) -> Self {
        Self::Breadcrumb {
            crumb,
            source: Box::new(self),
        }
    }

    /// Fills the unset fields of the outermost breadcrumb. Crumbs further in
    /// are left untouched, as is an error that carries no breadcrumb at all.
    pub fn extend_breadcrumb(
        mut self,
        index: Option<usize>,
        start_pos: Option<usize>,
        end_pos: Option<usize>,
    ) -> Self {
        if let Self::Breadcrumb { crumb, .. } = &mut self {
            crumb.index = crumb.index.or(index);
            crumb.start_pos = crumb.start_pos.or(start_pos);
            crumb.end_pos = crumb.end_pos.or(end_pos);
        }
        self
    }

    /// Where the outermost breadcrumb saw the failure.
    pub fn end_pos(&self) -> Option<usize> {
        match self {
            Self::Breadcrumb { crumb, .. } => crumb.end_pos,
            _ => None,
        }
    }

    /// The innermost error underneath all breadcrumbs.
    pub fn cause(&self) -> &ParseError {
        let mut e = self;
        while let Self::Breadcrumb { source, .. } = e {
            e = source;
        }
        e
    }

    /// The breadcrumb trail, innermost first.
    pub fn breadcrumbs(&self) -> Vec<&Breadcrumb> {
        let mut trail = vec![];
        let mut e = self;
        while let Self::Breadcrumb { crumb, source } = e {
            trail.push(crumb);
            e = source;
        }
        trail.reverse();
        trail
    }

    /// Splits into the underlying cause and the trail (innermost first).
    pub fn into_parts(self) -> (ParseError, Vec<Breadcrumb>) {
        let mut trail = vec![];
        let mut e = self;
        loop {
            match e {
                Self::Breadcrumb { crumb, source } => {
                    trail.push(crumb);
                    e = *source;
                }
                cause => {
                    trail.reverse();
                    return (cause, trail);
                }
            }
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self.cause(), Self::EndOfInput | Self::UnexpectedEndOfInput)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "end of input")?,
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input")?,
            Self::OutOfBounds { start, end, len } if start == end => {
                write!(f, "position {start} out of bounds (len={len})")?
            }
            Self::OutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds (len={len})")?
            }
            Self::ExpectationFailed {
                expected,
                negated: true,
                ..
            } => write!(f, "expectation failed: expected not {expected}")?,
            Self::ExpectationFailed { expected, have, .. } => write!(
                f,
                "expectation failed: expected {expected}, have '{}'",
                have.escape_ascii()
            )?,
            Self::StateTestFailed { value } => write!(f, "state test failed: {value:#x}")?,
            Self::RequirementNotMet {
                expected,
                have,
                message,
            } => write!(f, "requirement not met: {message}: expected {expected}, have {have}")?,
            Self::Conversion(e) => write!(f, "conversion failed: {e}")?,
            Self::Cancelled => write!(f, "cancelled")?,
            Self::Breadcrumb { crumb, source } => write!(f, "{crumb}: {source}")?,
        };
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Breadcrumb { source, .. } => Some(source.as_ref()),
            Self::Conversion(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
