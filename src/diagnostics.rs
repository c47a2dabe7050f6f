//! Failure diagnostics: breadcrumb trails and context windows.
//!
//! As an error unwinds through nested noms each one wraps it in a
//! [`Breadcrumb`]. The [`Rule`](crate::rule::Rule) at the top then
//! unwinds the wraps into a trail (innermost first) and cuts a bounded
//! [`ContextWindow`] out of the plate, producing one [`DiagnosticError`].

use std::{error::Error, fmt};

use crate::{
    error::ParseError,
    format::{Formatter, TextFormatter},
    plate::Plate,
};

/// One named frame of the combinator nesting a failure passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: &'static str,
    pub index: Option<usize>,
    pub start_pos: Option<usize>,
    pub end_pos: Option<usize>,
}

impl Breadcrumb {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            index: None,
            start_pos: None,
            end_pos: None,
        }
    }

    pub fn at(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    pub fn starting_at(self, pos: usize) -> Self {
        Self {
            start_pos: Some(pos),
            ..self
        }
    }

    pub fn ending_at(self, pos: usize) -> Self {
        Self {
            end_pos: Some(pos),
            ..self
        }
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(i) = self.index {
            write!(f, "[{i}]")?;
        }
        if let Some(s) = self.start_pos {
            write!(f, ", start={s}")?;
        }
        if let Some(e) = self.end_pos {
            write!(f, ", end={e}")?;
        }
        Ok(())
    }
}

/// The bytes a failed attempt ran over, bounded in size.
#[derive(Debug)]
pub enum ContextWindow {
    /// The whole span fitted within the chunk length.
    Whole(Vec<u8>),
    /// Head and tail of a long span with `elided` bytes left out between.
    Parted {
        head: Vec<u8>,
        elided: usize,
        tail: Vec<u8>,
    },
    HeadOnly {
        head: Vec<u8>,
        tail_error: ParseError,
    },
    TailOnly {
        head_error: ParseError,
        tail: Vec<u8>,
    },
    Unavailable {
        head_error: ParseError,
        tail_error: Option<ParseError>,
    },
}

impl ContextWindow {
    /// Cuts the window for `start..err_pos` out of the plate. `chunk` of
    /// `None` copies the whole span, however long.
    pub fn reconstruct(plate: &dyn Plate, start: usize, err_pos: usize, chunk: Option<usize>) -> Self {
        let span = err_pos.saturating_sub(start);
        let chunk = match chunk {
            Some(c) if span > c => c,
            _ => {
                return match plate.byte_slice(start, err_pos) {
                    Ok(w) => Self::Whole(w.to_vec()),
                    Err(e) => Self::Unavailable {
                        head_error: e,
                        tail_error: None,
                    },
                };
            }
        };

        let left = chunk / 2;
        let right = chunk - left;
        let head = plate.byte_slice(start, start + left);
        let tail = plate.byte_slice(err_pos - right, err_pos);
        match (head, tail) {
            (Ok(head), Ok(tail)) => Self::Parted {
                head: head.to_vec(),
                elided: span - chunk,
                tail: tail.to_vec(),
            },
            (Ok(head), Err(tail_error)) => Self::HeadOnly {
                head: head.to_vec(),
                tail_error,
            },
            (Err(head_error), Ok(tail)) => Self::TailOnly {
                head_error,
                tail: tail.to_vec(),
            },
            (Err(head_error), Err(tail_error)) => Self::Unavailable {
                head_error,
                tail_error: Some(tail_error),
            },
        }
    }

    /// The window flattened to bytes, with the elision marker in the middle.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Whole(w) => w.clone(),
            Self::Parted { head, elided, tail } => {
                let mut v = head.clone();
                v.extend_from_slice(format!("..[{elided} bytes]..").as_bytes());
                v.extend_from_slice(tail);
                v
            }
            Self::HeadOnly { head, .. } => {
                let mut v = head.clone();
                v.extend_from_slice(b"..[more bytes]");
                v
            }
            Self::TailOnly { tail, .. } => {
                let mut v = b"[more bytes]..".to_vec();
                v.extend_from_slice(tail);
                v
            }
            Self::Unavailable { .. } => vec![],
        }
    }
}

/// The error a [`Rule`](crate::rule::Rule) reports for a failed attempt.
#[derive(Debug)]
pub struct DiagnosticError {
    pub cause: ParseError,
    pub start_pos: usize,
    pub end_pos: usize,
    /// `None` when the rule was built without context capture.
    pub context: Option<ContextWindow>,
    /// Innermost first.
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl DiagnosticError {
    pub(crate) fn new(
        err: ParseError,
        start_pos: usize,
        end_pos: usize,
        context: Option<ContextWindow>,
    ) -> Self {
        let (cause, breadcrumbs) = err.into_parts();
        Self {
            cause,
            start_pos,
            end_pos,
            context,
            breadcrumbs,
        }
    }

    pub fn context_window(&self) -> Vec<u8> {
        self.context
            .as_ref()
            .map(ContextWindow::to_bytes)
            .unwrap_or_default()
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        TextFormatter::default().format(f, self)
    }
}

impl Error for DiagnosticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::BytePlate;
    use test_log::test;

    #[test]
    fn test_short_span_is_verbatim() {
        let p = BytePlate::from("0123456789");
        let w = ContextWindow::reconstruct(&p, 2, 6, Some(4));
        assert_eq!(w.to_bytes(), b"2345");
        assert!(matches!(w, ContextWindow::Whole(_)));

        let w = ContextWindow::reconstruct(&p, 3, 3, Some(0));
        assert_eq!(w.to_bytes(), b"");
    }

    #[test]
    fn test_long_span_is_elided_in_the_middle() {
        let p = BytePlate::from("0123456789");
        let w = ContextWindow::reconstruct(&p, 0, 10, Some(4));
        assert_eq!(w.to_bytes(), b"01..[6 bytes]..89");

        let w = ContextWindow::reconstruct(&p, 1, 9, Some(4));
        assert_eq!(w.to_bytes(), b"12..[4 bytes]..78");

        // odd chunk: the tail gets the extra byte
        let w = ContextWindow::reconstruct(&p, 0, 10, Some(3));
        assert_eq!(w.to_bytes(), b"0..[7 bytes]..89");

        let w = ContextWindow::reconstruct(&p, 0, 10, None);
        assert_eq!(w.to_bytes(), b"0123456789");
    }

    #[test]
    fn test_window_bound() {
        let text: Vec<u8> = (0..=255).collect();
        let p = BytePlate::from(text);
        for c in [0, 1, 2, 7, 16, 100] {
            for (s, e) in [(0, 256), (10, 11), (5, 200), (100, 100)] {
                let w = ContextWindow::reconstruct(&p, s, e, Some(c));
                let marker = format!("..[{} bytes]..", (e - s).saturating_sub(c)).len();
                match w {
                    ContextWindow::Whole(ref v) => assert_eq!(v.len(), e - s),
                    ContextWindow::Parted { .. } => assert!(w.to_bytes().len() <= c + marker),
                    _ => panic!("unexpected {w:?}"),
                }
            }
        }
    }

    #[test]
    fn test_unreadable_halves() {
        let p = BytePlate::from("abc");
        // a span running past the plate end cannot be read whole
        let w = ContextWindow::reconstruct(&p, 0, 9, None);
        assert!(matches!(w, ContextWindow::Unavailable { tail_error: None, .. }));
        assert!(w.to_bytes().is_empty());

        let w = ContextWindow::reconstruct(&p, 0, 9, Some(4));
        assert!(matches!(w, ContextWindow::HeadOnly { .. }));
        assert_eq!(w.to_bytes(), b"ab..[more bytes]");
    }

    #[test]
    fn test_breadcrumb_display() {
        let c = Breadcrumb::new("Switch").at(1).starting_at(0).ending_at(4);
        assert_eq!(c.to_string(), "Switch[1], start=0, end=4");
        assert_eq!(Breadcrumb::new("Any").to_string(), "Any");
    }
}
