//! Terminal renderings of a [`DiagnosticError`].
//!
//! ```text
//! Error:
//!   unexpected end of input
//! Range:
//!   start=0, end=4
//! Context:
//!   {abc
//! Breadcrumbs:
//!   0: Expect, start=4, end=4
//!   1: Rule[2], start=0, end=4
//! ```

use std::fmt::{self, Write};

use crate::{
    diagnostics::{ContextWindow, DiagnosticError},
    error::ParseError,
};

pub const DEFAULT_INDENT: &str = "  ";

pub trait Formatter {
    fn indent(&self) -> &str;

    /// Writes the context bytes, each line prefixed with the indent.
    fn write_bytes(&self, w: &mut dyn Write, bytes: &[u8]) -> fmt::Result;

    fn format(&self, w: &mut dyn Write, e: &DiagnosticError) -> fmt::Result {
        let indent = self.indent();
        writeln!(w, "Error:")?;
        writeln!(w, "{indent}{}", e.cause)?;
        writeln!(w, "Range:")?;
        writeln!(w, "{indent}start={}, end={}", e.start_pos, e.end_pos)?;

        if let Some(context) = &e.context {
            writeln!(w, "Context:")?;
            match context {
                ContextWindow::Whole(bytes) => self.write_bytes(w, bytes)?,
                ContextWindow::Parted { head, elided, tail } => {
                    self.write_bytes(w, head)?;
                    writeln!(w, "{indent}..[{elided} bytes]..")?;
                    self.write_bytes(w, tail)?;
                }
                ContextWindow::HeadOnly { head, .. } => {
                    self.write_bytes(w, head)?;
                    writeln!(w, "{indent}..[more bytes]")?;
                }
                ContextWindow::TailOnly { tail, .. } => {
                    writeln!(w, "{indent}[more bytes]..")?;
                    self.write_bytes(w, tail)?;
                }
                ContextWindow::Unavailable {
                    head_error,
                    tail_error: None,
                } => writeln!(w, "{indent}read error: {head_error}")?,
                ContextWindow::Unavailable {
                    head_error,
                    tail_error: Some(tail_error),
                } => {
                    writeln!(w, "{indent}head read error: {head_error}")?;
                    writeln!(w, "{indent}tail read error: {tail_error}")?;
                }
            }
        }

        if !e.breadcrumbs.is_empty() {
            writeln!(w, "Breadcrumbs:")?;
            for (i, crumb) in e.breadcrumbs.iter().enumerate() {
                writeln!(w, "{indent}{i}: {crumb}")?;
            }
        }
        Ok(())
    }

    /// For errors that never passed through a rule.
    fn format_raw(&self, w: &mut dyn Write, e: &ParseError) -> fmt::Result {
        writeln!(w, "Error:")?;
        writeln!(w, "{}{e}", self.indent())
    }
}

/// Context bytes on one escaped line.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    pub indent: String,
}

/// Context bytes as a hex dump: 16 bytes per line in two groups of 8, with
/// an ASCII gutter.
#[derive(Debug, Clone)]
pub struct HexFormatter {
    pub indent: String,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl Default for HexFormatter {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl Formatter for TextFormatter {
    fn indent(&self) -> &str {
        &self.indent
    }

    fn write_bytes(&self, w: &mut dyn Write, bytes: &[u8]) -> fmt::Result {
        writeln!(w, "{}{}", self.indent, bytes.escape_ascii())
    }
}

impl Formatter for HexFormatter {
    fn indent(&self) -> &str {
        &self.indent
    }

    fn write_bytes(&self, w: &mut dyn Write, bytes: &[u8]) -> fmt::Result {
        for chunk in bytes.chunks(16) {
            writeln!(w, "{}{}", self.indent, hex_line(chunk))?;
        }
        Ok(())
    }
}

/// One hex dump line for up to 16 bytes. Bytes outside printable ASCII
/// show as `.` in the gutter.
pub fn hex_line(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(70);
    for i in 0..16 {
        if i == 8 {
            s.push(' ');
        }
        match bytes.get(i) {
            Some(b) => s.push_str(&format!("{b:02X} ")),
            None => s.push_str("   "),
        }
    }
    s.push_str("| ");
    for (i, &b) in bytes.iter().take(16).enumerate() {
        if i == 8 {
            s.push(' ');
        }
        s.push(if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' });
    }
    s.truncate(s.trim_end().len());
    s
}
