pub use crate::context::{CancelHandle, Context};
pub use crate::contrib::parsers::{
    blank, digits, fixed_digits, hex_digits, line_breaks, literal, whitespace,
};
pub use crate::diagnostics::{Breadcrumb, ContextWindow, DiagnosticError};
pub use crate::error::{Expected, ParseError, Recoverable};
pub use crate::flow::{group, optional, repeat, seq, switch, when, when_not};
pub use crate::format::{Formatter, HexFormatter, TextFormatter};
pub use crate::into::{self, Sink};
pub use crate::nom::{nom_fn, BoxedNom, Eater, Nom};
pub use crate::plate::{BytePlate, Plate};
pub use crate::primitive::{
    any, expect, expect_acceptable, expect_ineligible, expect_not, trace_position,
    while_acceptable, while_byte, while_ineligible, while_not,
};
pub use crate::rule::{bite, ContextLen, Rule, RuleOptions};
pub use crate::span::{range, sample, set, single, Relevance, Remain};
pub use crate::state::{change_state, into_flag, require_state, signal, Bits};
pub use crate::take::{require_len, take};
