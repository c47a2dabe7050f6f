// #![cfg_attr(debug_assertions, allow(dead_code))]
#![warn(clippy::all)]
#![warn(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]

use std::cell::Cell;

mod logging;
mod util;

pub mod context;
pub mod contrib;
pub mod diagnostics;
pub mod error;
pub mod flow;
pub mod format;
pub mod into;
pub mod nom;
pub mod plate;
pub mod prelude;
pub mod primitive;
pub mod rule;
pub mod span;
pub mod state;
pub mod take;

#[cfg(feature = "cookbook")]
pub mod cookbook;

pub(crate) const LOG_TARGET: &str = "bynom"; // env!("CARGO_PKG_NAME");

// name of the rule currently eating, shown in trace output
thread_local!(pub(crate) static LABEL: Cell<&'static str> = Cell::new(""));
