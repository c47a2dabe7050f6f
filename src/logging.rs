use log::Level::Trace;
use log::{log_enabled, trace};

use crate::plate::Plate;
use crate::{util, LABEL, LOG_TARGET};
use std::fmt::Debug;

pub(crate) trait Loggable {
    const LABEL_WIDTH: usize = 15;
    const PREVIEW: usize = 33;
    const INPUT_WIDTH: usize = Self::PREVIEW + 2;
    fn upcoming(&self) -> String;
    fn log_inputs<Args: Debug>(&self, msg: &str, args: Args);
    fn log_success<Args: Debug>(&self, msg: &str, args: Args);
    fn log_failure<Args: Debug, Error: Debug>(&self, msg: &str, args: Args, error: &Error);
}

impl<P> Loggable for P
where
    P: Plate + ?Sized,
{
    fn upcoming(&self) -> String {
        let pos = self.position();
        let end = (pos + Self::PREVIEW).min(self.len());
        util::formatter_bytes(self.byte_slice(pos, end).unwrap_or_default(), Self::PREVIEW)
    }

    fn log_inputs<Args: Debug>(&self, msg: &str, args: Args) {
        if log_enabled!(target: LOG_TARGET, Trace) {
            trace!(
                target: LOG_TARGET,
                "{inp:<iw$} {label:<lw$} : {operation:<lw$}",
                iw = Self::INPUT_WIDTH,
                lw = Self::LABEL_WIDTH,
                label = LABEL.with(|f| f.get()),
                inp = self.upcoming(),
                operation = format!("{msg}({args:?})"),
            );
        }
    }

    fn log_success<Args: Debug>(&self, msg: &str, args: Args) {
        if log_enabled!(target: LOG_TARGET, Trace) {
            trace!(
                target: LOG_TARGET,
                "{inp:<iw$} {label:<lw$} : {operation:<lw$} @{pos}",
                iw = Self::INPUT_WIDTH,
                lw = Self::LABEL_WIDTH,
                label = LABEL.with(|f| f.get()),
                inp = self.upcoming(),
                operation = format!("{msg}({args:?})"),
                pos = self.position(),
            );
        }
    }

    fn log_failure<Args: Debug, Error: Debug>(&self, msg: &str, args: Args, error: &Error) {
        if log_enabled!(target: LOG_TARGET, Trace) {
            trace!(
                target: LOG_TARGET,
                "{inp:<iw$} {label:<lw$} : {operation:<lw$} -> {e:?}",
                iw = Self::INPUT_WIDTH,
                lw = Self::LABEL_WIDTH,
                label = LABEL.with(|f| f.get()),
                inp = self.upcoming(),
                operation = format!("{msg}({args:?})"),
                e = error,
            );
        }
    }
}
