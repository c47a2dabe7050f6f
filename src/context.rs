use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::error::ParseError;

/// Cancellation signal threaded through every nom invocation.
///
/// A background context can never be cancelled. Quantifier loops and flow
/// combinators poll it, so a cancelled parse stops at the next byte or child.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<Arc<AtomicBool>>,
}

/// Cancels every [`Context`] cloned from the one it was created with.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancel() -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = Self {
            cancel: Some(Arc::clone(&flag)),
        };
        (ctx, CancelHandle(flag))
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |f| f.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn check(&self) -> Result<(), ParseError> {
        if self.is_cancelled() {
            return Err(ParseError::Cancelled);
        }
        Ok(())
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
