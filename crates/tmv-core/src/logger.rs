//! # Diagnostic Logger
//!
//! Validators never fail on bad data; they report it. [`Logger`] is the
//! side channel those reports travel through. It is a cheap, cloneable handle
//! around a `Fn(&str)` sink so callers can redirect diagnostics into their
//! own reporter, a test buffer, or nowhere.
//!
//! The default sink forwards to `tracing::warn!`.

use std::fmt;
use std::sync::Arc;

/// Cloneable handle to a diagnostic sink.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl Logger {
    /// Wrap an arbitrary sink.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Logger that emits every message as a `tracing` warning.
    pub fn tracing() -> Self {
        Self::new(|message| tracing::warn!("{message}"))
    }

    /// Logger that discards everything.
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    /// Emit one diagnostic message.
    pub fn log(&self, message: &str) {
        (self.sink)(message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
