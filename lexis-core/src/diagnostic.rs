//! Where failed resolutions are reported.
//!
//! The resolver never logs on its own; it hands a [`Diagnostic`] to a
//! [`DiagnosticSink`]. The default [`TracingSink`] forwards it to `tracing`
//! as a warning, closures can be used to collect or redirect diagnostics,
//! and [`NoopSink`] drops them.

use crate::error::ResolveError;
use crate::options::ResolutionOptions;
use crate::resolve::ResolutionState;

/// Tag prefixed to every diagnostic message.
pub const MODULE_TAG: &str = "[lexis]";

/// `tracing` target used by [`TracingSink`].
pub const TRACING_TARGET: &str = "lexis";

/// One failed resolution, borrowed from the call that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'d> {
    pub key: &'d str,
    pub options: &'d ResolutionOptions<'d>,
    pub error: ResolveError,
    pub state: &'d ResolutionState<'d>,
}

impl Diagnostic<'_> {
    pub fn message(&self) -> String {
        format!("{} {}", MODULE_TAG, self.error)
    }
}

pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic<'_>),
{
    fn emit(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Emits diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic<'_>) {
        tracing::warn!(
            target: TRACING_TARGET,
            key = diagnostic.key,
            locale = diagnostic.state.resolution.locale,
            error = ?diagnostic.error,
            options = ?diagnostic.options,
            state = ?diagnostic.state,
            "{}",
            diagnostic.message()
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _diagnostic: &Diagnostic<'_>) {}
}
