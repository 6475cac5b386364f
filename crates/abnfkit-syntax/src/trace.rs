//! # Tracing
//!
//! A [`TraceSink`] observes matching as it happens: named rules being entered
//! and left, ordered-choice alternatives being tried, and guards failing
//! closed. Every method takes `&self` and returns nothing, so a sink has no
//! way to influence which alternative matches or how much input is consumed.
//!
//! [`LogTrace`] forwards everything to the [`log`] facade at `trace` level,
//! indented by nesting depth:
//!
//! ```text
//! enter filter input: "$filter=a eq 1"
//!   try #0 input: "$filter=a eq 1"
//!   chose #0 consumed: "$filter" remaining: "=a eq 1"
//!   enter EQ input: "=a eq 1"
//!   ...
//! ```

use log::Level;

use crate::result::ParseResult;

/// The `log` target used by [`LogTrace`].
pub const TRACE_TARGET: &str = "abnfkit::trace";

/// Why a guard made a parser fail closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cut {
    /// A rule re-entered itself at the same input position.
    LeftRecursion,
    /// Named rules nested deeper than `ParseOptions::max_depth`.
    DepthLimit,
}

/// Receives diagnostic events during matching.
///
/// All methods default to doing nothing.
pub trait TraceSink {
    /// A named rule is about to run.
    fn enter(&self, _depth: usize, _name: &str, _input: &str) {}

    /// A named rule finished.
    fn exit(&self, _depth: usize, _name: &str, _result: &ParseResult<'_>) {}

    /// Ordered choice is about to try alternative `index`.
    fn attempt(&self, _depth: usize, _index: usize, _input: &str) {}

    /// Ordered choice settled on alternative `index`.
    fn selected(&self, _depth: usize, _index: usize, _result: &ParseResult<'_>) {}

    /// A guard failed closed.
    fn cut(&self, _depth: usize, _cut: Cut, _input: &str) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {}

/// Writes events as `log::trace!` records on [`TRACE_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl LogTrace {
    fn enabled() -> bool {
        log::log_enabled!(target: TRACE_TARGET, Level::Trace)
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn outcome(result: &ParseResult<'_>) -> String {
    match result.node() {
        Some(node) => format!(
            "consumed: {:?} remaining: {:?}",
            node.matched_text(),
            result.remaining_input()
        ),
        None => "no match".to_string(),
    }
}

impl TraceSink for LogTrace {
    fn enter(&self, depth: usize, name: &str, input: &str) {
        if Self::enabled() {
            log::trace!(target: TRACE_TARGET, "{}enter {name} input: {input:?}", indent(depth));
        }
    }

    fn exit(&self, depth: usize, name: &str, result: &ParseResult<'_>) {
        if Self::enabled() {
            log::trace!(
                target: TRACE_TARGET,
                "{}exit {name} {}",
                indent(depth),
                outcome(result)
            );
        }
    }

    fn attempt(&self, depth: usize, index: usize, input: &str) {
        if Self::enabled() {
            log::trace!(target: TRACE_TARGET, "{}try #{index} input: {input:?}", indent(depth));
        }
    }

    fn selected(&self, depth: usize, index: usize, result: &ParseResult<'_>) {
        if Self::enabled() {
            log::trace!(
                target: TRACE_TARGET,
                "{}chose #{index} {}",
                indent(depth),
                outcome(result)
            );
        }
    }

    fn cut(&self, depth: usize, cut: Cut, input: &str) {
        log::debug!(target: TRACE_TARGET, "{}cut {cut:?} input: {input:?}", indent(depth));
    }
}
