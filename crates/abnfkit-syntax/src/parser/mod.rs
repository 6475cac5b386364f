//! # Parser - Composable Backtracking Rules
//!
//! A [`Parser`] is an immutable value describing a rule: given an input, it
//! either matches a prefix and returns a [`Node`] plus the unconsumed suffix,
//! or fails without consuming anything.
//!
//! ## The Primitives
//!
//! Every grammar is built from the same handful of constructors:
//!
//! | Constructor | Matches |
//! |-------------|---------|
//! | [`literal`] | an exact string |
//! | [`unit`] | one specific character |
//! | [`unit_range`] | one character in an inclusive range |
//! | [`sequence`] | all sub-parsers, one after another |
//! | [`choice`] | the first sub-parser that matches (ordered choice) |
//! | [`repeat`] / [`optional`] | one sub-parser a bounded number of times |
//! | [`tag`] | its sub-parser, labelling the resulting node |
//! | [`rule`] | a named rule function, resolved when applied |
//!
//! ## Backtracking
//!
//! Parsers never mutate shared state. A composite that fails reports the
//! input it was given, discarding whatever its sub-parsers matched along the
//! way:
//!
//! ```
//! use abnfkit_syntax::{literal, sequence};
//!
//! let ab = sequence([literal("a"), literal("b")]);
//!
//! assert_eq!(ab.parse("ab").remaining_input(), "");
//! // "a" matched, then "b" failed: the whole sequence reports "ac" untouched
//! assert_eq!(ab.parse("ac").remaining_input(), "ac");
//! ```
//!
//! ## Recursion
//!
//! Parsers are built bottom-up, so a grammar whose rules refer to each other
//! cannot be wired together directly. [`rule`] breaks the cycle by holding a
//! function pointer and building the referenced parser only when it is
//! applied. Every recursive cycle must consume input before it comes back to
//! the same rule; [`ParseOptions`](crate::ParseOptions) describes the guards
//! for grammars that do not.
//!
//! ## Module Structure
//!
//! - [`session`] - Per-invocation state ([`Session`])
//! - `terminal`, `sequence`, `choice`, `repeat` - the matching primitives
//! - `tag`, `reference` - labels and rule references

pub mod session;

mod choice;
mod reference;
mod repeat;
mod sequence;
mod tag;
mod terminal;

use std::fmt;
use std::sync::Arc;

use crate::node::Node;
use crate::options::ParseOptions;
use crate::result::{ParseError, ParseResult};
use crate::trace::{NoTrace, TraceSink};

pub use choice::choice;
pub use reference::rule;
pub use repeat::{Repeat, optional, repeat};
pub use sequence::sequence;
pub use session::Session;
pub use tag::tag;
pub use terminal::{literal, unit, unit_range};

/// The behaviour behind a [`Parser`].
///
/// Implement this to add a primitive of your own. Implementations must be
/// pure: the result may depend only on `input` and must not vary between
/// calls. On failure they must return [`ParseResult::no_match`] with the
/// `input` they were given.
pub trait Rule: Send + Sync {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i>;
}

/// A composable, immutable parser.
///
/// Cloning is cheap (reference counted) and parsers can be shared between
/// threads; each [`parse`] call keeps its own state in a [`Session`].
#[derive(Clone)]
pub struct Parser {
    rule: Arc<dyn Rule>,
}

impl Parser {
    pub fn new(rule: impl Rule + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Apply this parser within an existing session.
    ///
    /// This is what [`Rule`] implementations call on their sub-parsers.
    pub fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        self.rule.apply(session, input)
    }

    /// Shorthand for [`parse(self, input)`](parse).
    pub fn parse<'i>(&self, input: &'i str) -> ParseResult<'i> {
        parse(self, input)
    }

    /// Parse and require that the whole input is consumed.
    pub fn parse_complete<'i>(&self, input: &'i str) -> Result<Node<'i>, ParseError> {
        self.parse(input).into_complete(input)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Run `parser` against all of `input` with default options and no tracing.
pub fn parse<'i>(parser: &Parser, input: &'i str) -> ParseResult<'i> {
    parse_with(parser, input, &ParseOptions::default(), &NoTrace)
}

/// Run `parser` against all of `input`.
///
/// The result is returned exactly as the parser produced it; nesting depth
/// starts at zero.
pub fn parse_with<'i>(
    parser: &Parser,
    input: &'i str,
    options: &ParseOptions,
    trace: &dyn TraceSink,
) -> ParseResult<'i> {
    let mut session = Session::new(options, trace);
    parser.apply(&mut session, input)
}
