//! Bounded repetition and optional matching.
//!
//! Bounds are written as Rust ranges:
//!
//! | ABNF | Bounds |
//! |------|--------|
//! | `*x` | `..` or `0..` |
//! | `1*x` | `1..` |
//! | `2*4x` | `2..=4` |
//! | `*4x` | `..=4` |
//! | `3x` | `3` |
//! | `[x]` | [`optional`] |
//!
//! [`Repeat::abnf`] accepts the numeric form used by ABNF-to-code generators,
//! where a maximum of `0` stands for "no upper bound".

use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

use super::{Parser, Rule, Session};
use crate::node::Node;
use crate::result::ParseResult;

/// How many times a repeated parser may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    pub min: usize,
    /// `None` means unbounded.
    pub max: Option<usize>,
}

impl Repeat {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    pub fn exactly(count: usize) -> Self {
        Self::new(count, Some(count))
    }

    /// Bounds in ABNF generator form: `max == 0` means unbounded.
    pub fn abnf(min: usize, max: usize) -> Self {
        Self::new(min, (max != 0).then_some(max))
    }

    /// Whether `count` repetitions satisfy these bounds.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Whether another attempt is allowed after `count` repetitions.
    pub fn allows_another(&self, count: usize) -> bool {
        self.max.is_none_or(|max| count < max)
    }
}

impl From<usize> for Repeat {
    fn from(count: usize) -> Self {
        Repeat::exactly(count)
    }
}

impl From<RangeFrom<usize>> for Repeat {
    fn from(range: RangeFrom<usize>) -> Self {
        Repeat::new(range.start, None)
    }
}

impl From<RangeInclusive<usize>> for Repeat {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (min, max) = range.into_inner();
        Repeat::new(min, Some(max))
    }
}

impl From<RangeToInclusive<usize>> for Repeat {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Repeat::new(0, Some(range.end))
    }
}

impl From<RangeFull> for Repeat {
    fn from(_: RangeFull) -> Self {
        Repeat::new(0, None)
    }
}

/// Matches `parser` greedily as many times as `bounds` allows.
///
/// Stops at the first failed attempt or once the maximum is reached, then
/// succeeds if the count is within bounds. On failure the whole repetition
/// reports its own input. Zero matches with a minimum of zero is a success
/// with an empty [`Node::Repetition`].
///
/// If an attempt succeeds without consuming anything, every further attempt
/// would do the same, so the loop stops there. That one empty match stands
/// for as many repetitions as the minimum asks for; it is recorded as a
/// single child.
pub fn repeat(parser: Parser, bounds: impl Into<Repeat>) -> Parser {
    Parser::new(Repetition {
        parser,
        bounds: bounds.into(),
    })
}

/// Matches `parser` zero or one time. Never fails.
pub fn optional(parser: Parser) -> Parser {
    repeat(parser, ..=1)
}

struct Repetition {
    parser: Parser,
    bounds: Repeat,
}

impl Rule for Repetition {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        let mut children: Vec<Node<'i>> = Vec::new();
        let mut rest = input;
        let mut count = 0;
        while self.bounds.allows_another(count) {
            let ParseResult::Matched { node, remaining } = self.parser.apply(session, rest) else {
                break;
            };
            children.push(node);
            count += 1;
            if remaining.len() == rest.len() {
                count = count.max(self.bounds.min);
                break;
            }
            rest = remaining;
        }

        if self.bounds.accepts(count) {
            ParseResult::matched(Node::Repetition(children), rest)
        } else {
            ParseResult::no_match(input)
        }
    }
}
