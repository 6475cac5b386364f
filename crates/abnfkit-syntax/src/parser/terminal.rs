//! Terminal matchers: the only parsers that consume input themselves.
//!
//! A unit is one Unicode scalar value (`char`). All three matchers leave the
//! input untouched when they fail, including when the input is too short.

use std::sync::Arc;

use super::{Parser, Rule, Session};
use crate::node::{Node, TerminalKind};
use crate::result::ParseResult;

/// Matches `text` exactly.
pub fn literal(text: impl Into<Arc<str>>) -> Parser {
    Parser::new(Literal { text: text.into() })
}

/// Matches the single character `c`.
pub fn unit(c: char) -> Parser {
    Parser::new(UnitRange {
        lo: c,
        hi: c,
        kind: TerminalKind::Unit,
    })
}

/// Matches one character in `lo..=hi`.
pub fn unit_range(lo: char, hi: char) -> Parser {
    Parser::new(UnitRange {
        lo,
        hi,
        kind: TerminalKind::UnitRange,
    })
}

struct Literal {
    text: Arc<str>,
}

impl Rule for Literal {
    fn apply<'i>(&self, _session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        if !input.starts_with(&*self.text) {
            return ParseResult::no_match(input);
        }
        let (text, remaining) = input.split_at(self.text.len());
        ParseResult::matched(
            Node::Terminal {
                kind: TerminalKind::Literal,
                text,
            },
            remaining,
        )
    }
}

struct UnitRange {
    lo: char,
    hi: char,
    kind: TerminalKind,
}

impl Rule for UnitRange {
    fn apply<'i>(&self, _session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        match input.chars().next() {
            Some(c) if (self.lo..=self.hi).contains(&c) => {
                let (text, remaining) = input.split_at(c.len_utf8());
                ParseResult::matched(
                    Node::Terminal {
                        kind: self.kind,
                        text,
                    },
                    remaining,
                )
            }
            _ => ParseResult::no_match(input),
        }
    }
}
