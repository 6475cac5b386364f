//! The outcome of applying a parser to an input.

use serde::Serialize;
use thiserror::Error;

use crate::node::Node;

/// What a parser returns for one application.
///
/// There is exactly one way to fail, and failing never consumes input:
/// `NoMatch::remaining` is always the input the parser was given. This holds
/// at every nesting level, which is what lets a caller retry a different
/// parser from the same starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseResult<'i> {
    /// A prefix of the input matched; `remaining` is the unconsumed suffix.
    Matched { node: Node<'i>, remaining: &'i str },
    /// Nothing matched; `remaining` is the untouched input.
    NoMatch { remaining: &'i str },
}

impl<'i> ParseResult<'i> {
    pub fn matched(node: Node<'i>, remaining: &'i str) -> Self {
        ParseResult::Matched { node, remaining }
    }

    pub fn no_match(input: &'i str) -> Self {
        ParseResult::NoMatch { remaining: input }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Matched { .. })
    }

    /// The unconsumed suffix on success, the original input on failure.
    pub fn remaining_input(&self) -> &'i str {
        match self {
            ParseResult::Matched { remaining, .. } | ParseResult::NoMatch { remaining } => {
                *remaining
            }
        }
    }

    pub fn node(&self) -> Option<&Node<'i>> {
        match self {
            ParseResult::Matched { node, .. } => Some(node),
            ParseResult::NoMatch { .. } => None,
        }
    }

    pub fn into_node(self) -> Option<Node<'i>> {
        match self {
            ParseResult::Matched { node, .. } => Some(node),
            ParseResult::NoMatch { .. } => None,
        }
    }

    /// The prefix of `input` this result consumed. Empty on failure.
    ///
    /// `input` must be the string the parser was applied to.
    pub fn consumed(&self, input: &'i str) -> &'i str {
        let end = input.len().saturating_sub(self.remaining_input().len());
        &input[..end]
    }

    /// Demand that the whole of `input` was consumed.
    pub fn into_complete(self, input: &'i str) -> Result<Node<'i>, ParseError> {
        match self {
            ParseResult::Matched { node, remaining } if remaining.is_empty() => Ok(node),
            ParseResult::Matched { remaining, .. } => Err(ParseError::Incomplete {
                offset: input.len() - remaining.len(),
                rest: remaining.to_string(),
            }),
            ParseResult::NoMatch { .. } => Err(ParseError::NoMatch),
        }
    }

    pub(crate) fn map_node(self, f: impl FnOnce(Node<'i>) -> Node<'i>) -> Self {
        match self {
            ParseResult::Matched { node, remaining } => ParseResult::Matched {
                node: f(node),
                remaining,
            },
            no_match => no_match,
        }
    }
}

/// Why an input was not accepted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input does not match")]
    NoMatch,

    #[error("input matched up to byte {offset}, unparsed remainder: {rest:?}")]
    Incomplete { offset: usize, rest: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TerminalKind;
    use pretty_assertions::assert_eq;

    fn leaf(text: &str) -> Node<'_> {
        Node::Terminal {
            kind: TerminalKind::Literal,
            text,
        }
    }

    #[test]
    fn no_match_keeps_the_input() {
        let result = ParseResult::no_match("abc");
        assert!(!result.is_success());
        assert_eq!(result.remaining_input(), "abc");
        assert_eq!(result.node(), None);
        assert_eq!(result.consumed("abc"), "");
    }

    #[test]
    fn consumed_is_the_matched_prefix() {
        let input = "abc";
        let result = ParseResult::matched(leaf(&input[..1]), &input[1..]);
        assert_eq!(result.consumed(input), "a");
        assert_eq!(result.remaining_input(), "bc");
    }

    #[test]
    fn into_complete_accepts_full_consumption() {
        let input = "ab";
        let result = ParseResult::matched(leaf(input), "");
        assert_eq!(result.into_complete(input), Ok(leaf("ab")));
    }

    #[test]
    fn into_complete_reports_the_remainder() {
        let input = "abc";
        let result = ParseResult::matched(leaf(&input[..1]), &input[1..]);
        assert_eq!(
            result.into_complete(input),
            Err(ParseError::Incomplete {
                offset: 1,
                rest: "bc".to_string()
            })
        );
    }

    #[test]
    fn into_complete_reports_no_match() {
        let result = ParseResult::no_match("abc");
        assert_eq!(result.into_complete("abc"), Err(ParseError::NoMatch));
    }

    #[test]
    fn map_node_leaves_failures_alone() {
        let result = ParseResult::no_match("x").map_node(|_| leaf("never"));
        assert_eq!(result, ParseResult::no_match("x"));
    }
}
