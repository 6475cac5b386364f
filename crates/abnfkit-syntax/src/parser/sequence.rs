//! Sequential composition.

use super::{Parser, Rule, Session};
use crate::node::Node;
use crate::result::ParseResult;

/// Matches every parser in `parts`, each starting where the previous one
/// stopped.
///
/// All or nothing: if any part fails, the sequence fails at its own input and
/// the children matched so far are discarded. An empty sequence always
/// matches, consuming nothing.
pub fn sequence(parts: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::new(Sequence {
        parts: parts.into_iter().collect(),
    })
}

struct Sequence {
    parts: Vec<Parser>,
}

impl Rule for Sequence {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        let mut children = Vec::with_capacity(self.parts.len());
        let mut rest = input;
        for part in &self.parts {
            match part.apply(session, rest) {
                ParseResult::Matched { node, remaining } => {
                    children.push(node);
                    rest = remaining;
                }
                ParseResult::NoMatch { .. } => return ParseResult::no_match(input),
            }
        }
        ParseResult::matched(Node::Sequence(children), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{literal, unit, unit_range};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ab", Some(""))]
    #[case("ab!", Some("!"))]
    #[case("a", None)]
    #[case("ac", None)]
    #[case("", None)]
    fn sequence_is_all_or_nothing(#[case] input: &str, #[case] rest: Option<&str>) {
        let result = sequence([literal("a"), literal("b")]).parse(input);
        match rest {
            Some(rest) => assert_eq!(result.remaining_input(), rest),
            None => assert_eq!(result, ParseResult::no_match(input)),
        }
    }

    #[test]
    fn children_follow_supply_order() {
        let parser = sequence([unit('x'), unit_range('0', '9'), literal("yz")]);
        let node = parser.parse_complete("x7yz").unwrap();
        let texts: Vec<_> = node.children().iter().filter_map(Node::text).collect();
        assert_eq!(texts, vec!["x", "7", "yz"]);
    }

    #[test]
    fn empty_sequence_matches_nothing() {
        let result = sequence(Vec::new()).parse("abc");
        assert_eq!(result, ParseResult::matched(Node::Sequence(vec![]), "abc"));
    }

    #[test]
    fn regrouping_keeps_the_remaining_input() {
        let flat = sequence([literal("a"), literal("b"), literal("c")]);
        let left = sequence([sequence([literal("a"), literal("b")]), literal("c")]);
        let right = sequence([literal("a"), sequence([literal("b"), literal("c")])]);
        for input in ["abc", "abcd", "abx", "ab", ""] {
            let expected = flat.parse(input);
            assert_eq!(left.parse(input).remaining_input(), expected.remaining_input());
            assert_eq!(right.parse(input).remaining_input(), expected.remaining_input());
            assert_eq!(left.parse(input).is_success(), expected.is_success());
            assert_eq!(right.parse(input).is_success(), expected.is_success());
        }
    }
}
