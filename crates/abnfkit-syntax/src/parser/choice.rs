//! Ordered choice.

use super::{Parser, Rule, Session};
use crate::result::ParseResult;

/// Tries each alternative in order and returns the first success verbatim.
///
/// Later alternatives are never consulted once one matches, even if they
/// would consume more. Every alternative is tried from the choice's own
/// input. If none matches, or there are none, the choice fails.
pub fn choice(alternatives: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::new(Choice {
        alternatives: alternatives.into_iter().collect(),
    })
}

struct Choice {
    alternatives: Vec<Parser>,
}

impl Rule for Choice {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        let trace = session.trace();
        for (index, alternative) in self.alternatives.iter().enumerate() {
            trace.attempt(session.depth(), index, input);
            let result = alternative.apply(session, input);
            if result.is_success() {
                trace.selected(session.depth(), index, &result);
                return result;
            }
        }
        ParseResult::no_match(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, TerminalKind};
    use crate::parser::{literal, sequence, unit};
    use pretty_assertions::assert_eq;

    #[test]
    fn first_success_wins_even_if_shorter() {
        let parser = choice([literal("a"), literal("ab")]);
        let result = parser.parse("ab");
        assert_eq!(result.remaining_input(), "b");
        assert_eq!(result.node().and_then(Node::text), Some("a"));
    }

    #[test]
    fn later_alternatives_start_from_the_same_input() {
        let parser = choice([sequence([literal("a"), literal("x")]), literal("ab")]);
        let result = parser.parse("abc");
        assert_eq!(result.remaining_input(), "c");
        assert_eq!(
            result.into_node(),
            Some(Node::Terminal {
                kind: TerminalKind::Literal,
                text: "ab"
            })
        );
    }

    #[test]
    fn returns_the_winning_node_unwrapped() {
        let alternative = unit('q');
        let direct = alternative.parse("q!");
        let chosen = choice([literal("z"), alternative]).parse("q!");
        assert_eq!(chosen, direct);
    }

    #[test]
    fn no_alternatives_never_match() {
        assert_eq!(choice(Vec::new()).parse("abc"), ParseResult::no_match("abc"));
    }

    #[test]
    fn all_failing_reports_original_input() {
        let parser = choice([literal("x"), literal("y")]);
        assert_eq!(parser.parse("abc"), ParseResult::no_match("abc"));
    }
}
