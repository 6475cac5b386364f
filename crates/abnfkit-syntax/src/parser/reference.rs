//! Deferred references to rule functions.

use super::session::RuleKey;
use super::{Parser, Rule, Session};
use crate::result::ParseResult;
use crate::trace::Cut;

/// Refers to the parser returned by `build`, calling it only when applied.
///
/// This is how rules refer to each other, including to themselves: each rule
/// is a function returning its parser, and the bodies use `rule(other)` rather
/// than calling `other()` directly. `build` should be cheap, typically handing
/// out a clone of a parser built once and cached in a static.
///
/// References are also where the session's guards apply. With memoization
/// on, a reference's result at a given position is computed once per parse.
/// With the left-recursion guard on, a reference that re-enters itself at the
/// same position fails instead of recursing forever.
pub fn rule(build: fn() -> Parser) -> Parser {
    Parser::new(RuleRef { build })
}

struct RuleRef {
    build: fn() -> Parser,
}

impl Rule for RuleRef {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        let key = RuleKey::new(self.build as usize, input);
        if let Some(result) = session.memoized(key) {
            return result;
        }
        if !session.enter_rule(key) {
            session.record_cut(Cut::LeftRecursion, input);
            return ParseResult::no_match(input);
        }

        let cuts = session.cuts();
        let result = (self.build)().apply(session, input);
        session.leave_rule(key);

        // A cut depends on what was active higher up, not just on this position.
        if session.cuts() == cuts {
            session.memoize(key, &result);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::options::ParseOptions;
    use crate::parser::{choice, literal, optional, parse_with, sequence, tag};
    use crate::trace::NoTrace;
    use pretty_assertions::assert_eq;

    // parens = "(" [parens] ")"
    fn parens() -> Parser {
        static PARSER: LazyLock<Parser> = LazyLock::new(|| {
            tag(
                "parens",
                sequence([literal("("), optional(rule(parens)), literal(")")]),
            )
        });
        PARSER.clone()
    }

    // expr = expr "+" "1" / "1"
    fn left_recursive() -> Parser {
        static PARSER: LazyLock<Parser> = LazyLock::new(|| {
            choice([
                sequence([rule(left_recursive), literal("+"), literal("1")]),
                literal("1"),
            ])
        });
        PARSER.clone()
    }

    // shallow = "a", tagged so it counts towards the depth limit
    fn shallow() -> Parser {
        static PARSER: LazyLock<Parser> = LazyLock::new(|| tag("shallow", literal("a")));
        PARSER.clone()
    }

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counted() -> Parser {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        literal("a")
    }

    #[test]
    fn recursive_rules_nest() {
        let node = parens().parse_complete("((()))").unwrap();
        let depth = node
            .descendants()
            .filter(|n| n.tag() == Some("parens"))
            .count();
        assert_eq!(depth, 3);
        assert!(!parens().parse("(()").is_success());
    }

    #[test]
    fn left_recursion_fails_closed() {
        let result = rule(left_recursive).parse("1+1");
        // The recursive alternative is cut, so only the plain "1" matches.
        assert_eq!(result.remaining_input(), "+1");
    }

    #[test]
    fn memoization_reuses_results() {
        BUILDS.store(0, Ordering::SeqCst);
        // Both alternatives start with the same reference at the same position.
        let parser = choice([
            sequence([rule(counted), literal("x")]),
            sequence([rule(counted), literal("y")]),
        ]);

        let memo = ParseOptions::default().with_memoize(true);
        let result = parse_with(&parser, "ay", &memo, &NoTrace);
        assert_eq!(result.remaining_input(), "");
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);

        let plain = parse_with(&parser, "ay", &ParseOptions::default(), &NoTrace);
        assert_eq!(plain, result);
        assert_eq!(BUILDS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn memoization_does_not_change_outcomes() {
        let memo = ParseOptions::default().with_memoize(true);
        for input in ["1", "1+1", "()", "(())", "(()", "x"] {
            for parser in [rule(left_recursive), rule(parens)] {
                assert_eq!(
                    parse_with(&parser, input, &memo, &NoTrace),
                    parser.parse(input),
                    "input {input:?}"
                );
            }
        }
    }

    #[test]
    fn memoization_respects_the_depth_limit() {
        // The first alternative matches `shallow` at depth 0 and then fails;
        // the second reaches it again two tags deeper, past the limit.
        let parser = choice([
            sequence([rule(shallow), literal("x")]),
            tag("outer", tag("inner", rule(shallow))),
        ]);
        let limited = ParseOptions::default().with_max_depth(Some(2));
        let plain = parse_with(&parser, "a", &limited, &NoTrace);
        let memoized = parse_with(&parser, "a", &limited.with_memoize(true), &NoTrace);
        assert_eq!(plain, ParseResult::no_match("a"));
        assert_eq!(memoized, plain);

        let roomy = ParseOptions::default().with_max_depth(Some(3));
        let memoized = parse_with(&parser, "a", &roomy.with_memoize(true), &NoTrace);
        assert!(memoized.is_success());
        assert_eq!(memoized, parse_with(&parser, "a", &roomy, &NoTrace));
    }
}
