//! Named productions.

use std::sync::Arc;

use super::{Parser, Rule, Session};
use crate::node::Node;
use crate::result::ParseResult;
use crate::trace::Cut;

/// Labels whatever `parser` matches with `name`.
///
/// Matching is unchanged: a tag succeeds exactly when its body does, with
/// the same remaining input. On success the body's node is wrapped in
/// [`Node::Tagged`]. Tags are what the trace sink reports as rules being
/// entered and left, and what `ParseOptions::max_depth` counts.
pub fn tag(name: impl Into<Arc<str>>, parser: Parser) -> Parser {
    Parser::new(Tag {
        name: name.into(),
        parser,
    })
}

struct Tag {
    name: Arc<str>,
    parser: Parser,
}

impl Rule for Tag {
    fn apply<'i>(&self, session: &mut Session<'_, 'i>, input: &'i str) -> ParseResult<'i> {
        if session
            .options()
            .max_depth
            .is_some_and(|max| session.depth() >= max)
        {
            session.record_cut(Cut::DepthLimit, input);
            return ParseResult::no_match(input);
        }

        let trace = session.trace();
        trace.enter(session.depth(), &self.name, input);
        let result = session.nested(|session| self.parser.apply(session, input));
        trace.exit(session.depth(), &self.name, &result);

        result.map_node(|node| Node::Tagged {
            name: Arc::clone(&self.name),
            node: Box::new(node),
        })
    }
}
