//! # abnfkit-syntax
//!
//! Backtracking PEG parser combinators that turn text into labelled parse
//! trees. Grammars are written by composing a small set of primitives, which
//! maps one-to-one onto ABNF as used in protocol RFCs:
//!
//! | ABNF | Combinator |
//! |------|------------|
//! | `"text"` | [`literal`] |
//! | `%x41` | [`unit`] |
//! | `%x30-39` | [`unit_range`] |
//! | `a b c` | [`sequence`] |
//! | `a / b` | [`choice`] |
//! | `2*4a`, `*a`, `[a]` | [`repeat`], [`optional`] |
//! | `name = ...` | [`tag`] around the body, [`rule`] at use sites |
//!
//! ## PEG, not CFG
//!
//! Alternatives are ordered: a [`choice`] commits to the first alternative
//! that matches, and repetitions are greedy. This makes matching
//! deterministic and linear in the common case, at the cost that some ABNF
//! grammars need their alternatives reordered (longest first) to behave as
//! the RFC intends.
//!
//! ```text
//! choice(["a", "ab"]) on "ab"  →  matches "a", remaining "b"
//! choice(["ab", "a"]) on "ab"  →  matches "ab", remaining ""
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use abnfkit_syntax::{optional, parse, repeat, sequence, tag, unit, unit_range};
//!
//! // number = 1*DIGIT ["." 1*DIGIT]
//! let digits = repeat(unit_range('0', '9'), 1..);
//! let number = tag(
//!     "number",
//!     sequence([digits.clone(), optional(sequence([unit('.'), digits]))]),
//! );
//!
//! let result = parse(&number, "3.14 rest");
//! assert!(result.is_success());
//! assert_eq!(result.remaining_input(), " rest");
//!
//! let node = result.into_node().unwrap();
//! assert_eq!(node.tag(), Some("number"));
//! assert_eq!(node.matched_text(), "3.14");
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! abnfkit-syntax/
//! ├── lib.rs        # This file - public API and end-to-end tests
//! ├── node.rs       # Node tree, traversal and rendering
//! ├── result.rs     # ParseResult and ParseError
//! ├── options.rs    # ParseOptions (memoization and guards)
//! ├── trace.rs      # TraceSink, NoTrace, LogTrace
//! └── parser/
//!     ├── mod.rs       # Parser, Rule trait, parse() and parse_with()
//!     ├── session.rs   # Per-invocation state
//!     ├── terminal.rs  # literal, unit, unit_range
//!     ├── sequence.rs
//!     ├── choice.rs
//!     ├── repeat.rs    # repeat, optional, Repeat bounds
//!     ├── tag.rs
//!     └── reference.rs # rule() for recursive grammars
//! ```

pub mod node;
pub mod options;
pub mod parser;
pub mod result;
pub mod trace;

pub use node::{Descendants, Node, NodeKind, TerminalKind};
pub use options::ParseOptions;
pub use parser::{
    Parser, Repeat, Rule, Session, choice, literal, optional, parse, parse_with, repeat, rule,
    sequence, tag, unit, unit_range,
};
pub use result::{ParseError, ParseResult};
pub use trace::{Cut, LogTrace, NoTrace, TRACE_TARGET, TraceSink};
