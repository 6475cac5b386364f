//! # abnfkit-odata
//!
//! A grammar catalogue built on [`abnfkit_syntax`]: the RFC 5234 core rules
//! plus the part of the OData ABNF needed to parse `$filter` expressions.
//!
//! Every rule is a function returning its [`Parser`], tagged with the ABNF
//! rule name, so the tree produced by a parse can be queried by the names
//! used in the OData specification:
//!
//! ```
//! use abnfkit_odata::expressions::filter;
//!
//! let node = filter().parse_complete("$filter=Price lt 10").unwrap();
//! assert_eq!(node.tag(), Some("filter"));
//!
//! let literal = node.find_tagged("decimalValue").next().unwrap();
//! assert_eq!(literal.matched_text(), "10");
//! ```
//!
//! Rules can also be looked up by name at runtime, which is what the CLI
//! does:
//!
//! ```
//! let date = abnfkit_odata::lookup("dateValue").unwrap();
//! assert!(date.parse_complete("2024-01-15").is_ok());
//! assert!(date.parse_complete("2024-13-01").is_err());
//! ```
//!
//! ## Ordering
//!
//! The catalogue is a PEG, so within each choice the alternative that should
//! win is listed first. Method calls and `not` come before member paths, and
//! literals come before both. A consequence is that an identifier starting
//! with a literal keyword (`nullable`, `trueName`) matches the keyword and
//! leaves the rest unconsumed.
//!
//! ## Module Structure
//!
//! - [`core_rules`] - ALPHA, DIGIT, HEXDIG, whitespace and URL-escaped delimiters
//! - [`literals`] - `primitiveLiteral` and its parts
//! - [`expressions`] - `filter`, `commonExpr` and everything it composes

use abnfkit_syntax::{Parser, rule};

/// Defines grammar rules as functions returning a cached, tagged parser, and
/// collects them into a `RULES` table for lookup by ABNF name.
macro_rules! rules {
    ($( $(#[$meta:meta])* $name:ident = $abnf:literal => $body:expr; )*) => {
        $(
            $(#[$meta])*
            pub fn $name() -> ::abnfkit_syntax::Parser {
                static PARSER: ::std::sync::LazyLock<::abnfkit_syntax::Parser> =
                    ::std::sync::LazyLock::new(|| ::abnfkit_syntax::tag($abnf, $body));
                PARSER.clone()
            }
        )*

        pub(crate) const RULES: &[(&str, fn() -> ::abnfkit_syntax::Parser)] =
            &[$(($abnf, $name)),*];
    };
}

pub mod core_rules;
pub mod expressions;
pub mod literals;

fn catalogue() -> impl Iterator<Item = &'static (&'static str, fn() -> Parser)> {
    core_rules::RULES
        .iter()
        .chain(literals::RULES)
        .chain(expressions::RULES)
}

/// The rule named `name` in the catalogue, as a [`rule`] reference.
pub fn lookup(name: &str) -> Option<Parser> {
    catalogue()
        .find(|(abnf, _)| *abnf == name)
        .map(|(_, build)| rule(*build))
}

/// Every ABNF rule name in the catalogue, core rules first.
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    catalogue().map(|(abnf, _)| *abnf)
}
