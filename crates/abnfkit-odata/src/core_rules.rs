//! RFC 5234 core rules and the OData URL delimiters.
//!
//! OData URLs may carry delimiters percent-encoded, so most of the
//! punctuation rules accept both forms (`(` or `%28`).

use abnfkit_syntax::{choice, literal, repeat, rule, unit, unit_range};

rules! {
    /// `%x41-5A / %x61-7A`
    alpha = "ALPHA" => choice([unit_range('A', 'Z'), unit_range('a', 'z')]);
    digit = "DIGIT" => unit_range('0', '9');
    a_to_f = "A-to-F" => unit_range('A', 'F');
    hexdig = "HEXDIG" => choice([rule(digit), rule(a_to_f)]);

    sp = "SP" => unit(' ');
    htab = "HTAB" => unit('\t');
    dquote = "DQUOTE" => unit('"');
    squote = "SQUOTE" => choice([literal("'"), literal("%27")]);

    open = "OPEN" => choice([literal("("), literal("%28")]);
    close = "CLOSE" => choice([literal(")"), literal("%29")]);
    comma = "COMMA" => choice([literal(","), literal("%2C")]);
    colon = "COLON" => choice([literal(":"), literal("%3A")]);
    semi = "SEMI" => choice([literal(";"), literal("%3B")]);
    eq = "EQ" => literal("=");
    at = "AT" => choice([literal("@"), literal("%40")]);
    sign = "SIGN" => choice([literal("+"), literal("%2B"), literal("-")]);

    /// "Bad" whitespace: optional, and ignored where it appears.
    bws = "BWS" => repeat(whitespace(), ..);
    /// Required whitespace, e.g. around binary operators.
    rws = "RWS" => repeat(whitespace(), 1..);
}

fn whitespace() -> abnfkit_syntax::Parser {
    choice([rule(sp), rule(htab), literal("%20"), literal("%09")])
}
