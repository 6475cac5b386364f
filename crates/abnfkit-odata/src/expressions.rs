//! `$filter` expressions.
//!
//! `commonExpr` is an operand followed by optional arithmetic, comparison
//! and logical tails, each of which recurses into a full expression on its
//! right-hand side. Operators therefore associate to the right and have no
//! precedence of their own; `a add b eq c` parses as `a add (b eq c)`.
//!
//! ```text
//! commonExpr = operand [ addExpr / subExpr / ... ]
//!                      [ eqExpr / neExpr / ... / inExpr ]
//!                      [ andExpr / orExpr ]
//! ```
//!
//! Every recursive path passes a literal, a delimiter or an identifier before
//! coming back to `commonExpr`, so the grammar is free of left recursion.

use abnfkit_syntax::{Parser, choice, literal, optional, repeat, rule, sequence};

use crate::core_rules::{at, bws, close, colon, comma, eq, open, rws};
use crate::core_rules::{alpha, digit};
use crate::literals::{enumeration, primitive_literal};

rules! {
    filter = "filter" => sequence([
        choice([literal("$filter"), literal("filter")]),
        rule(eq),
        rule(bool_common_expr),
    ]);

    bool_common_expr = "boolCommonExpr" => rule(common_expr);

    common_expr = "commonExpr" => sequence([
        choice([
            rule(primitive_literal),
            rule(paren_expr),
            rule(list_expr),
            rule(not_expr),
            rule(negate_expr),
            rule(method_call_expr),
            rule(first_member_expr),
        ]),
        optional(choice([
            rule(add_expr),
            rule(sub_expr),
            rule(mul_expr),
            rule(div_expr),
            rule(divby_expr),
            rule(mod_expr),
        ])),
        optional(choice([
            rule(eq_expr),
            rule(ne_expr),
            rule(lt_expr),
            rule(le_expr),
            rule(gt_expr),
            rule(ge_expr),
            rule(has_expr),
            rule(in_expr),
        ])),
        optional(choice([rule(and_expr), rule(or_expr)])),
    ]);

    paren_expr = "parenExpr" => sequence([
        rule(open),
        rule(bws),
        rule(common_expr),
        rule(bws),
        rule(close),
    ]);

    /// `OPEN BWS commonExpr BWS *( COMMA BWS commonExpr BWS ) CLOSE`
    list_expr = "listExpr" => sequence([
        rule(open),
        rule(bws),
        rule(common_expr),
        rule(bws),
        repeat(
            sequence([rule(comma), rule(bws), rule(common_expr), rule(bws)]),
            ..,
        ),
        rule(close),
    ]);

    not_expr = "notExpr" => sequence([literal("not"), rule(rws), rule(bool_common_expr)]);
    negate_expr = "negateExpr" => sequence([literal("-"), rule(bws), rule(common_expr)]);

    add_expr = "addExpr" => binary("add", common_expr);
    sub_expr = "subExpr" => binary("sub", common_expr);
    mul_expr = "mulExpr" => binary("mul", common_expr);
    div_expr = "divExpr" => binary("div", common_expr);
    divby_expr = "divbyExpr" => binary("divby", common_expr);
    mod_expr = "modExpr" => binary("mod", common_expr);

    eq_expr = "eqExpr" => binary("eq", common_expr);
    ne_expr = "neExpr" => binary("ne", common_expr);
    lt_expr = "ltExpr" => binary("lt", common_expr);
    le_expr = "leExpr" => binary("le", common_expr);
    gt_expr = "gtExpr" => binary("gt", common_expr);
    ge_expr = "geExpr" => binary("ge", common_expr);
    has_expr = "hasExpr" => binary("has", enumeration);
    in_expr = "inExpr" => binary("in", common_expr);

    and_expr = "andExpr" => binary("and", bool_common_expr);
    or_expr = "orExpr" => binary("or", bool_common_expr);

    first_member_expr = "firstMemberExpr" => choice([
        rule(member_expr),
        sequence([
            rule(inscope_variable_expr),
            optional(sequence([literal("/"), rule(member_expr)])),
        ]),
    ]);

    member_expr = "memberExpr" => rule(property_path_expr);

    /// A property name, optionally followed by a collection operation or a
    /// navigation to a further member.
    property_path_expr = "propertyPathExpr" => sequence([
        rule(odata_identifier),
        optional(choice([rule(collection_path_expr), rule(single_navigation_expr)])),
    ]);

    single_navigation_expr = "singleNavigationExpr" => sequence([literal("/"), rule(member_expr)]);

    collection_path_expr = "collectionPathExpr" => choice([
        rule(count),
        sequence([literal("/"), rule(any_expr)]),
        sequence([literal("/"), rule(all_expr)]),
    ]);

    count = "count" => literal("/$count");

    inscope_variable_expr = "inscopeVariableExpr" => choice([
        rule(implicit_variable_expr),
        rule(parameter_alias),
        rule(lambda_variable_expr),
    ]);

    implicit_variable_expr = "implicitVariableExpr" => choice([literal("$it"), literal("$this")]);
    parameter_alias = "parameterAlias" => sequence([rule(at), rule(odata_identifier)]);

    /// At most 128 characters.
    odata_identifier = "odataIdentifier" => sequence([
        rule(identifier_leading_character),
        repeat(rule(identifier_character), ..=127),
    ]);

    identifier_leading_character = "identifierLeadingCharacter" => choice([
        rule(alpha),
        literal("_"),
    ]);

    identifier_character = "identifierCharacter" => choice([
        rule(alpha),
        literal("_"),
        rule(digit),
    ]);

    /// `any()` with no lambda tests for a non-empty collection.
    any_expr = "anyExpr" => sequence([
        literal("any"),
        rule(open),
        rule(bws),
        optional(lambda()),
        rule(bws),
        rule(close),
    ]);

    all_expr = "allExpr" => sequence([
        literal("all"),
        rule(open),
        rule(bws),
        lambda(),
        rule(bws),
        rule(close),
    ]);

    lambda_variable_expr = "lambdaVariableExpr" => rule(odata_identifier);
    lambda_predicate_expr = "lambdaPredicateExpr" => rule(bool_common_expr);

    method_call_expr = "methodCallExpr" => choice([
        rule(index_of_method_call_expr),
        rule(to_lower_method_call_expr),
        rule(to_upper_method_call_expr),
        rule(trim_method_call_expr),
        rule(substring_method_call_expr),
        rule(concat_method_call_expr),
        rule(length_method_call_expr),
        rule(contains_method_call_expr),
        rule(starts_with_method_call_expr),
        rule(ends_with_method_call_expr),
        rule(year_method_call_expr),
        rule(month_method_call_expr),
        rule(day_method_call_expr),
        rule(round_method_call_expr),
        rule(floor_method_call_expr),
        rule(ceiling_method_call_expr),
    ]);

    index_of_method_call_expr = "indexOfMethodCallExpr" => method_call("indexof", 2);
    to_lower_method_call_expr = "toLowerMethodCallExpr" => method_call("tolower", 1);
    to_upper_method_call_expr = "toUpperMethodCallExpr" => method_call("toupper", 1);
    trim_method_call_expr = "trimMethodCallExpr" => method_call("trim", 1);

    /// The length argument is optional.
    substring_method_call_expr = "substringMethodCallExpr" => sequence([
        literal("substring"),
        rule(open),
        rule(bws),
        rule(common_expr),
        rule(bws),
        rule(comma),
        rule(bws),
        rule(common_expr),
        rule(bws),
        optional(sequence([rule(comma), rule(bws), rule(common_expr), rule(bws)])),
        rule(close),
    ]);

    concat_method_call_expr = "concatMethodCallExpr" => method_call("concat", 2);
    length_method_call_expr = "lengthMethodCallExpr" => method_call("length", 1);
    contains_method_call_expr = "containsMethodCallExpr" => method_call("contains", 2);
    starts_with_method_call_expr = "startsWithMethodCallExpr" => method_call("startswith", 2);
    ends_with_method_call_expr = "endsWithMethodCallExpr" => method_call("endswith", 2);
    year_method_call_expr = "yearMethodCallExpr" => method_call("year", 1);
    month_method_call_expr = "monthMethodCallExpr" => method_call("month", 1);
    day_method_call_expr = "dayMethodCallExpr" => method_call("day", 1);
    round_method_call_expr = "roundMethodCallExpr" => method_call("round", 1);
    floor_method_call_expr = "floorMethodCallExpr" => method_call("floor", 1);
    ceiling_method_call_expr = "ceilingMethodCallExpr" => method_call("ceiling", 1);
}

/// `RWS keyword RWS operand`
fn binary(keyword: &str, operand: fn() -> Parser) -> Parser {
    sequence([rule(rws), literal(keyword), rule(rws), rule(operand)])
}

/// `lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr`
fn lambda() -> Parser {
    sequence([
        rule(lambda_variable_expr),
        rule(bws),
        rule(colon),
        rule(bws),
        rule(lambda_predicate_expr),
    ])
}

/// `name OPEN BWS commonExpr BWS *( COMMA BWS commonExpr BWS ) CLOSE` with
/// exactly `arity` arguments.
fn method_call(name: &str, arity: usize) -> Parser {
    let argument = || sequence([rule(bws), rule(common_expr), rule(bws)]);
    let mut parts = vec![literal(name), rule(open), argument()];
    for _ in 1..arity {
        parts.push(rule(comma));
        parts.push(argument());
    }
    parts.push(rule(close));
    sequence(parts)
}
