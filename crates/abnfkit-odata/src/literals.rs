//! Primitive literals: `null`, booleans, GUIDs, dates and times, numbers,
//! strings, durations, enumeration members and binary data.

use abnfkit_syntax::{Parser, choice, literal, optional, repeat, rule, sequence, unit_range};

use crate::core_rules::{a_to_f, alpha, comma, digit, hexdig, sign, squote};
use crate::expressions::odata_identifier;

rules! {
    /// Tried in this order. A GUID, timestamp, date or time is attempted
    /// before the digits it starts with are taken as a number, and a
    /// timestamp before the date it starts with. A bare quoted value is
    /// always a `string`; durations and enumeration members only match
    /// with their prefix (`duration'P1D'`, `Sales.Color'Red'`).
    primitive_literal = "primitiveLiteral" => choice([
        rule(null_value),
        rule(boolean_value),
        rule(guid_value),
        rule(date_time_offset_value),
        rule(date_value),
        rule(time_of_day_value),
        rule(decimal_value),
        rule(string),
        rule(duration),
        rule(enumeration),
        rule(binary),
    ]);

    null_value = "nullValue" => literal("null");
    boolean_value = "booleanValue" => choice([literal("true"), literal("false")]);

    /// `8HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 12HEXDIG`
    guid_value = "guidValue" => sequence([
        repeat(rule(hexdig), 8),
        literal("-"),
        repeat(rule(hexdig), 4),
        literal("-"),
        repeat(rule(hexdig), 4),
        literal("-"),
        repeat(rule(hexdig), 4),
        literal("-"),
        repeat(rule(hexdig), 12),
    ]);

    date_value = "dateValue" => sequence([
        rule(year),
        literal("-"),
        rule(month),
        literal("-"),
        rule(day),
    ]);

    /// `[ "-" ] ( "0" 3DIGIT / oneToNine 3*DIGIT )`
    year = "year" => sequence([
        optional(literal("-")),
        choice([
            sequence([literal("0"), repeat(rule(digit), 3)]),
            sequence([rule(one_to_nine), repeat(rule(digit), 3..)]),
        ]),
    ]);

    month = "month" => choice([
        sequence([literal("0"), rule(one_to_nine)]),
        sequence([literal("1"), unit_range('0', '2')]),
    ]);

    day = "day" => choice([
        sequence([literal("0"), rule(one_to_nine)]),
        sequence([unit_range('1', '2'), rule(digit)]),
        sequence([literal("3"), unit_range('0', '1')]),
    ]);

    one_to_nine = "oneToNine" => unit_range('1', '9');

    /// `dateValue "T" timeOfDayValue ( "Z" / SIGN hour ":" minute )`
    date_time_offset_value = "dateTimeOffsetValue" => sequence([
        rule(year),
        literal("-"),
        rule(month),
        literal("-"),
        rule(day),
        literal("T"),
        clock(),
        choice([
            literal("Z"),
            sequence([rule(sign), rule(hour), literal(":"), rule(minute)]),
        ]),
    ]);

    time_of_day_value = "timeOfDayValue" => clock();

    hour = "hour" => choice([
        sequence([unit_range('0', '1'), rule(digit)]),
        sequence([literal("2"), unit_range('0', '3')]),
    ]);
    minute = "minute" => rule(zero_to_fifty_nine);
    second = "second" => rule(zero_to_fifty_nine);
    zero_to_fifty_nine = "zeroToFiftyNine" => sequence([unit_range('0', '5'), rule(digit)]);
    fractional_seconds = "fractionalSeconds" => repeat(rule(digit), 1..=12);

    /// `[ "duration" ] SQUOTE durationValue SQUOTE`
    duration = "duration" => sequence([
        optional(literal("duration")),
        rule(squote),
        rule(duration_value),
        rule(squote),
    ]);

    /// `[SIGN] "P" [1*DIGIT "D"] ["T" [1*DIGIT "H"] [1*DIGIT "M"] [1*DIGIT ["." 1*DIGIT] "S"]]`
    duration_value = "durationValue" => sequence([
        optional(rule(sign)),
        literal("P"),
        optional(sequence([repeat(rule(digit), 1..), literal("D")])),
        optional(sequence([
            literal("T"),
            optional(sequence([repeat(rule(digit), 1..), literal("H")])),
            optional(sequence([repeat(rule(digit), 1..), literal("M")])),
            optional(sequence([
                repeat(rule(digit), 1..),
                optional(sequence([literal("."), repeat(rule(digit), 1..)])),
                literal("S"),
            ])),
        ])),
    ]);

    /// `[ qualifiedEnumTypeName ] SQUOTE enumValue SQUOTE`
    enumeration = "enum" => sequence([
        optional(rule(qualified_enum_type_name)),
        rule(squote),
        rule(enum_value),
        rule(squote),
    ]);

    /// `namespace "." enumerationTypeName`, with the dots taken together
    /// with each namespace part so the last part is left for the type name.
    qualified_enum_type_name = "qualifiedEnumTypeName" => sequence([
        repeat(sequence([rule(namespace_part), literal(".")]), 1..),
        rule(enumeration_type_name),
    ]);

    namespace_part = "namespacePart" => rule(odata_identifier);
    enumeration_type_name = "enumerationTypeName" => rule(odata_identifier);

    /// Flags combine several members: `'Red,Blue'`.
    enum_value = "enumValue" => sequence([
        rule(single_enum_value),
        repeat(sequence([rule(comma), rule(single_enum_value)]), ..),
    ]);

    single_enum_value = "singleEnumValue" => choice([
        rule(enumeration_member),
        rule(enum_member_value),
    ]);

    enumeration_member = "enumerationMember" => rule(odata_identifier);
    enum_member_value = "enumMemberValue" => rule(int64_value);
    int64_value = "int64Value" => sequence([optional(rule(sign)), repeat(rule(digit), 1..=19)]);

    binary = "binary" => sequence([
        literal("binary"),
        rule(squote),
        rule(binary_value),
        rule(squote),
    ]);

    /// `*(4base64char) [ base64b16 / base64b8 ]`
    binary_value = "binaryValue" => sequence([
        repeat(repeat(rule(base64char), 4), ..),
        optional(choice([rule(base64b16), rule(base64b8)])),
    ]);

    base64char = "base64char" => choice([
        rule(alpha),
        rule(digit),
        literal("-"),
        literal("_"),
    ]);

    /// The last two bytes: three characters, the third from a restricted set.
    base64b16 = "base64b16" => sequence([
        repeat(rule(base64char), 2),
        one_of(&[
            "A", "E", "I", "M", "Q", "U", "Y", "c", "g", "k", "o", "s", "w", "0", "4", "8",
        ]),
        optional(literal("=")),
    ]);

    /// The last byte: two characters, the second from a restricted set.
    base64b8 = "base64b8" => sequence([
        rule(base64char),
        one_of(&["A", "Q", "g", "w"]),
        optional(literal("==")),
    ]);

    /// `[SIGN] ( 1*DIGIT ["." 1*DIGIT] ["e" [SIGN] 1*DIGIT] / nanInfinity )`
    decimal_value = "decimalValue" => sequence([
        optional(rule(sign)),
        choice([
            sequence([
                repeat(rule(digit), 1..),
                optional(sequence([literal("."), repeat(rule(digit), 1..)])),
                optional(sequence([
                    literal("e"),
                    optional(rule(sign)),
                    repeat(rule(digit), 1..),
                ])),
            ]),
            rule(nan_infinity),
        ]),
    ]);

    nan_infinity = "nanInfinity" => choice([literal("NaN"), literal("-INF"), literal("INF")]);

    /// `SQUOTE *( SQUOTE-in-string / pchar-no-SQUOTE ) SQUOTE`
    string = "string" => sequence([
        rule(squote),
        repeat(choice([rule(squote_in_string), rule(pchar_no_squote)]), ..),
        rule(squote),
    ]);

    /// An escaped quote inside a string: two single quotes.
    squote_in_string = "SQUOTE-in-string" => sequence([rule(squote), rule(squote)]);

    pchar_no_squote = "pchar-no-SQUOTE" => choice([
        rule(unreserved),
        rule(pct_encoded_no_squote),
        rule(other_delims),
        one_of(&["$", "&", "=", ":", "@"]),
    ]);

    unreserved = "unreserved" => choice([
        rule(alpha),
        rule(digit),
        one_of(&["-", ".", "_", "~"]),
    ]);

    other_delims = "other-delims" => one_of(&["!", "(", ")", "*", "+", ",", ";"]);

    /// Any percent-encoded octet except `%27`, the encoded single quote.
    pct_encoded_no_squote = "pct-encoded-no-SQUOTE" => choice([
        sequence([
            literal("%"),
            choice([unit_range('0', '1'), unit_range('3', '9'), rule(a_to_f)]),
            rule(hexdig),
        ]),
        sequence([
            literal("%2"),
            choice([unit_range('0', '6'), unit_range('8', '9'), rule(a_to_f)]),
        ]),
    ]);
}

/// `hour ":" minute [":" second ["." fractionalSeconds]]`
fn clock() -> Parser {
    sequence([
        rule(hour),
        literal(":"),
        rule(minute),
        optional(sequence([
            literal(":"),
            rule(second),
            optional(sequence([literal("."), rule(fractional_seconds)])),
        ])),
    ])
}

/// Ordered choice over fixed strings.
pub(crate) fn one_of(words: &[&str]) -> Parser {
    choice(words.iter().map(|word| literal(*word)))
}
