//! Pattern parsing through the public API

use shapematch::{parse_pattern, FieldPattern, Pattern, PatternSyntaxError, RecordPattern};
use test_case::test_case;

fn leaves(names: &[&str]) -> Vec<(String, FieldPattern)> {
    names
        .iter()
        .map(|name| (name.to_string(), FieldPattern::Leaf))
        .collect()
}

#[test]
fn test_parse_empty_record() {
    assert_eq!(parse_pattern("{}"), Ok(Pattern::Record(RecordPattern::new())));
}

#[test]
fn test_parse_undefined() {
    assert_eq!(parse_pattern("undefined"), Ok(Pattern::Empty));
}

#[test]
fn test_parse_simple_pattern() {
    assert_eq!(
        parse_pattern("{a:_ , b:_ , c:_}"),
        Ok(Pattern::record(leaves(&["a", "b", "c"])))
    );
}

#[test]
fn test_parse_nested_pattern() {
    let expected = Pattern::record(vec![
        ("a", FieldPattern::Leaf),
        (
            "b",
            FieldPattern::nested(vec![
                ("c", FieldPattern::Leaf),
                (
                    "d",
                    FieldPattern::nested(vec![
                        ("e", FieldPattern::Leaf),
                        ("f", FieldPattern::nested(vec![("g", FieldPattern::Leaf)])),
                    ]),
                ),
            ]),
        ),
        ("h", FieldPattern::nested(vec![("i", FieldPattern::Leaf)])),
    ]);
    assert_eq!(
        parse_pattern("{ a : _ , b : { c : _ , d : { e : _ , f : { g : _ } } } , h : { i : _ } }"),
        Ok(expected)
    );
}

#[test]
fn test_parse_ignores_whitespace() {
    let compact = parse_pattern("{a:_,b:{c:_,d:{e:_}}}").unwrap();
    let spaced = parse_pattern(
        "{
            a : _ ,
            b : {
                    c : _ ,
                    d : {
                            e : _
                        }
                }
        }",
    )
    .unwrap();
    assert_eq!(compact, spaced);
    assert_eq!(
        parse_pattern("{a:_,b:_}").unwrap(),
        parse_pattern("{ a : _ ,\nb : _ }").unwrap()
    );
}

#[test]
fn test_nesting_structure() {
    let pattern = parse_pattern("{a:_,b:{c:_,d:{e:_}}}").unwrap();
    let Pattern::Record(record) = pattern else {
        panic!("Expected record pattern");
    };
    let Some(FieldPattern::Nested(b)) = record.get("b") else {
        panic!("Expected nested record under b");
    };
    let Some(FieldPattern::Nested(d)) = b.get("d") else {
        panic!("Expected nested record under d");
    };
    assert_eq!(d.get("e"), Some(&FieldPattern::Leaf));
}

#[test]
fn test_declaration_order_preserved() {
    let pattern = parse_pattern("{z: _, a: _, m: {y: _, b: _}}").unwrap();
    assert_eq!(pattern.field_names(), vec!["z", "a", "m"]);
}

#[test]
fn test_duplicate_field_last_value_wins() {
    let pattern = parse_pattern("{a: _, b: _, a: {c: _}}").unwrap();
    assert_eq!(pattern.field_names(), vec!["a", "b"]);
    let Pattern::Record(record) = pattern else {
        panic!("Expected record pattern");
    };
    assert_eq!(
        record.get("a"),
        Some(&FieldPattern::nested(vec![("c", FieldPattern::Leaf)]))
    );
}

#[test]
fn test_quoted_and_numeric_keys() {
    let pattern = parse_pattern("{'first name': _, \"it's\": _, 42: _}").unwrap();
    assert_eq!(pattern.field_names(), vec!["first name", "it's", "42"]);
}

#[test]
fn test_display_reparses_to_same_tree() {
    let original = parse_pattern("{ a:_, 'b c':{ d:_ , e:{} } }").unwrap();
    let rendered = original.to_string();
    assert_eq!(rendered, "{a: _, 'b c': {d: _, e: {}}}");
    assert_eq!(parse_pattern(&rendered), Ok(original));
}

#[test_case("" ; "empty string")]
#[test_case("   " ; "spaces")]
#[test_case("\n\t" ; "newline and tab")]
fn test_empty_input_rejected(text: &str) {
    assert_eq!(parse_pattern(text), Err(PatternSyntaxError::Empty));
}

#[test_case("a: _" ; "no braces")]
#[test_case("[a]" ; "brackets")]
#[test_case("{a: _" ; "missing close")]
#[test_case("a: _}" ; "missing open")]
#[test_case("null" ; "other literal")]
fn test_unbraced_input_rejected(text: &str) {
    assert_eq!(parse_pattern(text), Err(PatternSyntaxError::Unbraced));
}

#[test_case("{a: 1}" ; "number value")]
#[test_case("{a: true}" ; "boolean value")]
#[test_case("{a: x}" ; "unknown identifier")]
#[test_case("{a: _ b: _}" ; "missing comma")]
#[test_case("{a _}" ; "missing colon")]
#[test_case("{,}" ; "lone comma")]
#[test_case("{a: {b: _}" ; "unbalanced nested")]
#[test_case("{a: _}{b: _}" ; "two records")]
fn test_malformed_body_rejected(text: &str) {
    assert!(
        matches!(parse_pattern(text), Err(PatternSyntaxError::Malformed { .. })),
        "Expected malformed error for {:?}",
        text
    );
}

#[test]
fn test_error_message_mentions_braces() {
    let err = parse_pattern("a").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Pattern Parsing Error: it must start with { and end with }"
    );
}

#[test]
fn test_deep_nesting_rejected() {
    let text = format!("{}{}", "{a: ".repeat(65), format!("_{}", "}".repeat(65)));
    assert_eq!(parse_pattern(&text), Err(PatternSyntaxError::TooDeep(64)));

    let text = format!("{}{}", "{a: ".repeat(64), format!("_{}", "}".repeat(64)));
    assert!(parse_pattern(&text).is_ok());
}
