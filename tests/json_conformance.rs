//! JSON subsystem conformance tests.
//!
//! These tests exercise the public parse/serialize surface end to end and
//! cross-check both directions against `serde_json` as an independent
//! implementation.
//!
//! # Areas Tested
//!
//! - Parsing validation (UTF-8, escapes, numbers, structure)
//! - Resource limits
//! - Serialization (escaping, ordering, compact layout)
//! - Round-trip stability
//! - Accessors and coercions

use linkhub::json::{parse, parse_with_limits, serialize, JsonArray, JsonObject, JsonValue, Limits};
use linkhub::{LinkhubError, LOCAL_ERROR_CODE};
use test_case::test_case;

fn reserialize(input: &str) -> String {
    serialize(&parse(input.as_bytes()).unwrap())
}

fn as_serde(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap()
}

// ============================================================================
// Parsing: UTF-8
// ============================================================================

#[test]
fn utf8_valid_accepted() {
    assert_eq!(parse("\"h\u{e9}llo \u{d55c}\"".as_bytes()).unwrap(), JsonValue::from("h\u{e9}llo \u{d55c}"));
}

#[test]
fn utf8_invalid_rejected() {
    let err = parse(&[b'"', 0xFF, 0xFE, b'"']).unwrap_err();
    assert_eq!(err.name(), "MalformedJson");
    assert_eq!(err.code(), LOCAL_ERROR_CODE);
}

#[test]
fn utf8_overlong_encoding_rejected() {
    assert!(parse(&[b'"', 0xC0, 0xAF, b'"']).is_err());
}

#[test]
fn utf8_leading_bom_skipped() {
    let mut input = vec![0xEF, 0xBB, 0xBF];
    input.extend_from_slice(b"[1]");
    assert_eq!(parse(&input).unwrap().len(), 1);
}

// ============================================================================
// Parsing: Escapes
// ============================================================================

#[test_case(r#""\"""#, "\"" ; "quote")]
#[test_case(r#""\\""#, "\\" ; "backslash")]
#[test_case(r#""\/""#, "/" ; "solidus")]
#[test_case(r#""\b\f\n\r\t""#, "\u{8}\u{c}\n\r\t" ; "short escapes")]
#[test_case(r#""\u0041""#, "A" ; "unicode escape")]
#[test_case(r#""\uD83D\uDE00""#, "\u{1F600}" ; "surrogate pair")]
fn escape_decoded(input: &str, expected: &str) {
    assert_eq!(parse(input.as_bytes()).unwrap().as_str(), Some(expected));
}

#[test_case(r#""\uD800""# ; "unpaired high surrogate")]
#[test_case(r#""\uDC00""# ; "unpaired low surrogate")]
#[test_case(r#""\uD800\u0041""# ; "high surrogate then plain escape")]
#[test_case(r#""\x41""# ; "unknown escape")]
#[test_case(r#""\u12""# ; "short unicode escape")]
#[test_case("\"a\u{1}b\"" ; "raw control character")]
#[test_case(r#""abc"# ; "unterminated string")]
fn bad_string_rejected(input: &str) {
    let err = parse(input.as_bytes()).unwrap_err();
    assert_eq!(err.name(), "MalformedJson", "{}", input);
}

#[test]
fn escaped_duplicate_key_rejected() {
    let err = parse(br#"{"a": 1, "a": 2}"#).unwrap_err();
    assert!(matches!(err, LinkhubError::MalformedJson { .. }));
}

// ============================================================================
// Parsing: Numbers
// ============================================================================

#[test_case("0" ; "zero")]
#[test_case("-0" ; "negative zero")]
#[test_case("42" ; "integer")]
#[test_case("-17" ; "negative integer")]
#[test_case("1.50" ; "trailing zero kept")]
#[test_case("2.5e-3" ; "exponent")]
#[test_case("1E+10" ; "upper exponent")]
#[test_case("123456789012345678901234567890" ; "beyond u64")]
fn number_text_preserved(text: &str) {
    assert_eq!(reserialize(text), text);
}

#[test_case("01" ; "leading zero")]
#[test_case("1." ; "bare point")]
#[test_case(".5" ; "leading point")]
#[test_case("+1" ; "plus sign")]
#[test_case("1e" ; "empty exponent")]
#[test_case("--1" ; "double minus")]
#[test_case("NaN" ; "nan")]
#[test_case("Infinity" ; "infinity")]
fn bad_number_rejected(text: &str) {
    assert!(parse(text.as_bytes()).is_err(), "{}", text);
}

// ============================================================================
// Parsing: Structure
// ============================================================================

#[test_case("" ; "empty input")]
#[test_case("   " ; "only whitespace")]
#[test_case("[1, 2" ; "truncated array")]
#[test_case(r#"{"a": 1"# ; "truncated object")]
#[test_case("[1,]" ; "trailing comma in array")]
#[test_case(r#"{"a":1,}"# ; "trailing comma in object")]
#[test_case(r#"{"a" 1}"# ; "missing colon")]
#[test_case("{1: 2}" ; "non string key")]
#[test_case("[1] [2]" ; "second document")]
#[test_case("true false" ; "trailing literal")]
#[test_case("nul" ; "truncated literal")]
#[test_case(r#"{"a":1,"a":2}"# ; "duplicate key")]
fn malformed_document_rejected(input: &str) {
    let err = parse(input.as_bytes()).unwrap_err();
    assert_eq!(err.name(), "MalformedJson", "{:?}", input);
}

#[test]
fn surrounding_whitespace_accepted() {
    assert_eq!(parse(b" \n\t{ } \r\n").unwrap(), JsonValue::Object(JsonObject::new()));
}

#[test]
fn error_offset_points_at_problem() {
    match parse(b"[1, 2, x]").unwrap_err() {
        LinkhubError::MalformedJson { offset, .. } => assert_eq!(offset, 7),
        other => panic!("unexpected error: {:?}", other),
    }
}

// ============================================================================
// Resource Limits
// ============================================================================

#[test]
fn limit_nesting_depth() {
    let deep = "[".repeat(65) + &"]".repeat(65);
    assert!(matches!(
        parse(deep.as_bytes()),
        Err(LinkhubError::LimitExceeded { what: "nesting depth", .. })
    ));
    assert!(parse_with_limits(deep.as_bytes(), Limits::lenient()).is_ok());
}

#[test]
fn limit_input_size() {
    let limits = Limits {
        max_input_size: 8,
        ..Limits::strict()
    };
    let err = parse_with_limits(b"[1,2,3,4,5]", limits).unwrap_err();
    assert_eq!(
        err,
        LinkhubError::LimitExceeded {
            what: "input size",
            got: 11,
            max: 8
        }
    );
}

#[test]
fn limit_string_length() {
    let limits = Limits {
        max_string_length: 4,
        ..Limits::strict()
    };
    assert!(parse_with_limits(br#""abcd""#, limits).is_ok());
    assert_eq!(
        parse_with_limits(br#""abcde""#, limits).unwrap_err().name(),
        "LimitExceeded"
    );
}

#[test]
fn limit_exceeded_uses_local_code() {
    let limits = Limits {
        max_array_length: 2,
        ..Limits::strict()
    };
    let err = parse_with_limits(b"[1,2,3]", limits).unwrap_err();
    assert_eq!(err.code(), LOCAL_ERROR_CODE);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn serialize_compact_layout() {
    assert_eq!(
        reserialize("{ \"a\" : [ 1 , 2 ] , \"b\" : { } , \"c\" : null }"),
        r#"{"a":[1,2],"b":{},"c":null}"#
    );
}

#[test]
fn serialize_keeps_insertion_order() {
    let mut object = JsonObject::new();
    object.insert("zeta", 1);
    object.insert("alpha", 2);
    object.insert("mid", 3);
    assert_eq!(serialize(&JsonValue::Object(object)), r#"{"zeta":1,"alpha":2,"mid":3}"#);
}

#[test]
fn serialize_replaced_key_keeps_position() {
    let mut object = JsonObject::new();
    object.insert("a", 1);
    object.insert("b", 2);
    assert_eq!(object.insert("a", 3), Some(JsonValue::from(1)));
    assert_eq!(serialize(&JsonValue::Object(object)), r#"{"a":3,"b":2}"#);
}

#[test_case("\"", r#""\"""# ; "quote")]
#[test_case("\\", r#""\\""# ; "backslash")]
#[test_case("\n\r\t", r#""\n\r\t""# ; "whitespace controls")]
#[test_case("\u{8}\u{c}", r#""\b\f""# ; "backspace formfeed")]
#[test_case("\u{0}\u{1f}", r#""\u0000\u001f""# ; "other controls")]
#[test_case("\u{7f}", r#""\u007f""# ; "delete")]
#[test_case("\u{2028}\u{2029}", r#""\u2028\u2029""# ; "line separators")]
#[test_case("/", r#""/""# ; "solidus unescaped")]
#[test_case("\u{d55c}\u{1F600}", "\"\u{d55c}\u{1F600}\"" ; "printable unicode raw")]
fn serialize_string_escaping(input: &str, expected: &str) {
    assert_eq!(serialize(&JsonValue::from(input)), expected);
}

#[test]
fn serialize_display_matches() {
    let value = parse(br#"{"k":[true,false,null]}"#).unwrap();
    assert_eq!(value.to_string(), serialize(&value));
    let reparsed: JsonValue = value.to_string().parse().unwrap();
    assert_eq!(reparsed, value);
}

// ============================================================================
// Round Trip
// ============================================================================

#[test_case(r#"{"session_token":"t","scope":["member","110"],"n":{"x":-1.25e3}}"# ; "token like")]
#[test_case(r#"[[],{},[[{}]],"",0]"# ; "empty containers")]
#[test_case(r#"{"text":"line\nbreak \"quoted\" \\ \u0001"}"# ; "escaped text")]
#[test_case(r#"{"b":1,"a":2,"c":{"z":null,"y":true}}"# ; "unsorted keys")]
fn round_trip_is_identity(input: &str) {
    let value = parse(input.as_bytes()).unwrap();
    let text = serialize(&value);
    assert_eq!(parse(text.as_bytes()).unwrap(), value);
    assert_eq!(serialize(&parse(text.as_bytes()).unwrap()), text);
}

#[test]
fn round_trip_built_tree() {
    let mut inner = JsonArray::new();
    inner.push("s");
    inner.push(7u64);
    inner.push(JsonValue::Null);
    let mut object = JsonObject::new();
    object.insert("inner", inner);
    object.insert("flag", false);
    let value = JsonValue::Object(object);
    assert_eq!(parse(serialize(&value).as_bytes()).unwrap(), value);
}

// ============================================================================
// Differential: serde_json
// ============================================================================

#[test_case(r#"{"a":[1,2,{"b":null}],"c":"d"}"# ; "mixed")]
#[test_case(r#"[0.5,-3,1e2,true,false,null]"# ; "scalars")]
#[test_case(r#""tab\tand é and 😀""# ; "escapes")]
#[test_case(r#"{"nested":{"deeper":{"deepest":[[[]]]}}}"# ; "nesting")]
fn differential_parse_then_serialize(input: &str) {
    let ours = reserialize(input);
    assert_eq!(as_serde(&ours), as_serde(input));
}

#[test]
fn differential_serde_output_parses() {
    let reference = serde_json::json!({
        "access_id": "abc",
        "scope": ["a", "b"],
        "ctrl": "\u{1}\u{1f}",
        "n": 12.5,
        "neg": -7,
    });
    let text = serde_json::to_string(&reference).unwrap();
    let ours = parse(text.as_bytes()).unwrap();
    assert_eq!(ours["scope"][1].as_str(), Some("b"));
    assert_eq!(as_serde(&serialize(&ours)), reference);
}

#[test]
fn differential_strings_match_serde_exactly() {
    for s in ["plain", "quote\"inside", "back\\slash", "nl\n", "\u{0}", "\u{1f}", "\u{e9}"] {
        assert_eq!(
            serialize(&JsonValue::from(s)),
            serde_json::to_string(s).unwrap(),
            "{:?}",
            s
        );
    }
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn accessors_typed_coercion() {
    let value = parse(br#"{"i":-42,"d":2.5,"s":"x","b":true,"n":null,"a":[1],"o":{}}"#).unwrap();
    assert_eq!(value["i"].to_i64().unwrap(), -42);
    assert_eq!(value["d"].to_f64().unwrap(), 2.5);
    assert_eq!(value["s"].to_text().unwrap(), "x");
    assert!(value["b"].to_bool().unwrap());

    assert_eq!(value["s"].to_i64().unwrap_err().name(), "TypeMismatch");
    assert_eq!(value["i"].to_text().unwrap_err().name(), "TypeMismatch");
    assert_eq!(value["n"].to_bool().unwrap_err().name(), "TypeMismatch");
    assert_eq!(value["d"].to_i64().unwrap_err().name(), "TypeMismatch");
}

#[test]
fn accessors_containment_and_length() {
    let value = parse(br#"{"a":[1,2,3],"b":{"c":1}}"#).unwrap();
    assert!(value.contains_key("a"));
    assert!(!value.contains_key("z"));
    assert_eq!(value.len(), 2);
    assert_eq!(value["a"].len(), 3);
    assert!(value["a"].get_index(3).is_none());
    assert!(value["missing"].is_null());
    assert!(value["a"]["key on array"].is_null());

    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
    let items: Vec<i64> = value["a"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(JsonValue::as_i64)
        .collect();
    assert_eq!(items, [1, 2, 3]);
}
