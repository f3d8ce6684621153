use alloy::primitives::I256;

use contract_console_core::{coerce, type_description, type_hint, ParamValue};

#[test]
fn uint_parses_decimal_digits() {
    let value = coerce("uint256", "123").expect("valid uint");
    assert_eq!(value, ParamValue::Int(I256::try_from(123).expect("i256")));
}

#[test]
fn uint_rejects_non_numeric_input() {
    let err = coerce("uint256", "abc").expect_err("must fail");
    assert!(err.to_string().contains("uint256"));
    assert!(err.to_string().contains("abc"));
}

#[test]
fn int_accepts_negative_values() {
    let value = coerce("int256", "-42").expect("valid int");
    assert_eq!(value, ParamValue::Int(I256::try_from(-42).expect("i256")));
}

#[test]
fn address_is_checksummed_and_idempotent() {
    let raw = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    let first = coerce("address", raw).expect("valid address");
    let rendered = first.to_string();
    // EIP-55 mixed case comes out of the first pass.
    assert_ne!(rendered, raw);
    assert_eq!(rendered.to_lowercase(), raw);

    let second = coerce("address", &rendered).expect("re-coerce own output");
    assert_eq!(first, second);
}

#[test]
fn zero_address_round_trips_unchanged() {
    let zero = "0x0000000000000000000000000000000000000000";
    let value = coerce("address", zero).expect("valid address");
    assert_eq!(value.to_string(), zero);
}

#[test]
fn invalid_address_is_rejected() {
    coerce("address", "invalid").expect_err("must fail");
    coerce("address", "0x1234").expect_err("too short");
}

#[test]
fn bool_is_permissive_and_never_errors() {
    assert_eq!(coerce("bool", "TRUE").expect("bool"), ParamValue::Bool(true));
    assert_eq!(coerce("bool", "true").expect("bool"), ParamValue::Bool(true));
    assert_eq!(
        coerce("bool", "anything-else").expect("bool"),
        ParamValue::Bool(false)
    );
    assert_eq!(
        coerce("bool", "FALSE").expect("bool"),
        ParamValue::Bool(false)
    );
}

#[test]
fn array_splits_on_commas_and_trims() {
    let value = coerce("uint256[]", "1, 2,3").expect("valid array");
    let expected: Vec<ParamValue> = [1, 2, 3]
        .iter()
        .map(|n| ParamValue::Int(I256::try_from(*n).expect("i256")))
        .collect();
    assert_eq!(value, ParamValue::Array(expected));
}

#[test]
fn array_element_failure_names_outer_type_and_raw() {
    let err = coerce("uint256[]", "1, nope, 3").expect_err("must fail");
    assert!(err.to_string().contains("uint256[]"));
    assert!(err.to_string().contains("1, nope, 3"));
}

#[test]
fn plain_bytes_is_utf8_encoded_text() {
    let value = coerce("bytes", "hi").expect("bytes");
    assert_eq!(value, ParamValue::Bytes(vec![0x68, 0x69]));
    assert_eq!(value.to_string(), "0x6869");
}

#[test]
fn sized_bytes_passes_through_unvalidated() {
    // bytesN is deliberately not checked here; the call executor validates.
    let value = coerce("bytes32", "0xdeadbeef").expect("passthrough");
    assert_eq!(value, ParamValue::String("0xdeadbeef".to_owned()));
    let garbage = coerce("bytes32", "not-hex").expect("passthrough");
    assert_eq!(garbage, ParamValue::String("not-hex".to_owned()));
}

#[test]
fn empty_input_coerces_to_empty_string_for_any_type() {
    for ty in ["uint256", "address", "bool", "bytes", "bytes32", "uint256[]"] {
        let value = coerce(ty, "").expect("empty passthrough");
        assert_eq!(value, ParamValue::String(String::new()), "type {ty}");
    }
}

#[test]
fn unknown_types_pass_through_as_strings() {
    let value = coerce("string", "hello").expect("string");
    assert_eq!(value, ParamValue::String("hello".to_owned()));
    let tuple = coerce("tuple", "whatever").expect("fallback");
    assert_eq!(tuple, ParamValue::String("whatever".to_owned()));
}

#[test]
fn coercion_is_deterministic() {
    for (ty, raw) in [
        ("uint256", "987654321"),
        ("address", "0x000000000000000000000000000000000000CAFE"),
        ("bool", "true"),
        ("bytes", "abc"),
        ("uint256[]", "5,6"),
    ] {
        assert_eq!(
            coerce(ty, raw).expect("first"),
            coerce(ty, raw).expect("second"),
            "type {ty}"
        );
    }
}

#[test]
fn hints_and_descriptions_cover_the_type_categories() {
    assert!(type_hint("uint256").contains("integer"));
    assert!(type_hint("address").contains("0x"));
    assert!(type_hint("uint256[]").contains("comma"));
    assert!(type_description("bool").contains("true"));
    assert!(type_description("bytes").contains("hex"));
    assert!(!type_description("somethingodd").is_empty());
}
