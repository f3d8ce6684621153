use contract_console_core::{validate_interface, Mutability, ValidationError};

#[test]
fn empty_or_whitespace_input_is_rejected() {
    assert_eq!(
        validate_interface("").expect_err("empty"),
        ValidationError::EmptyInput
    );
    assert_eq!(
        validate_interface("   \n\t").expect_err("whitespace"),
        ValidationError::EmptyInput
    );
}

#[test]
fn malformed_json_is_rejected() {
    assert_eq!(
        validate_interface("not json").expect_err("must fail"),
        ValidationError::MalformedSyntax
    );
}

#[test]
fn non_array_json_is_rejected() {
    assert_eq!(
        validate_interface("{}").expect_err("must fail"),
        ValidationError::NotAList
    );
    assert_eq!(
        validate_interface("\"abi\"").expect_err("must fail"),
        ValidationError::NotAList
    );
}

#[test]
fn empty_array_is_rejected() {
    assert_eq!(
        validate_interface("[]").expect_err("must fail"),
        ValidationError::NoEntries
    );
}

#[test]
fn entry_without_type_is_rejected_with_one_based_index() {
    let raw = r#"[{"type":"function","name":"f","inputs":[]},{"name":"g"}]"#;
    let err = validate_interface(raw).expect_err("must fail");
    assert_eq!(err, ValidationError::MissingType { index: 2 });
    assert!(err.to_string().contains("entry 2"));
}

#[test]
fn function_entry_without_a_name_is_rejected() {
    let raw = r#"[{"type":"function","name":"f","inputs":[]},{"type":"function","inputs":[]}]"#;
    let err = validate_interface(raw).expect_err("must fail");
    assert_eq!(
        err,
        ValidationError::BadFunctionEntry {
            index: 2,
            reason: "missing function name".to_owned()
        }
    );
}

#[test]
fn single_function_entry_validates() {
    let raw = r#"[{"type":"function","name":"f","inputs":[]}]"#;
    let functions = validate_interface(raw).expect("valid interface");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "f");
    assert!(functions[0].inputs.is_empty());
    // stateMutability absent defaults to nonpayable.
    assert_eq!(functions[0].mutability, Mutability::NonPayable);
}

#[test]
fn non_function_entries_are_accepted_but_excluded() {
    let raw = r#"[
      {"type":"constructor","inputs":[]},
      {"type":"function","name":"a","inputs":[],"stateMutability":"view"},
      {"type":"event","name":"Moved","inputs":[]},
      {"type":"function","name":"b","inputs":[{"name":"x","type":"uint256"}]},
      {"type":"error","name":"Nope","inputs":[]}
    ]"#;
    let functions = validate_interface(raw).expect("valid interface");
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    // Order of the original description is preserved.
    assert_eq!(names, ["a", "b"]);
    assert_eq!(functions[0].mutability, Mutability::View);
    assert_eq!(functions[1].inputs[0].ty, "uint256");
}

#[test]
fn tuple_components_are_carried_through() {
    let raw = r#"[{
      "type":"function",
      "name":"setConfig",
      "inputs":[{
        "name":"cfg",
        "type":"tuple",
        "components":[{"name":"owner","type":"address"},{"name":"cap","type":"uint256"}]
      }]
    }]"#;
    let functions = validate_interface(raw).expect("valid interface");
    assert_eq!(functions[0].inputs[0].components.len(), 2);
    assert_eq!(functions[0].inputs[0].components[1].ty, "uint256");
}
