use super::*;

#[test]
fn test_defaults() {
    let import = ImportOptions::default();
    assert_eq!(import.signature_policy, SignaturePolicy::FirstDeclared);
    assert_eq!(import.anonymous_identifier_prefix, "Recursive");
    assert_eq!(import.max_depth, 500);
    assert_eq!(import.max_iterations, 100_000);

    let export = ExportOptions::default();
    assert_eq!(export.parameter_prefix, "arg");
    assert_eq!(export.max_depth, 500);
}

#[test]
fn test_empty_json_yields_defaults() {
    assert_eq!(ImportOptions::from_json("{}").unwrap(), ImportOptions::default());
    assert_eq!(ExportOptions::from_json("{}").unwrap(), ExportOptions::default());
}

#[test]
fn test_partial_json_overrides_named_fields() {
    let import =
        ImportOptions::from_json(r#"{ "signaturePolicy": "rejectOverloads", "maxDepth": 8 }"#)
            .unwrap();
    assert_eq!(import.signature_policy, SignaturePolicy::RejectOverloads);
    assert_eq!(import.max_depth, 8);
    assert_eq!(import.max_iterations, 100_000);

    let export = ExportOptions::from_json(r#"{ "parameterPrefix": "p" }"#).unwrap();
    assert_eq!(export.parameter_prefix, "p");
}

#[test]
fn test_unknown_policy_is_rejected() {
    assert!(ImportOptions::from_json(r#"{ "signaturePolicy": "merge" }"#).is_err());
}
