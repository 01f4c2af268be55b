//! Properties of the validation contract that must hold for any instance:
//! verdict consistency, idempotence, and monotonic strictness when a schema
//! gains a `required` field.

use apilab_schema::{validate_schema, CompiledValidator};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Arbitrary JSON values, biased towards order-shaped objects.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9@._ -]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("orderId".to_string()),
                    Just("amount".to_string()),
                    Just("category".to_string()),
                    "[a-z]{1,8}",
                ],
                inner,
                0..6,
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn base_schema() -> Value {
    json!({
        "type": "object",
        "required": ["orderId"],
        "properties": {
            "orderId": { "type": "string" },
            "amount": { "type": "number" },
            "category": { "enum": ["standard", "express", "b2b"] }
        }
    })
}

/// `base_schema` with `amount` additionally required.
fn stricter_schema() -> Value {
    let mut schema = base_schema();
    schema["required"] = json!(["orderId", "amount"]);
    schema
}

proptest! {
    #[test]
    fn valid_iff_no_errors(instance in json_value()) {
        let verdict = validate_schema(&instance, &base_schema()).unwrap();
        prop_assert_eq!(verdict.is_valid(), verdict.errors().is_empty());
    }

    #[test]
    fn validation_is_deterministic(instance in json_value()) {
        let validator = CompiledValidator::compile(&base_schema()).unwrap();
        let first = validator.validate(&instance);
        let second = validator.validate(&instance);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn is_valid_agrees_with_validate(instance in json_value()) {
        let validator = CompiledValidator::compile(&base_schema()).unwrap();
        prop_assert_eq!(validator.is_valid(&instance), validator.validate(&instance).is_valid());
    }

    #[test]
    fn adding_required_field_never_admits_more(instance in json_value()) {
        let loose = validate_schema(&instance, &base_schema()).unwrap();
        let strict = validate_schema(&instance, &stricter_schema()).unwrap();
        if strict.is_valid() {
            prop_assert!(loose.is_valid());
        }
        prop_assert!(strict.errors().len() >= loose.errors().len());
    }
}

#[test]
fn stricter_schema_rejects_what_base_accepts() {
    let instance = json!({"orderId": "A1"});
    assert!(validate_schema(&instance, &base_schema()).unwrap().is_valid());
    assert!(!validate_schema(&instance, &stricter_schema()).unwrap().is_valid());
}

#[test]
fn independent_violations_are_counted_individually() {
    let schema = json!({
        "type": "object",
        "required": ["orderId", "amount", "currency"],
        "properties": {
            "orderId": { "type": "string" },
            "amount": { "type": "number" },
            "currency": { "enum": ["EUR", "USD"] },
            "email": { "type": "string", "format": "email" }
        },
        "additionalProperties": false
    });

    let cases = [
        (json!({"orderId": 1, "amount": "x", "currency": "EUR"}), 2),
        (json!({"orderId": 1, "amount": "x", "currency": "GBP"}), 3),
        (json!({"email": "nope", "currency": "GBP"}), 4),
        (json!({"orderId": 1, "amount": "x", "currency": "GBP", "email": "nope", "extra": true}), 5),
    ];

    for (instance, expected) in cases {
        let verdict = validate_schema(&instance, &schema).unwrap();
        assert_eq!(
            verdict.errors().len(),
            expected,
            "instance {instance} produced {:?}",
            verdict.errors()
        );
    }
}
