//! Golden message test runner
//!
//! Feeds every case in `tests/golden/messages.json` through the public
//! pipeline and compares the serialized payload field for field. Also checks
//! the safety invariants that must hold for every golden output.

use chatshield::{sanitize_message, sanitize_payload};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;

/// Root structure of the golden file
#[derive(Debug, Deserialize)]
struct GoldenFile {
    #[serde(rename = "$schema")]
    #[allow(dead_code)]
    schema: Option<String>,
    description: String,
    cases: Vec<GoldenCase>,
}

#[derive(Debug, Deserialize)]
struct GoldenCase {
    name: String,
    input: Value,
    expected: Value,
}

// ============================================================================
// Test utilities
// ============================================================================

fn golden_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/golden")
}

fn load_cases() -> GoldenFile {
    let path = format!("{}/messages.json", golden_dir());
    let content = fs::read_to_string(&path).expect("Failed to read messages.json");
    serde_json::from_str(&content).expect("messages.json is not a valid golden file")
}

/// Validate that a JSON value contains all expected fields
fn validate_has_fields(value: &Value, fields: &[&str], context: &str) {
    if let Value::Object(map) = value {
        for field in fields {
            assert!(
                map.contains_key(*field),
                "{}: missing required field '{}'",
                context,
                field
            );
        }
    } else {
        panic!("{}: expected object, got {:?}", context, value);
    }
}

// ============================================================================
// Golden cases
// ============================================================================

#[test]
fn test_golden_file_is_well_formed() {
    let golden = load_cases();
    assert!(!golden.description.is_empty());
    assert!(!golden.cases.is_empty());

    let mut names = HashSet::new();
    for case in &golden.cases {
        assert!(names.insert(case.name.as_str()), "duplicate case name: {}", case.name);
        validate_has_fields(&case.expected, &["name", "color", "caption"], &case.name);
    }
}

#[test]
fn test_golden_cases_match() {
    for case in load_cases().cases {
        let out = sanitize_message(&case.input);
        let actual: Value = serde_json::from_str(&out)
            .unwrap_or_else(|e| panic!("{}: output is not JSON ({e}): {out}", case.name));
        assert_eq!(actual, case.expected, "case '{}'", case.name);
    }
}

#[test]
fn test_golden_typed_payload_agrees() {
    for case in load_cases().cases {
        let typed = serde_json::to_value(sanitize_payload(&case.input)).unwrap();
        assert_eq!(typed, case.expected, "case '{}'", case.name);
    }
}

#[test]
fn test_golden_outputs_hold_invariants() {
    for case in load_cases().cases {
        let out: Value = serde_json::from_str(&sanitize_message(&case.input)).unwrap();
        for field in ["name", "caption"] {
            let text = out[field].as_str().unwrap().to_lowercase();
            assert!(!text.contains("<script"), "{}: {field} has a script tag", case.name);
            assert!(!text.contains("javascript:"), "{}: {field} has javascript:", case.name);
            assert!(!text.contains(['<', '>', '"', '\'']), "{}: {field} not escaped", case.name);
        }
        if let Some(src) = out.get("src").and_then(Value::as_str) {
            assert!(
                !out["caption"].as_str().unwrap().contains(src),
                "{}: classified URL left in caption",
                case.name
            );
        }
    }
}
