// rill-vm - Value and object model tests
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Tests for value equality, display, truthiness, and string hashing.

use std::rc::Rc;

use rill_vm::object::{hash_bytes, ObjFunction, ObjString, FNV_OFFSET_BASIS};
use rill_vm::utils::{is_falsy, type_name};
use rill_vm::value::Value;

// =============================================================================
// Equality
// =============================================================================

#[test]
fn same_tag_values_compare_by_payload() {
    assert_eq!(Value::Bool(true), Value::Bool(true));
    assert_ne!(Value::Bool(true), Value::Bool(false));
    assert_eq!(Value::Nil, Value::Nil);
    assert_eq!(Value::Number(1.5), Value::Number(1.5));
    assert_ne!(Value::Number(1.5), Value::Number(2.5));
}

#[test]
fn equality_is_symmetric() {
    let pairs = [
        (Value::Bool(false), Value::Bool(false)),
        (Value::Nil, Value::Nil),
        (Value::Number(42.0), Value::Number(42.0)),
        (
            Value::string(ObjString::copy("abc")),
            Value::string(ObjString::copy("abc")),
        ),
    ];
    for (a, b) in pairs {
        assert_eq!(a == b, b == a);
        assert!(a == b);
    }
}

#[test]
fn different_tags_are_unequal() {
    assert_ne!(Value::Number(0.0), Value::Bool(false));
    assert_ne!(Value::Nil, Value::Bool(false));
    assert_ne!(Value::Number(0.0), Value::Nil);
    assert_ne!(Value::string(ObjString::copy("1")), Value::Number(1.0));
}

#[test]
fn nan_is_unequal_to_itself() {
    let nan = Value::Number(f64::NAN);
    assert_ne!(nan.clone(), nan);
}

#[test]
fn separately_built_strings_compare_structurally() {
    let a = Value::string(ObjString::copy("hello"));
    let b = Value::string(ObjString::take("hello".to_string()));
    assert_eq!(a, b);
    assert_ne!(a, Value::string(ObjString::copy("world")));
}

#[test]
fn functions_compare_by_identity() {
    let f = Value::function(ObjFunction::new(None));
    assert_eq!(f.clone(), f);

    let g = Value::function(ObjFunction::new(None));
    assert_ne!(f, g);
}

#[test]
fn natives_compare_by_identity() {
    fn clock(_args: &[Value]) -> Value {
        Value::Number(0.0)
    }

    let a = Value::native(clock);
    assert_eq!(a.clone(), a);

    // Same host function, separately allocated wrappers.
    let b = Value::native(clock);
    assert_ne!(a, b);
}

// =============================================================================
// Hashing
// =============================================================================

#[test]
fn empty_string_hashes_to_offset_basis() {
    assert_eq!(hash_bytes(b""), FNV_OFFSET_BASIS);
    assert_eq!(hash_bytes(b""), 2_166_136_261);
    assert_eq!(ObjString::copy("").hash(), FNV_OFFSET_BASIS);
}

#[test]
fn hash_matches_published_vectors() {
    // FNV-1a 32-bit reference values.
    assert_eq!(hash_bytes(b"a"), 0xe40c292c);
    assert_eq!(hash_bytes(b"foobar"), 0xbf9cf968);
}

#[test]
fn take_and_copy_hash_identically() {
    let taken = ObjString::take("lexeme".to_string());
    let copied = ObjString::copy("lexeme");
    assert_eq!(taken.hash(), copied.hash());
    assert_eq!(taken.hash(), hash_bytes(b"lexeme"));
}

#[test]
fn hash_is_cached_at_construction() {
    let s = ObjString::copy("stable");
    let first = s.hash();
    assert_eq!(s.hash(), first);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_formats() {
    assert_eq!(Value::Number(1.2).to_string(), "1.2");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::string(ObjString::copy("raw")).to_string(), "raw");
}

#[test]
fn function_display_uses_name_or_script() {
    let anonymous = Value::function(ObjFunction::new(None));
    assert_eq!(anonymous.to_string(), "<script>");

    let name = Rc::new(ObjString::copy("whale"));
    let named = Value::function(ObjFunction::new(Some(name)));
    assert_eq!(named.to_string(), "<fn whale>");
}

#[test]
fn native_display() {
    fn noop(_args: &[Value]) -> Value {
        Value::Nil
    }
    assert_eq!(Value::native(noop).to_string(), "<native fn>");
}

// =============================================================================
// Truthiness and type names
// =============================================================================

#[test]
fn nil_and_false_are_falsy() {
    assert!(is_falsy(&Value::Nil));
    assert!(is_falsy(&Value::Bool(false)));
}

#[test]
fn everything_else_is_truthy() {
    assert!(!is_falsy(&Value::Bool(true)));
    assert!(!is_falsy(&Value::Number(0.0)));
    assert!(!is_falsy(&Value::string(ObjString::copy(""))));
}

#[test]
fn type_names() {
    assert_eq!(type_name(&Value::Nil), "nil");
    assert_eq!(type_name(&Value::Bool(true)), "boolean");
    assert_eq!(type_name(&Value::Number(1.0)), "number");
    assert_eq!(type_name(&Value::string(ObjString::copy("s"))), "string");
    assert_eq!(type_name(&Value::function(ObjFunction::new(None))), "function");
}

// =============================================================================
// Narrowing accessors
// =============================================================================

#[test]
fn accessors_return_payload_when_tag_matches() {
    assert_eq!(Value::Number(3.5).as_number(), 3.5);
    assert!(Value::Bool(true).as_bool());
    assert_eq!(Value::string(ObjString::copy("x")).as_string().as_str(), "x");
}

#[test]
#[should_panic(expected = "as_number called on")]
fn as_number_on_wrong_tag_panics() {
    let _ = Value::Bool(true).as_number();
}
