// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Runtime value representation.

use std::fmt;
use std::rc::Rc;

use crate::memory::GrowBuffer;
use crate::object::{NativeFn, Obj, ObjFunction, ObjNative, ObjString};
use crate::utils::type_name;

/// A sequence of values; backs the constant pool and the operand stack.
pub type ValueArray = GrowBuffer<Value>;

/// A runtime value: the closed four-variant tagged union every part of the
/// engine computes with.
///
/// Heap entities are shared behind [`Rc`]; no collector exists in this
/// milestone, so an object lives until the last value slot referencing it
/// is released.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Nil,
    Number(f64),
    Obj(Rc<Obj>),
}

impl Value {
    /// Wrap a string object in a value.
    pub fn string(string: ObjString) -> Self {
        Value::Obj(Rc::new(Obj::String(string)))
    }

    /// Wrap a function object in a value.
    pub fn function(function: ObjFunction) -> Self {
        Value::Obj(Rc::new(Obj::Function(function)))
    }

    /// Wrap a host function in a value.
    pub fn native(function: NativeFn) -> Self {
        Value::Obj(Rc::new(Obj::Native(ObjNative::new(function))))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_obj(&self) -> bool {
        matches!(self, Value::Obj(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Obj(obj) if obj.is_string())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Obj(obj) if obj.is_function())
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Value::Obj(obj) if obj.is_native())
    }

    // Narrowing accessors. A tag mismatch here is an engine bug, not a
    // user error: the dispatch loop checks tags before narrowing, so
    // these panics are unreachable from well-formed bytecode.

    /// The boolean payload. Panics unless the tag is `Bool`.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => panic!("as_bool called on {}", type_name(self)),
        }
    }

    /// The numeric payload. Panics unless the tag is `Number`.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            _ => panic!("as_number called on {}", type_name(self)),
        }
    }

    /// The heap object. Panics unless the tag is `Obj`.
    pub fn as_obj(&self) -> &Rc<Obj> {
        match self {
            Value::Obj(obj) => obj,
            _ => panic!("as_obj called on {}", type_name(self)),
        }
    }

    /// The string object. Panics unless the value holds a string.
    pub fn as_string(&self) -> &ObjString {
        match self {
            Value::Obj(obj) => match &**obj {
                Obj::String(string) => string,
                _ => panic!("as_string called on {}", type_name(self)),
            },
            _ => panic!("as_string called on {}", type_name(self)),
        }
    }
}

impl PartialEq for Value {
    /// Tag-then-payload equality. Numbers use native float equality, so
    /// NaN is unequal to itself. Strings compare cached length then
    /// character sequence; other heap objects compare by identity.
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => match (&**a, &**b) {
                (Obj::String(a), Obj::String(b)) => {
                    a.len() == b.len() && a.as_str() == b.as_str()
                }
                _ => Rc::ptr_eq(a, b),
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Obj(obj) => write!(f, "{}", obj),
        }
    }
}
