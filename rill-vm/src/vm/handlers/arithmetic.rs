// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Arithmetic opcode handlers: Add, Subtract, Multiply, Divide, Negate.

use crate::object::{Obj, ObjString};
use crate::opcode::OpCode;
use crate::utils::type_name;
use crate::value::Value;
use crate::vm::{Result, RuntimeError, VM};

impl VM {
    /// Execute an arithmetic opcode.
    pub(crate) fn execute_arithmetic(&mut self, op: OpCode) -> Result<()> {
        match op {
            OpCode::Add => self.execute_add(),
            OpCode::Subtract => self.binary_num_op(|a, b| a - b, "-"),
            OpCode::Multiply => self.binary_num_op(|a, b| a * b, "*"),
            // Division by zero follows IEEE 754: infinity or NaN, not a fault.
            OpCode::Divide => self.binary_num_op(|a, b| a / b, "/"),
            OpCode::Negate => self.execute_negate(),
            _ => Err(RuntimeError::Internal(format!(
                "execute_arithmetic: unexpected opcode {:?}",
                op
            ))),
        }
    }

    /// Add two numbers, or concatenate two strings into a freshly built
    /// result. The concatenation buffer is handed to the string object
    /// without copying.
    fn execute_add(&mut self) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;

        match (&a, &b) {
            (Value::Number(x), Value::Number(y)) => {
                self.stack.push(Value::Number(x + y));
                Ok(())
            }
            (Value::Obj(x), Value::Obj(y)) => match (&**x, &**y) {
                (Obj::String(left), Obj::String(right)) => {
                    let mut chars = String::with_capacity(left.len() + right.len());
                    chars.push_str(left.as_str());
                    chars.push_str(right.as_str());
                    let result = Value::string(ObjString::take(chars));
                    self.stack.push(result);
                    Ok(())
                }
                _ => Err(add_type_error(&a, &b)),
            },
            _ => Err(add_type_error(&a, &b)),
        }
    }

    fn execute_negate(&mut self) -> Result<()> {
        let value = self.stack.pop()?;
        match value {
            Value::Number(n) => {
                self.stack.push(Value::Number(-n));
                Ok(())
            }
            _ => Err(RuntimeError::TypeError {
                expected: "a number",
                got: type_name(&value).to_string(),
            }),
        }
    }

    /// Numbers-only binary operator.
    fn binary_num_op(&mut self, op: impl Fn(f64, f64) -> f64, name: &str) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;

        match (&a, &b) {
            (Value::Number(x), Value::Number(y)) => {
                self.stack.push(Value::Number(op(*x, *y)));
                Ok(())
            }
            _ => Err(RuntimeError::TypeError {
                expected: "numbers",
                got: format!("{} {} {}", type_name(&a), name, type_name(&b)),
            }),
        }
    }
}

fn add_type_error(a: &Value, b: &Value) -> RuntimeError {
    RuntimeError::TypeError {
        expected: "two numbers or two strings",
        got: format!("{} + {}", type_name(a), type_name(b)),
    }
}
