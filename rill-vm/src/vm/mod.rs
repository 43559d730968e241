// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Stack-based virtual machine for executing Rill bytecode.

pub mod error;
pub mod handlers;
pub mod stack;

use std::rc::Rc;

use log::{log_enabled, trace, Level};

use crate::chunk::Chunk;
use crate::compiler;
use crate::debug;
use crate::opcode::OpCode;
use crate::utils::{is_falsy, type_name};
use crate::value::Value;

pub use error::{Result, RuntimeError};
pub use stack::ValueStack;

/// Terminal result of interpreting one unit of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

/// The Rill virtual machine.
///
/// One engine instance owns its operand stack and the chunk it is
/// executing; all state is reached through the handle, never through
/// globals. The engine only reads chunks; they are built entirely by the
/// compiler before execution starts.
pub struct VM {
    /// Chunk currently being executed.
    chunk: Option<Rc<Chunk>>,

    /// Instruction pointer: index of the next byte to fetch.
    ip: usize,

    /// Offset of the opcode currently executing, for fault reporting.
    op_offset: usize,

    /// Operand stack.
    pub(crate) stack: ValueStack,
}

impl VM {
    /// Create a new engine.
    pub fn new() -> Self {
        Self {
            chunk: None,
            ip: 0,
            op_offset: 0,
            stack: ValueStack::new(),
        }
    }

    /// Compile and execute one unit of source text.
    ///
    /// A compile failure is reported without executing anything. A runtime
    /// fault is reported with the offending source line and leaves the
    /// operand stack empty, so the engine can be reused afterwards. The
    /// value produced by the final `Return` is printed on success.
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        let chunk = match compiler::compile(source) {
            Ok(chunk) => chunk,
            Err(e) => {
                eprintln!("{}", e);
                return InterpretResult::CompileError;
            }
        };

        match self.run(chunk) {
            Ok(value) => {
                println!("{}", value);
                InterpretResult::Ok
            }
            Err(e) => {
                self.report_fault(&e);
                InterpretResult::RuntimeError
            }
        }
    }

    /// Execute a chunk to completion, returning the value handed back by
    /// its final `Return`.
    ///
    /// This is the embeddable entry point: callers that already hold a
    /// chunk (tests, tools) skip the compiler. On a fault the operand
    /// stack is reset before the error is returned.
    pub fn run(&mut self, chunk: Chunk) -> Result<Value> {
        self.chunk = Some(Rc::new(chunk));
        self.ip = 0;
        self.op_offset = 0;

        let result = self.run_loop();
        if result.is_err() {
            self.stack.reset();
        }
        result
    }

    fn run_loop(&mut self) -> Result<Value> {
        loop {
            self.op_offset = self.ip;
            if log_enabled!(Level::Trace) {
                self.trace_instruction();
            }

            let op = self.read_op()?;
            match op {
                OpCode::Constant => {
                    let value = self.read_constant()?;
                    self.stack.push(value);
                }
                OpCode::Nil => self.stack.push(Value::Nil),
                OpCode::True => self.stack.push(Value::Bool(true)),
                OpCode::False => self.stack.push(Value::Bool(false)),
                OpCode::Equal => {
                    let b = self.stack.pop()?;
                    let a = self.stack.pop()?;
                    self.stack.push(Value::Bool(a == b));
                }
                OpCode::Greater => self.comparison_op(|a, b| a > b, ">")?,
                OpCode::Less => self.comparison_op(|a, b| a < b, "<")?,
                OpCode::Add
                | OpCode::Subtract
                | OpCode::Multiply
                | OpCode::Divide
                | OpCode::Negate => {
                    self.execute_arithmetic(op)?;
                }
                OpCode::Not => {
                    let value = self.stack.pop()?;
                    self.stack.push(Value::Bool(is_falsy(&value)));
                }
                OpCode::Return => {
                    let value = self.stack.pop()?;
                    return Ok(value);
                }
            }
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let chunk = self
            .chunk
            .as_ref()
            .ok_or_else(|| RuntimeError::Internal("no chunk loaded".into()))?;
        let byte = chunk
            .code
            .get(self.ip)
            .copied()
            .ok_or_else(|| RuntimeError::Internal("instruction pointer out of bounds".into()))?;
        self.ip += 1;
        Ok(byte)
    }

    fn read_op(&mut self) -> Result<OpCode> {
        let byte = self.read_byte()?;
        OpCode::try_from(byte).map_err(RuntimeError::UnknownOpcode)
    }

    fn read_constant(&mut self) -> Result<Value> {
        let index = self.read_byte()? as usize;
        let chunk = self
            .chunk
            .as_ref()
            .ok_or_else(|| RuntimeError::Internal("no chunk loaded".into()))?;
        chunk
            .constants
            .get(index)
            .cloned()
            .ok_or_else(|| RuntimeError::Internal(format!("constant index {} out of bounds", index)))
    }

    /// Numbers-only comparison operator.
    fn comparison_op(&mut self, op: impl Fn(f64, f64) -> bool, name: &str) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;

        match (&a, &b) {
            (Value::Number(x), Value::Number(y)) => {
                self.stack.push(Value::Bool(op(*x, *y)));
                Ok(())
            }
            _ => Err(RuntimeError::TypeError {
                expected: "numbers",
                got: format!("{} {} {}", type_name(&a), name, type_name(&b)),
            }),
        }
    }

    /// Report a runtime fault: the error itself, then the source line of
    /// the instruction that raised it.
    fn report_fault(&self, error: &RuntimeError) {
        eprintln!("{}", error);
        if let Some(chunk) = &self.chunk {
            if let Some(line) = chunk.lines.get(self.op_offset) {
                eprintln!("[line {}] in script", line);
            }
        }
    }

    /// Log the stack and the instruction about to execute.
    fn trace_instruction(&self) {
        let Some(chunk) = &self.chunk else { return };
        if self.ip >= chunk.len() {
            return;
        }
        trace!("          {}", self.stack);
        let mut text = String::new();
        debug::disassemble_instruction(chunk, self.ip, &mut text);
        trace!("{}", text.trim_end());
    }

    /// Release engine state: the loaded chunk and the operand stack.
    /// Symmetric with [`VM::new`].
    pub fn free(&mut self) {
        self.chunk = None;
        self.ip = 0;
        self.op_offset = 0;
        self.stack.free();
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}
