// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Bytecode compiler and stack-based virtual machine for Rill.
//!
//! Source text is compiled into a [`chunk::Chunk`] by [`compiler`] and
//! executed by the engine in [`vm`]. Runtime values live in [`value`] and
//! [`object`]; every dynamic container in the crate grows through
//! [`memory::GrowBuffer`], which owns the doubling policy later milestones
//! (string table, collector) depend on.

pub mod chunk;
pub mod compiler;
pub mod debug;
pub mod memory;
pub mod object;
pub mod opcode;
pub mod utils;
pub mod value;
pub mod vm;

pub use chunk::Chunk;
pub use compiler::CompileError;
pub use object::{Obj, ObjFunction, ObjNative, ObjString};
pub use opcode::OpCode;
pub use value::Value;
pub use vm::{InterpretResult, RuntimeError, VM};
