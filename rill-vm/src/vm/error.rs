// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Runtime errors for the engine.

use thiserror::Error;

/// Runtime fault during execution.
///
/// Faults are caught at the dispatch loop boundary, reported with the
/// offending source line, and never propagate past the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An operation tried to pop from an empty operand stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// An operator received an operand of the wrong type.
    #[error("type error: expected {expected}, got {got}")]
    TypeError { expected: &'static str, got: String },

    /// An instruction byte that is not part of the instruction set.
    /// Fatal to the run; only the disassembler recovers from this.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// Engine invariant breach: bad instruction pointer or constant index.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
