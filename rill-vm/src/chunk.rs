// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Bytecode chunks: instruction stream, line map, constant pool.

use crate::memory::GrowBuffer;
use crate::opcode::OpCode;
use crate::value::{Value, ValueArray};

/// Upper bound on constant pool size: pool indices travel in a single
/// operand byte.
pub const MAX_CONSTANTS: usize = 256;

/// A compiled unit of bytecode.
///
/// `code` and `lines` are parallel: `lines[i]` is the source line of the
/// byte at `code[i]`. [`Chunk::write`] is the only mutation path for the
/// pair, so they stay the same length. The line map is uncompressed, one
/// entry per byte.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Instruction bytes: opcodes and their operands.
    pub code: GrowBuffer<u8>,

    /// Source line for each code byte.
    pub lines: GrowBuffer<u32>,

    /// Constant pool, indexed by `Constant` operand bytes.
    pub constants: ValueArray,
}

impl Chunk {
    /// Create a new empty chunk.
    pub fn new() -> Self {
        Self {
            code: GrowBuffer::new(),
            lines: GrowBuffer::new(),
            constants: GrowBuffer::new(),
        }
    }

    /// Append one instruction byte with its source line.
    pub fn write(&mut self, byte: u8, line: u32) {
        self.code.write(byte);
        self.lines.write(line);
    }

    /// Append an opcode with its source line.
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write(op.into(), line);
    }

    /// Add a constant to the pool and return its index.
    ///
    /// Returns `None` when the pool already holds [`MAX_CONSTANTS`]
    /// values. Constants are never deduplicated.
    pub fn add_constant(&mut self, value: Value) -> Option<u8> {
        if self.constants.len() >= MAX_CONSTANTS {
            return None;
        }
        let index = self.constants.len() as u8;
        self.constants.write(value);
        Some(index)
    }

    /// Number of instruction bytes.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Release all three buffers, returning the chunk to its empty state.
    pub fn free(&mut self) {
        self.code.free();
        self.lines.free();
        self.constants.free();
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
