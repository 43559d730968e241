// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Diagnostic disassembler.
//!
//! Read-only decoding of a chunk into human-readable text. An unknown
//! opcode byte is reported and skipped so a trace can continue past
//! corruption; the execution engine treats the same condition as fatal.

use std::fmt::Write;

use crate::chunk::Chunk;
use crate::opcode::OpCode;

/// Render a whole chunk, one instruction per line, under a header.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", name);

    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(chunk, offset, &mut out);
    }
    out
}

/// Decode the instruction starting at `offset` into `out` and return the
/// offset of the next instruction.
///
/// `offset` must be less than `chunk.len()`. The line column repeats the
/// source line of the instruction, except that a `|` marker stands in when
/// the line is unchanged from the immediately preceding instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    let _ = write!(out, "{:04} ", offset);

    let line = chunk.lines[offset];
    if offset > 0 && chunk.lines[offset - 1] == line {
        let _ = write!(out, "   | ");
    } else {
        let _ = write!(out, "{:4} ", line);
    }

    let byte = chunk.code[offset];
    match OpCode::try_from(byte) {
        Ok(OpCode::Constant) => constant_instruction(OpCode::Constant.name(), chunk, offset, out),
        Ok(op) => simple_instruction(op.name(), offset, out),
        Err(byte) => {
            let _ = writeln!(out, "Unknown opcode {}", byte);
            offset + 1
        }
    }
}

fn simple_instruction(name: &str, offset: usize, out: &mut String) -> usize {
    let _ = writeln!(out, "{}", name);
    offset + 1
}

fn constant_instruction(name: &str, chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    let Some(&index) = chunk.code.get(offset + 1) else {
        let _ = writeln!(out, "{:<16} <truncated>", name);
        return offset + 1;
    };

    match chunk.constants.get(index as usize) {
        Some(value) => {
            let _ = writeln!(out, "{:<16} {:4} '{}'", name, index, value);
        }
        None => {
            let _ = writeln!(out, "{:<16} {:4} '<bad constant>'", name, index);
        }
    }
    offset + 2
}
