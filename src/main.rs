// rill - A small scripting language with a bytecode virtual machine
// Copyright (c) 2025 The Rill Authors. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use rill_vm::vm::InterpretResult;
use rill_vm::VM;

fn main() {
    // RUST_LOG=trace enables the engine's per-instruction trace.
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut vm = VM::new();

    match args.len() {
        1 => repl(&mut vm),
        2 => run_file(&args[1], &mut vm),
        _ => {
            eprintln!("Usage: rill [path]");
            process::exit(64);
        }
    }

    vm.free();
}

/// Interactive read-eval loop. An empty line (or end of input) ends the
/// session.
fn repl(vm: &mut VM) {
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    println!();
                    break;
                }
                vm.interpret(line);
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

/// Interpret a whole source file, mapping the result to an exit code:
/// 65 for a compile error, 70 for a runtime error, 74 if the file cannot
/// be read.
fn run_file(path: &str, vm: &mut VM) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Could not read '{}': {}", path, e);
            process::exit(74);
        }
    };

    match vm.interpret(&source) {
        InterpretResult::CompileError => process::exit(65),
        InterpretResult::RuntimeError => process::exit(70),
        InterpretResult::Ok => {}
    }
}
