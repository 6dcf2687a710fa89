mod call_trap;
mod config;
mod debugger;
mod disassemble;
mod error;
mod file_loader;
mod game;
mod instruction;
mod memory;
mod opcode;
mod registers;
mod value;
mod vm;

pub use crate::call_trap::CallTrapEffect;
pub use crate::config::{Config, Mode};
pub use crate::disassemble::disassemble;
pub use crate::error::VmError;
pub use crate::game::{Game, GameState};
pub use crate::vm::{VmState, VM};

use std::error::Error;
use std::io::{self, Read, Write};

/// Dispatches a parsed `Config` to the run/disasm/debug driver it selects.
/// This is the library's sole entry point, mirroring the teacher's thin
/// `lib.rs::run`.
pub fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let image = file_loader::read_image(&config.image_path)?;

    match config.mode {
        Mode::Run => run_vm(&image, config.trace),
        Mode::Disasm => {
            println!("{}", disassemble(&image));
            Ok(())
        }
        Mode::Debug => {
            let mut vm = VM::new(&image);
            vm.set_trace(config.trace);
            debugger::run(vm)
        }
    }
}

/// Runs the VM to completion with stdin/stdout bound to `IN`/`OUT`, per
/// spec §6's CLI surface.
fn run_vm(image: &[u16], trace: bool) -> Result<(), Box<dyn Error>> {
    let mut vm = VM::new(image);
    vm.set_trace(trace);

    let stdin = io::stdin();
    let mut bytes = stdin.lock().bytes();

    loop {
        match vm.state() {
            VmState::Halt => return Ok(()),
            VmState::Out => {
                print!("{}", vm.output() as char);
                io::stdout().flush()?;
            }
            VmState::In => match bytes.next() {
                Some(byte) => vm.input(byte?),
                None => return Ok(()),
            },
            VmState::Run => {}
        }
        vm.step()?;
    }
}
