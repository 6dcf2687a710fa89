use lazy_static::lazy_static;
use regex::Regex;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::disassemble::render_instruction;
use crate::instruction::Instruction;
use crate::vm::{VmState, VM};

lazy_static! {
    static ref READ_REGEX: Regex = Regex::new(r"^read 0x([a-f0-9]{1,4})$").unwrap();
    static ref BREAK_REGEX: Regex = Regex::new(r"^break 0x([a-f0-9]{1,4})$").unwrap();
}

/// Interactive REPL over a running `VM`, adapted from the teacher's LC-3
/// debugger: the same command set (`continue`/`inspect`/`disassemble`/
/// `read`/`break`/`help`/`exit`), retargeted at the Synacor VM's four-state
/// suspend/resume machine instead of condition-code state.
pub fn run(mut vm: VM) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = Editor::<()>::new();
    let mut break_address: Option<u16> = None;

    loop {
        if vm.state() == VmState::Halt {
            println!("halted.");
            break;
        }

        let readline = rl.readline(&format!("{:#06x}> ", vm.debug_pc()));
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str());

                match line.as_str() {
                    "c" | "continue" => run_until_break_or_suspend(&mut vm, break_address)?,

                    "i" | "inspect" => {
                        println!("pc={:#06x} state={:?}", vm.debug_pc(), vm.state());
                    }

                    "d" | "disassemble" => {
                        let words = fetch_words(&vm, vm.debug_pc());
                        match Instruction::decode(&words) {
                            Ok(instruction) => {
                                println!("{}", render_instruction(vm.debug_pc(), instruction))
                            }
                            Err(_) => println!("not a valid instruction at this address"),
                        }
                    }

                    line if READ_REGEX.is_match(line) => {
                        let addr = &READ_REGEX.captures(line).unwrap()[1];
                        let addr = u16::from_str_radix(addr, 16)?;
                        println!("{:#06x}", vm.debug_peek(addr));
                    }

                    line if BREAK_REGEX.is_match(line) => {
                        let addr = &BREAK_REGEX.captures(line).unwrap()[1];
                        let addr = u16::from_str_radix(addr, 16)?;
                        break_address = Some(addr);
                        println!("breakpoint set at {:#06x}", addr);
                    }

                    "h" | "help" => {
                        println!("c, continue       Continue execution (until halt or breakpoint).");
                        println!("i, inspect        Print pc and VM state.");
                        println!("d, disassemble    Disassemble the current instruction.");
                        println!("   read <addr>    Read memory. e.g. read 0x1a");
                        println!("   break <addr>   Set a breakpoint. e.g. break 0x1a");
                        println!("exit              Quit the debugger.");
                    }

                    "exit" => break,

                    "" => {}

                    other => println!("unknown command: {:?}", other),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("readline error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn run_until_break_or_suspend(
    vm: &mut VM,
    break_address: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if Some(vm.debug_pc()) == break_address {
            println!("breakpoint hit at {:#06x}", vm.debug_pc());
            return Ok(());
        }
        vm.step()?;
        match vm.state() {
            VmState::Run => continue,
            VmState::Out => {
                print!("{}", vm.output() as char);
                continue;
            }
            VmState::In | VmState::Halt => return Ok(()),
        }
    }
}

fn fetch_words(vm: &VM, addr: u16) -> [u16; 4] {
    [
        vm.debug_peek(addr),
        vm.debug_peek(addr.wrapping_add(1)),
        vm.debug_peek(addr.wrapping_add(2)),
        vm.debug_peek(addr.wrapping_add(3)),
    ]
}
