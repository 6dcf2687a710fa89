use clap::{App, Arg, SubCommand};
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg};
use std::env;
use std::process;

use synacor_vm::{Config, Mode};

fn main() {
    let matches = App::new("synacor-vm")
        .about("Synacor-architecture VM, disassembler, and game harness")
        .subcommand(
            SubCommand::with_name("run")
                .about("Runs a program image with stdin/stdout bound to IN/OUT")
                .arg(Arg::with_name("IMAGE").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("disasm")
                .about("Prints a linear disassembly of a program image")
                .arg(Arg::with_name("IMAGE").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("debug")
                .about("Runs a program image under the interactive debugger")
                .arg(Arg::with_name("IMAGE").required(true).index(1)),
        )
        .get_matches();

    let (subcommand, image_path) = match matches.subcommand() {
        (name, Some(sub)) if !name.is_empty() => {
            (name, sub.value_of("IMAGE").unwrap().to_string())
        }
        _ => {
            eprintln!("usage: synacor-vm <run|disasm|debug> <image>");
            process::exit(1);
        }
    };

    // clap has already validated the subcommand and image path; route
    // construction through `Config::with` rather than a struct literal so
    // the two stay exercised the same way in production as in its tests.
    let args = vec!["synacor-vm".to_string(), subcommand.to_string(), image_path];
    let config = Config::with(&args)
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        })
        .with_trace(env::var("TRACE").is_ok());

    if config.mode != Mode::Disasm {
        disable_input_buffering();
    }

    if let Err(e) = synacor_vm::run(config) {
        eprintln!("application error: {}", e);
        process::exit(1);
    }
}

/// Puts stdin into raw (non-canonical, non-echoing) mode so a single
/// keypress reaches `IN` immediately, matching the teacher's own
/// `disable_input_buffering`.
fn disable_input_buffering() {
    const STDIN_FILENO: i32 = 0;

    let mut termios = tcgetattr(STDIN_FILENO).unwrap_or_else(|err| {
        eprintln!("failed to read terminal attributes: {}", err);
        process::exit(1);
    });
    termios.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);

    tcsetattr(STDIN_FILENO, SetArg::TCSANOW, &termios).unwrap_or_else(|err| {
        eprintln!("failed to set terminal attributes: {}", err);
        process::exit(1);
    });
}
