use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::value::Value;

fn render_value(value: Value) -> String {
    match value {
        Value::Literal(n) => n.to_string(),
        Value::Register(i) => format!("r{}", i),
    }
}

fn render_register(index: usize) -> String {
    format!("r{}", index)
}

/// Formats one already-decoded instruction as `[addr] MNEMONIC op1 op2 op3`,
/// rendering register operands as `rN`. Shared by `disassemble` and the
/// VM's instruction tracer so the two can never disagree on formatting.
pub fn render_instruction(addr: u16, instruction: Instruction) -> String {
    let mnemonic = instruction.opcode().mnemonic();
    let operands: Vec<String> = match instruction {
        Instruction::Halt | Instruction::Ret | Instruction::Noop => Vec::new(),
        Instruction::Set(a, b) => vec![render_register(a), render_value(b)],
        Instruction::Push(a) => vec![render_value(a)],
        Instruction::Pop(a) => vec![render_register(a)],
        Instruction::Eq(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Gt(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Jmp(a) => vec![render_value(a)],
        Instruction::Jt(a, b) => vec![render_value(a), render_value(b)],
        Instruction::Jf(a, b) => vec![render_value(a), render_value(b)],
        Instruction::Add(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Mult(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Mod(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::And(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Or(a, b, c) => vec![render_register(a), render_value(b), render_value(c)],
        Instruction::Not(a, b) => vec![render_register(a), render_value(b)],
        Instruction::Rmem(a, b) => vec![render_register(a), render_value(b)],
        Instruction::Wmem(a, b) => vec![render_value(a), render_value(b)],
        Instruction::Call(a) => vec![render_value(a)],
        Instruction::Out(a) => vec![render_value(a)],
        Instruction::In(a) => vec![render_register(a)],
    };

    if operands.is_empty() {
        format!("[{}] {}", addr, mnemonic)
    } else {
        format!("[{}] {} {}", addr, mnemonic, operands.join(" "))
    }
}

/// Pure, context-free linear disassembly of a program image (spec §4.2).
/// Cannot distinguish data from code: a word that decodes as a valid
/// opcode is always rendered as an instruction and its operands skipped
/// over, even if it is actually inline data.
pub fn disassemble(image: &[u16]) -> String {
    let mut addr = 0usize;
    let mut lines = Vec::new();

    while addr < image.len() {
        let word = image[addr];
        let decoded = Opcode::from_word(word).ok().and_then(|opcode| {
            let arity = opcode.arity() as usize;
            if addr + arity < image.len() {
                Instruction::decode(&image[addr..]).ok().map(|i| (i, arity))
            } else {
                None
            }
        });

        match decoded {
            Some((instruction, arity)) => {
                lines.push(render_instruction(addr as u16, instruction));
                addr += 1 + arity;
            }
            None => {
                lines.push(format!("[{}] {}", addr, word));
                addr += 1;
            }
        }
    }

    lines.join("\n")
}
