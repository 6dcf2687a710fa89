use crate::error::VmError;
use crate::opcode::Opcode;
use crate::value::Value;

/// A fully decoded instruction: opcode plus typed operands. Operands that
/// the table requires to name a register (the write target of `SET`,
/// `POP`, `IN`, and the arithmetic/memory-read ops) are stored as a bare
/// register index rather than a `Value`, so an invalid target is rejected
/// at decode time instead of at execution time.
#[derive(Debug, Clone, Copy)]
pub enum Instruction {
    Halt,
    Set(usize, Value),
    Push(Value),
    Pop(usize),
    Eq(usize, Value, Value),
    Gt(usize, Value, Value),
    Jmp(Value),
    Jt(Value, Value),
    Jf(Value, Value),
    Add(usize, Value, Value),
    Mult(usize, Value, Value),
    Mod(usize, Value, Value),
    And(usize, Value, Value),
    Or(usize, Value, Value),
    Not(usize, Value),
    Rmem(usize, Value),
    Wmem(Value, Value),
    Call(Value),
    Ret,
    Out(Value),
    In(usize),
    Noop,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Halt => Opcode::Halt,
            Instruction::Set(..) => Opcode::Set,
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop(_) => Opcode::Pop,
            Instruction::Eq(..) => Opcode::Eq,
            Instruction::Gt(..) => Opcode::Gt,
            Instruction::Jmp(_) => Opcode::Jmp,
            Instruction::Jt(..) => Opcode::Jt,
            Instruction::Jf(..) => Opcode::Jf,
            Instruction::Add(..) => Opcode::Add,
            Instruction::Mult(..) => Opcode::Mult,
            Instruction::Mod(..) => Opcode::Mod,
            Instruction::And(..) => Opcode::And,
            Instruction::Or(..) => Opcode::Or,
            Instruction::Not(..) => Opcode::Not,
            Instruction::Rmem(..) => Opcode::Rmem,
            Instruction::Wmem(..) => Opcode::Wmem,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Out(_) => Opcode::Out,
            Instruction::In(_) => Opcode::In,
            Instruction::Noop => Opcode::Noop,
        }
    }

    /// Decodes one instruction from `words[0..]`, where `words[0]` is the
    /// opcode word and `words[1..]` are its operands (as many as `arity`
    /// requires; extras are ignored). Returns `InvalidOpcode`/
    /// `InvalidOperand`/`InvalidRegister` exactly as spec §7 defines them.
    pub fn decode(words: &[u16]) -> Result<Self, VmError> {
        let opcode = Opcode::from_word(words[0])?;
        let operand = |i: usize| -> u16 { words.get(1 + i).copied().unwrap_or(0) };
        let value = |i: usize| -> Result<Value, VmError> { Value::decode(operand(i)) };
        let register = |i: usize| -> Result<usize, VmError> { Value::decode_register(operand(i)) };

        Ok(match opcode {
            Opcode::Halt => Instruction::Halt,
            Opcode::Set => Instruction::Set(register(0)?, value(1)?),
            Opcode::Push => Instruction::Push(value(0)?),
            Opcode::Pop => Instruction::Pop(register(0)?),
            Opcode::Eq => Instruction::Eq(register(0)?, value(1)?, value(2)?),
            Opcode::Gt => Instruction::Gt(register(0)?, value(1)?, value(2)?),
            Opcode::Jmp => Instruction::Jmp(value(0)?),
            Opcode::Jt => Instruction::Jt(value(0)?, value(1)?),
            Opcode::Jf => Instruction::Jf(value(0)?, value(1)?),
            Opcode::Add => Instruction::Add(register(0)?, value(1)?, value(2)?),
            Opcode::Mult => Instruction::Mult(register(0)?, value(1)?, value(2)?),
            Opcode::Mod => Instruction::Mod(register(0)?, value(1)?, value(2)?),
            Opcode::And => Instruction::And(register(0)?, value(1)?, value(2)?),
            Opcode::Or => Instruction::Or(register(0)?, value(1)?, value(2)?),
            Opcode::Not => Instruction::Not(register(0)?, value(1)?),
            Opcode::Rmem => Instruction::Rmem(register(0)?, value(1)?),
            Opcode::Wmem => Instruction::Wmem(value(0)?, value(1)?),
            Opcode::Call => Instruction::Call(value(0)?),
            Opcode::Ret => Instruction::Ret,
            Opcode::Out => Instruction::Out(value(0)?),
            Opcode::In => Instruction::In(register(0)?),
            Opcode::Noop => Instruction::Noop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_out_literal() {
        let instr = Instruction::decode(&[19, 65]).unwrap();
        assert!(matches!(instr, Instruction::Out(Value::Literal(65))));
    }

    #[test]
    fn decodes_add_with_register_target() {
        let instr = Instruction::decode(&[9, 32_768, 32_767, 2]).unwrap();
        assert!(matches!(
            instr,
            Instruction::Add(0, Value::Literal(32_767), Value::Literal(2))
        ));
    }

    #[test]
    fn set_rejects_literal_target() {
        assert!(matches!(
            Instruction::decode(&[1, 5, 10]),
            Err(VmError::InvalidRegister(5))
        ));
    }

    #[test]
    fn missing_trailing_operands_default_to_zero() {
        // HALT followed by nothing still decodes; arity 0 means no operands
        // are read in the first place.
        let instr = Instruction::decode(&[0]).unwrap();
        assert!(matches!(instr, Instruction::Halt));
    }
}
