use crate::error::VmError;

/// Upper bound of the literal range; register operands start here.
pub const REGISTER_BASE: u16 = 32_768;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// A decoded operand value cell: either a literal or a register reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Literal(u16),
    Register(usize),
}

impl Value {
    /// Decodes a raw word as an operand value cell.
    ///
    /// `0..32767` is a literal, `32768..32775` is a register reference,
    /// anything else is invalid.
    pub fn decode(word: u16) -> Result<Self, VmError> {
        if word < REGISTER_BASE {
            Ok(Value::Literal(word))
        } else if word < REGISTER_BASE + NUM_REGISTERS as u16 {
            Ok(Value::Register((word - REGISTER_BASE) as usize))
        } else {
            Err(VmError::InvalidOperand(word))
        }
    }

    /// Decodes a raw word that must name a register (the `a` operand of
    /// `SET`, `POP`, `IN`, and the destination operand of the arithmetic and
    /// memory instructions).
    pub fn decode_register(word: u16) -> Result<usize, VmError> {
        if word >= REGISTER_BASE && word < REGISTER_BASE + NUM_REGISTERS as u16 {
            Ok((word - REGISTER_BASE) as usize)
        } else {
            Err(VmError::InvalidRegister(word))
        }
    }
}
