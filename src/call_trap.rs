use crate::registers::Registers;

/// The side effect applied when a trapped `CALL` target is hit instead of
/// actually calling into the subroutine. Kept as a closed enum rather than
/// a boxed closure so that `VM` (and therefore `Game`) stays plain-data
/// `Clone` for the snapshot/exploratory-search use case in spec §5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTrapEffect {
    SetRegister(usize, u16),
}

impl CallTrapEffect {
    pub fn apply(self, registers: &mut Registers) {
        match self {
            CallTrapEffect::SetRegister(index, value) => registers.write(index, value),
        }
    }
}

/// Address-keyed table of call traps, consulted by `CALL` before pushing a
/// return address. A trapped call never touches the stack: execution
/// resumes immediately after the `CALL` as if the subroutine had returned.
#[derive(Debug, Clone, Default)]
pub struct CallTraps {
    traps: Vec<(u16, CallTrapEffect)>,
}

impl CallTraps {
    pub fn new() -> Self {
        Self { traps: Vec::new() }
    }

    pub fn set(&mut self, address: u16, effect: CallTrapEffect) {
        if let Some(entry) = self.traps.iter_mut().find(|(a, _)| *a == address) {
            entry.1 = effect;
        } else {
            self.traps.push((address, effect));
        }
    }

    pub fn get(&self, address: u16) -> Option<CallTrapEffect> {
        self.traps
            .iter()
            .find(|(a, _)| *a == address)
            .map(|(_, effect)| *effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapped_address_overrides_effect() {
        let mut traps = CallTraps::new();
        traps.set(1234, CallTrapEffect::SetRegister(0, 6));
        assert_eq!(traps.get(1234), Some(CallTrapEffect::SetRegister(0, 6)));
        assert_eq!(traps.get(1235), None);

        traps.set(1234, CallTrapEffect::SetRegister(0, 7));
        assert_eq!(traps.get(1234), Some(CallTrapEffect::SetRegister(0, 7)));
    }

    #[test]
    fn apply_writes_register() {
        let mut registers = Registers::new();
        CallTrapEffect::SetRegister(0, 6).apply(&mut registers);
        assert_eq!(registers.read(0), 6);
    }
}
