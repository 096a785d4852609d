pub const NUM_REGISTERS: usize = 16;
pub const FLAG_REGISTER: usize = 0xF;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Registers {
    /// Chip-8 has 16 general purpose 8-bit registers, usually referred to as Vx, where x is a hexadecimal digit (0 through F).
    /// VF doubles as the carry, borrow, shift-out and collision flag.
    pub vx: [u8; NUM_REGISTERS],

    /// Index register, used to address memory.
    pub i: u16,
    /// The program counter (PC) should be 16-bit, and is used to store the currently executing address.
    pub pc: u16,
}

impl Registers {
    pub fn with_pc(pc: u16) -> Self {
        Registers {
            pc,
            ..Registers::default()
        }
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.vx[FLAG_REGISTER] = flag as u8;
    }

    /// Skips the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_flag_writes_vf() {
        let mut registers = Registers::default();

        registers.set_flag(true);
        assert_eq!(registers.vx[0xF], 1);

        registers.set_flag(false);
        assert_eq!(registers.vx[0xF], 0);
    }

    #[test]
    fn test_skip() {
        let mut registers = Registers::with_pc(0x200);

        registers.skip();

        assert_eq!(registers.pc, 0x202);
    }
}
