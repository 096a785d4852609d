//! Decoding of raw opcodes into [`Instruction`]s.

use std::fmt;

use crate::error::{Error, Result};

/// A 12 bit memory address, `nnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A general purpose register index, `x` or `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// An immediate value, either the byte `kk` or the nibble `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

impl Reg {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The operand fields of a 16 bit opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Opcode(u16::from_be_bytes(bytes))
    }

    pub fn kind(self) -> u8 {
        (self.0 >> 12) as u8
    }

    pub fn nnn(self) -> Addr {
        Addr(self.0 & 0x0FFF)
    }

    pub fn x(self) -> Reg {
        Reg(((self.0 >> 8) & 0xF) as u8)
    }

    pub fn y(self) -> Reg {
        Reg(((self.0 >> 4) & 0xF) as u8)
    }

    pub fn n(self) -> Const {
        Const((self.0 & 0xF) as u8)
    }

    pub fn kk(self) -> Const {
        Const((self.0 & 0xFF) as u8)
    }
}

/// A single instruction from the CHIP-8 instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Clear,                      // 00E0
    Return,                     // 00EE
    Jump(Addr),                 // 1nnn
    Call(Addr),                 // 2nnn
    SkipEqImm(Reg, Const),      // 3xkk
    SkipNeImm(Reg, Const),      // 4xkk
    SkipEqReg(Reg, Reg),        // 5xy0
    LoadImm(Reg, Const),        // 6xkk
    AddImm(Reg, Const),         // 7xkk
    LoadReg(Reg, Reg),          // 8xy0
    Or(Reg, Reg),               // 8xy1
    And(Reg, Reg),              // 8xy2
    Xor(Reg, Reg),              // 8xy3
    AddReg(Reg, Reg),           // 8xy4
    Sub(Reg, Reg),              // 8xy5
    ShiftRight(Reg),            // 8xy6
    SubNeg(Reg, Reg),           // 8xy7
    ShiftLeft(Reg),             // 8xyE
    SkipNeReg(Reg, Reg),        // 9xy0
    LoadIndex(Addr),            // Annn
    JumpOffset(Addr),           // Bnnn
    Random(Reg, Const),         // Cxkk
    Draw(Reg, Reg, Const),      // Dxyn
    SkipKeyPressed(Reg),        // Ex9E
    SkipKeyNotPressed(Reg),     // ExA1
    LoadDelay(Reg),             // Fx07
    WaitKey(Reg),               // Fx0A
    SetDelay(Reg),              // Fx15
    SetSound(Reg),              // Fx18
    AddIndex(Reg),              // Fx1E
    LoadFont(Reg),              // Fx29
    StoreBcd(Reg),              // Fx33
    StoreRegs(Reg),             // Fx55
    LoadRegs(Reg),              // Fx65
}

impl Instruction {
    /// Decodes `opcode`, failing with [`Error::UnimplementedInstruction`] for unknown patterns.
    pub fn decode(opcode: Opcode) -> Result<Instruction> {
        use Instruction::*;

        let (x, y) = (opcode.x(), opcode.y());
        let low_nibble = opcode.n().0;
        let low_byte = opcode.kk().0;

        let instruction = match opcode.kind() {
            0x0 => match opcode.0 {
                0x00E0 => Some(Clear),
                0x00EE => Some(Return),
                _ => None,
            },
            0x1 => Some(Jump(opcode.nnn())),
            0x2 => Some(Call(opcode.nnn())),
            0x3 => Some(SkipEqImm(x, opcode.kk())),
            0x4 => Some(SkipNeImm(x, opcode.kk())),
            0x5 if low_nibble == 0 => Some(SkipEqReg(x, y)),
            0x6 => Some(LoadImm(x, opcode.kk())),
            0x7 => Some(AddImm(x, opcode.kk())),
            0x8 => match low_nibble {
                0x0 => Some(LoadReg(x, y)),
                0x1 => Some(Or(x, y)),
                0x2 => Some(And(x, y)),
                0x3 => Some(Xor(x, y)),
                0x4 => Some(AddReg(x, y)),
                0x5 => Some(Sub(x, y)),
                0x6 => Some(ShiftRight(x)),
                0x7 => Some(SubNeg(x, y)),
                0xE => Some(ShiftLeft(x)),
                _ => None,
            },
            0x9 if low_nibble == 0 => Some(SkipNeReg(x, y)),
            0xA => Some(LoadIndex(opcode.nnn())),
            0xB => Some(JumpOffset(opcode.nnn())),
            0xC => Some(Random(x, opcode.kk())),
            0xD => Some(Draw(x, y, opcode.n())),
            0xE => match low_byte {
                0x9E => Some(SkipKeyPressed(x)),
                0xA1 => Some(SkipKeyNotPressed(x)),
                _ => None,
            },
            0xF => match low_byte {
                0x07 => Some(LoadDelay(x)),
                0x0A => Some(WaitKey(x)),
                0x15 => Some(SetDelay(x)),
                0x18 => Some(SetSound(x)),
                0x1E => Some(AddIndex(x)),
                0x29 => Some(LoadFont(x)),
                0x33 => Some(StoreBcd(x)),
                0x55 => Some(StoreRegs(x)),
                0x65 => Some(LoadRegs(x)),
                _ => None,
            },
            _ => None,
        };

        instruction.ok_or(Error::UnimplementedInstruction { opcode: opcode.0 })
    }
}

/// Renders the instruction in Cowgod's assembler syntax.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(Addr(a)) => write!(f, "JP {:#05X}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05X}", a),
            SkipEqImm(Reg(x), Const(k)) => write!(f, "SE V{:X}, {:#04X}", x, k),
            SkipNeImm(Reg(x), Const(k)) => write!(f, "SNE V{:X}, {:#04X}", x, k),
            SkipEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(Reg(x), Const(k)) => write!(f, "LD V{:X}, {:#04X}", x, k),
            AddImm(Reg(x), Const(k)) => write!(f, "ADD V{:X}, {:#04X}", x, k),
            LoadReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(Reg(x)) => write!(f, "SHR V{:X}", x),
            SubNeg(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(Reg(x)) => write!(f, "SHL V{:X}", x),
            SkipNeReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(Addr(a)) => write!(f, "LD I, {:#05X}", a),
            JumpOffset(Addr(a)) => write!(f, "JP V0, {:#05X}", a),
            Random(Reg(x), Const(k)) => write!(f, "RND V{:X}, {:#04X}", x, k),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyPressed(Reg(x)) => write!(f, "SKP V{:X}", x),
            SkipKeyNotPressed(Reg(x)) => write!(f, "SKNP V{:X}", x),
            LoadDelay(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            WaitKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelay(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSound(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddIndex(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            LoadFont(Reg(x)) => write!(f, "LD F, V{:X}", x),
            StoreBcd(Reg(x)) => write!(f, "LD B, V{:X}", x),
            StoreRegs(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            LoadRegs(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::*;
    use super::*;
    use test_case::test_case;

    fn decode(raw: u16) -> Result<Instruction> {
        Instruction::decode(Opcode(raw))
    }

    #[test]
    fn test_operand_fields() {
        let opcode = Opcode::from_be_bytes([0xD1, 0x2F]);

        assert_eq!(opcode.kind(), 0xD);
        assert_eq!(opcode.nnn(), Addr(0x12F));
        assert_eq!(opcode.x(), Reg(0x1));
        assert_eq!(opcode.y(), Reg(0x2));
        assert_eq!(opcode.n(), Const(0xF));
        assert_eq!(opcode.kk(), Const(0x2F));
    }

    #[test_case(0x00E0, Clear)]
    #[test_case(0x00EE, Return)]
    #[test_case(0x1025, Jump(Addr(0x025)))]
    #[test_case(0x2037, Call(Addr(0x037)))]
    #[test_case(0x3A08, SkipEqImm(Reg(0xA), Const(0x08)))]
    #[test_case(0x4A08, SkipNeImm(Reg(0xA), Const(0x08)))]
    #[test_case(0x5AB0, SkipEqReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x6B23, LoadImm(Reg(0xB), Const(0x23)))]
    #[test_case(0x7CA1, AddImm(Reg(0xC), Const(0xA1)))]
    #[test_case(0x8AB0, LoadReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8DE1, Or(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE2, And(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE3, Xor(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8AB4, AddReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB5, Sub(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB6, ShiftRight(Reg(0xA)))]
    #[test_case(0x8AB7, SubNeg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8A0E, ShiftLeft(Reg(0xA)))]
    #[test_case(0x9AB0, SkipNeReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0xA025, LoadIndex(Addr(0x025)))]
    #[test_case(0xB025, JumpOffset(Addr(0x025)))]
    #[test_case(0xCA23, Random(Reg(0xA), Const(0x23)))]
    #[test_case(0xDABC, Draw(Reg(0xA), Reg(0xB), Const(0xC)))]
    #[test_case(0xEA9E, SkipKeyPressed(Reg(0xA)))]
    #[test_case(0xEAA1, SkipKeyNotPressed(Reg(0xA)))]
    #[test_case(0xFA07, LoadDelay(Reg(0xA)))]
    #[test_case(0xFA0A, WaitKey(Reg(0xA)))]
    #[test_case(0xFA15, SetDelay(Reg(0xA)))]
    #[test_case(0xFA18, SetSound(Reg(0xA)))]
    #[test_case(0xFA1E, AddIndex(Reg(0xA)))]
    #[test_case(0xFA29, LoadFont(Reg(0xA)))]
    #[test_case(0xFA33, StoreBcd(Reg(0xA)))]
    #[test_case(0xFA55, StoreRegs(Reg(0xA)))]
    #[test_case(0xFA65, LoadRegs(Reg(0xA)))]
    fn test_decode(raw: u16, expected: Instruction) {
        assert_eq!(decode(raw), Ok(expected));
    }

    #[test_case(0x0000 ; "sys call zero")]
    #[test_case(0x0123 ; "sys call")]
    #[test_case(0x00E1 ; "near clear")]
    #[test_case(0x5AB1 ; "skip eq reg with tail")]
    #[test_case(0x8AB8 ; "unknown alu op")]
    #[test_case(0x9AB3 ; "skip ne reg with tail")]
    #[test_case(0xEA9F ; "unknown key op")]
    #[test_case(0xFA00 ; "unknown misc op")]
    #[test_case(0xFFFF ; "all ones")]
    fn test_decode_unimplemented(raw: u16) {
        assert_eq!(decode(raw), Err(Error::UnimplementedInstruction { opcode: raw }));
    }

    #[test_case(Clear, "CLS")]
    #[test_case(Call(Addr(0x2A4)), "CALL 0x2A4")]
    #[test_case(LoadImm(Reg(0xB), Const(0x23)), "LD VB, 0x23")]
    #[test_case(Draw(Reg(0x1), Reg(0x2), Const(5)), "DRW V1, V2, 5")]
    #[test_case(LoadRegs(Reg(0xF)), "LD VF, [I]")]
    fn test_display(instruction: Instruction, text: &str) {
        assert_eq!(instruction.to_string(), text);
    }
}
