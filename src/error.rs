/// Faults raised while loading or running a program.
///
/// A fault aborts the current frame. Instructions check their operands before
/// mutating anything, so the machine is left as it was just before the
/// faulting opcode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("stack is full")]
    StackOverflow,

    #[error("stack is empty")]
    StackUnderflow,

    #[error("unimplemented instruction {opcode:#06X}")]
    UnimplementedInstruction { opcode: u16 },

    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("pixel ({x}, {y}) is outside the display")]
    PixelOutOfRange { x: usize, y: usize },

    #[error("program is too large ({size} bytes), at most {max} bytes fit")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("start address {address:#06X} overlaps the font or lies outside memory")]
    InvalidStartAddress { address: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
