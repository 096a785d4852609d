use crate::error::{Error, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const START_ROM: usize = 0x200;
pub const FONT_GLYPH_SIZE: usize = 5;

const FONT_DATA: &[u8] = &[
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// 4 KiB of byte addressable memory. The font lives at `0x000..0x050`, programs are
/// loaded above it.
#[derive(Debug, Clone)]
pub(crate) struct Memory([u8; MEMORY_SIZE]);

impl Memory {
    pub fn new() -> Self {
        let mut data = [0; MEMORY_SIZE];
        data[0..FONT_DATA.len()].copy_from_slice(FONT_DATA);

        Memory(data)
    }

    pub fn load_rom(&mut self, bytes: &[u8], start: usize) -> Result<()> {
        if start < FONT_DATA.len() || start >= MEMORY_SIZE {
            return Err(Error::InvalidStartAddress { address: start as u16 });
        }

        let max = MEMORY_SIZE - start;
        if bytes.len() > max {
            return Err(Error::ProgramTooLarge { size: bytes.len(), max });
        }

        self.0[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads the big endian word at `addr` and `addr + 1`.
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let bytes = self.slice(addr, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        Self::check_range(addr, len)?;
        Ok(&self.0[addr..addr + len])
    }

    /// Mutable view of `len` bytes at `addr`. The font is read only, a range that
    /// touches it is reported as out of range.
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        Self::check_range(addr, len)?;
        if len > 0 && addr < FONT_DATA.len() {
            return Err(Error::AddressOutOfRange { address: addr });
        }

        Ok(&mut self.0[addr..addr + len])
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn check_range(addr: usize, len: usize) -> Result<()> {
        match addr.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            _ => Err(Error::AddressOutOfRange {
                address: addr.max(MEMORY_SIZE),
            }),
        }
    }
}
