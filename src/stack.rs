use crate::error::{Error, Result};

pub const STACK_SIZE: usize = 48;

/// Return addresses of the subroutines currently being executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallStack {
    slots: [u16; STACK_SIZE],
    /// Points one past the topmost entry.
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            slots: [0; STACK_SIZE],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp >= STACK_SIZE {
            return Err(Error::StackOverflow);
        }

        self.slots[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow);
        }

        self.sp -= 1;
        Ok(self.slots[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }
}
