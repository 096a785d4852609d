use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    config::Config,
    display::Display,
    error::Result,
    instruction::{Addr, Const, Instruction, Opcode, Reg},
    keyboard::{KeySource, Keyboard},
    memory::{Memory, FONT_GLYPH_SIZE},
    registers::Registers,
    stack::CallStack,
    timers::Timers,
};

/// Whether the interpreter makes progress or is parked on `Fx0A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    Running,
    /// `PC` points at the `Fx0A` that is retried each frame until a key is down.
    WaitingForKey { register: u8 },
}

pub struct Interpreter {
    registers: Registers,
    memory: Memory,
    stack: CallStack,
    timers: Timers,
    display: Display,
    keyboard: Keyboard,
    state: ExecState,
    rng: ChaCha8Rng,
    config: Config,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("registers", &self.registers)
            .field("stack_depth", &self.stack.depth())
            .field("timers", &self.timers)
            .field("display", &self.display)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    pub fn with_rom(bytes: &[u8]) -> Result<Self> {
        Self::with_config(bytes, Config::default())
    }

    pub fn with_config(bytes: &[u8], config: Config) -> Result<Self> {
        let mut memory = Memory::new();
        memory.load_rom(bytes, config.start_address as usize)?;

        log::debug!(
            "loaded {} byte program at {:#05X}",
            bytes.len(),
            config.start_address
        );

        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Interpreter {
            registers: Registers::with_pc(config.start_address),
            memory,
            stack: CallStack::new(),
            timers: Timers::new(config.timer_mode),
            display: Display::new(),
            keyboard: Keyboard::new(),
            state: ExecState::Running,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        })
    }

    /// Runs one frame: up to `cycles_per_frame` instructions, then one timer tick.
    ///
    /// The batch ends early while the machine waits for a key or when an
    /// instruction faults. The timers tick either way, a fault is returned after.
    pub fn frame(&mut self, keys: &dyn KeySource) -> Result<()> {
        let mut result = Ok(());

        for _ in 0..self.config.cycles_per_frame {
            if let Err(err) = self.execute_one(keys) {
                log::warn!("fault at {:#05X}: {}", self.registers.pc, err);
                result = Err(err);
                break;
            }

            if self.is_waiting_for_key() {
                break;
            }
        }

        self.timers.tick();
        result
    }

    /// Fetches, decodes and executes the instruction at `PC`.
    ///
    /// On failure `PC` is left pointing at the faulting opcode.
    pub fn execute_one(&mut self, keys: &dyn KeySource) -> Result<()> {
        let pc = self.registers.pc;
        let opcode = Opcode(self.memory.read_word(pc as usize)?);

        self.registers.pc = pc.wrapping_add(2);

        let result = match Instruction::decode(opcode) {
            Ok(instruction) => {
                log::trace!("{:#05X}: {:04X} {}", pc, opcode.0, instruction);
                self.execute(instruction, keys)
            }
            Err(err) => Err(err),
        };

        if result.is_err() {
            self.registers.pc = pc;
        }
        result
    }

    /// Executes an already decoded instruction, as if it had just been fetched.
    pub fn execute(&mut self, instruction: Instruction, keys: &dyn KeySource) -> Result<()> {
        use Instruction::*;

        match instruction {
            // 00E0 - CLS
            Clear => self.display.clear(),
            // 00EE - RET
            Return => self.registers.pc = self.stack.pop()?,
            // 1nnn - JP addr
            Jump(Addr(addr)) => self.registers.pc = addr,
            // 2nnn - CALL addr
            Call(Addr(addr)) => {
                self.stack.push(self.registers.pc)?;
                self.registers.pc = addr;
            }
            // 3xkk, 4xkk, 5xy0, 9xy0 - SE / SNE
            SkipEqImm(x, Const(k)) => self.skip_if(self.v(x) == k),
            SkipNeImm(x, Const(k)) => self.skip_if(self.v(x) != k),
            SkipEqReg(x, y) => self.skip_if(self.v(x) == self.v(y)),
            SkipNeReg(x, y) => self.skip_if(self.v(x) != self.v(y)),
            // 6xkk - LD Vx, byte; 7xkk - ADD Vx, byte
            LoadImm(x, Const(k)) => self.set_v(x, k),
            AddImm(x, Const(k)) => self.set_v(x, self.v(x).wrapping_add(k)),
            // 8xy0..8xy3 - LD, OR, AND, XOR Vx, Vy
            LoadReg(x, y) => self.set_v(x, self.v(y)),
            Or(x, y) => self.set_v(x, self.v(x) | self.v(y)),
            And(x, y) => self.set_v(x, self.v(x) & self.v(y)),
            Xor(x, y) => self.set_v(x, self.v(x) ^ self.v(y)),
            // 8xy4 - ADD Vx, Vy, VF = carry
            AddReg(x, y) => {
                let (result, carry) = self.v(x).overflowing_add(self.v(y));
                self.set_v(x, result);
                self.registers.set_flag(carry);
            }
            // 8xy5 - SUB Vx, Vy, VF = NOT borrow
            Sub(x, y) => {
                let (a, b) = (self.v(x), self.v(y));
                self.set_v(x, a.wrapping_sub(b));
                self.registers.set_flag(a >= b);
            }
            // 8xy7 - SUBN Vx, Vy
            SubNeg(x, y) => {
                let (a, b) = (self.v(x), self.v(y));
                self.set_v(x, b.wrapping_sub(a));
                self.registers.set_flag(b >= a);
            }
            // 8xy6 - SHR Vx, VF = bit shifted out
            ShiftRight(x) => {
                let a = self.v(x);
                self.set_v(x, a >> 1);
                self.registers.set_flag(a & 0b0000_0001 != 0);
            }
            // 8xyE - SHL Vx
            ShiftLeft(x) => {
                let a = self.v(x);
                self.set_v(x, a << 1);
                self.registers.set_flag(a & 0b1000_0000 != 0);
            }
            // Annn - LD I, addr
            LoadIndex(Addr(addr)) => self.registers.i = addr,
            // Bnnn - JP V0, addr
            JumpOffset(Addr(addr)) => self.registers.pc = addr + self.registers.vx[0] as u16,
            // Cxkk - RND Vx, byte
            Random(x, Const(k)) => {
                let value = self.rng.gen::<u8>() & k;
                self.set_v(x, value);
            }
            // Dxyn - DRW Vx, Vy, nibble
            Draw(x, y, Const(n)) => self.draw_sprite(x, y, n)?,
            // Ex9E - SKP Vx; ExA1 - SKNP Vx
            SkipKeyPressed(x) => {
                self.keyboard.sample(keys);
                self.skip_if(self.keyboard.is_pressed(self.v(x)));
            }
            SkipKeyNotPressed(x) => {
                self.keyboard.sample(keys);
                self.skip_if(!self.keyboard.is_pressed(self.v(x)));
            }
            // Fx0A - LD Vx, K
            WaitKey(x) => self.wait_key(x, keys),
            // Fx07, Fx15, Fx18 - timers
            LoadDelay(x) => self.set_v(x, self.timers.delay),
            SetDelay(x) => self.timers.delay = self.v(x),
            SetSound(x) => self.timers.sound = self.v(x),
            // Fx1E - ADD I, Vx
            AddIndex(x) => self.registers.i = self.registers.i.wrapping_add(self.v(x) as u16),
            // Fx29 - LD F, Vx
            LoadFont(x) => self.registers.i = (FONT_GLYPH_SIZE as u16) * (self.v(x) & 0xF) as u16,
            // Fx33 - LD B, Vx
            StoreBcd(x) => {
                let value = self.v(x);
                let digits = self.memory.slice_mut(self.registers.i as usize, 3)?;
                digits.copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
            }
            // Fx55 - LD [I], Vx; I is left unchanged
            StoreRegs(Reg(x)) => {
                let count = x as usize + 1;
                let dest = self.memory.slice_mut(self.registers.i as usize, count)?;
                dest.copy_from_slice(&self.registers.vx[..count]);
            }
            // Fx65 - LD Vx, [I]
            LoadRegs(Reg(x)) => {
                let count = x as usize + 1;
                let src = self.memory.slice(self.registers.i as usize, count)?;
                self.registers.vx[..count].copy_from_slice(src);
            }
        }

        Ok(())
    }

    /// Dxyn - DRW Vx, Vy, nibble
    /// Display n-byte sprite starting at memory location I at (Vx, Vy), set VF = collision.
    ///
    /// Sprites are XORed onto the existing screen and wrap around to the opposite side.
    fn draw_sprite(&mut self, x: Reg, y: Reg, n: u8) -> Result<()> {
        let (col, row) = (self.v(x) as usize, self.v(y) as usize);
        let sprite = self.memory.slice(self.registers.i as usize, n as usize)?;

        let collision = self.display.draw_sprite(col, row, sprite);
        self.registers.set_flag(collision);
        Ok(())
    }

    /// Fx0A - LD Vx, K
    /// Wait for a key press, store the value of the key in Vx.
    ///
    /// Without a key `PC` is rewound so the instruction runs again on the next frame.
    fn wait_key(&mut self, x: Reg, keys: &dyn KeySource) {
        match self.keyboard.sample(keys) {
            Some(key) => {
                if self.is_waiting_for_key() {
                    log::debug!("key {:X} released the wait on V{:X}", key, x.0);
                }
                self.set_v(x, key);
                self.state = ExecState::Running;
            }
            None => {
                self.registers.pc = self.registers.pc.wrapping_sub(2);
                if !self.is_waiting_for_key() {
                    log::debug!("waiting for a key at {:#05X}", self.registers.pc);
                }
                self.state = ExecState::WaitingForKey { register: x.0 };
            }
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.skip();
        }
    }

    fn v(&self, reg: Reg) -> u8 {
        self.registers.vx[reg.index()]
    }

    fn set_v(&mut self, reg: Reg, value: u8) {
        self.registers.vx[reg.index()] = value;
    }

    /// Value of the general purpose register `Vx`.
    pub fn register(&self, x: usize) -> Option<u8> {
        self.registers.vx.get(x).copied()
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers.vx
    }

    pub fn index(&self) -> u16 {
        self.registers.i
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.bytes()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn state(&self) -> ExecState {
        self.state
    }

    pub fn is_waiting_for_key(&self) -> bool {
        matches!(self.state, ExecState::WaitingForKey { .. })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
