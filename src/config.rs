use crate::memory::START_ROM;
use crate::timers::TimerMode;

/// Instructions executed per frame when nothing else is configured.
pub const DEFAULT_CYCLES_PER_FRAME: usize = 20;

/// Construction-time settings of an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Address the program image is copied to and execution starts from.
    pub start_address: u16,
    /// Number of instructions run by one call to `frame`.
    pub cycles_per_frame: usize,
    pub timer_mode: TimerMode,
    /// Seed for `Cxkk`. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_address: START_ROM as u16,
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            timer_mode: TimerMode::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn with_start_address(mut self, address: u16) -> Self {
        self.start_address = address;
        self
    }

    pub fn with_cycles_per_frame(mut self, cycles: usize) -> Self {
        self.cycles_per_frame = cycles;
        self
    }

    pub fn with_timer_mode(mut self, mode: TimerMode) -> Self {
        self.timer_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.start_address, 0x200);
        assert_eq!(config.cycles_per_frame, 20);
        assert_eq!(config.timer_mode, TimerMode::Hold);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_start_address(0x600)
            .with_cycles_per_frame(1)
            .with_timer_mode(TimerMode::Reload(60))
            .with_seed(7);

        assert_eq!(config.start_address, 0x600);
        assert_eq!(config.cycles_per_frame, 1);
        assert_eq!(config.timer_mode, TimerMode::Reload(60));
        assert_eq!(config.seed, Some(7));
    }
}
