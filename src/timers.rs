//! Delay and sound timers, both decremented once per frame.

/// What a timer does when a frame tick finds it at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Stay at zero until a program writes the timer again.
    #[default]
    Hold,
    /// Reload to the given value. Timers also start out at this value.
    Reload(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    mode: TimerMode,
}

impl Timers {
    pub fn new(mode: TimerMode) -> Self {
        let initial = match mode {
            TimerMode::Hold => 0,
            TimerMode::Reload(value) => value,
        };

        Timers {
            delay: initial,
            sound: initial,
            mode,
        }
    }

    pub fn tick(&mut self) {
        self.delay = self.next(self.delay);
        self.sound = self.next(self.sound);
    }

    /// The buzzer sounds while the sound timer is non-zero.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    fn next(&self, value: u8) -> u8 {
        match (value, self.mode) {
            (0, TimerMode::Hold) => 0,
            (0, TimerMode::Reload(reload)) => reload,
            (value, _) => value - 1,
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Timers::new(TimerMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TimerMode::Hold, 5, 4 ; "hold: decrements")]
    #[test_case(TimerMode::Hold, 1, 0 ; "hold: reaches zero")]
    #[test_case(TimerMode::Hold, 0, 0 ; "hold: stays at zero")]
    #[test_case(TimerMode::Reload(60), 5, 4 ; "reload: decrements")]
    #[test_case(TimerMode::Reload(60), 1, 0 ; "reload: reaches zero")]
    #[test_case(TimerMode::Reload(60), 0, 60 ; "reload: reloads from zero")]
    fn test_tick(mode: TimerMode, value: u8, expected: u8) {
        let mut timers = Timers::new(mode);
        timers.delay = value;
        timers.sound = value;

        timers.tick();

        assert_eq!(timers.delay, expected);
        assert_eq!(timers.sound, expected);
    }

    #[test]
    fn test_timers_are_independent() {
        let mut timers = Timers::default();
        timers.delay = 3;

        timers.tick();

        assert_eq!(timers.delay, 2);
        assert_eq!(timers.sound, 0);
        assert!(!timers.sound_active());
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(Timers::new(TimerMode::Hold).delay, 0);
        assert_eq!(Timers::new(TimerMode::Reload(60)).sound, 60);
        assert!(Timers::new(TimerMode::Reload(60)).sound_active());
    }
}
