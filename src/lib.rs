pub mod config;
pub mod display;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod keyboard;
mod memory;
mod registers;
mod stack;
pub mod timers;

pub use config::Config;
pub use error::{Error, Result};
pub use interpreter::{ExecState, Interpreter};
pub use keyboard::{HeldKey, KeySource, Keymap, NoKeys};
pub use timers::TimerMode;
