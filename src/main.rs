use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use chippy::{Config, HeldKey, Interpreter, Keymap, TimerMode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The path of the rom to load
    #[arg(value_name = "FILE")]
    rom_path: PathBuf,

    /// Load address of the rom, e.g. 0x200
    #[arg(short, long, value_parser = parse_address)]
    start: Option<u16>,

    /// Instructions executed per frame
    #[arg(short, long, default_value_t = chippy::config::DEFAULT_CYCLES_PER_FRAME)]
    cycles: usize,

    /// Number of frames to run before printing the display
    #[arg(short, long, default_value_t = 60)]
    frames: usize,

    /// Reload timers to 60 when they reach zero instead of stopping there
    #[arg(long)]
    reload_timers: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Host key held down for the whole run, translated through the keypad layout
    #[arg(short, long)]
    key: Option<char>,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    let radix = if digits.len() != s.len() { 16 } else { 10 };

    u16::from_str_radix(digits, radix).map_err(|e| format!("invalid address {:?}: {}", s, e))
}

fn config(cli: &Cli) -> Config {
    let mut config = Config::default().with_cycles_per_frame(cli.cycles);

    if let Some(start) = cli.start {
        config = config.with_start_address(start);
    }
    if cli.reload_timers {
        config = config.with_timer_mode(TimerMode::Reload(60));
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    config
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let keys = match cli.key {
        Some(key) => match Keymap::default().translate(key) {
            Some(code) => HeldKey(Some(code)),
            None => bail!("key {:?} is not on the keypad", key),
        },
        None => HeldKey(None),
    };

    let bytes = std::fs::read(&cli.rom_path)
        .with_context(|| format!("could not read rom {}", cli.rom_path.display()))?;

    let mut interpreter = Interpreter::with_config(&bytes, config(&cli))?;

    for frame in 0..cli.frames {
        interpreter
            .frame(&keys)
            .with_context(|| format!("program crashed in frame {}", frame))?;
    }

    print!("{}", interpreter.display());
    if interpreter.is_waiting_for_key() {
        log::info!("program is waiting for a key");
    }

    Ok(())
}
