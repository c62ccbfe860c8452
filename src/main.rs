use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use minifb::Scale;

use chip8vm::{config::DEFAULT_CPU_HZ, Config, Machine, Quirks};
use frontend::{keymap, sound::Sound, window::Screen};

mod frontend;

/// Run a CHIP-8 ROM in a window.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM image
    rom: PathBuf,

    /// Instructions executed per second; timers tick once per instruction
    #[arg(long, default_value_t = DEFAULT_CPU_HZ)]
    hz: u32,

    /// Shift 8XY6/8XYE in place instead of copying VY into VX first
    #[arg(long)]
    shift_in_place: bool,

    /// Leave I unchanged after FX55/FX65
    #[arg(long)]
    keep_index: bool,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            quirks: Quirks {
                shift_copies_vy: !self.shift_in_place,
                load_store_advances_index: !self.keep_index,
            },
            cpu_hz: self.hz.max(1),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.config();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("unable to read {}", args.rom.display()))?;
    let mut machine = Machine::new(config);
    machine.load(&rom)?;
    info!("loaded {} ({} bytes)", args.rom.display(), rom.len());

    let mut screen = Screen::new(Scale::X16)?;
    let mut sound = if args.mute {
        None
    } else {
        match Sound::new() {
            Ok(sound) => Some(sound),
            Err(err) => {
                warn!("continuing without sound: {err:#}");
                None
            }
        }
    };

    // CPU runs at `hz`, the window refreshes at ~60 Hz
    let cycle = Duration::from_secs(1) / config.cpu_hz;
    let frame = Duration::from_micros(16600);
    let mut next_cycle = Instant::now();
    let mut next_frame = Instant::now();

    while screen.is_open() {
        let now = Instant::now();
        // drop any backlog older than one frame, e.g. after the window was dragged
        if let Some(floor) = now.checked_sub(frame) {
            next_cycle = next_cycle.max(floor);
        }

        while next_cycle <= now {
            machine
                .keypad_mut()
                .set_all(keymap::keypad_state(&screen.keys_down()));

            let result = match machine.step() {
                Ok(result) => result,
                Err(fault) => {
                    error!("machine halted: {fault}");
                    if let Some(sound) = sound.as_mut() {
                        sound.stop();
                    }
                    return Err(fault.into());
                }
            };
            if result.display_updated {
                screen.paint(machine.display());
            }
            if let Some(sound) = sound.as_mut() {
                if result.sound_started {
                    sound.start();
                }
                if result.sound_stopped {
                    sound.stop();
                }
            }
            next_cycle += cycle;
        }

        if next_frame <= now {
            screen.sync()?;
            next_frame = now + frame;
        }

        std::thread::sleep(next_cycle.saturating_duration_since(Instant::now()));
    }

    Ok(())
}
