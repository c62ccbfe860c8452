//! A CHIP-8 interpreter core.
//!
//! 16 8-bit data registers named V0 to VF
//! I -> address register (12 bits)
//! Stack of 16 return addresses
//!
//! Delay timer & Sound timer: count down once per `step`
//!
//! Display res: 64 width, 32 height
//!
//! 35 opcodes, each are 2 bytes (big-endian)
//!      NNN: address
//!      NN: 8-bit constant
//!      N: 4-bit constant
//!      X and Y: 4-bit register identifier
//!
//! The host owns timing: call [`Machine::step`] roughly 700 times a second,
//! write the keypad before each step and read the display and sound edges after.

pub mod config;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;

pub use config::{Config, Quirks};
pub use decode::Instruction;
pub use display::{Pixels, HEIGHT, WIDTH};
pub use emulator::{Machine, StepResult};
pub use error::{Fault, LoadError, Warning};
pub use keyboard::Keypad;
pub use memory::MAX_ROM_SIZE;
