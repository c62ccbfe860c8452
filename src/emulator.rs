use crate::{
    config::Config,
    decode::Instruction,
    display::{FrameBuffer, Pixels},
    error::{Fault, LoadError, Warning},
    keyboard::Keypad,
    memory::{Memory, TypeAddr, FONT_START, GLYPH_SIZE, MEMORY_SIZE},
    registers::Registers,
    timer::Timer,
};
use log::{debug, error, trace, warn};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// What the host needs to know after a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// The framebuffer was cleared or drawn to.
    pub display_updated: bool,
    /// The sound timer went from zero to nonzero: start the tone.
    pub sound_started: bool,
    /// The sound timer ran out on this step: stop the tone.
    pub sound_stopped: bool,
    pub warning: Option<Warning>,
}

/// A CHIP-8 machine: memory, registers, timers, keypad and framebuffer.
///
/// The host writes the keypad, calls [`Machine::step`] at a steady rate and
/// reads the framebuffer and sound edges back out. Every step also ticks both
/// timers once.
pub struct Machine<R: RngCore = StdRng> {
    config: Config,
    pub regs: Registers,
    pub mem: Memory,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    pub keypad: Keypad,
    fb: FrameBuffer,
    rng: R,
    halted: Option<Fault>,
}

impl Machine<StdRng> {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for Machine<StdRng> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<R: RngCore> Machine<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        Self {
            config,
            regs: Registers::new(),
            mem: Memory::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            keypad: Keypad::new(),
            fb: FrameBuffer::new(),
            rng,
            halted: None,
        }
    }

    /// Copies a program image to 0x200. On failure memory is left as it was.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.mem.load_rom(rom)?;
        debug!("loaded {} byte image", rom.len());
        Ok(())
    }

    /// Back to power-on state. Configuration and the random source are kept,
    /// the program image is not.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.mem = Memory::new();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.keypad.reset();
        self.fb.clear_buffer();
        self.halted = None;
        debug!("machine reset");
    }

    /// Runs one fetch/decode/execute cycle, then ticks the timers.
    pub fn step(&mut self) -> Result<StepResult, Fault> {
        if let Some(fault) = self.halted {
            return Err(fault);
        }
        self.tick().map_err(|fault| {
            error!("halting at pc {:#05X}: {}", self.mem.pc.0, fault);
            self.halted = Some(fault);
            fault
        })
    }

    fn tick(&mut self) -> Result<StepResult, Fault> {
        let pc = self.mem.pc.0;
        let operation = self.fetch_decode()?;
        trace!("{:#05X}: {:?}", pc, operation);

        let sound_was_active = self.sound_timer.is_active();
        let mut result = self.execute_ins(operation)?;
        result.sound_started = !sound_was_active && self.sound_timer.is_active();

        self.delay_timer.tick();
        let expired = self.sound_timer.tick();
        // FX18 with VX = 0 silences a running tone without a 1 -> 0 tick
        result.sound_stopped = expired || (sound_was_active && !self.sound_timer.is_active());
        Ok(result)
    }

    pub fn fetch_decode(&mut self) -> Result<Instruction, Fault> {
        let ins = self.mem.next_instruction()?;
        Ok(Instruction::decode_raw(ins))
    }

    /// Executes one decoded instruction. pc must already point past it.
    pub fn execute_ins(&mut self, ins: Instruction) -> Result<StepResult, Fault> {
        let mut result = StepResult::default();
        match ins {
            Instruction::ClearScreen => {
                self.fb.clear_buffer();
                result.display_updated = true;
            }
            Instruction::Return => {
                let addr = self.mem.stack.pop()?;
                self.mem.pc.set_addr(addr);
            }
            Instruction::Jump(addr) => {
                self.mem.pc.set_addr(addr);
            }
            Instruction::Call(addr) => {
                // pc already points at the instruction to return to
                self.mem.stack.push(self.mem.pc.0)?;
                self.mem.pc.set_addr(addr);
            }
            Instruction::SkipIfEqualImm(vx, nn) => {
                self.skip_if(self.regs.get(vx) == nn);
            }
            Instruction::SkipIfNotEqualImm(vx, nn) => {
                self.skip_if(self.regs.get(vx) != nn);
            }
            Instruction::SkipIfEqualReg(vx, vy) => {
                self.skip_if(self.regs.get(vx) == self.regs.get(vy));
            }
            Instruction::SkipIfNotEqualReg(vx, vy) => {
                self.skip_if(self.regs.get(vx) != self.regs.get(vy));
            }
            Instruction::SetImm(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            Instruction::AddImm(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            Instruction::SetReg(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            Instruction::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            Instruction::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            Instruction::Xor(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            Instruction::AddReg(vx, vy) => {
                let (sum, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_register(vx, sum);
                self.regs.set_flag(carry);
            }
            Instruction::Sub(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, x.wrapping_sub(y));
                self.regs.set_flag(x >= y); // no borrow
            }
            Instruction::SubReverse(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, y.wrapping_sub(x));
                self.regs.set_flag(y >= x); // no borrow
            }
            Instruction::ShiftRight(vx, vy) => {
                let value = self.shift_source(vx, vy);
                self.regs.set_register(vx, value >> 1);
                self.regs.set_flag(value & 1 == 1);
            }
            Instruction::ShiftLeft(vx, vy) => {
                let value = self.shift_source(vx, vy);
                self.regs.set_register(vx, value << 1);
                self.regs.set_flag((value >> 7) & 1 == 1);
            }
            Instruction::SetIndex(addr) => self.mem.index.set_addr(addr),
            Instruction::JumpOffset(addr) => {
                self.mem.pc.set_addr(addr + self.regs.get(0) as TypeAddr);
            }
            Instruction::Random(vx, nn) => {
                let byte: u8 = self.rng.gen();
                self.regs.set_register(vx, byte & nn);
            }
            Instruction::Draw(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                // From I to I + N, plot I at VX, VY
                // the whole sprite is read before any pixel changes
                let sprite = match height {
                    0 => &[][..],
                    _ => self.mem.slice(self.mem.index.0 as usize, height as usize)?,
                };
                let vf = self.fb.paint(x, y, sprite);
                self.regs.set_flag(vf);
                result.display_updated = true;
            }
            Instruction::SkipIfKeyPressed(vx) => {
                self.skip_if(self.keypad.is_pressed(self.regs.get(vx)));
            }
            Instruction::SkipIfKeyNotPressed(vx) => {
                self.skip_if(!self.keypad.is_pressed(self.regs.get(vx)));
            }
            Instruction::ReadDelay(vx) => {
                self.regs.set_register(vx, self.delay_timer.count);
            }
            Instruction::WaitKey(vx) => match self.keypad.first_pressed() {
                Some(key) => self.regs.set_register(vx, key),
                // come back to this instruction on the next step
                None => self.mem.pc.decrement(),
            },
            Instruction::SetDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            Instruction::SetSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            Instruction::AddIndex(vx) => {
                let index = self.mem.index.0.wrapping_add(self.regs.get(vx) as TypeAddr);
                self.mem.index.set_addr(index);
                self.regs.set_flag(index as usize >= MEMORY_SIZE);
            }
            Instruction::FontGlyph(vx) => {
                let digit = self.regs.get(vx);
                if digit > 0xF {
                    let warning = Warning::GlyphOutOfRange(digit);
                    warn!("{}", warning);
                    result.warning = Some(warning);
                }
                self.mem
                    .index
                    .set_addr(FONT_START + GLYPH_SIZE * digit as TypeAddr);
            }
            Instruction::Bcd(vx) => {
                let value = self.regs.get(vx);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.mem
                    .slice_mut(self.mem.index.0 as usize, digits.len())?
                    .copy_from_slice(&digits);
            }
            Instruction::Store(vx) => {
                let start = self.mem.index.0 as usize;
                self.mem
                    .slice_mut(start, vx as usize + 1)?
                    .copy_from_slice(self.regs.range(vx));
                self.advance_index_after_transfer(vx);
            }
            Instruction::Load(vx) => {
                let start = self.mem.index.0 as usize;
                let bytes = self.mem.slice(start, vx as usize + 1)?;
                self.regs.range_mut(vx).copy_from_slice(bytes);
                self.advance_index_after_transfer(vx);
            }
            Instruction::Unknown(op) => {
                let warning = Warning::UnknownOpcode(op);
                warn!("{} at {:#05X}", warning, self.mem.pc.0.wrapping_sub(2));
                result.warning = Some(warning);
            }
        }
        Ok(result)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.mem.pc.increment();
        }
    }

    fn shift_source(&mut self, vx: u8, vy: u8) -> u8 {
        if self.config.quirks.shift_copies_vy {
            self.regs.set_register(vx, self.regs.get(vy));
        }
        self.regs.get(vx)
    }

    fn advance_index_after_transfer(&mut self, vx: u8) {
        if self.config.quirks.load_store_advances_index {
            let index = self.mem.index.0 + vx as TypeAddr + 1;
            self.mem.index.set_addr(index);
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &Pixels {
        self.fb.pixels()
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set_key(key, pressed);
    }

    pub fn pc(&self) -> TypeAddr {
        self.mem.pc.0
    }

    pub fn index(&self) -> TypeAddr {
        self.mem.index.0
    }

    pub fn register(&self, reg_num: u8) -> u8 {
        self.regs.get(reg_num)
    }

    pub fn registers(&self) -> &[u8; 16] {
        self.regs.as_slice()
    }

    pub fn memory(&self) -> &[u8] {
        self.mem.bytes()
    }

    pub fn stack_depth(&self) -> usize {
        self.mem.stack.depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.count
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.count
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}
