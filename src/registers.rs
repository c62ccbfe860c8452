use crate::memory::TypeAddr;

pub const FLAG: u8 = 0xF;

/// V0..=VF. VF doubles as the flag output but is stored like any other slot.
#[derive(Debug, Clone, Default)]
pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[reg_num as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let reg = &mut self.registers[reg_num as usize];
        *reg = reg.wrapping_add(value);
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG, flag as u8);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[reg_num as usize]
    }

    pub fn as_slice(&self) -> &[u8; 16] {
        &self.registers
    }

    /// V0..=Vx
    pub fn range(&self, last: u8) -> &[u8] {
        &self.registers[..=last as usize]
    }

    pub fn range_mut(&mut self, last: u8) -> &mut [u8] {
        &mut self.registers[..=last as usize]
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(2);
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}
