use crate::error::{Fault, LoadError};
use crate::registers::{IndexRegister, ProgramCounter};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const FONT_START: TypeAddr = 0x50;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const STACK_DEPTH: usize = 16;

const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Bytes per hex glyph in the built-in font.
pub const GLYPH_SIZE: TypeAddr = 5;

pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F (000 -> 04F is empty by convention)
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = FONT_START as usize;
        bytes[start..start + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);

        Self {
            bytes,
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    /// `len` bytes starting at `addr`, or the first address that falls outside memory.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        self.bytes
            .get(addr..addr + len)
            .ok_or(Fault::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Fault> {
        self.bytes
            .get_mut(addr..addr + len)
            .ok_or(Fault::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the big-endian word at pc and moves pc past it.
    pub fn next_instruction(&mut self) -> Result<u16, Fault> {
        let word = self.slice(self.pc.0 as usize, 2)?;
        let ins = u16::from_be_bytes([word[0], word[1]]);
        self.pc.increment();
        Ok(ins)
    }

    // loads program instructions starting at address 0x200
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        if bytes.len() > MAX_ROM_SIZE {
            return Err(LoadError::ImageTooLarge {
                size: bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: TypeAddr) -> Result<(), Fault> {
        let slot = self
            .addresses
            .get_mut(self.sp)
            .ok_or(Fault::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<TypeAddr, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.addresses[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_installed_at_0x50() {
        let mem = Memory::new();
        assert_eq!(mem.slice(0x50, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(mem.bytes()[0x9F], 0x80);
        assert_eq!(mem.bytes()[0xA0], 0x00);
        assert!(mem.bytes()[..0x50].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_rom_at_program_start() {
        let mut mem = Memory::new();
        mem.load_rom(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(mem.slice(0x200, 4).unwrap(), &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(mem.pc.0, 0x200);
    }

    #[test]
    fn test_load_rom_size_limit() {
        let mut mem = Memory::new();
        assert!(mem.load_rom(&[0xAA; 3584]).is_ok());
        assert_eq!(mem.bytes()[0xFFF], 0xAA);

        let mut mem = Memory::new();
        assert_eq!(
            mem.load_rom(&[0xAA; 3585]),
            Err(LoadError::ImageTooLarge {
                size: 3585,
                max: 3584
            })
        );
        assert_eq!(mem.bytes()[0x200], 0x00);
    }

    #[test]
    fn test_next_instruction_is_big_endian() {
        let mut mem = Memory::new();
        mem.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(mem.next_instruction().unwrap(), 0xAABB);
        assert_eq!(mem.pc.0, 0x202);
    }

    #[test]
    fn test_fetch_past_end_faults() {
        let mut mem = Memory::new();
        mem.pc.set_addr(0xFFF);
        assert_eq!(
            mem.next_instruction(),
            Err(Fault::MemoryOutOfBounds { address: 0x1000 })
        );
        assert_eq!(mem.pc.0, 0xFFF);

        mem.pc.set_addr(0xFFE);
        assert!(mem.next_instruction().is_ok());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut mem = Memory::new();
        assert_eq!(mem.slice(0x1000, 1), Err(Fault::MemoryOutOfBounds { address: 0x1000 }));
        assert_eq!(
            mem.slice_mut(0x1234, 1).map(|bytes| bytes.len()),
            Err(Fault::MemoryOutOfBounds { address: 0x1234 })
        );
        assert!(mem.slice(0xFFE, 3).is_err());
        assert!(mem.slice_mut(0xFFD, 3).is_ok());
    }

    #[test]
    fn test_stack_overflow_and_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(Fault::StackUnderflow));
        for addr in 0..STACK_DEPTH as TypeAddr {
            stack.push(0x200 + addr * 2).unwrap();
        }
        assert_eq!(stack.depth(), 16);
        assert_eq!(stack.push(0x300), Err(Fault::StackOverflow));
        assert_eq!(stack.pop(), Ok(0x21E));
        assert_eq!(stack.depth(), 15);
    }
}
