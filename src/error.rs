/// Reasons a program image can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },
}

/// Conditions that halt the machine. Once raised, every further `step`
/// returns the same fault until the machine is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow: subroutine call with 16 return addresses already stored")]
    StackOverflow,

    #[error("stack underflow: return from a subroutine with an empty call stack")]
    StackUnderflow,
}

/// Non-fatal oddities reported alongside a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The fetched word is not one of the 35 instructions.
    UnknownOpcode(u16),
    /// FX29 asked for a glyph past `F`.
    GlyphOutOfRange(u8),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownOpcode(op) => write!(f, "unknown opcode {op:04X}"),
            Warning::GlyphOutOfRange(v) => write!(f, "no font glyph for value {v:#04X}"),
        }
    }
}
