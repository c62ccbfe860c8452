use crate::memory::TypeAddr;

/// A fetched 16-bit word, split into the nibble fields instructions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    code: u16,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction { code }
    }

    // n is starting digit, m is length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        // 0110 1100 1111 0001
        // -------------------
        // 1111 1111 1111 1111
        //      1111 1111 1111
        //           1111 1111
        //                1111
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask = (1u32 << (m * 4)) - 1;
        (self.code >> shift_places) & mask as u16
    }

    /// `[i___]` instruction family
    pub fn family(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    /// `[_x__]`
    pub fn x(&self) -> u8 {
        self.nth_m_digits(2, 1) as u8
    }

    /// `[__y_]`
    pub fn y(&self) -> u8 {
        self.nth_m_digits(3, 1) as u8
    }

    /// `[___n]`
    pub fn n(&self) -> u8 {
        self.nth_m_digits(4, 1) as u8
    }

    /// `[__nn]`
    pub fn nn(&self) -> u8 {
        self.nth_m_digits(3, 2) as u8
    }

    /// `[_nnn]`
    pub fn nnn(&self) -> TypeAddr {
        self.nth_m_digits(2, 3)
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

/// One decoded CHIP-8 instruction. `x`/`y` operands are register numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` turn every pixel off
    ClearScreen,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump(TypeAddr),
    /// `2NNN` push pc, jump to NNN
    Call(TypeAddr),

    /// `3XNN` skip if VX == NN
    SkipIfEqualImm(u8, u8),
    /// `4XNN` skip if VX != NN
    SkipIfNotEqualImm(u8, u8),
    /// `5XY0`
    SkipIfEqualReg(u8, u8),
    /// `9XY0`
    SkipIfNotEqualReg(u8, u8),

    /// `6XNN`
    SetImm(u8, u8),
    /// `7XNN` wrapping add, VF untouched
    AddImm(u8, u8),

    /// `8XY0` VX = VY
    SetReg(u8, u8),
    /// `8XY1`
    Or(u8, u8),
    /// `8XY2`
    And(u8, u8),
    /// `8XY3`
    Xor(u8, u8),
    /// `8XY4` VF = carry
    AddReg(u8, u8),
    /// `8XY5` VX -= VY, VF = no borrow
    Sub(u8, u8),
    /// `8XY6` VF = bit shifted out
    ShiftRight(u8, u8),
    /// `8XY7` VX = VY - VX, VF = no borrow
    SubReverse(u8, u8),
    /// `8XYE` VF = bit shifted out
    ShiftLeft(u8, u8),

    /// `ANNN`
    SetIndex(TypeAddr),
    /// `BNNN` jump to V0 + NNN
    JumpOffset(TypeAddr),
    /// `CXNN` VX = random & NN
    Random(u8, u8),
    /// `DXYN` XOR an N-row sprite from I onto the screen at (VX, VY).
    /// VF = 1 if any lit pixel was switched off.
    Draw(u8, u8, u8),

    /// `EX9E`
    SkipIfKeyPressed(u8),
    /// `EXA1`
    SkipIfKeyNotPressed(u8),

    /// `FX07`
    ReadDelay(u8),
    /// `FX0A` block until a key is held, store it in VX
    WaitKey(u8),
    /// `FX15`
    SetDelay(u8),
    /// `FX18`
    SetSound(u8),
    /// `FX1E` VF = I overflowed memory
    AddIndex(u8),
    /// `FX29` I = address of the font glyph for VX
    FontGlyph(u8),
    /// `FX33` hundreds, tens, units of VX into I..I+3
    Bcd(u8),
    /// `FX55` V0..=VX into memory at I
    Store(u8),
    /// `FX65` memory at I into V0..=VX
    Load(u8),

    /// Anything else. Skipped with a warning.
    Unknown(u16),
}

impl Instruction {
    pub fn decode_raw(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y) = (raw.x(), raw.y());

        match raw.family() {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::Return,
                _ => Self::Unknown(ins),
            },
            0x1 => Self::Jump(raw.nnn()),
            0x2 => Self::Call(raw.nnn()),
            0x3 => Self::SkipIfEqualImm(x, raw.nn()),
            0x4 => Self::SkipIfNotEqualImm(x, raw.nn()),
            0x5 if raw.n() == 0x0 => Self::SkipIfEqualReg(x, y),
            0x6 => Self::SetImm(x, raw.nn()),
            0x7 => Self::AddImm(x, raw.nn()),
            0x8 => match raw.n() {
                0x0 => Self::SetReg(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::Xor(x, y),
                0x4 => Self::AddReg(x, y),
                0x5 => Self::Sub(x, y),
                0x6 => Self::ShiftRight(x, y),
                0x7 => Self::SubReverse(x, y),
                0xE => Self::ShiftLeft(x, y),
                _ => Self::Unknown(ins),
            },
            0x9 if raw.n() == 0x0 => Self::SkipIfNotEqualReg(x, y),
            0xA => Self::SetIndex(raw.nnn()),
            0xB => Self::JumpOffset(raw.nnn()),
            0xC => Self::Random(x, raw.nn()),
            0xD => Self::Draw(x, y, raw.n()),
            0xE => match raw.nn() {
                0x9E => Self::SkipIfKeyPressed(x),
                0xA1 => Self::SkipIfKeyNotPressed(x),
                _ => Self::Unknown(ins),
            },
            0xF => match raw.nn() {
                0x07 => Self::ReadDelay(x),
                0x0A => Self::WaitKey(x),
                0x15 => Self::SetDelay(x),
                0x18 => Self::SetSound(x),
                0x1E => Self::AddIndex(x),
                0x29 => Self::FontGlyph(x),
                0x33 => Self::Bcd(x),
                0x55 => Self::Store(x),
                0x65 => Self::Load(x),
                _ => Self::Unknown(ins),
            },
            _ => Self::Unknown(ins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_manip() {
        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 1), 0xC);
        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(3, 1), 0xE);
        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 1), 0x4);

        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 2), 0x4C);
        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 2), 0xCE);
        assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 4), 0x4CEE);
    }

    #[test]
    fn test_fields() {
        let raw = RawInstruction::new(0xABCD);
        assert_eq!(raw.family(), 0xA);
        assert_eq!(raw.x(), 0xB);
        assert_eq!(raw.y(), 0xC);
        assert_eq!(raw.n(), 0xD);
        assert_eq!(raw.nn(), 0xCD);
        assert_eq!(raw.nnn(), 0xBCD);
        assert_eq!(raw, 0xABCD);
    }

    #[test]
    fn test_decode_all_families() {
        use Instruction::*;
        let cases = [
            (0x00E0, ClearScreen),
            (0x00EE, Return),
            (0x1234, Jump(0x234)),
            (0x2345, Call(0x345)),
            (0x3A12, SkipIfEqualImm(0xA, 0x12)),
            (0x4B34, SkipIfNotEqualImm(0xB, 0x34)),
            (0x5120, SkipIfEqualReg(0x1, 0x2)),
            (0x6C56, SetImm(0xC, 0x56)),
            (0x7D78, AddImm(0xD, 0x78)),
            (0x8120, SetReg(0x1, 0x2)),
            (0x8121, Or(0x1, 0x2)),
            (0x8122, And(0x1, 0x2)),
            (0x8123, Xor(0x1, 0x2)),
            (0x8124, AddReg(0x1, 0x2)),
            (0x8125, Sub(0x1, 0x2)),
            (0x8126, ShiftRight(0x1, 0x2)),
            (0x8127, SubReverse(0x1, 0x2)),
            (0x812E, ShiftLeft(0x1, 0x2)),
            (0x9340, SkipIfNotEqualReg(0x3, 0x4)),
            (0xA123, SetIndex(0x123)),
            (0xB456, JumpOffset(0x456)),
            (0xC7F0, Random(0x7, 0xF0)),
            (0xD125, Draw(0x1, 0x2, 0x5)),
            (0xE59E, SkipIfKeyPressed(0x5)),
            (0xE6A1, SkipIfKeyNotPressed(0x6)),
            (0xF107, ReadDelay(0x1)),
            (0xF20A, WaitKey(0x2)),
            (0xF315, SetDelay(0x3)),
            (0xF418, SetSound(0x4)),
            (0xF51E, AddIndex(0x5)),
            (0xF629, FontGlyph(0x6)),
            (0xF733, Bcd(0x7)),
            (0xF855, Store(0x8)),
            (0xF965, Load(0x9)),
        ];
        for (op, expected) in cases {
            assert_eq!(Instruction::decode_raw(op), expected, "opcode {op:04X}");
        }
    }

    #[test]
    fn test_decode_unknown() {
        for op in [0x0000, 0x0123, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE19F, 0xF100, 0xF1FF]
        {
            assert_eq!(Instruction::decode_raw(op), Instruction::Unknown(op), "opcode {op:04X}");
        }
    }
}
