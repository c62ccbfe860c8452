/// Behaviours that differ between CHIP-8 interpreters in the wild.
///
/// Both default to the COSMAC VIP behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 / 8XYE copy Vy into Vx before shifting. When false, Vx is shifted in place.
    pub shift_copies_vy: bool,
    /// FX55 / FX65 leave I pointing one past the last byte transferred.
    pub load_store_advances_index: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            shift_copies_vy: true,
            load_store_advances_index: true,
        }
    }
}

/// Separately:
/// CPU: 700 times per second
/// Display: 60 times per second
pub const DEFAULT_CPU_HZ: u32 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    /// Rate a host should drive `Machine::step` at. The machine itself never reads a clock.
    pub cpu_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quirks: Quirks::default(),
            cpu_hz: DEFAULT_CPU_HZ,
        }
    }
}
