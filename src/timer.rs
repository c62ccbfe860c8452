/// An 8-bit countdown that loses one unit per machine step.
///
/// Ticking is tied to `Machine::step` rather than wall-clock time, so the
/// caller's step rate sets how fast timers drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Decrements a running timer. Returns true on the tick that takes it from 1 to 0.
    pub fn tick(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        self.count == 0
    }
}
