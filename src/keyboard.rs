pub const KEY_COUNT: usize = 16;

/// State of the 16-key hex keypad. Written by the host before each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }

    pub fn reset(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = pressed;
        }
    }

    pub fn set_all(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    // values past 0xF name no key, so they are never pressed
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pressed_scans_from_zero() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.set_key(0xB, true);
        keypad.set_key(0x4, true);
        assert_eq!(keypad.first_pressed(), Some(0x4));
        keypad.set_key(0x4, false);
        assert_eq!(keypad.first_pressed(), Some(0xB));
    }

    #[test]
    fn test_out_of_range_keys_are_never_pressed() {
        let mut keypad = Keypad::new();
        keypad.set_all([true; KEY_COUNT]);
        keypad.set_key(0x10, false);
        assert!(keypad.is_pressed(0xF));
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
        keypad.reset();
        assert!(!keypad.is_pressed(0x0));
    }
}
