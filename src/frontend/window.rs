use anyhow::Context;
use chip8vm::{Pixels, HEIGHT, WIDTH};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

const ON: (u16, u16, u16) = (0, 127, 255);
const OFF: (u16, u16, u16) = (0, 0, 0);

/// A minifb window showing the machine's framebuffer.
pub struct Screen {
    pixel_buffer: Vec<u32>,
    pub window: Window,
}

impl Screen {
    pub fn new(scale: Scale) -> anyhow::Result<Self> {
        let mut window = Window::new(
            "chip8vm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )
        .context("unable to open window")?;
        window.set_position(500, 300);
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            pixel_buffer: vec![0; WIDTH * HEIGHT],
            window,
        })
    }

    fn from_u16_rgb(&self, (r, g, b): (u16, u16, u16)) -> u32 {
        let (r, g, b) = (r as u32, g as u32, b as u32);
        (r << 16) | (g << 8) | b
    }

    /// Repaints the whole buffer from the machine's pixels.
    pub fn paint(&mut self, pixels: &Pixels) {
        let (on, off) = (self.from_u16_rgb(ON), self.from_u16_rgb(OFF));
        for (dst, &lit) in self.pixel_buffer.iter_mut().zip(pixels.iter().flatten()) {
            *dst = if lit { on } else { off };
        }
    }

    /// Pushes the buffer to the window and pumps its events.
    pub fn sync(&mut self) -> anyhow::Result<()> {
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
            .context("unable to update window")
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    pub fn keys_down(&self) -> Vec<Key> {
        self.window.get_keys()
    }
}
