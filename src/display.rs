pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

pub type Pixels = [[bool; WIDTH]; HEIGHT];

/// 64x32 monochrome framebuffer, one bool per pixel, indexed `[row][column]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Pixels,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.pixels = [[false; WIDTH]; HEIGHT];
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// XORs `sprite` onto the screen, one byte per row with the MSB leftmost.
    ///
    /// The origin wraps around the screen, but the sprite itself is clipped at
    /// the right and bottom edges. Returns true if any lit pixel was turned off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x0, y0) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            let ny = y0 + i;
            if ny >= HEIGHT {
                break;
            }
            for j in 0..8 {
                let nx = x0 + j;
                if nx >= WIDTH {
                    break;
                }
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[ny][nx];
                vf |= *pixel;
                *pixel = !*pixel;
            }
        }
        vf
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
