//! Seeded noise canvas
//!
//! Every pixel is three bytes drawn in order from a mulberry32 stream, so a
//! seed always paints the same picture. Seeds are shown and typed in base 36.

/// 32-bit mulberry32 generator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let t = self.state;
        let mut x = (t ^ (t >> 15)).wrapping_mul(1 | t);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(61 | x));
        x ^ (x >> 14)
    }

    /// Uniform in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// `floor(next_f64() * 256)`, the top byte of the next output
    pub fn next_byte(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }
}

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lower-case base 36, `"0"` for zero
pub fn format_seed(seed: u32) -> String {
    let mut n = seed;
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Parse a base-36 seed, case-insensitive, surrounding whitespace ignored.
/// Values past `u32::MAX` wrap. Empty input or any other character gives `None`.
pub fn parse_seed(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.chars().try_fold(0u32, |acc, ch| {
        let d = ch.to_digit(36)?;
        Some(acc.wrapping_mul(36).wrapping_add(d))
    })
}

/// A painted canvas of RGB pixels, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    seed: u32,
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Canvas {
    pub fn paint(seed: u32, width: usize, height: usize) -> Self {
        let mut rng = Mulberry32::new(seed);
        let pixels = (0..width * height)
            .map(|_| [rng.next_byte(), rng.next_byte(), rng.next_byte()])
            .collect();
        Self {
            seed,
            width,
            height,
            pixels,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Repaint with the seed moved by `delta`, wrapping at the u32 range
    pub fn shifted(&self, delta: i32) -> Self {
        Self::paint(self.seed.wrapping_add_signed(delta), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_mulberry_outputs() {
        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
    }

    #[test]
    fn bytes_are_the_floor_of_the_float() {
        let mut a = Mulberry32::new(7);
        let mut b = a;
        for _ in 0..100 {
            assert_eq!(a.next_byte(), (b.next_f64() * 256.0).floor() as u8);
        }
    }

    #[test]
    fn seeds_in_base_36() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(42), "16");
        assert_eq!(format_seed(u32::MAX), "1z141z3");
        assert_eq!(parse_seed(" ZIK0ZJ "), Some(2_147_483_647));
        assert_eq!(parse_seed(""), None);
        assert_eq!(parse_seed("ab-c"), None);
        // one past u32::MAX wraps to zero
        assert_eq!(parse_seed("1z141z4"), Some(0));
    }

    #[test]
    fn same_seed_same_picture() {
        let a = Canvas::paint(1234, 8, 5);
        assert_eq!(a, Canvas::paint(1234, 8, 5));
        assert_ne!(a, Canvas::paint(1235, 8, 5));
        assert_eq!(a.pixel(8, 0), None);
    }

    #[test]
    fn first_pixel_uses_first_three_draws() {
        let canvas = Canvas::paint(0, 2, 2);
        let mut rng = Mulberry32::new(0);
        let expected = [rng.next_byte(), rng.next_byte(), rng.next_byte()];
        assert_eq!(canvas.pixel(0, 0), Some(expected));
    }

    #[test]
    fn shifting_wraps() {
        let canvas = Canvas::paint(0, 1, 1);
        assert_eq!(canvas.shifted(-1).seed(), u32::MAX);
        assert_eq!(canvas.shifted(-1).shifted(1), canvas);
    }
}
