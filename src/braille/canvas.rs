use crate::map::Point;

/// Empty braille pattern, U+2800
pub const BLANK: char = '\u{2800}';

/// Braille canvas: every character cell holds a 2x4 block of dots.
///
/// Canvas pixels map one-to-one onto dots, so a map sampled on a
/// `width * 2` by `height * 4` canvas can be plotted without scaling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrailleCanvas {
    width: usize,  // characters
    height: usize, // characters
    cells: Vec<u8>,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Dot resolution: `(width * 2, height * 4)`
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width * 2, self.height * 4)
    }

    /// Set one dot. Dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            _ => 0x80,
        };

        self.cells[cy * self.width + cx] |= bit;
    }

    /// Set the dot under a canvas point; points off the canvas are ignored
    pub fn plot(&mut self, p: Point) {
        if p.x < 0.0 || p.y < 0.0 {
            return;
        }
        self.set_pixel(p.x as usize, p.y as usize);
    }

    /// Filled disc of `radius` dots. A radius below one dot sets a single dot.
    pub fn fill_disc(&mut self, center: Point, radius: f64) {
        if radius < 1.0 {
            self.plot(center);
            return;
        }
        let r = radius.ceil() as i64;
        let (cx, cy) = (center.x.floor() as i64, center.y.floor() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f64) <= radius * radius {
                    let (x, y) = (cx + dx, cy + dy);
                    if x >= 0 && y >= 0 {
                        self.set_pixel(x as usize, y as usize);
                    }
                }
            }
        }
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row * self.width + col] != 0
    }

    /// Characters of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = char> + '_ {
        let cells = if row < self.height {
            &self.cells[row * self.width..(row + 1) * self.width]
        } else {
            &[][..]
        };
        cells
            .iter()
            .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
    }

    /// All rows as strings, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|i| self.row(i).collect())
    }
}
