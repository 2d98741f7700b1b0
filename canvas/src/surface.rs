use std::fmt;

/// Exact 4-channel color. Equality is exact on all four channels; the fill
/// engine depends on that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    pub fn opaque(self) -> Rgba {
        Rgba([self.0[0], self.0[1], self.0[2], 255])
    }

    /// Parses "#rrggbb" or "#rgb" into an opaque color.
    pub fn from_hex(value: &str) -> Option<Rgba> {
        let digits = value.strip_prefix('#')?;
        match digits.len() {
            6 => {
                let packed = u32::from_str_radix(digits, 16).ok()?;
                Some(Rgba([
                    (packed >> 16) as u8,
                    (packed >> 8) as u8,
                    packed as u8,
                    255,
                ]))
            }
            3 => {
                let packed = u32::from_str_radix(digits, 16).ok()?;
                let r = ((packed >> 8) & 0xf) as u8;
                let g = ((packed >> 4) & 0xf) as u8;
                let b = (packed & 0xf) as u8;
                Some(Rgba([r * 17, g * 17, b * 17, 255]))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    OutOfBounds { x: i32, y: i32 },
    DimensionMismatch { expected: (u32, u32), actual: (u32, u32) },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfBounds { x, y } => {
                write!(f, "coordinate ({x}, {y}) outside surface")
            }
            SurfaceError::DimensionMismatch { expected, actual } => write!(
                f,
                "snapshot is {}x{} but surface is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Immutable full copy of the surface at one instant. Identified only by its
/// position in the history stacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// The board's pixel grid: fixed dimensions, RGBA interleaved, one exclusive
/// owner per drawing session. The only pixel mutators are `set`, `restore`
/// and `clear`; every drawing primitive bottoms out in `set`.
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32, background: Rgba) -> Surface {
        let mut pixels = vec![0; width as usize * height as usize * 4];
        for pixel in pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&background.0);
        }
        Surface {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn offset(&self, x: i32, y: i32) -> Result<usize, SurfaceError> {
        if !self.contains(x, y) {
            return Err(SurfaceError::OutOfBounds { x, y });
        }
        Ok((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Rgba, SurfaceError> {
        let offset = self.offset(x, y)?;
        let mut channels = [0; 4];
        channels.copy_from_slice(&self.pixels[offset..offset + 4]);
        Ok(Rgba(channels))
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgba) -> Result<(), SurfaceError> {
        let offset = self.offset(x, y)?;
        self.pixels[offset..offset + 4].copy_from_slice(&color.0);
        Ok(())
    }

    /// Best-effort write used by the drawing primitives: strokes clip at the
    /// edge instead of failing the whole gesture.
    pub(crate) fn set_clipped(&mut self, x: i32, y: i32, color: Rgba) {
        let _ = self.set(x, y, color);
    }

    pub fn clear(&mut self, background: Rgba) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&background.0);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(SurfaceError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (snapshot.width, snapshot.height),
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_background() {
        let surface = Surface::new(4, 3, Rgba::WHITE);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(surface.get(x, y).unwrap(), Rgba::WHITE);
            }
        }
    }

    #[test]
    fn set_then_get_is_exact() {
        let mut surface = Surface::new(4, 4, Rgba::WHITE);
        let color = Rgba([1, 2, 3, 200]);
        surface.set(2, 1, color).unwrap();
        assert_eq!(surface.get(2, 1).unwrap(), color);
        assert_eq!(surface.get(1, 2).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut surface = Surface::new(4, 4, Rgba::WHITE);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100)] {
            assert_eq!(surface.get(x, y), Err(SurfaceError::OutOfBounds { x, y }));
            assert_eq!(
                surface.set(x, y, Rgba::BLACK),
                Err(SurfaceError::OutOfBounds { x, y })
            );
        }
        // A rejected write mutates nothing.
        assert_eq!(surface.as_bytes(), Surface::new(4, 4, Rgba::WHITE).as_bytes());
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut surface = Surface::new(4, 4, Rgba::WHITE);
        surface.set(1, 1, Rgba::BLACK).unwrap();
        let before = surface.snapshot();
        surface.clear(Rgba([9, 9, 9, 255]));
        assert_ne!(surface.get(1, 1).unwrap(), Rgba::BLACK);
        surface.restore(&before).unwrap();
        assert_eq!(surface.get(1, 1).unwrap(), Rgba::BLACK);
        assert_eq!(surface.get(0, 0).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn snapshot_is_independent_of_later_edits() {
        let mut surface = Surface::new(2, 2, Rgba::WHITE);
        let snapshot = surface.snapshot();
        surface.set(0, 0, Rgba::BLACK).unwrap();
        surface.restore(&snapshot).unwrap();
        assert_eq!(surface.get(0, 0).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn restore_rejects_dimension_mismatch() {
        let mut surface = Surface::new(4, 4, Rgba::WHITE);
        let other = Surface::new(3, 4, Rgba::WHITE).snapshot();
        assert_eq!(
            surface.restore(&other),
            Err(SurfaceError::DimensionMismatch {
                expected: (4, 4),
                actual: (3, 4),
            })
        );
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(Rgba::from_hex("#1f2f3f"), Some(Rgba([31, 47, 63, 255])));
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("#000"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_hex("red"), None);
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn hex_round_trip() {
        let color = Rgba([0x12, 0xab, 0xef, 255]);
        assert_eq!(Rgba::from_hex(&color.to_hex()), Some(color));
    }
}
