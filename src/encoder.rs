use crate::constants::segment::*;

/// Hex glyphs in logical segment order, bit 0 = a ... bit 6 = g.
const GLYPHS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

/// Which output line of a digit register drives each logical segment.
///
/// Each field is the bit mask written into the digit register to light that
/// segment, e.g. `SEG6` for output line 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMap {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub f: u8,
    pub g: u8,
    pub dp: u8,
}

impl SegmentMap {
    /// Wiring of the common STLED316S display boards.
    pub const STANDARD: SegmentMap = SegmentMap {
        a: SEG6,
        b: SEG5,
        c: SEG3,
        d: SEG2,
        e: SEG1,
        f: SEG7,
        g: SEG8,
        dp: SEG4,
    };

    fn lines(&self) -> [u8; 7] {
        [self.a, self.b, self.c, self.d, self.e, self.f, self.g]
    }
}

impl Default for SegmentMap {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Nibble to segment pattern lookup, built once from a [`SegmentMap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentEncoder {
    table: [u8; 16],
    dp: u8,
}

impl SegmentEncoder {
    pub fn new(map: &SegmentMap) -> Self {
        let lines = map.lines();
        let mut table = [0; 16];
        for (pattern, glyph) in table.iter_mut().zip(GLYPHS) {
            *pattern = lines
                .iter()
                .enumerate()
                .filter(|(segment, _)| glyph & (1 << segment) != 0)
                .fold(0, |acc, (_, line)| acc | line);
        }
        Self { table, dp: map.dp }
    }

    /// Segment pattern for the low nibble of `value`.
    pub fn encode(&self, value: u8) -> u8 {
        self.table[(value & 0x0F) as usize]
    }

    pub fn dp(&self) -> u8 {
        self.dp
    }

    pub fn table(&self) -> &[u8; 16] {
        &self.table
    }
}

impl Default for SegmentEncoder {
    fn default() -> Self {
        Self::new(&SegmentMap::STANDARD)
    }
}
