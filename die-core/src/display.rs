//! Pip display on four LED groups.
//!
//! The seven pips of a die face only ever light up in four groups:
//!
//! ```text
//!  A . B      A: diagonal A (top-left, bottom-right)
//!  M C M      B: diagonal B (top-right, bottom-left)
//!  B . A      M: middle pair, C: centre
//! ```

use embedded_hal::digital::v2::OutputPin;

use crate::face::Face;

const CENTRE: u8 = 1 << 0;
const DIAGONAL_A: u8 = 1 << 1;
const DIAGONAL_B: u8 = 1 << 2;
const MIDDLE: u8 = 1 << 3;

/// LED groups lit for each face, indexed by face value.
const PATTERNS: [u8; 7] = [
    0,
    CENTRE,
    DIAGONAL_A,
    DIAGONAL_A | CENTRE,
    DIAGONAL_A | DIAGONAL_B,
    DIAGONAL_A | DIAGONAL_B | CENTRE,
    DIAGONAL_A | DIAGONAL_B | MIDDLE,
];

/// Bit set of LED groups for `face`.
pub const fn pattern(face: Face) -> u8 {
    PATTERNS[face.value() as usize]
}

/// Drives the four LED groups of a die. Pins are active high.
pub struct PipDisplay<P> {
    centre: P,
    diagonal_a: P,
    diagonal_b: P,
    middle: P,
}

impl<P: OutputPin> PipDisplay<P> {
    /// Takes ownership of the four group pins. The pins are not written
    /// until the first [`show`](Self::show).
    ///
    /// # Arguments
    ///
    /// * `centre` - Centre pip
    /// * `diagonal_a` - Top-left and bottom-right pips
    /// * `diagonal_b` - Top-right and bottom-left pips
    /// * `middle` - Middle-left and middle-right pips
    pub fn new(centre: P, diagonal_a: P, diagonal_b: P, middle: P) -> Self {
        Self {
            centre,
            diagonal_a,
            diagonal_b,
            middle,
        }
    }

    /// Lights the pips of `face`. Blank turns every group off.
    pub fn show(&mut self, face: Face) -> Result<(), P::Error> {
        let bits = pattern(face);
        set(&mut self.centre, bits & CENTRE != 0)?;
        set(&mut self.diagonal_a, bits & DIAGONAL_A != 0)?;
        set(&mut self.diagonal_b, bits & DIAGONAL_B != 0)?;
        set(&mut self.middle, bits & MIDDLE != 0)
    }

    /// Gives the pins back in the order [`new`](Self::new) takes them.
    pub fn release(self) -> (P, P, P, P) {
        (self.centre, self.diagonal_a, self.diagonal_b, self.middle)
    }
}

fn set<P: OutputPin>(pin: &mut P, on: bool) -> Result<(), P::Error> {
    if on { pin.set_high() } else { pin.set_low() }
}
