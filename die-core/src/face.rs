/// Value shown on the die: blank or one of the six faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Face(u8);

impl Face {
    /// All LEDs off.
    pub const BLANK: Face = Face(0);
    /// Centre pip only; also the low-battery warning face.
    pub const ONE: Face = Face(1);
    /// Highest face.
    pub const SIX: Face = Face(6);

    /// Returns `None` for anything outside `0..=6`.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 6 { Some(Self(value)) } else { None }
    }

    /// Maps an arbitrary byte onto `1..=6`.
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte % 6 + 1)
    }

    /// Pip count, zero for blank.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// `true` for [`Face::BLANK`].
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// The face after this one, wrapping 6 back to 1. Blank counts as zero.
    pub const fn next(self) -> Self {
        if self.0 >= 6 { Self(1) } else { Self(self.0 + 1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_faces() {
        assert_eq!(Face::BLANK.next(), Face::ONE);
        assert_eq!(Face::new(3).map(Face::next), Face::new(4));
        assert_eq!(Face::SIX.next(), Face::ONE);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Face::new(7), None);
        assert!(Face::new(0).is_some_and(Face::is_blank));
    }

    #[test]
    fn bytes_map_to_faces() {
        for byte in 0..=u8::MAX {
            let face = Face::from_byte(byte);
            assert!((1..=6).contains(&face.value()));
        }
    }
}
