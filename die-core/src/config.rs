//! Timing and threshold constants.

use crate::face::Face;
use crate::tick::{Ticks, ticks_from_ms};

/// Typical bandgap reference of small AVR/ARM parts, in millivolts.
pub const DEFAULT_REFERENCE_MV: u16 = 1100;

/// Supply voltage at which the battery is considered low, in millivolts.
pub const DEFAULT_LOW_SUPPLY_MV: u16 = 2400;

/// Proxy reading of an internal reference, measured against the supply with an
/// eight-bit converter, at the point where the supply drops to `low_supply_mv`.
///
/// The reading rises as the supply falls, so any value above this indicates a
/// low battery.
pub const fn proxy_threshold(reference_mv: u16, low_supply_mv: u16) -> u8 {
    assert!(reference_mv < low_supply_mv, "reference must be below the supply");
    (reference_mv as u32 * 255 / low_supply_mv as u32) as u8
}

/// Every timing and threshold of the die, in ticks where it is a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Quiet time after a release before the button counts as released.
    pub debounce: Ticks,
    /// Roll animation steps, slowest last.
    pub roll_delays: [Ticks; 4],
    /// How long the result is lit during each settle blink.
    pub settle_lit: Ticks,
    /// How long the display is dark during each settle blink.
    pub settle_dark: Ticks,
    /// Settle blinks are shown until the count exceeds this.
    pub settle_cycles: u8,
    /// How long the result stays up before the die blanks.
    pub hold: Ticks,
    /// Interval between low-battery warning toggles.
    pub warn_interval: Ticks,
    /// Warning blinks are shown until the count exceeds this.
    pub warn_cycles: u8,
    /// Proxy readings above this mean the battery is low.
    pub low_battery_threshold: u8,
    /// Face shown during the lit half of a warning blink.
    pub warning_face: Face,
}

impl Config {
    /// Default timings, with the low-battery threshold for a 1.1 V
    /// reference at a 2.4 V supply.
    ///
    /// The threshold is computed as `1100 * 255 / 2400` = 116, not the 122
    /// that truncating `2400 / 255` first would give. Boards with a different
    /// reference should override it with
    /// [`with_low_battery_threshold`](Self::with_low_battery_threshold).
    pub const fn new() -> Self {
        Self {
            debounce: ticks_from_ms(50),
            roll_delays: [
                ticks_from_ms(50),
                ticks_from_ms(100),
                ticks_from_ms(200),
                ticks_from_ms(400),
            ],
            settle_lit: ticks_from_ms(200),
            settle_dark: ticks_from_ms(50),
            settle_cycles: 3,
            hold: ticks_from_ms(2000),
            warn_interval: ticks_from_ms(32),
            warn_cycles: 5,
            low_battery_threshold: proxy_threshold(DEFAULT_REFERENCE_MV, DEFAULT_LOW_SUPPLY_MV),
            warning_face: Face::ONE,
        }
    }

    /// Replaces the low-battery threshold, keeping every timing.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Proxy reading above which the battery counts as low,
    ///   usually from [`proxy_threshold`]
    pub const fn with_low_battery_threshold(self, threshold: u8) -> Self {
        Self {
            low_battery_threshold: threshold,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_in_ticks() {
        let config = Config::new();
        assert_eq!(config.debounce, 3);
        assert_eq!(config.roll_delays, [3, 6, 12, 25]);
        assert_eq!(config.settle_lit, 12);
        assert_eq!(config.settle_dark, 3);
        assert_eq!(config.hold, 125);
        assert_eq!(config.warn_interval, 2);
    }

    #[test]
    fn threshold_scales_reference_to_supply() {
        assert_eq!(proxy_threshold(1100, 2400), 116);
        assert_eq!(proxy_threshold(1224, 2400), 130);
        assert_eq!(Config::new().low_battery_threshold, 116);
    }

    #[test]
    fn threshold_override_keeps_timings() {
        let config = Config::new().with_low_battery_threshold(130);
        assert_eq!(config.low_battery_threshold, 130);
        assert_eq!(Config { low_battery_threshold: 116, ..config }, Config::new());
    }
}
