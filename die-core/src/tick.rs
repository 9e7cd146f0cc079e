//! Coarse wraparound-safe timebase.
//!
//! The tick source fires roughly every 16 ms and the counter is only eight bits
//! wide, so it wraps about every four seconds. Elapsed time is always computed
//! as `now - mark` modulo 256, which gives the true duration as long as that
//! duration is below 128 ticks. Every delay in [`Config`](crate::Config) is far
//! below that bound; [`ticks_from_ms`] rejects anything longer at compile time.

/// Period of the tick source in milliseconds.
pub const TICK_MS: u16 = 16;

/// Longest duration that can be measured without ambiguity.
pub const MAX_TICKS: Ticks = 127;

/// A duration measured in ticks.
pub type Ticks = u8;

/// Converts milliseconds to ticks, rounding down.
///
/// Panics (at compile time when used in a `const`) if the result would not be
/// measurable with an eight-bit counter.
pub const fn ticks_from_ms(ms: u16) -> Ticks {
    let ticks = ms / TICK_MS;
    assert!(ticks <= MAX_TICKS as u16, "duration exceeds the tick counter range");
    ticks as Ticks
}

/// A point in time on the tick counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(u8);

impl Tick {
    /// Tick at counter value `raw`.
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Counter value of this tick.
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Ticks elapsed from `mark` to `self`.
    pub const fn since(self, mark: Tick) -> Ticks {
        self.0.wrapping_sub(mark.0)
    }

    /// The tick `ticks` periods after this one, modulo 256.
    pub const fn wrapping_add(self, ticks: Ticks) -> Self {
        Self(self.0.wrapping_add(ticks))
    }
}

/// Free-running tick counter.
///
/// Only [`advance`](TickClock::advance) moves it. While the tick source is
/// disabled nothing calls it and the clock stands still.
#[derive(Debug, Default)]
pub struct TickClock {
    now: Tick,
}

impl TickClock {
    /// Clock starting at tick zero.
    pub const fn new() -> Self {
        Self { now: Tick(0) }
    }

    /// Records one elapsed tick period.
    pub fn advance(&mut self) {
        self.now = self.now.wrapping_add(1);
    }

    /// Current tick.
    pub const fn now(&self) -> Tick {
        self.now
    }

    /// Ticks elapsed since `mark`.
    ///
    /// Exact while fewer than 128 ticks have passed.
    ///
    /// # Arguments
    ///
    /// * `mark` - Earlier tick taken from [`now`](Self::now)
    pub const fn elapsed_since(&self, mark: Tick) -> Ticks {
        self.now.since(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_like_the_tick_period() {
        assert_eq!(ticks_from_ms(32), 2);
        assert_eq!(ticks_from_ms(50), 3);
        assert_eq!(ticks_from_ms(100), 6);
        assert_eq!(ticks_from_ms(200), 12);
        assert_eq!(ticks_from_ms(400), 25);
        assert_eq!(ticks_from_ms(2000), 125);
    }

    #[test]
    #[should_panic]
    fn rejects_ambiguous_durations() {
        ticks_from_ms(2048);
    }

    #[test]
    fn elapsed_is_exact_across_wraparound() {
        for mark in 0..=u8::MAX {
            for duration in 0..=MAX_TICKS {
                let mut clock = TickClock::new();
                for _ in 0..mark {
                    clock.advance();
                }
                let start = clock.now();
                for _ in 0..duration {
                    clock.advance();
                }
                assert_eq!(clock.elapsed_since(start), duration);
            }
        }
    }

    #[test]
    fn counter_wraps() {
        let mut clock = TickClock::new();
        for _ in 0..256 {
            clock.advance();
        }
        assert_eq!(clock.now(), Tick::from_raw(0));
        assert_eq!(Tick::from_raw(3).since(Tick::from_raw(250)), 9);
    }
}
