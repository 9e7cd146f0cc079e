//! Board interface consumed by the control loop.

use crate::face::Face;

/// Why the processor woke up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wake {
    /// The periodic tick source elapsed.
    Tick,
    /// The button line changed.
    Button,
}

/// Everything the die needs from the hardware.
///
/// Implementations own the pins, the converter and the wake sources. No
/// method is called from interrupt context.
#[allow(async_fn_in_trait)]
pub trait DieHal {
    /// Instantaneous level of the button, `true` while held down.
    fn button_pressed(&mut self) -> bool;

    /// Shows `face`, or turns every LED off for [`Face::BLANK`].
    fn set_display(&mut self, face: Face);

    /// Eight-bit reading of an internal reference against the supply. Higher
    /// means a weaker battery.
    async fn battery_proxy(&mut self) -> u8;

    /// Starts the periodic tick, first elapsing one period from now.
    fn enable_tick_source(&mut self);

    /// After this only the button can end [`sleep_until_wake`](Self::sleep_until_wake).
    fn disable_tick_source(&mut self);

    /// Sleeps until the tick source elapses (if enabled) or the button line
    /// changes. A tick that elapsed while the caller was busy must complete
    /// this immediately rather than be lost.
    ///
    /// With the tick source disabled, a button already held down when this is
    /// called must also complete it immediately: the press may have landed
    /// after the last [`button_pressed`](Self::button_pressed) sample, and no
    /// further edge arrives until release.
    async fn sleep_until_wake(&mut self) -> Wake;
}
