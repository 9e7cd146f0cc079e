//! Pin mapping and the board side of [`DieHal`].
//!
//! # Pin Assignments
//!
//! ## Button
//! - **PA0**: BTN_N - Roll button to ground, internal pull-up, EXTI line 0
//!
//! ## Pip LEDs (active high, one resistor per group)
//! - **PA1**: LED_C - Centre pip
//! - **PA2**: LED_A - Diagonal A (top-left, bottom-right)
//! - **PA3**: LED_B - Diagonal B (top-right, bottom-left)
//! - **PA4**: LED_M - Middle pair
//!
//! ## Battery
//! - Internal VREFINT channel on ADC1, measured against VDDA
//!
//! ## Low Power & RTC
//! - **PC14**: OSC32_IN - 32.768 kHz crystal input
//! - **PC15**: OSC32_OUT - 32.768 kHz crystal output
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

use die_core::display::PipDisplay;
use die_core::{DieHal, Face, Wake};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};

use crate::battery::BatteryProbe;
use crate::power::WakeSources;

/// Everything the die loop touches on the board.
///
/// Owns the button, the pip LEDs, the battery probe and the wake sources,
/// and hands them to the control loop through [`DieHal`].
pub struct Board {
    /// Roll button, low while pressed
    button: ExtiInput<'static>,
    /// Four LED groups forming the pips
    display: PipDisplay<Output<'static>>,
    /// VREFINT reading used as the battery proxy
    probe: BatteryProbe,
    /// Tick source and sleep
    wake: WakeSources,
}

impl Board {
    /// Claims the die's pins and peripherals from the STM32 singleton.
    ///
    /// # Initial GPIO States
    ///
    /// - PA0 (BTN_N): Input, pull-up
    /// - PA1..PA4 (LEDs): Low (display blank)
    ///
    /// The tick source starts disabled; the control loop enables it at
    /// power-up.
    ///
    /// # Arguments
    ///
    /// * `p` - STM32 peripheral singleton from embassy_stm32::init()
    pub fn new(p: embassy_stm32::Peripherals) -> Self {
        Self {
            button: ExtiInput::new(p.PA0, p.EXTI0, Pull::Up),
            display: PipDisplay::new(
                Output::new(p.PA1, Level::Low, Speed::Low),
                Output::new(p.PA2, Level::Low, Speed::Low),
                Output::new(p.PA3, Level::Low, Speed::Low),
                Output::new(p.PA4, Level::Low, Speed::Low),
            ),
            probe: BatteryProbe::new(p.ADC1),
            wake: WakeSources::new(),
        }
    }
}

impl DieHal for Board {
    fn button_pressed(&mut self) -> bool {
        self.button.is_low()
    }

    fn set_display(&mut self, face: Face) {
        // GPIO writes on this chip cannot fail.
        if let Err(never) = self.display.show(face) {
            match never {}
        }
    }

    async fn battery_proxy(&mut self) -> u8 {
        self.probe.sample().await
    }

    fn enable_tick_source(&mut self) {
        self.wake.enable_tick();
    }

    fn disable_tick_source(&mut self) {
        self.wake.disable_tick();
    }

    async fn sleep_until_wake(&mut self) -> Wake {
        self.wake.wait(&mut self.button).await
    }
}
