//! Firmware for a coin-cell powered, single-button electronic die.
//!
//! # Overview
//!
//! Pressing the button spins the die, which slows down and lands on a
//! pseudo-random face, blinks it, holds it for two seconds and goes dark.
//! Holding the button keeps it spinning. A weak battery is signalled with a
//! quick blink of the centre pip before the roll is shown.
//!
//! # Hardware
//!
//! - **MCU**: STM32L031G6U6 (Cortex-M0+, ultra-low-power)
//! - **Battery**: 1x CR2032 coin cell, no regulator
//! - **LEDs**: 7 pips in 4 groups driven straight from GPIO
//! - **Button**: momentary switch to ground on an EXTI line
//! - **RTC**: 32.768 kHz crystal for timekeeping in low-power mode
//!
//! # Low Power Operation
//!
//! - MSI oscillator at 66 kHz for minimal active current
//! - The embassy executor sleeps whenever the die loop is waiting
//! - A 16 ms ticker wakes the MCU only while something is animating
//! - Once idle, the ticker is dropped and only the button wakes the MCU
//!
//! All of the die's behaviour lives in the `die-core` crate; this binary only
//! provides the board it runs on.
//!
//! # Module Organization
//!
//! - [`hardware`] - Pin mappings and the board implementation
//! - [`power`] - Tick source and sleep
//! - [`battery`] - VREFINT battery proxy

#![no_std]
#![no_main]

mod battery;
mod hardware;
mod power;

use die_core::{Config as DieConfig, Die, proxy_threshold};
use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    rcc::{LsConfig, LseConfig, mux::ClockMux},
    time::Hertz,
};
use {defmt_rtt as _, panic_probe as _};

use hardware::Board;

/// Typical VREFINT of the STM32L0 series in millivolts.
const VREFINT_MV: u16 = 1224;

/// Cell voltage below which the die warns about its battery.
const LOW_BATTERY_MV: u16 = 2400;

/// Die timings with the battery threshold for this chip's reference.
const DIE_CONFIG: DieConfig =
    DieConfig::new().with_low_battery_threshold(proxy_threshold(VREFINT_MV, LOW_BATTERY_MV));

/// Creates a low-power clock configuration for STM32L031.
///
/// # Clock Settings
///
/// - **MSI**: 66 kHz in normal mode, 2.097 MHz in debug mode (keeps the probe attached)
/// - **System clock**: MSI (no PLL)
/// - **LSE**: 32.768 kHz external crystal, clocking the time driver while asleep
/// - **Voltage scale**: Range 1
///
/// The die does almost nothing per wake, so the slowest clock that still
/// finishes a loop pass well inside one 16 ms tick is the right trade-off.
fn create_low_power_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        #[cfg(feature = "debug-mode")]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        #[cfg(not(feature = "debug-mode"))]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE66K),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(LseConfig {
                frequency: Hertz::hz(32768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(embassy_stm32::rcc::LseDrive::Low),
            }),
        },
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

/// Main entry point for the die firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks for low power operation (66 kHz MSI)
/// 2. Initialize STM32 peripherals
/// 3. Claim the button, LEDs and ADC into a [`Board`]
/// 4. Hand the board to the die loop, which blanks the display, seeds its
///    generator from a VREFINT reading and starts the tick source
///
/// The loop never returns. Between passes the executor sleeps until the
/// ticker or the button wakes it.
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_low_power_config();

    let p = embassy_stm32::init(config);

    // Give a debugger time to attach before the first deep sleep.
    #[cfg(feature = "debug-mode")]
    {
        defmt::info!("Electronic die starting, waiting 3 seconds for debugger...");
        embassy_time::Timer::after_secs(3).await;
    }

    let mut board = Board::new(p);
    let mut die = Die::new(DIE_CONFIG);

    #[cfg(feature = "debug-mode")]
    defmt::info!(
        "Entering die loop (low battery above {=u8})",
        DIE_CONFIG.low_battery_threshold
    );

    die.run(&mut board).await;
}
