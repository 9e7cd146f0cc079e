//! Control logic of a single-button electronic die.
//!
//! Pressing the button spins the die through a decelerating roll animation,
//! draws a pseudo-random face, blinks it, holds it for a couple of seconds and
//! then blanks. Between presses the die sleeps with its tick source switched
//! off, so only a button edge can wake it.
//!
//! # Components
//!
//! - [`tick`] - eight-bit wraparound-safe timebase
//! - [`rng`] - xorshift face generator
//! - [`button`] - release debouncer
//! - [`battery`] - once-per-activation low-battery check and warning blink
//! - [`animator`] - roll, settle and hold state machine
//! - [`power`] - decides when the tick source may be switched off
//! - [`die`] - the loop tying them together
//! - [`display`] - face to LED-group mapping for boards with four pip groups
//!
//! The hardware is reached only through [`DieHal`].

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod animator;
pub mod battery;
pub mod button;
pub mod config;
pub mod die;
pub mod display;
pub mod face;
pub mod hal;
pub mod phase;
pub mod power;
pub mod rng;
pub mod tick;

pub use config::{Config, proxy_threshold};
pub use die::{Die, DisplayOwner};
pub use face::Face;
pub use hal::{DieHal, Wake};
pub use power::TickSource;
pub use tick::{TICK_MS, Tick, Ticks};
