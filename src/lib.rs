#![cfg_attr(not(test), no_std)]

mod clock;
mod debounce;
#[cfg(target_os = "espidf")]
mod esp;
mod pin;
mod switch_monitor;

pub use clock::*;
pub use debounce::*;
#[cfg(target_os = "espidf")]
pub use esp::*;
pub use pin::*;
pub use switch_monitor::*;

// A polled, debounced single switch. Call `update` from the main loop, callbacks fire on
// press, release, every settled poll while pressed, and once when held past a threshold.
