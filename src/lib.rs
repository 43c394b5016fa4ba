//! Telemetry acquisition and alert engine for engine monitoring gauges.
//!
//! This library contains the core logic of a read-only gauge system for a
//! turbodiesel engine: it turns noisy analog sensor readings into filtered
//! physical values, tracks per-sensor faults, evaluates multi-level safety
//! thresholds, and drives prioritized, acknowledgeable audio annunciation.
//!
//! Hardware is reached only through the capability traits in [`hal`]: the
//! embedding firmware supplies the ADC/SPI transport ([`hal::SensorBus`]) and
//! the buzzer or sound-file player ([`hal::Annunciator`]). The display is not
//! driven from here at all; it consumes [`engine::Snapshot`] each cycle.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`. All time-driven
//! logic takes a monotonic millisecond timestamp as a parameter instead of
//! reading a clock, so every temporal property is unit-testable.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alerts;
pub mod conditioning;
pub mod config;
pub mod engine;
pub mod faults;
pub mod hal;
pub mod params;

// Re-export the main entry points at crate level
pub use engine::{GaugeEngine, Snapshot};
pub use params::{AlertLevel, Millis, ParameterId};
