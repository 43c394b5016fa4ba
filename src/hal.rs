//! Capability traits connecting the core to the hardware.
//!
//! The engine never touches registers: the embedding firmware implements
//! [`SensorBus`] over its ADC/SPI transport and [`Annunciator`] over its
//! buzzer or sound-file player. Both must be non-blocking or bounded-latency;
//! the engine calls them from a single cooperative loop.

use core::fmt;

use crate::params::ParameterId;

// =============================================================================
// Sensor Transport
// =============================================================================

/// Transport-level acquisition failure.
///
/// These are the only errors the transport can surface; everything physical
/// (open circuit, out-of-range, decode fault) is detected downstream by the
/// signal conditioner and recovered as a fault flag, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorError {
    /// The backing module is not detected (at start or mid-run).
    Unavailable,
    /// The transfer itself failed (bus contention, timeout).
    Bus,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "sensor module unavailable"),
            Self::Bus => write!(f, "sensor bus transfer failed"),
        }
    }
}

/// Raw sensor transport consumed by the signal conditioner.
///
/// Analog channels return volts at the ADC pin. The exhaust thermocouple has
/// its own accessor because its amplifier speaks a 32-bit frame over SPI
/// rather than an analog voltage.
pub trait SensorBus {
    /// Read one raw sample (volts) for an analog channel.
    fn read_channel(&mut self, channel: ParameterId) -> Result<f32, SensorError>;

    /// Read one 32-bit frame from the thermocouple amplifier.
    fn read_thermocouple_frame(&mut self) -> Result<u32, SensorError>;

    /// Whether the backing module for a channel is currently detected.
    fn is_available(&self, channel: ParameterId) -> bool;
}

// =============================================================================
// Annunciation
// =============================================================================

/// Identifier of one sound on the annunciation hardware.
///
/// For the sound-file variant this is the file index on the player's SD card
/// (`0001.mp3` etc.); for the buzzer variant only [`SoundId::TONE`] is used
/// and `play`/`stop` gate the tone on and off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundId(pub u8);

impl SoundId {
    /// Plain buzzer tone (buzzer variant).
    pub const TONE: Self = Self(0);
}

/// Audible annunciation hardware.
///
/// Absence of the hardware (`is_ready() == false`) degrades silently: alert
/// level and message computation are unaffected, only audio is suppressed.
pub trait Annunciator {
    /// Whether the hardware is present and initialized.
    fn is_ready(&self) -> bool;

    /// Start playing a sound (or switch the buzzer tone on).
    fn play(&mut self, sound: SoundId);

    /// Stop playback (or switch the buzzer tone off).
    fn stop(&mut self);

    /// Set output volume. Drivers without volume control ignore this.
    fn set_volume(&mut self, _level: u8) {}
}
