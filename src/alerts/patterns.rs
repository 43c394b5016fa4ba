//! Annunciation patterns: beep cadences, tone-count state machine, and the
//! sound-file lookup table.
//!
//! Two interchangeable hardware variants implement the same idea (severity
//! up, annunciation faster and more insistent): a piezo buzzer driven by a
//! discrete tone-count state machine, and a sound-file player with voice
//! clips per parameter. The variant is selected by configuration, not by
//! duplicated code paths.

use crate::hal::{Annunciator, SoundId};
use crate::params::{AlertLevel, Millis, ParameterId};

/// Which annunciation hardware is fitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnunciationVariant {
    /// Piezo buzzer: beep-count patterns via [`BeepPattern`].
    Buzzer,
    /// Sound-file player: one clip per (parameter, severity).
    SoundFiles,
}

// =============================================================================
// Cadence and Beep Pattern Constants
// =============================================================================

/// Pause between beeps within one pattern (ms).
pub const BEEP_PAUSE: Millis = 150;

/// Short beep duration (ms).
pub const BEEP_SHORT: Millis = 100;

/// Medium beep duration (ms).
pub const BEEP_MEDIUM: Millis = 250;

/// Long beep duration (ms).
pub const BEEP_LONG: Millis = 500;

/// Repeat cadence per level: annunciation gets faster as severity rises.
pub const REPEAT_INFO: Millis = 5000;
pub const REPEAT_WARNING: Millis = 3000;
pub const REPEAT_CRITICAL: Millis = 2000;
pub const REPEAT_DANGER: Millis = 1000;

const _: () = assert!(REPEAT_INFO > REPEAT_WARNING);
const _: () = assert!(REPEAT_WARNING > REPEAT_CRITICAL);
const _: () = assert!(REPEAT_CRITICAL > REPEAT_DANGER);

/// Repeat cadence for a level.
pub const fn cadence_for(level: AlertLevel) -> Millis {
    match level {
        AlertLevel::None | AlertLevel::Info => REPEAT_INFO,
        AlertLevel::Warning => REPEAT_WARNING,
        AlertLevel::Critical => REPEAT_CRITICAL,
        AlertLevel::Danger => REPEAT_DANGER,
    }
}

/// Number of beeps per pattern cycle for a level.
pub const fn beep_count_for(level: AlertLevel) -> u8 {
    match level {
        AlertLevel::None => 0,
        AlertLevel::Info => 1,
        AlertLevel::Warning => 2,
        AlertLevel::Critical => 3,
        AlertLevel::Danger => 5,
    }
}

/// Duration of each beep for a level.
pub const fn beep_duration_for(level: AlertLevel) -> Millis {
    match level {
        AlertLevel::None | AlertLevel::Info => BEEP_SHORT,
        AlertLevel::Warning | AlertLevel::Critical => BEEP_MEDIUM,
        AlertLevel::Danger => BEEP_LONG,
    }
}

// =============================================================================
// Sound File Catalog (file indices on the player's SD card)
// =============================================================================

pub const SOUND_STARTUP: SoundId = SoundId(1);
pub const SOUND_ACKNOWLEDGED: SoundId = SoundId(2);
pub const SOUND_INFO: SoundId = SoundId(3);
pub const SOUND_WARNING: SoundId = SoundId(4);
pub const SOUND_CRITICAL: SoundId = SoundId(5);
pub const SOUND_DANGER: SoundId = SoundId(6);
pub const SOUND_BOOST_WARNING: SoundId = SoundId(7);
pub const SOUND_BOOST_CRITICAL: SoundId = SoundId(8);
pub const SOUND_BOOST_DANGER: SoundId = SoundId(9);
pub const SOUND_IAT_WARNING: SoundId = SoundId(10);
pub const SOUND_IAT_CRITICAL: SoundId = SoundId(11);
pub const SOUND_EGT_WARNING: SoundId = SoundId(12);
pub const SOUND_EGT_CRITICAL: SoundId = SoundId(13);
pub const SOUND_EGT_DANGER: SoundId = SoundId(14);
pub const SOUND_COOLANT_WARNING: SoundId = SoundId(15);
pub const SOUND_COOLANT_CRITICAL: SoundId = SoundId(16);
pub const SOUND_COOLANT_DANGER: SoundId = SoundId(17);

/// Select the voice clip for an alert.
///
/// Parameter-specific clips where they exist on the card, generic per-level
/// clips as fallback. Keyed on [`ParameterId`], never on message text.
pub const fn sound_for(source: Option<ParameterId>, level: AlertLevel) -> Option<SoundId> {
    let specific = match (source, level) {
        (Some(ParameterId::Boost), AlertLevel::Warning) => Some(SOUND_BOOST_WARNING),
        (Some(ParameterId::Boost), AlertLevel::Critical) => Some(SOUND_BOOST_CRITICAL),
        (Some(ParameterId::Boost), AlertLevel::Danger) => Some(SOUND_BOOST_DANGER),
        (Some(ParameterId::IntakePre | ParameterId::IntakePost), AlertLevel::Warning) => {
            Some(SOUND_IAT_WARNING)
        }
        (Some(ParameterId::IntakePre | ParameterId::IntakePost), AlertLevel::Critical) => {
            Some(SOUND_IAT_CRITICAL)
        }
        (Some(ParameterId::Exhaust), AlertLevel::Warning) => Some(SOUND_EGT_WARNING),
        (Some(ParameterId::Exhaust), AlertLevel::Critical) => Some(SOUND_EGT_CRITICAL),
        (Some(ParameterId::Exhaust), AlertLevel::Danger) => Some(SOUND_EGT_DANGER),
        (Some(ParameterId::Coolant), AlertLevel::Warning) => Some(SOUND_COOLANT_WARNING),
        (Some(ParameterId::Coolant), AlertLevel::Critical) => Some(SOUND_COOLANT_CRITICAL),
        (Some(ParameterId::Coolant), AlertLevel::Danger) => Some(SOUND_COOLANT_DANGER),
        // No dedicated clip recorded; fall through to generic
        _ => None,
    };
    if specific.is_some() {
        return specific;
    }
    match level {
        AlertLevel::None => None,
        AlertLevel::Info => Some(SOUND_INFO),
        AlertLevel::Warning => Some(SOUND_WARNING),
        AlertLevel::Critical => Some(SOUND_CRITICAL),
        AlertLevel::Danger => Some(SOUND_DANGER),
    }
}

// =============================================================================
// Beep Sub-State Machine (buzzer variant)
// =============================================================================

/// Phase of the tone-count state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BeepPhase {
    ToneOn,
    ToneOff,
}

/// One in-flight beep pattern: alternates tone-on/tone-off for the level's
/// beep count, then reports completion. The owner decides when a new cycle
/// starts (repeat cadence).
///
/// Purely time-driven off the timestamps it is handed, and idempotent within
/// a single instant: advancing twice at the same `now` cannot double-toggle
/// the tone.
#[derive(Clone, Copy, Debug)]
pub struct BeepPattern {
    beep_ms: Millis,
    remaining: u8,
    phase: BeepPhase,
    phase_start: Millis,
}

impl BeepPattern {
    /// Begin the pattern for a level: the first tone starts immediately.
    pub fn start<A: Annunciator>(level: AlertLevel, now: Millis, ann: &mut A) -> Self {
        ann.play(SoundId::TONE);
        Self {
            beep_ms: beep_duration_for(level),
            remaining: beep_count_for(level),
            phase: BeepPhase::ToneOn,
            phase_start: now,
        }
    }

    /// Advance the pattern. Returns `true` once the last beep has finished.
    pub fn tick<A: Annunciator>(&mut self, now: Millis, ann: &mut A) -> bool {
        match self.phase {
            BeepPhase::ToneOn => {
                if now.saturating_sub(self.phase_start) >= self.beep_ms {
                    ann.stop();
                    self.remaining = self.remaining.saturating_sub(1);
                    if self.remaining == 0 {
                        return true;
                    }
                    self.phase = BeepPhase::ToneOff;
                    self.phase_start = now;
                }
            }
            BeepPhase::ToneOff => {
                if now.saturating_sub(self.phase_start) >= BEEP_PAUSE {
                    ann.play(SoundId::TONE);
                    self.phase = BeepPhase::ToneOn;
                    self.phase_start = now;
                }
            }
        }
        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
