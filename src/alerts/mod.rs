//! Alert state machine: level tracking, acknowledgment, and annunciation.
//!
//! - `evaluator`: thresholds to one prioritized [`AlertRecord`]
//! - `patterns`: beep cadences, tone-count state machine, sound-file map
//!
//! The state machine owns the composite `(level, acknowledged)` state and
//! everything temporal about annunciation. It is fed the evaluator's record
//! every evaluation cycle and ticked every main-loop iteration; all side
//! effects are driven by the timestamps it is handed, never by a clock of
//! its own.

pub mod evaluator;
pub mod patterns;

pub use evaluator::{ThresholdEvaluator, level_for};
pub use patterns::{AnnunciationVariant, BeepPattern, cadence_for, sound_for};

use log::{debug, info};

use crate::config::AudioConfig;
use crate::hal::Annunciator;
use crate::params::{AlertLevel, AlertRecord, Millis, ParameterId};

// =============================================================================
// Annunciation State
// =============================================================================

/// Mutable annunciation bookkeeping, owned exclusively by the state machine.
#[derive(Debug)]
struct AnnunciationState {
    /// Operator has acknowledged the current level; repeats are muted until
    /// the level changes.
    acknowledged: bool,
    /// When the current pattern cycle started.
    last_sound: Option<Millis>,
    /// In-flight buzzer pattern (buzzer variant only).
    beep: Option<BeepPattern>,
}

impl AnnunciationState {
    const fn idle() -> Self {
        Self {
            acknowledged: false,
            last_sound: None,
            beep: None,
        }
    }
}

// =============================================================================
// Alert State Machine
// =============================================================================

/// Owns the current/previous alert level and drives repeating annunciation.
///
/// Failure semantics: if the annunciation hardware reports not-ready, audio
/// degrades silently; level tracking and acknowledgment are unaffected.
#[derive(Debug)]
pub struct AlertStateMachine {
    level: AlertLevel,
    source: Option<ParameterId>,
    audio_enabled: bool,
    variant: AnnunciationVariant,
    state: AnnunciationState,
}

impl AlertStateMachine {
    pub const fn new(audio: &AudioConfig) -> Self {
        Self {
            level: AlertLevel::None,
            source: None,
            audio_enabled: audio.enabled,
            variant: audio.variant,
            state: AnnunciationState::idle(),
        }
    }

    /// Consume one evaluation cycle's outcome.
    ///
    /// A level change is the only event that clears acknowledgment and
    /// restarts annunciation immediately; an unchanged record (however often
    /// reapplied) neither re-triggers sound nor disturbs a running pattern.
    pub fn apply<A: Annunciator>(&mut self, record: &AlertRecord, now: Millis, ann: &mut A) {
        if record.level == self.level {
            self.source = record.source;
            return;
        }

        info!(
            "alert level {:?} -> {:?}: {}",
            self.level, record.level, record.message
        );
        self.level = record.level;
        self.source = record.source;
        self.state.acknowledged = false;

        if self.level > AlertLevel::None {
            self.start_pattern(now, ann);
        } else {
            self.silence(ann);
        }
    }

    /// Advance annunciation. Called every main-loop iteration.
    ///
    /// Idempotent within a tick: calling this multiple times at the same
    /// instant cannot double-trigger sound.
    pub fn tick<A: Annunciator>(&mut self, now: Millis, ann: &mut A) {
        if let Some(beep) = &mut self.state.beep
            && beep.tick(now, ann)
        {
            self.state.beep = None;
        }

        if self.level > AlertLevel::None
            && !self.state.acknowledged
            && let Some(last) = self.state.last_sound
            && now.saturating_sub(last) >= cadence_for(self.level)
        {
            self.start_pattern(now, ann);
        }
    }

    /// Acknowledge the current alert: halt the repeating annunciation and
    /// play a one-shot confirmation where the hardware supports it.
    ///
    /// Does not clear the underlying condition; the next evaluation cycle
    /// with an unchanged level stays silent, but any future level change
    /// re-triggers annunciation regardless.
    pub fn acknowledge<A: Annunciator>(&mut self, ann: &mut A) {
        info!("alert acknowledged at {:?}", self.level);
        self.state.acknowledged = true;
        self.silence(ann);
        if self.variant == AnnunciationVariant::SoundFiles
            && self.audio_enabled
            && ann.is_ready()
        {
            ann.play(patterns::SOUND_ACKNOWLEDGED);
        }
    }

    /// Manual override: force level to `None`, clear acknowledgment, stop
    /// annunciation. Not invoked by normal operation.
    pub fn reset<A: Annunciator>(&mut self, ann: &mut A) {
        info!("alert state reset");
        self.level = AlertLevel::None;
        self.source = None;
        self.silence(ann);
        self.state = AnnunciationState::idle();
    }

    /// Enable or disable audio output. Disabling stops any running pattern;
    /// alert computation is unaffected either way.
    pub fn set_audio_enabled<A: Annunciator>(&mut self, enabled: bool, ann: &mut A) {
        self.audio_enabled = enabled;
        if !enabled {
            self.silence(ann);
        }
    }

    /// Pass volume through to the driver, clamped to its 0-30 range.
    pub fn set_volume<A: Annunciator>(&mut self, volume: u8, ann: &mut A) {
        ann.set_volume(volume.min(30));
    }

    #[inline]
    pub const fn level(&self) -> AlertLevel { self.level }

    #[inline]
    pub const fn source(&self) -> Option<ParameterId> { self.source }

    #[inline]
    pub const fn is_acknowledged(&self) -> bool { self.state.acknowledged }

    // --- internals --------------------------------------------------------

    fn start_pattern<A: Annunciator>(&mut self, now: Millis, ann: &mut A) {
        // Cadence timing advances even when audio is suppressed, so a
        // hot-plugged or re-enabled annunciator joins cleanly on the next
        // repeat instead of firing a stale backlog
        self.state.last_sound = Some(now);

        if !self.audio_enabled || !ann.is_ready() {
            debug!("annunciation suppressed (disabled or hardware absent)");
            self.state.beep = None;
            return;
        }

        match self.variant {
            AnnunciationVariant::Buzzer => {
                self.state.beep = Some(BeepPattern::start(self.level, now, ann));
            }
            AnnunciationVariant::SoundFiles => {
                if let Some(sound) = sound_for(self.source, self.level) {
                    ann.play(sound);
                }
            }
        }
    }

    fn silence<A: Annunciator>(&mut self, ann: &mut A) {
        self.state.beep = None;
        ann.stop();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::patterns::{
        REPEAT_CRITICAL,
        REPEAT_WARNING,
        SOUND_ACKNOWLEDGED,
        SOUND_COOLANT_CRITICAL,
    };
    use super::*;
    use crate::hal::SoundId;
    use crate::params::Message;

    struct RecordingAnn {
        ready: bool,
        plays: std::vec::Vec<SoundId>,
        stops: usize,
        volume: Option<u8>,
    }

    impl RecordingAnn {
        fn new() -> Self {
            Self {
                ready: true,
                plays: std::vec::Vec::new(),
                stops: 0,
                volume: None,
            }
        }
    }

    impl Annunciator for RecordingAnn {
        fn is_ready(&self) -> bool { self.ready }
        fn play(&mut self, sound: SoundId) { self.plays.push(sound); }
        fn stop(&mut self) { self.stops += 1; }
        fn set_volume(&mut self, level: u8) { self.volume = Some(level); }
    }

    fn record(level: AlertLevel, source: Option<ParameterId>) -> AlertRecord {
        AlertRecord {
            level,
            message: Message::new(),
            source,
        }
    }

    fn buzzer_machine() -> AlertStateMachine {
        AlertStateMachine::new(&AudioConfig::default())
    }

    fn files_machine() -> AlertStateMachine {
        AlertStateMachine::new(&AudioConfig {
            variant: AnnunciationVariant::SoundFiles,
            ..AudioConfig::default()
        })
    }

    #[test]
    fn test_level_change_starts_pattern_immediately() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Coolant)), 0, &mut ann);
        assert_eq!(machine.level(), AlertLevel::Warning);
        assert_eq!(ann.plays.len(), 1, "first tone starts on the transition");
    }

    #[test]
    fn test_unchanged_record_does_not_retrigger() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        let warning = record(AlertLevel::Warning, Some(ParameterId::Coolant));
        machine.apply(&warning, 0, &mut ann);
        let plays = ann.plays.len();
        machine.apply(&warning, 10, &mut ann);
        machine.apply(&warning, 20, &mut ann);
        assert_eq!(ann.plays.len(), plays);
    }

    #[test]
    fn test_cadence_repeats_until_acknowledged() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Critical, Some(ParameterId::Exhaust)), 0, &mut ann);

        // Run the clock 1ms at a time across three cadence windows
        for now in 1..(3 * REPEAT_CRITICAL) {
            machine.tick(now, &mut ann);
        }
        // Initial transition plus one restart per elapsed cadence window;
        // each Critical cycle is 3 tone-ons
        assert_eq!(ann.plays.len(), 3 * 3);
    }

    #[test]
    fn test_acknowledge_mutes_unchanged_level() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        let warning = record(AlertLevel::Warning, Some(ParameterId::Coolant));
        machine.apply(&warning, 0, &mut ann);
        machine.acknowledge(&mut ann);
        assert!(machine.is_acknowledged());

        let plays = ann.plays.len();
        for now in 1..=(2 * REPEAT_WARNING) {
            machine.tick(now, &mut ann);
            machine.apply(&warning, now, &mut ann);
        }
        assert_eq!(ann.plays.len(), plays, "acknowledged alert must stay silent");
    }

    #[test]
    fn test_level_change_retriggers_after_acknowledge() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Critical, Some(ParameterId::Coolant)), 0, &mut ann);
        machine.acknowledge(&mut ann);
        let plays = ann.plays.len();

        // Even a DOWNGRADE to a lower nonzero level re-triggers, exactly once
        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Coolant)), 100, &mut ann);
        assert!(!machine.is_acknowledged());
        assert_eq!(ann.plays.len(), plays + 1);

        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Coolant)), 110, &mut ann);
        assert_eq!(ann.plays.len(), plays + 1, "re-trigger must fire exactly once");
    }

    #[test]
    fn test_tick_idempotent_at_same_instant() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Danger, Some(ParameterId::Boost)), 0, &mut ann);

        let instant = super::patterns::REPEAT_DANGER;
        machine.tick(instant, &mut ann);
        let plays = ann.plays.len();
        let stops = ann.stops;
        machine.tick(instant, &mut ann);
        machine.tick(instant, &mut ann);
        assert_eq!(ann.plays.len(), plays);
        assert_eq!(ann.stops, stops);
    }

    #[test]
    fn test_clear_to_none_stops_annunciation() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Coolant)), 0, &mut ann);
        machine.apply(&AlertRecord::normal(), 500, &mut ann);
        assert_eq!(machine.level(), AlertLevel::None);
        assert!(ann.stops >= 1);

        let plays = ann.plays.len();
        for now in 501..10_000 {
            machine.tick(now, &mut ann);
        }
        assert_eq!(ann.plays.len(), plays);
    }

    #[test]
    fn test_reset_forces_idle() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Danger, Some(ParameterId::Boost)), 0, &mut ann);
        machine.acknowledge(&mut ann);
        machine.reset(&mut ann);
        assert_eq!(machine.level(), AlertLevel::None);
        assert!(!machine.is_acknowledged());
    }

    #[test]
    fn test_sound_file_variant_plays_specific_clip() {
        let mut ann = RecordingAnn::new();
        let mut machine = files_machine();
        machine.apply(&record(AlertLevel::Critical, Some(ParameterId::Coolant)), 0, &mut ann);
        assert_eq!(ann.plays, [SOUND_COOLANT_CRITICAL]);
    }

    #[test]
    fn test_acknowledge_confirmation_on_sound_files_only() {
        let mut ann = RecordingAnn::new();
        let mut machine = files_machine();
        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Boost)), 0, &mut ann);
        machine.acknowledge(&mut ann);
        assert_eq!(ann.plays.last(), Some(&SOUND_ACKNOWLEDGED));

        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Warning, Some(ParameterId::Boost)), 0, &mut ann);
        machine.acknowledge(&mut ann);
        assert!(ann.plays.len() == 1, "buzzer has no confirmation clip");
    }

    #[test]
    fn test_hardware_absent_degrades_silently() {
        let mut ann = RecordingAnn::new();
        ann.ready = false;
        let mut machine = buzzer_machine();
        machine.apply(&record(AlertLevel::Danger, Some(ParameterId::Boost)), 0, &mut ann);
        for now in 1..5000 {
            machine.tick(now, &mut ann);
        }
        assert!(ann.plays.is_empty(), "no audio without hardware");
        assert_eq!(machine.level(), AlertLevel::Danger, "level tracking unaffected");
    }

    #[test]
    fn test_audio_disabled_suppresses_patterns() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.set_audio_enabled(false, &mut ann);
        machine.apply(&record(AlertLevel::Critical, Some(ParameterId::Exhaust)), 0, &mut ann);
        for now in 1..5000 {
            machine.tick(now, &mut ann);
        }
        assert!(ann.plays.is_empty());
    }

    #[test]
    fn test_volume_clamped_to_driver_range() {
        let mut ann = RecordingAnn::new();
        let mut machine = buzzer_machine();
        machine.set_volume(200, &mut ann);
        assert_eq!(ann.volume, Some(30));
        machine.set_volume(15, &mut ann);
        assert_eq!(ann.volume, Some(15));
    }
}
