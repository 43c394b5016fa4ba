//! Engine facade: owns every subsystem and sequences the cooperative loop.
//!
//! One control loop calls [`GaugeEngine::poll`] as fast as it likes; each
//! subsystem self-throttles against its own interval (sampling at 10 Hz,
//! evaluation at 2 Hz by default) by comparing the monotonic timestamp it is
//! handed. All shared state lives here, owned by the single execution
//! context; there is no locking because there is no concurrent mutation.

use log::info;

use crate::alerts::{AlertStateMachine, AnnunciationVariant, ThresholdEvaluator, patterns};
use crate::conditioning::SignalConditioner;
use crate::config::GaugeConfig;
use crate::faults::{FaultMask, FaultTracker};
use crate::hal::{Annunciator, SensorBus};
use crate::params::{AlertLevel, Message, Millis, PARAM_COUNT, ParameterId};

// =============================================================================
// Display Snapshot
// =============================================================================

/// Per-cycle state handed to the external display/telemetry sink.
///
/// Values are in display units (boost as PSI gauge). Fault state and alert
/// severity are exposed independently: a stuck sensor and a dangerous
/// temperature are different things and must never be conflated.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Filtered values indexed by [`ParameterId::index`], display units.
    pub values: [f32; PARAM_COUNT],
    /// Per-sensor validity flags.
    pub faults: FaultMask,
    /// Current system-wide alert level.
    pub level: AlertLevel,
    /// Operator-facing alert message.
    pub message: Message,
}

// =============================================================================
// Gauge Engine
// =============================================================================

/// The complete telemetry acquisition and alert engine.
///
/// Generic over the two hardware capabilities so the same core runs against
/// real transports, the simulator, or test mocks.
pub struct GaugeEngine<B: SensorBus, A: Annunciator> {
    bus: B,
    annunciator: A,
    cfg: GaugeConfig,
    conditioner: SignalConditioner,
    faults: FaultTracker,
    evaluator: ThresholdEvaluator,
    alerts: AlertStateMachine,
    last_sample: Option<Millis>,
}

impl<B: SensorBus, A: Annunciator> GaugeEngine<B, A> {
    pub fn new(bus: B, mut annunciator: A, cfg: GaugeConfig) -> Self {
        let mut alerts = AlertStateMachine::new(&cfg.audio);
        alerts.set_volume(cfg.audio.volume, &mut annunciator);
        if annunciator.is_ready() {
            info!("annunciator ready");
            if cfg.audio.enabled && cfg.audio.variant == AnnunciationVariant::SoundFiles {
                annunciator.play(patterns::SOUND_STARTUP);
            }
        } else {
            info!("annunciator not detected, audio disabled");
        }
        Self {
            bus,
            annunciator,
            cfg,
            conditioner: SignalConditioner::new(),
            faults: FaultTracker::new(),
            evaluator: ThresholdEvaluator::new(),
            alerts,
            last_sample: None,
        }
    }

    /// Run one main-loop iteration at monotonic time `now`.
    ///
    /// Sampling and evaluation fire only when their intervals have elapsed;
    /// the annunciation tick runs every call. Safe to call as often as the
    /// loop spins, including repeatedly at the same instant.
    pub fn poll(&mut self, now: Millis) {
        if self.sample_due(now) {
            self.conditioner
                .sample(&mut self.bus, &self.cfg, &mut self.faults);
            self.last_sample = Some(now);
        }

        let values = self.display_values();
        let record =
            self.evaluator
                .evaluate(now, &values, self.faults.mask(), &self.cfg);
        self.alerts.apply(record, now, &mut self.annunciator);
        self.alerts.tick(now, &mut self.annunciator);
    }

    fn sample_due(&self, now: Millis) -> bool {
        match self.last_sample {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.cfg.sensor_update_interval,
        }
    }

    fn display_values(&self) -> [f32; PARAM_COUNT] {
        let mut values = [0.0; PARAM_COUNT];
        for param in ParameterId::ALL {
            values[param.index()] = self.conditioner.display_value(param);
        }
        values
    }

    /// Current state for the display/telemetry sink.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.display_values(),
            faults: self.faults.mask(),
            level: self.alerts.level(),
            message: self.evaluator.current().message.clone(),
        }
    }

    /// Operator acknowledged the active alert (touch/button).
    pub fn acknowledge(&mut self) {
        self.alerts.acknowledge(&mut self.annunciator);
    }

    /// Manual override: drop back to `None` and stop annunciation. The next
    /// due evaluation re-raises any alert still present in the readings.
    pub fn reset(&mut self) {
        self.alerts.reset(&mut self.annunciator);
        self.evaluator.reset();
    }

    /// Set the additive calibration offset for one parameter.
    pub fn set_offset(&mut self, param: ParameterId, offset: f32) {
        info!("{} offset set to {}", param.name(), offset);
        self.cfg.offsets[param.index()] = offset;
    }

    /// Clear all calibration offsets.
    pub fn reset_calibration(&mut self) {
        info!("calibration offsets reset");
        self.cfg.offsets = [0.0; PARAM_COUNT];
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.alerts
            .set_audio_enabled(enabled, &mut self.annunciator);
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.alerts.set_volume(volume, &mut self.annunciator);
    }

    #[inline]
    pub const fn config(&self) -> &GaugeConfig { &self.cfg }

    #[inline]
    pub const fn conditioner(&self) -> &SignalConditioner { &self.conditioner }
}

// =============================================================================
// Unit Tests (end-to-end scenarios)
// =============================================================================
