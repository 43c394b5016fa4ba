//! Runtime configuration for the gauge engine.
//!
//! - `thresholds`: default alert thresholds with compile-time ordering checks
//! - `calibration`: sensor calibration structures and unit conversions
//!
//! Everything tunable is an enumerated field on [`GaugeConfig`]; nothing is
//! hardcoded inline in the pipeline. [`GaugeConfig::default`] reproduces the
//! stock install (1KZTE with 3-bar MAP and K-type EGT probe).

pub mod calibration;
pub mod thresholds;

pub use calibration::{
    ADC_VREF,
    BAR_TO_PSI,
    BATTERY_DIVIDER_RATIO,
    CIRCUIT_EPSILON,
    MapSensorCal,
    THERMISTOR_MAX_R,
    ThermistorCal,
    bar_absolute_to_gauge,
    bar_absolute_to_psi_gauge,
    celsius_to_fahrenheit,
};
pub use thresholds::DEFAULT_SPECS;

use crate::alerts::AnnunciationVariant;
use crate::params::{Millis, PARAM_COUNT, ParameterId, ParameterSpec};

// =============================================================================
// Defaults
// =============================================================================

/// Number of ADC samples averaged per acquisition.
pub const DEFAULT_SAMPLE_COUNT: u8 = 8;

/// Default EMA coefficient. Lower = more smoothing, slower response.
pub const DEFAULT_FILTER_ALPHA: f32 = 0.15;

/// Default sensor sampling interval (10 Hz).
pub const DEFAULT_SENSOR_INTERVAL_MS: Millis = 100;

/// Default alert evaluation interval (2 Hz).
pub const DEFAULT_ALERT_INTERVAL_MS: Millis = 500;

/// Default speaker volume (driver range 0-30).
pub const DEFAULT_VOLUME: u8 = 22;

// =============================================================================
// Audio Configuration
// =============================================================================

/// Annunciation output configuration.
#[derive(Clone, Copy, Debug)]
pub struct AudioConfig {
    /// Master enable; `false` silences all patterns without touching alerts.
    pub enabled: bool,
    /// Volume passed to the driver, clamped to 0-30.
    pub volume: u8,
    /// Which annunciation hardware is fitted.
    pub variant: AnnunciationVariant,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: DEFAULT_VOLUME,
            variant: AnnunciationVariant::Buzzer,
        }
    }
}

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Complete static configuration consumed by [`crate::GaugeEngine`].
#[derive(Clone, Debug)]
pub struct GaugeConfig {
    /// Per-parameter thresholds, units, and valid ranges.
    pub specs: [ParameterSpec; PARAM_COUNT],
    /// Shared NTC thermistor divider calibration.
    pub thermistor: ThermistorCal,
    /// MAP/boost sensor anchor points.
    pub map_sensor: MapSensorCal,
    /// Additive calibration offsets per parameter, in the parameter's
    /// physical unit. Applied before range validation and filtering.
    pub offsets: [f32; PARAM_COUNT],
    /// ADC reference voltage (volts).
    pub adc_vref: f32,
    /// ADC samples averaged per acquisition.
    pub sample_count: u8,
    /// EMA coefficient for analog channels. Thermocouple channels use half
    /// of this to reflect the probe's larger thermal mass.
    pub filter_alpha: f32,
    /// Interval between sensor sampling passes.
    pub sensor_update_interval: Millis,
    /// Interval between alert evaluations.
    pub alert_check_interval: Millis,
    /// Annunciation output settings.
    pub audio: AudioConfig,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            specs: DEFAULT_SPECS,
            thermistor: ThermistorCal::default(),
            map_sensor: MapSensorCal::default(),
            offsets: [0.0; PARAM_COUNT],
            adc_vref: ADC_VREF,
            sample_count: DEFAULT_SAMPLE_COUNT,
            filter_alpha: DEFAULT_FILTER_ALPHA,
            sensor_update_interval: DEFAULT_SENSOR_INTERVAL_MS,
            alert_check_interval: DEFAULT_ALERT_INTERVAL_MS,
            audio: AudioConfig::default(),
        }
    }
}

impl GaugeConfig {
    /// Specification for one parameter.
    #[inline]
    pub fn spec(&self, param: ParameterId) -> &ParameterSpec { &self.specs[param.index()] }

    /// Calibration offset for one parameter.
    #[inline]
    pub fn offset(&self, param: ParameterId) -> f32 { self.offsets[param.index()] }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sane() {
        let cfg = GaugeConfig::default();
        assert!(cfg.filter_alpha > 0.0 && cfg.filter_alpha < 1.0);
        assert!(cfg.sample_count > 0);
        // Evaluation must be slower than sampling so filtered values settle
        assert!(cfg.alert_check_interval >= cfg.sensor_update_interval);
        assert!(cfg.offsets.iter().all(|o| *o == 0.0));
    }

    #[test]
    fn test_spec_lookup_matches_parameter() {
        let cfg = GaugeConfig::default();
        assert_eq!(cfg.spec(ParameterId::Coolant).name, "COOLANT");
        assert_eq!(cfg.spec(ParameterId::Boost).unit, " PSI");
    }
}
