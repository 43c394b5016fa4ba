//! Default alert thresholds for the monitored parameters.
//!
//! All thresholds are compile-time constants with validation assertions.
//! This ensures consistency between the default [`ParameterSpec`] table and
//! anything the firmware derives from individual constants.
//!
//! # Compile-Time Validation
//!
//! Each threshold group includes `const` assertions that verify threshold
//! ordering at compile time. If thresholds are configured incorrectly
//! (e.g., `CRITICAL < WARNING` on a higher-is-bad parameter), compilation
//! will fail with a clear error.
//!
//! These are defaults only: the running configuration is the
//! [`crate::config::GaugeConfig`] spec table, which starts from these values
//! and can be overridden per install.

use crate::params::{ParameterId, ParameterSpec, Thresholds};

// =============================================================================
// Boost Pressure Thresholds (PSI gauge, higher is bad)
// =============================================================================

/// Warning threshold for a modified setup (~1.0 bar gauge).
pub const BOOST_WARNING_PSI: f32 = 14.5;

/// Critical overboost (~1.3 bar gauge).
pub const BOOST_CRITICAL_PSI: f32 = 18.8;

/// Severe overboost, danger of engine damage (~1.5 bar gauge).
pub const BOOST_DANGER_PSI: f32 = 21.8;

const _: () = assert!(BOOST_WARNING_PSI < BOOST_CRITICAL_PSI);
const _: () = assert!(BOOST_CRITICAL_PSI < BOOST_DANGER_PSI);

// =============================================================================
// Intake Air Temperature Thresholds (Celsius, higher is bad)
// =============================================================================

/// Pre-intercooler warning: hot-side air getting excessive.
pub const IAT_PRE_WARNING: f32 = 50.0;

/// Pre-intercooler critical: reduce power.
pub const IAT_PRE_CRITICAL: f32 = 60.0;

/// Pre-intercooler danger. Kept as an explicit value rather than
/// `critical + offset`; the default happens to be critical + 20.
pub const IAT_PRE_DANGER: f32 = 80.0;

const _: () = assert!(IAT_PRE_WARNING < IAT_PRE_CRITICAL);
const _: () = assert!(IAT_PRE_CRITICAL < IAT_PRE_DANGER);

/// Post-intercooler warning: intercooler losing effectiveness.
pub const IAT_POST_WARNING: f32 = 45.0;

/// Post-intercooler critical: severe heat soak.
pub const IAT_POST_CRITICAL: f32 = 55.0;

/// Post-intercooler danger. Explicit value (default = critical + 10).
pub const IAT_POST_DANGER: f32 = 65.0;

const _: () = assert!(IAT_POST_WARNING < IAT_POST_CRITICAL);
const _: () = assert!(IAT_POST_CRITICAL < IAT_POST_DANGER);

// =============================================================================
// Exhaust Gas Temperature Thresholds (Celsius, higher is bad)
// =============================================================================

/// Warning threshold for sustained EGT.
pub const EGT_WARNING: f32 = 600.0;

/// Critical: immediate action required.
pub const EGT_CRITICAL: f32 = 650.0;

/// Danger: engine damage imminent.
pub const EGT_DANGER: f32 = 700.0;

const _: () = assert!(EGT_WARNING < EGT_CRITICAL);
const _: () = assert!(EGT_CRITICAL < EGT_DANGER);

// =============================================================================
// Coolant Temperature Thresholds (Celsius, higher is bad)
// =============================================================================

/// Coolant warning threshold.
pub const COOLANT_WARNING: f32 = 100.0;

/// Coolant critical: pull over.
pub const COOLANT_CRITICAL: f32 = 105.0;

/// Coolant danger: engine damage.
pub const COOLANT_DANGER: f32 = 110.0;

const _: () = assert!(COOLANT_WARNING < COOLANT_CRITICAL);
const _: () = assert!(COOLANT_CRITICAL < COOLANT_DANGER);

// =============================================================================
// Battery Voltage Thresholds (volts, LOWER is bad)
// =============================================================================
// Battery is a deficit-style parameter: thresholds descend and there is no
// danger level, so it tops out at Critical.

/// Battery not fully charged or alternator struggling.
pub const BATT_WARNING: f32 = 12.0;

/// Alternator failure or severe drain.
pub const BATT_CRITICAL: f32 = 11.5;

const _: () = assert!(BATT_WARNING > BATT_CRITICAL);

// =============================================================================
// Sensor Validation Ranges (for fault detection)
// =============================================================================

/// Minimum valid thermistor temperature (Celsius).
pub const TEMP_MIN_VALID: f32 = -40.0;

/// Maximum valid thermistor temperature (Celsius).
pub const TEMP_MAX_VALID: f32 = 200.0;

/// Maximum valid K-type thermocouple temperature (Celsius).
pub const EGT_MAX_VALID: f32 = 1200.0;

/// Minimum valid MAP sensor pressure (bar absolute).
pub const PRESSURE_MIN_VALID: f32 = 0.5;

/// Maximum valid MAP sensor pressure (bar absolute).
pub const PRESSURE_MAX_VALID: f32 = 3.0;

/// Minimum plausible battery voltage (volts).
pub const BATT_MIN_VALID: f32 = 6.0;

/// Maximum plausible battery voltage (volts).
pub const BATT_MAX_VALID: f32 = 18.0;

const _: () = assert!(TEMP_MIN_VALID < TEMP_MAX_VALID);
const _: () = assert!(PRESSURE_MIN_VALID < PRESSURE_MAX_VALID);
const _: () = assert!(BATT_MIN_VALID < BATT_MAX_VALID);

// =============================================================================
// Default Specification Table
// =============================================================================

/// Default per-parameter specifications, indexed by [`ParameterId::index`].
///
/// Note the units: boost thresholds are PSI gauge (what the evaluator sees)
/// while its valid range is bar absolute (what the conditioner produces).
pub const DEFAULT_SPECS: [ParameterSpec; crate::params::PARAM_COUNT] = [
    ParameterSpec {
        name: ParameterId::Boost.name(),
        unit: " PSI",
        higher_is_bad: true,
        thresholds: Thresholds {
            warning: BOOST_WARNING_PSI,
            critical: BOOST_CRITICAL_PSI,
            danger: Some(BOOST_DANGER_PSI),
        },
        valid_range: (PRESSURE_MIN_VALID, PRESSURE_MAX_VALID),
    },
    ParameterSpec {
        name: ParameterId::IntakePre.name(),
        unit: "C",
        higher_is_bad: true,
        thresholds: Thresholds {
            warning: IAT_PRE_WARNING,
            critical: IAT_PRE_CRITICAL,
            danger: Some(IAT_PRE_DANGER),
        },
        valid_range: (TEMP_MIN_VALID, TEMP_MAX_VALID),
    },
    ParameterSpec {
        name: ParameterId::IntakePost.name(),
        unit: "C",
        higher_is_bad: true,
        thresholds: Thresholds {
            warning: IAT_POST_WARNING,
            critical: IAT_POST_CRITICAL,
            danger: Some(IAT_POST_DANGER),
        },
        valid_range: (TEMP_MIN_VALID, TEMP_MAX_VALID),
    },
    ParameterSpec {
        name: ParameterId::Exhaust.name(),
        unit: "C",
        higher_is_bad: true,
        thresholds: Thresholds {
            warning: EGT_WARNING,
            critical: EGT_CRITICAL,
            danger: Some(EGT_DANGER),
        },
        valid_range: (TEMP_MIN_VALID, EGT_MAX_VALID),
    },
    ParameterSpec {
        name: ParameterId::Coolant.name(),
        unit: "C",
        higher_is_bad: true,
        thresholds: Thresholds {
            warning: COOLANT_WARNING,
            critical: COOLANT_CRITICAL,
            danger: Some(COOLANT_DANGER),
        },
        valid_range: (TEMP_MIN_VALID, TEMP_MAX_VALID),
    },
    ParameterSpec {
        name: ParameterId::Battery.name(),
        unit: "V",
        higher_is_bad: false,
        thresholds: Thresholds {
            warning: BATT_WARNING,
            critical: BATT_CRITICAL,
            danger: None,
        },
        valid_range: (BATT_MIN_VALID, BATT_MAX_VALID),
    },
];

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)] // Intentional validation of threshold ordering
mod tests {
    use super::*;
    use crate::params::PARAM_COUNT;

    #[test]
    fn test_boost_threshold_ordering() {
        assert!(BOOST_WARNING_PSI < BOOST_CRITICAL_PSI);
        assert!(BOOST_CRITICAL_PSI < BOOST_DANGER_PSI);
    }

    #[test]
    fn test_intake_threshold_ordering() {
        assert!(IAT_PRE_WARNING < IAT_PRE_CRITICAL);
        assert!(IAT_PRE_CRITICAL < IAT_PRE_DANGER);
        assert!(IAT_POST_WARNING < IAT_POST_CRITICAL);
        assert!(IAT_POST_CRITICAL < IAT_POST_DANGER);
    }

    #[test]
    fn test_exhaust_and_coolant_threshold_ordering() {
        assert!(EGT_WARNING < EGT_CRITICAL);
        assert!(EGT_CRITICAL < EGT_DANGER);
        assert!(COOLANT_WARNING < COOLANT_CRITICAL);
        assert!(COOLANT_CRITICAL < COOLANT_DANGER);
    }

    #[test]
    fn test_battery_thresholds_descend() {
        assert!(BATT_WARNING > BATT_CRITICAL);
    }

    #[test]
    fn test_default_specs_indexed_by_parameter() {
        for param in crate::params::ParameterId::ALL {
            assert_eq!(DEFAULT_SPECS[param.index()].name, param.name());
        }
        assert_eq!(DEFAULT_SPECS.len(), PARAM_COUNT);
    }

    #[test]
    fn test_default_specs_threshold_direction_consistent() {
        for spec in &DEFAULT_SPECS {
            let t = spec.thresholds;
            if spec.higher_is_bad {
                assert!(t.warning < t.critical, "{} thresholds must ascend", spec.name);
                if let Some(danger) = t.danger {
                    assert!(t.critical < danger, "{} danger must be highest", spec.name);
                }
            } else {
                assert!(t.warning > t.critical, "{} thresholds must descend", spec.name);
                if let Some(danger) = t.danger {
                    assert!(t.critical > danger, "{} danger must be lowest", spec.name);
                }
            }
        }
    }

    #[test]
    fn test_valid_ranges_are_ordered() {
        for spec in &DEFAULT_SPECS {
            assert!(spec.valid_range.0 < spec.valid_range.1, "{}", spec.name);
        }
    }
}
