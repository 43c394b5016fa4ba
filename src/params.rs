//! Shared data model: monitored parameters, alert levels, and per-parameter
//! specifications.
//!
//! Everything here is plain data. The numeric defaults that fill these
//! structures live in [`crate::config`].

use heapless::String;

/// Monotonic time in milliseconds.
///
/// The core never reads a clock; the embedding firmware passes its monotonic
/// time (e.g. `embassy_time::Instant::now().as_millis()`) into every
/// time-dependent call.
pub type Millis = u64;

/// Maximum length of a formatted alert message.
pub const MESSAGE_LEN: usize = 64;

/// Formatted alert message buffer.
pub type Message = String<MESSAGE_LEN>;

// =============================================================================
// Parameter Identity
// =============================================================================

/// Identity of each monitored quantity.
///
/// Declaration order is the fixed alert priority order: when two parameters
/// reach the same severity in the same evaluation cycle, the one declared
/// first wins and supplies the alert message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParameterId {
    /// Boost/MAP pressure (evaluated and displayed as PSI gauge).
    Boost,
    /// Intake air temperature, pre-intercooler (turbo hot side).
    IntakePre,
    /// Intake air temperature, post-intercooler.
    IntakePost,
    /// Exhaust gas temperature (K-type thermocouple).
    Exhaust,
    /// Engine coolant temperature.
    Coolant,
    /// Battery/charging voltage (lower is bad).
    Battery,
}

/// Number of monitored parameters.
pub const PARAM_COUNT: usize = 6;

impl ParameterId {
    /// All parameters in fixed alert priority order.
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::Boost,
        Self::IntakePre,
        Self::IntakePost,
        Self::Exhaust,
        Self::Coolant,
        Self::Battery,
    ];

    /// Stable index for per-parameter arrays and fault mask bits.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Boost => 0,
            Self::IntakePre => 1,
            Self::IntakePost => 2,
            Self::Exhaust => 3,
            Self::Coolant => 4,
            Self::Battery => 5,
        }
    }

    /// Short display name used in alert messages.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boost => "BOOST",
            Self::IntakePre => "IAT PRE",
            Self::IntakePost => "IAT POST",
            Self::Exhaust => "EGT",
            Self::Coolant => "COOLANT",
            Self::Battery => "BATTERY",
        }
    }
}

// =============================================================================
// Alert Levels
// =============================================================================

/// Ordered alert severity.
///
/// The derived `Ord` follows declaration order, so `Danger > Critical >
/// Warning > Info > None` holds without any integer comparisons at call
/// sites. Exactly one level is current system-wide at any time: the maximum
/// over all parameters' individually computed levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    /// All systems normal.
    #[default]
    None,
    /// Informational, no action needed.
    Info,
    /// Warning condition, keep an eye on it.
    Warning,
    /// Critical, immediate attention required.
    Critical,
    /// Danger, engine damage imminent.
    Danger,
}

impl AlertLevel {
    /// Label used in formatted alert messages.
    ///
    /// Case matches the operator-facing convention: warnings are merely
    /// capitalized, critical and danger shout.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "CRITICAL",
            Self::Danger => "DANGER",
        }
    }
}

// =============================================================================
// Parameter Specification
// =============================================================================

/// Ordered alert thresholds for one parameter.
///
/// For `higher_is_bad` parameters the values must ascend
/// (`warning < critical < danger`); for the rest they must descend. `danger`
/// is optional: a parameter without it tops out at [`AlertLevel::Critical`].
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    pub warning: f32,
    pub critical: f32,
    pub danger: Option<f32>,
}

/// Static description of one monitored quantity.
#[derive(Clone, Copy, Debug)]
pub struct ParameterSpec {
    /// Display name, e.g. `"BOOST"`.
    pub name: &'static str,
    /// Unit suffix appended verbatim to alert messages, e.g. `" PSI"` or `"C"`.
    pub unit: &'static str,
    /// Direction of badness: `true` when exceeding thresholds is dangerous,
    /// `false` for deficit-style parameters (battery voltage).
    pub higher_is_bad: bool,
    /// Alert thresholds in the unit the parameter is evaluated in.
    pub thresholds: Thresholds,
    /// Valid physical range `[min, max]` for fault detection, in the unit the
    /// signal conditioner produces (bar absolute for boost, volts for
    /// battery, Celsius for temperatures).
    pub valid_range: (f32, f32),
}

// =============================================================================
// Readings and Alert Records
// =============================================================================

/// Live state of one sensor channel.
///
/// Created at engine construction, mutated every sampling tick, never
/// destroyed during runtime.
#[derive(Clone, Copy, Debug)]
pub struct SensorReading {
    /// Most recent raw conversion (unfiltered), physical units.
    pub value: f32,
    /// Exponentially smoothed value fed to the threshold evaluator.
    pub filtered: f32,
    /// True while the latest acquisition was invalid or unavailable.
    pub faulted: bool,
}

impl SensorReading {
    pub const fn new(initial: f32) -> Self {
        Self {
            value: initial,
            filtered: initial,
            faulted: false,
        }
    }
}

/// One evaluation cycle's outcome: the single highest-priority alert.
///
/// Not persisted; recomputed from scratch every evaluation tick.
#[derive(Clone, Debug)]
pub struct AlertRecord {
    pub level: AlertLevel,
    pub message: Message,
    pub source: Option<ParameterId>,
}

impl AlertRecord {
    /// The all-clear record.
    pub fn normal() -> Self {
        let mut message = Message::new();
        // Infallible: the literal fits MESSAGE_LEN
        let _ = message.push_str("All Systems Normal");
        Self {
            level: AlertLevel::None,
            message,
            source: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_ordering() {
        assert!(AlertLevel::None < AlertLevel::Info);
        assert!(AlertLevel::Info < AlertLevel::Warning);
        assert!(AlertLevel::Warning < AlertLevel::Critical);
        assert!(AlertLevel::Critical < AlertLevel::Danger);
    }

    #[test]
    fn test_alert_level_max_picks_higher() {
        assert_eq!(
            AlertLevel::Warning.max(AlertLevel::Danger),
            AlertLevel::Danger
        );
        assert_eq!(AlertLevel::None.max(AlertLevel::Info), AlertLevel::Info);
    }

    #[test]
    fn test_parameter_priority_order() {
        // Boost must be checked first, battery last
        assert_eq!(ParameterId::ALL[0], ParameterId::Boost);
        assert_eq!(ParameterId::ALL[PARAM_COUNT - 1], ParameterId::Battery);
    }

    #[test]
    fn test_parameter_indices_are_unique_and_dense() {
        for (expected, param) in ParameterId::ALL.iter().enumerate() {
            assert_eq!(param.index(), expected);
        }
    }

    #[test]
    fn test_normal_record_message() {
        let record = AlertRecord::normal();
        assert_eq!(record.level, AlertLevel::None);
        assert_eq!(record.message.as_str(), "All Systems Normal");
        assert!(record.source.is_none());
    }
}
