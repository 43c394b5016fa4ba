//! Threshold evaluation: filtered readings to one prioritized alert.
//!
//! Each parameter is evaluated in severity order against its configured
//! thresholds, with the comparison direction set by `higher_is_bad`. Only the
//! single highest level across all parameters survives; on a tie the
//! parameter earliest in the fixed priority order wins and supplies the
//! message. A driver must see the one most dangerous condition, not a merged
//! list.

use core::fmt::Write;

use log::debug;

use crate::config::GaugeConfig;
use crate::faults::FaultMask;
use crate::params::{AlertLevel, AlertRecord, Message, Millis, PARAM_COUNT, ParameterId, ParameterSpec};

// =============================================================================
// Per-Parameter Severity
// =============================================================================

/// Compute the alert level for one value against one spec.
///
/// Thresholds are inclusive: a value exactly at a threshold has crossed it.
/// A spec without a danger threshold tops out at [`AlertLevel::Critical`].
pub fn level_for(value: f32, spec: &ParameterSpec) -> AlertLevel {
    let t = spec.thresholds;
    if spec.higher_is_bad {
        if let Some(danger) = t.danger
            && value >= danger
        {
            AlertLevel::Danger
        } else if value >= t.critical {
            AlertLevel::Critical
        } else if value >= t.warning {
            AlertLevel::Warning
        } else {
            AlertLevel::None
        }
    } else if let Some(danger) = t.danger
        && value <= danger
    {
        AlertLevel::Danger
    } else if value <= t.critical {
        AlertLevel::Critical
    } else if value <= t.warning {
        AlertLevel::Warning
    } else {
        AlertLevel::None
    }
}

/// Format the operator-facing message: `"<PARAM> <SEVERITY>: <value><unit>"`.
fn format_message(spec: &ParameterSpec, level: AlertLevel, value: f32) -> Message {
    let mut message = Message::new();
    // Truncation on overflow is acceptable; MESSAGE_LEN fits every spec name
    let _ = write!(message, "{} {}: {value:.1}{}", spec.name, level.label(), spec.unit);
    message
}

// =============================================================================
// Threshold Evaluator
// =============================================================================

/// Maps the current set of filtered readings to the system alert.
///
/// Evaluation is throttled to `alert_check_interval`, independent of the
/// sampling interval, to bound annunciation churn: calls inside the throttle
/// window return the previously computed record untouched.
#[derive(Debug)]
pub struct ThresholdEvaluator {
    last_check: Option<Millis>,
    current: AlertRecord,
}

impl ThresholdEvaluator {
    pub fn new() -> Self {
        Self {
            last_check: None,
            current: AlertRecord::normal(),
        }
    }

    /// Evaluate all parameters against their thresholds.
    ///
    /// `values` are filtered readings in each parameter's evaluation unit
    /// (PSI gauge for boost), indexed by [`ParameterId::index`]. Faulted
    /// parameters are skipped: a broken sensor is surfaced through the fault
    /// mask, not disguised as a threshold alert.
    pub fn evaluate(
        &mut self,
        now: Millis,
        values: &[f32; PARAM_COUNT],
        faults: FaultMask,
        cfg: &GaugeConfig,
    ) -> &AlertRecord {
        if let Some(last) = self.last_check
            && now.saturating_sub(last) < cfg.alert_check_interval
        {
            return &self.current;
        }
        self.last_check = Some(now);

        let mut worst: Option<(ParameterId, AlertLevel, f32)> = None;
        for param in ParameterId::ALL {
            if faults.is_set(param) {
                continue;
            }
            let value = values[param.index()];
            let level = level_for(value, cfg.spec(param));
            if level == AlertLevel::None {
                continue;
            }
            // Strictly-greater keeps the first parameter in priority order
            // on a tie
            let beaten = match worst {
                None => true,
                Some((_, worst_level, _)) => level > worst_level,
            };
            if beaten {
                worst = Some((param, level, value));
            }
        }

        self.current = match worst {
            Some((param, level, value)) => {
                debug!("alert {}: {:?}", param.name(), level);
                AlertRecord {
                    level,
                    message: format_message(cfg.spec(param), level, value),
                    source: Some(param),
                }
            }
            None => AlertRecord::normal(),
        };
        &self.current
    }

    /// The most recently computed record.
    #[inline]
    pub const fn current(&self) -> &AlertRecord { &self.current }

    /// Manual override: discard the computed alert and return to normal.
    /// The next due evaluation recomputes from live readings.
    pub fn reset(&mut self) {
        self.current = AlertRecord::normal();
        self.last_check = None;
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
