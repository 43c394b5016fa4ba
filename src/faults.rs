//! Per-sensor fault tracking.
//!
//! A fault bit says "this sensor cannot be trusted right now" and is kept
//! deliberately separate from alert severity: a stuck thermistor is not the
//! same thing as a truly dangerous temperature, and the display must be able
//! to show both independently.

use log::{info, warn};

use crate::params::{PARAM_COUNT, ParameterId};

// =============================================================================
// Fault Mask
// =============================================================================

/// Bitset of per-sensor validity flags, one bit per [`ParameterId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaultMask(u16);

impl FaultMask {
    pub const fn new() -> Self { Self(0) }

    /// Raw bits, bit position = [`ParameterId::index`].
    #[inline]
    pub const fn bits(self) -> u16 { self.0 }

    #[inline]
    pub const fn is_set(self, param: ParameterId) -> bool {
        self.0 & (1 << param.index()) != 0
    }

    #[inline]
    pub const fn any(self) -> bool { self.0 != 0 }

    #[inline]
    fn set(&mut self, param: ParameterId) { self.0 |= 1 << param.index(); }

    #[inline]
    fn clear(&mut self, param: ParameterId) { self.0 &= !(1 << param.index()); }
}

// =============================================================================
// Fault Tracker
// =============================================================================

/// Maintains the fault mask across sampling ticks.
///
/// Bits are set when a reading is out of its valid range or the transport
/// reports unavailability, and cleared when a subsequent reading is valid.
/// Transitions are logged once, not every tick.
#[derive(Debug, Default)]
pub struct FaultTracker {
    mask: FaultMask,
}

impl FaultTracker {
    pub const fn new() -> Self {
        Self {
            mask: FaultMask::new(),
        }
    }

    /// Record the validity of the latest acquisition for one sensor.
    pub fn update(&mut self, param: ParameterId, faulted: bool) {
        let was = self.mask.is_set(param);
        if faulted {
            self.mask.set(param);
            if !was {
                warn!("{} sensor fault", param.name());
            }
        } else {
            self.mask.clear(param);
            if was {
                info!("{} sensor fault cleared", param.name());
            }
        }
    }

    #[inline]
    pub const fn mask(&self) -> FaultMask { self.mask }

    #[inline]
    pub const fn is_faulted(&self, param: ParameterId) -> bool { self.mask.is_set(param) }

    /// Manual override: forget all recorded faults.
    pub fn clear_all(&mut self) { self.mask = FaultMask::new(); }
}

const _: () = assert!(PARAM_COUNT <= 16, "fault mask is 16 bits wide");

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_single_bit() {
        let mut tracker = FaultTracker::new();
        assert!(!tracker.mask().any());

        tracker.update(ParameterId::Coolant, true);
        assert!(tracker.is_faulted(ParameterId::Coolant));
        assert!(!tracker.is_faulted(ParameterId::Boost));

        tracker.update(ParameterId::Coolant, false);
        assert!(!tracker.is_faulted(ParameterId::Coolant));
        assert!(!tracker.mask().any());
    }

    #[test]
    fn test_bits_follow_parameter_index() {
        let mut tracker = FaultTracker::new();
        tracker.update(ParameterId::Exhaust, true);
        assert_eq!(
            tracker.mask().bits(),
            1 << ParameterId::Exhaust.index()
        );
    }

    #[test]
    fn test_independent_bits() {
        let mut tracker = FaultTracker::new();
        tracker.update(ParameterId::Boost, true);
        tracker.update(ParameterId::Battery, true);
        tracker.update(ParameterId::Boost, false);
        assert!(!tracker.is_faulted(ParameterId::Boost));
        assert!(tracker.is_faulted(ParameterId::Battery));
    }

    #[test]
    fn test_clear_all() {
        let mut tracker = FaultTracker::new();
        for param in ParameterId::ALL {
            tracker.update(param, true);
        }
        assert!(tracker.mask().any());
        tracker.clear_all();
        assert!(!tracker.mask().any());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut tracker = FaultTracker::new();
        tracker.update(ParameterId::IntakePre, true);
        let mask = tracker.mask();
        tracker.update(ParameterId::IntakePre, true);
        assert_eq!(tracker.mask(), mask);
    }
}
