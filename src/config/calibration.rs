//! Sensor calibration structures and their defaults.
//!
//! Defaults match a standard automotive NTC thermistor (2252 Ω at 25 °C,
//! Beta 3950 K) behind a 2.2 kΩ divider, a common 3-bar MAP sensor
//! (0.5 V = 0 bar, 4.5 V = 3 bar absolute), and a 10k/2.2k battery divider.
//! Per-install offsets live in [`crate::config::GaugeConfig`].

// =============================================================================
// ADC
// =============================================================================

/// ADC reference voltage (volts). 5 V rail on the target board.
pub const ADC_VREF: f32 = 5.0;

/// Voltage margin for open/short circuit detection on divider inputs (volts).
pub const CIRCUIT_EPSILON: f32 = 0.01;

// =============================================================================
// Thermistor
// =============================================================================

/// NTC thermistor divider calibration.
#[derive(Clone, Copy, Debug)]
pub struct ThermistorCal {
    /// Reference resistor in the voltage divider (Ohms).
    pub ref_resistor: f32,
    /// Thermistor resistance at the nominal temperature (Ohms).
    pub nominal_r: f32,
    /// Temperature at which `nominal_r` applies (Celsius).
    pub nominal_temp_c: f32,
    /// Beta coefficient (Kelvin).
    pub beta: f32,
}

impl Default for ThermistorCal {
    fn default() -> Self {
        Self {
            ref_resistor: 2200.0,
            nominal_r: 2252.0,
            nominal_temp_c: 25.0,
            beta: 3950.0,
        }
    }
}

/// Resistance above which a thermistor reading is treated as invalid (Ohms).
pub const THERMISTOR_MAX_R: f32 = 100_000.0;

// =============================================================================
// MAP / Boost Sensor
// =============================================================================

/// Linear MAP sensor calibration: two `(voltage, pressure)` anchor points.
#[derive(Clone, Copy, Debug)]
pub struct MapSensorCal {
    /// Voltage at minimum pressure (volts).
    pub voltage_min: f32,
    /// Voltage at maximum pressure (volts).
    pub voltage_max: f32,
    /// Pressure at `voltage_min` (bar absolute).
    pub pressure_min: f32,
    /// Pressure at `voltage_max` (bar absolute).
    pub pressure_max: f32,
}

impl Default for MapSensorCal {
    fn default() -> Self {
        Self {
            voltage_min: 0.5,
            voltage_max: 4.5,
            pressure_min: 0.0,
            pressure_max: 3.0,
        }
    }
}

// =============================================================================
// Battery Divider
// =============================================================================

/// Upper resistor of the battery voltage divider (Ohms).
pub const BATTERY_DIVIDER_R1: f32 = 10_000.0;

/// Lower resistor of the battery voltage divider (Ohms).
pub const BATTERY_DIVIDER_R2: f32 = 2200.0;

/// Battery divider ratio: pin volts times this gives battery volts.
pub const BATTERY_DIVIDER_RATIO: f32 =
    (BATTERY_DIVIDER_R1 + BATTERY_DIVIDER_R2) / BATTERY_DIVIDER_R2;

// =============================================================================
// Unit Conversions
// =============================================================================

/// 1 bar = 14.5038 PSI.
pub const BAR_TO_PSI: f32 = 14.5038;

/// Convert absolute pressure (bar) to gauge pressure (bar).
#[inline]
pub fn bar_absolute_to_gauge(bar_abs: f32) -> f32 { bar_abs - 1.0 }

/// Convert absolute pressure (bar) to gauge pressure in PSI.
#[inline]
pub fn bar_absolute_to_psi_gauge(bar_abs: f32) -> f32 {
    bar_absolute_to_gauge(bar_abs) * BAR_TO_PSI
}

/// Convert Celsius to Fahrenheit (for installs preferring imperial).
#[inline]
pub fn celsius_to_fahrenheit(c: f32) -> f32 { c * 9.0 / 5.0 + 32.0 }

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_divider_ratio() {
        // 10k/2.2k divider: exact ratio 12200/2200, so a 3.0V pin is ~16.64V
        assert!((BATTERY_DIVIDER_RATIO - 12_200.0 / 2_200.0).abs() < 1e-4);
        assert!((3.0 * BATTERY_DIVIDER_RATIO - 16.64).abs() < 0.01);
    }

    #[test]
    fn test_pressure_conversions() {
        // 1 bar absolute is atmospheric: zero gauge
        assert!(bar_absolute_to_gauge(1.0).abs() < 1e-6);
        assert!(bar_absolute_to_psi_gauge(1.0).abs() < 1e-6);
        // 2.5 bar absolute = 1.5 bar gauge ≈ 21.76 PSI
        assert!((bar_absolute_to_psi_gauge(2.5) - 21.756).abs() < 0.01);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-6);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-6);
    }
}
