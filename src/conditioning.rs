//! Signal conditioning: raw channel samples to filtered physical readings.
//!
//! Three conversion paths feed the same filter-and-validate policy:
//!
//! - NTC thermistors through a voltage divider and the Beta-parameter form of
//!   the Steinhart-Hart equation (intake pre/post, coolant)
//! - Linear interpolation between two calibrated anchor points (boost/MAP,
//!   and the battery divider as the degenerate ratio case)
//! - MAX31855-style thermocouple frame decode (exhaust)
//!
//! Any reading outside the parameter's valid range is treated as a transient
//! fault: the filtered value is not updated (the previous value is echoed
//! downstream) and the fault bit is set. A glitching sensor therefore cannot
//! produce a false alert transition, while a persistent condition still
//! surfaces as a fault.

use log::debug;
use micromath::F32Ext;

use crate::config::GaugeConfig;
use crate::config::calibration::{
    BATTERY_DIVIDER_RATIO,
    CIRCUIT_EPSILON,
    MapSensorCal,
    THERMISTOR_MAX_R,
    ThermistorCal,
    bar_absolute_to_psi_gauge,
};
use crate::faults::FaultTracker;
use crate::hal::{SensorBus, SensorError};
use crate::params::{PARAM_COUNT, ParameterId, SensorReading};

/// Thermocouple channels filter at half the configured alpha: the probe's
/// thermal mass makes fast transients physically implausible.
const THERMOCOUPLE_ALPHA_SCALE: f32 = 0.5;

/// MAX31855 frame: any fault bit in the low three bits means no usable probe.
const TC_FAULT_MASK: u32 = 0x0000_0007;

/// MAX31855 frame: thermocouple temperature lives in bits 31..18.
const TC_TEMP_SHIFT: u32 = 18;

/// MAX31855 resolution: 0.25 Celsius per LSB.
const TC_LSB_CELSIUS: f32 = 0.25;

// =============================================================================
// Pure Conversions
// =============================================================================

/// Exponential moving average: `alpha * new + (1 - alpha) * previous`.
#[inline]
pub fn ema(new_value: f32, previous: f32, alpha: f32) -> f32 {
    alpha * new_value + (1.0 - alpha) * previous
}

/// Solve the voltage divider for the thermistor resistance.
///
/// `Vout = Vsupply * R / (Rref + R)`, so `R = Vout * Rref / (Vsupply - Vout)`.
/// Degenerate cases are explicit: a pin at the supply rail is an open circuit
/// (infinite resistance sentinel), a pin at ground is a short (zero).
pub fn voltage_to_resistance(voltage: f32, ref_resistor: f32, vref: f32) -> f32 {
    if voltage >= vref - CIRCUIT_EPSILON {
        return f32::INFINITY; // Open circuit
    }
    if voltage <= CIRCUIT_EPSILON {
        return 0.0; // Short circuit
    }
    voltage * ref_resistor / (vref - voltage)
}

/// Beta-parameter form of the Steinhart-Hart equation.
///
/// `1/T = 1/T0 + (1/B) * ln(R/R0)` with `T` in Kelvin. Returns `None` for
/// resistance outside `(0, 100_000]` Ohms (open/short circuit or a detached
/// connector) instead of a garbage temperature.
pub fn resistance_to_celsius(resistance: f32, cal: &ThermistorCal) -> Option<f32> {
    if resistance <= 0.0 || resistance > THERMISTOR_MAX_R {
        return None;
    }
    let inv_t = (resistance / cal.nominal_r).ln() / cal.beta
        + 1.0 / (cal.nominal_temp_c + 273.15);
    Some(1.0 / inv_t - 273.15)
}

/// Full thermistor path: divider voltage to Celsius.
pub fn convert_thermistor(voltage: f32, cal: &ThermistorCal, vref: f32) -> Option<f32> {
    resistance_to_celsius(voltage_to_resistance(voltage, cal.ref_resistor, vref), cal)
}

/// Linear MAP sensor: interpolate between the two calibrated anchor points.
///
/// Returns bar absolute. Out-of-range outputs are not clamped here; the
/// valid-range policy downstream decides whether to fault.
pub fn convert_linear_pressure(voltage: f32, cal: &MapSensorCal) -> f32 {
    cal.pressure_min
        + (voltage - cal.voltage_min) / (cal.voltage_max - cal.voltage_min)
            * (cal.pressure_max - cal.pressure_min)
}

/// Decode a MAX31855 32-bit frame to Celsius.
///
/// Bits 31..18 hold a 14-bit signed value in quarter-degree steps. Returns
/// `None` when any fault bit is set (no probe, short to GND/VCC).
pub fn decode_thermocouple_frame(frame: u32) -> Option<f32> {
    if frame & TC_FAULT_MASK != 0 {
        return None;
    }
    let mut raw = ((frame >> TC_TEMP_SHIFT) & 0x3FFF) as u16;
    if raw & 0x2000 != 0 {
        raw |= 0xC000; // Sign extend the 14-bit value
    }
    Some(f32::from(raw as i16) * TC_LSB_CELSIUS)
}

// =============================================================================
// Signal Conditioner
// =============================================================================

/// Produces a stable, physically meaningful reading per parameter.
///
/// Owns one [`SensorReading`] per channel; readings are created here and
/// mutated on every sampling tick for the lifetime of the engine.
#[derive(Debug)]
pub struct SignalConditioner {
    readings: [SensorReading; PARAM_COUNT],
}

impl SignalConditioner {
    /// Start from plausible at-rest values so the first filtered samples do
    /// not chase a zero-initialized history: ambient temperatures,
    /// atmospheric pressure, a healthy battery, cold exhaust.
    pub const fn new() -> Self {
        Self {
            readings: [
                SensorReading::new(1.0),  // Boost: 1 bar absolute
                SensorReading::new(25.0), // Intake pre
                SensorReading::new(25.0), // Intake post
                SensorReading::new(0.0),  // Exhaust
                SensorReading::new(25.0), // Coolant
                SensorReading::new(12.5), // Battery
            ],
        }
    }

    /// Acquire one averaged raw sample (volts) for an analog channel.
    ///
    /// Invokes the transport `sample_count` times and returns the arithmetic
    /// mean, amortizing ADC conversion noise. Bounded by the fixed sample
    /// count, so the control loop can never stall here.
    fn acquire_raw<B: SensorBus>(
        bus: &mut B,
        channel: ParameterId,
        sample_count: u8,
    ) -> Result<f32, SensorError> {
        let mut sum = 0.0f32;
        for _ in 0..sample_count {
            sum += bus.read_channel(channel)?;
        }
        Ok(sum / f32::from(sample_count))
    }

    /// Run one sampling tick: acquire, convert, validate, and filter every
    /// channel, updating the fault tracker as it goes.
    pub fn sample<B: SensorBus>(
        &mut self,
        bus: &mut B,
        cfg: &GaugeConfig,
        faults: &mut FaultTracker,
    ) {
        for param in ParameterId::ALL {
            if !bus.is_available(param) {
                // Transport gone: freeze at last-known value, flag the fault
                self.mark_faulted(param, faults);
                continue;
            }

            let converted = match param {
                ParameterId::Boost => Self::acquire_raw(bus, param, cfg.sample_count)
                    .map(|v| Some(convert_linear_pressure(v, &cfg.map_sensor))),
                ParameterId::IntakePre | ParameterId::IntakePost | ParameterId::Coolant => {
                    Self::acquire_raw(bus, param, cfg.sample_count)
                        .map(|v| convert_thermistor(v, &cfg.thermistor, cfg.adc_vref))
                }
                ParameterId::Exhaust => bus
                    .read_thermocouple_frame()
                    .map(decode_thermocouple_frame),
                ParameterId::Battery => Self::acquire_raw(bus, param, cfg.sample_count)
                    .map(|v| Some(v * BATTERY_DIVIDER_RATIO)),
            };

            match converted {
                Ok(Some(value)) => self.apply(param, value, cfg, faults),
                Ok(None) | Err(_) => self.mark_faulted(param, faults),
            }
        }
    }

    /// Validate and filter one converted physical value.
    fn apply(
        &mut self,
        param: ParameterId,
        converted: f32,
        cfg: &GaugeConfig,
        faults: &mut FaultTracker,
    ) {
        let value = converted + cfg.offset(param);
        let (min, max) = cfg.spec(param).valid_range;
        // NaN/infinity would slip through the range comparisons and poison
        // the EMA history
        if !value.is_finite() || value < min || value > max {
            debug!("{} out of valid range", param.name());
            self.mark_faulted(param, faults);
            return;
        }

        let alpha = match param {
            ParameterId::Exhaust => cfg.filter_alpha * THERMOCOUPLE_ALPHA_SCALE,
            _ => cfg.filter_alpha,
        };

        let reading = &mut self.readings[param.index()];
        reading.value = value;
        reading.filtered = ema(value, reading.filtered, alpha);
        reading.faulted = false;
        faults.update(param, false);
    }

    /// Invalid or unavailable acquisition: echo the previous filtered value
    /// and surface the fault.
    fn mark_faulted(&mut self, param: ParameterId, faults: &mut FaultTracker) {
        self.readings[param.index()].faulted = true;
        faults.update(param, true);
    }

    #[inline]
    pub const fn reading(&self, param: ParameterId) -> &SensorReading {
        &self.readings[param.index()]
    }

    #[inline]
    pub const fn readings(&self) -> &[SensorReading; PARAM_COUNT] { &self.readings }

    /// Filtered value in the unit the parameter is evaluated and displayed
    /// in: boost becomes PSI gauge, everything else passes through.
    pub fn display_value(&self, param: ParameterId) -> f32 {
        let filtered = self.readings[param.index()].filtered;
        match param {
            ParameterId::Boost => bar_absolute_to_psi_gauge(filtered),
            _ => filtered,
        }
    }
}

impl Default for SignalConditioner {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
