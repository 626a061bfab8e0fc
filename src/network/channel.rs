//! Body channel modelled as a lossy transmission line.

use std::f64::consts::TAU;

use num_complex::Complex64;
use serde::Serialize;

use crate::error::{ensure_positive, Result};

/// Signal floor for the usable range (dB).
pub const RANGE_FLOOR_DB: f64 = -40.0;

/// Range reported when the line is effectively lossless (m).
pub const MAX_RANGE_M: f64 = 99.0;

/// Channel test frequencies (Hz).
pub const CHANNEL_FREQS: [f64; 7] = [7.83, 25.0, 50.0, 200.0, 1e3, 10e3, 1e6];

/// Per-metre line constants of the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyLine {
    /// Series resistance (Ω/m)
    pub r: f64,
    /// Series inductance (H/m)
    pub l: f64,
    /// Shunt capacitance (F/m)
    pub c: f64,
    /// Shunt conductance (S/m)
    pub g: f64,
}

impl Default for BodyLine {
    fn default() -> Self {
        Self { r: 200.0, l: 1.5e-6, c: 50e-12, g: 0.01 }
    }
}

/// Propagation figures at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelPoint {
    pub frequency: f64,
    /// Characteristic impedance magnitude (Ω)
    pub impedance: f64,
    /// Attenuation constant (Np/m)
    pub alpha: f64,
    /// Path loss per metre (dB, ≤ 0)
    pub loss_db_per_m: f64,
    /// Distance to the range floor (m)
    pub range_m: f64,
}

impl BodyLine {
    /// `Z₀ = √(Z/Y)`, `γ = √(Z Y)` with `Z = R + jωL`, `Y = G + jωC`.
    pub fn at(&self, frequency: f64) -> Result<ChannelPoint> {
        let omega = TAU * ensure_positive("frequency", frequency)?;
        let series = Complex64::new(self.r, omega * self.l);
        let shunt = Complex64::new(self.g, omega * self.c);
        let z0 = (series / shunt).sqrt();
        let alpha = (series * shunt).sqrt().re;

        let loss_db_per_m = if alpha > 0.0 {
            20.0 * (-alpha).exp().log10()
        } else {
            0.0
        };
        let range_m = if loss_db_per_m < 0.0 {
            (RANGE_FLOOR_DB / loss_db_per_m).min(MAX_RANGE_M)
        } else {
            MAX_RANGE_M
        };

        Ok(ChannelPoint {
            frequency,
            impedance: z0.norm(),
            alpha,
            loss_db_per_m,
            range_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_low_frequency_limit() {
        // ωL and ωC are negligible at 7.83 Hz: Z₀ ≈ √(R/G), α ≈ √(RG)
        let p = BodyLine::default().at(7.83).unwrap();
        assert_relative_eq!(p.impedance, (200.0f64 / 0.01).sqrt(), max_relative = 1e-6);
        assert_relative_eq!(p.alpha, 2f64.sqrt(), max_relative = 1e-6);
        assert_relative_eq!(p.loss_db_per_m, -12.28, max_relative = 1e-3);
        assert_relative_eq!(p.range_m, 40.0 / 12.28, max_relative = 1e-3);
    }

    #[test]
    fn test_lossless_line_caps_range() {
        let line = BodyLine { r: 0.0, g: 0.0, ..BodyLine::default() };
        let p = line.at(1e3).unwrap();
        assert!(p.loss_db_per_m.abs() < 1e-9);
        assert_eq!(p.range_m, MAX_RANGE_M);
        assert!(line.at(0.0).is_err());
    }
}
