//! Stochastic resonance and grain-chain micro-inductance.

use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::Serialize;

use crate::constants::MU0;
use crate::error::{ensure_positive, Result};

/// Noise intensities swept for the bistable detector.
pub const NOISE_LEVELS: [f64; 8] = [0.01, 0.05, 0.1, 0.2, 0.3, 0.5, 1.0, 2.0];

/// Bistable potential `U(x) = −a x²/2 + b x⁴/4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bistable {
    pub a: f64,
    pub b: f64,
}

impl Default for Bistable {
    fn default() -> Self {
        Self { a: 1.0, b: 1.0 }
    }
}

impl Bistable {
    /// Barrier height `ΔU = a² / (4b)`.
    pub fn barrier(&self) -> f64 {
        self.a.powi(2) / (4.0 * self.b)
    }

    /// Kramers escape rate `a√b / (2π) · exp(−ΔU / D)`.
    pub fn kramers_rate(&self, noise: f64) -> Result<f64> {
        let noise = ensure_positive("noise intensity", noise)?;
        Ok(self.a * self.b.sqrt() / TAU * (-self.barrier() / noise).exp())
    }

    /// SNR proxy `rate · e^{−D}`.
    pub fn snr(&self, noise: f64) -> Result<f64> {
        Ok(self.kramers_rate(noise)? * (-noise).exp())
    }
}

/// Where a noise level sits relative to the resonance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseRegime {
    Optimal,
    SubThreshold,
    OverDriven,
    Useful,
}

impl fmt::Display for NoiseRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoiseRegime::Optimal => "OPTIMAL",
            NoiseRegime::SubThreshold => "sub-threshold",
            NoiseRegime::OverDriven => "over-driven",
            NoiseRegime::Useful => "",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResonancePoint {
    pub noise: f64,
    pub rate: f64,
    pub snr: f64,
    pub regime: NoiseRegime,
}

/// Sweep the noise levels and mark the one with the largest SNR as optimal.
pub fn resonance_sweep(system: &Bistable, levels: &[f64]) -> Result<Vec<ResonancePoint>> {
    let mut points = Vec::with_capacity(levels.len());
    for &noise in levels {
        points.push(ResonancePoint {
            noise,
            rate: system.kramers_rate(noise)?,
            snr: system.snr(noise)?,
            regime: NoiseRegime::Useful,
        });
    }

    let optimum = points
        .iter()
        .enumerate()
        .max_by(|(_, x), (_, y)| x.snr.total_cmp(&y.snr))
        .map(|(i, _)| i);

    for (i, point) in points.iter_mut().enumerate() {
        point.regime = if Some(i) == optimum {
            NoiseRegime::Optimal
        } else if point.noise < 0.1 {
            NoiseRegime::SubThreshold
        } else if point.noise > 0.5 {
            NoiseRegime::OverDriven
        } else {
            NoiseRegime::Useful
        };
    }
    Ok(points)
}

/// Magnetite grain diameter (m).
pub const GRAIN_DIAMETER: f64 = 50e-6;

/// Relative permeability of magnetite.
pub const MU_R_MAGNETITE: f64 = 20.0;

/// Parasitic capacitance per grain contact (F).
pub const CONTACT_CAPACITANCE: f64 = 0.1e-12;

/// Chain lengths in grain contacts.
pub const CHAIN_CONTACTS: [u32; 5] = [5, 10, 20, 50, 100];

/// A straight chain of touching grains acting as a solenoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrainChain {
    pub contacts: u32,
    /// Chain length (m)
    pub length: f64,
    /// Inductance (H)
    pub inductance: f64,
    /// Self-resonant frequency (Hz)
    pub resonance: f64,
}

impl GrainChain {
    /// `L = µ₀ µ_r N² A / l`, resonating with `N × 0.1 pF`.
    pub fn new(contacts: u32) -> Result<Self> {
        let n = ensure_positive("contact count", contacts as f64)?;
        let area = PI * (GRAIN_DIAMETER / 2.0).powi(2);
        let length = n * GRAIN_DIAMETER;
        let inductance = MU0 * MU_R_MAGNETITE * n.powi(2) * area / length;
        let capacitance = n * CONTACT_CAPACITANCE;
        Ok(Self {
            contacts,
            length,
            inductance,
            resonance: 1.0 / (TAU * (inductance * capacitance).sqrt()),
        })
    }

    pub fn band(&self) -> &'static str {
        let f = self.resonance;
        if f < 2e9 {
            "L-band"
        } else if f < 4e9 {
            "S-band"
        } else if f < 8e9 {
            "C-band"
        } else if f < 12e9 {
            "X-band"
        } else {
            "K-band"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kramers_rate() {
        let system = Bistable::default();
        assert_relative_eq!(system.barrier(), 0.25);
        // exp(−0.25 / 0.25) / 2π
        assert_relative_eq!(
            system.kramers_rate(0.25).unwrap(),
            (-1.0f64).exp() / TAU,
            max_relative = 1e-12
        );
        assert!(system.kramers_rate(0.0).is_err());
    }

    #[test]
    fn test_optimal_noise() {
        // SNR ∝ exp(−0.25/D − D) peaks at D = 0.5
        let points = resonance_sweep(&Bistable::default(), &NOISE_LEVELS).unwrap();
        let optimal: Vec<f64> = points
            .iter()
            .filter(|p| p.regime == NoiseRegime::Optimal)
            .map(|p| p.noise)
            .collect();
        assert_eq!(optimal, vec![0.5]);
        assert_eq!(points[0].regime, NoiseRegime::SubThreshold);
        assert_eq!(points[7].regime, NoiseRegime::OverDriven);
        assert_eq!(points[3].regime, NoiseRegime::Useful);
    }

    #[test]
    fn test_grain_chain_resonance() {
        let short = GrainChain::new(5).unwrap();
        assert_relative_eq!(short.inductance, 4.935e-9, max_relative = 1e-3);
        assert_relative_eq!(short.resonance, 3.204e9, max_relative = 1e-3);
        assert_eq!(short.band(), "S-band");

        // f scales as 1/N
        let long = GrainChain::new(10).unwrap();
        assert_relative_eq!(short.resonance / long.resonance, 2.0, max_relative = 1e-9);
        assert_eq!(long.band(), "L-band");

        assert!(GrainChain::new(0).is_err());
    }
}
