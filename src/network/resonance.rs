//! Tissue resonance, Schumann modes and the broadband absorber.

use std::f64::consts::{PI, TAU};

use crate::constants::{C_LIGHT, R_EARTH};

/// Damped tissue oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tissue {
    pub name: &'static str,
    /// Natural frequency (Hz)
    pub f0: f64,
    /// Damping (1/s)
    pub gamma: f64,
    /// Mechanotransduction strain threshold
    pub threshold_strain: f64,
}

impl Tissue {
    /// Normalised response `f₀² / √((f₀² − f²)² + (γf/π)²)` to a drive at `f`.
    ///
    /// A zero denominator (undamped drive at resonance) reports 1.0.
    pub fn response(&self, f: f64) -> f64 {
        let f0_sq = self.f0.powi(2);
        let denom = ((f0_sq - f.powi(2)).powi(2) + (self.gamma * f / PI).powi(2)).sqrt();
        if denom > 0.0 {
            f0_sq / denom
        } else {
            1.0
        }
    }
}

pub const TISSUES: [Tissue; 4] = [
    Tissue { name: "Bone", f0: 40.0, gamma: 0.8, threshold_strain: 500e-6 },
    Tissue { name: "Nerve", f0: 55.0, gamma: 1.5, threshold_strain: 100e-6 },
    Tissue { name: "Muscle", f0: 180.0, gamma: 2.0, threshold_strain: 200e-6 },
    Tissue { name: "Brain", f0: 10.0, gamma: 0.3, threshold_strain: 50e-6 },
];

/// Stimulation frequencies (name, Hz).
pub const THERAPIES: [(&str, f64); 4] = [
    ("Schumann / Global Balance", 7.83),
    ("Bone Repair (low)", 25.0),
    ("Bone Repair (high) / Nerve", 50.0),
    ("Muscle Recovery", 200.0),
];

/// Ideal-cavity Schumann mode `f_n = c/(2π R⊕) √(n(n+1))` (Hz).
pub fn schumann_mode(n: u32) -> f64 {
    let n = f64::from(n);
    C_LIGHT / (TAU * R_EARTH) * (n * (n + 1.0)).sqrt()
}

/// Absorber test frequencies (GHz).
pub const ABSORBER_FREQS_GHZ: [f64; 10] = [0.1, 0.5, 1.0, 2.4, 5.0, 10.0, 30.0, 60.0, 100.0, 300.0];

/// Centre of the absorption band (GHz).
pub const ABSORBER_CENTER_GHZ: f64 = 5.0;

/// Quadratic roll-off width (GHz).
pub const ABSORBER_BANDWIDTH_GHZ: f64 = 50.0;

pub const ABSORBER_PEAK: f64 = 0.97;

/// Broadband Au/Fe3O4 absorption at `f_ghz`, clipped to [0, 0.99].
///
/// Below 0.5 GHz the cells are too small relative to the wavelength and
/// absorption falls linearly to zero.
pub fn absorption(f_ghz: f64) -> f64 {
    let rolloff = 1.0 - 0.03 * ((f_ghz - ABSORBER_CENTER_GHZ) / ABSORBER_BANDWIDTH_GHZ).powi(2);
    let low_cut = (f_ghz / 0.5).clamp(0.0, 1.0);
    (ABSORBER_PEAK * rolloff * low_cut).clamp(0.0, 0.99)
}

pub fn wavelength_label(lambda: f64) -> String {
    if lambda >= 1.0 {
        format!("{:.2} m", lambda)
    } else if lambda >= 1e-3 {
        format!("{:.1} mm", lambda * 1e3)
    } else {
        format!("{:.0} μm", lambda * 1e6)
    }
}

/// Golden ratio φ.
pub fn golden_ratio() -> f64 {
    (1.0 + 5f64.sqrt()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tissue_response() {
        let brain = TISSUES[3];
        // 100 / √(38.69² + 0.7477²)
        assert_relative_eq!(brain.response(7.83), 2.584, max_relative = 1e-3);
        // Far above resonance the response collapses
        assert!(TISSUES[0].response(200.0) < 0.1);
        let undamped = Tissue { gamma: 0.0, ..TISSUES[0] };
        assert_eq!(undamped.response(40.0), 1.0);
    }

    #[test]
    fn test_schumann_modes() {
        assert_relative_eq!(schumann_mode(1), 10.60, max_relative = 1e-3);
        assert_relative_eq!(schumann_mode(2) / schumann_mode(1), 3f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_absorption_clipping() {
        assert_relative_eq!(absorption(0.1), 0.19394, max_relative = 1e-4);
        assert_relative_eq!(absorption(5.0), 0.97);
        assert_eq!(absorption(300.0), 0.0);
        assert!(ABSORBER_FREQS_GHZ.iter().all(|&f| (0.0..=0.99).contains(&absorption(f))));
    }

    #[test]
    fn test_wavelength_labels() {
        assert_eq!(wavelength_label(3.0), "3.00 m");
        assert_eq!(wavelength_label(0.125), "125.0 mm");
        assert_eq!(wavelength_label(1e-4), "100 μm");
        assert_relative_eq!(golden_ratio(), 1.618034, max_relative = 1e-6);
    }
}
