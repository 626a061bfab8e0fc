//! Gauss and Ampère: fields from ions and ion currents.

use std::f64::consts::PI;

use crate::constants::{EPS0, MU0, Q_ELECTRON};
use crate::error::{ensure_positive, Result};

/// Point charges of interest (name, charge in units of e).
pub const ION_CHARGES: [(&str, i32); 4] = [("Na+", 1), ("Ca2+", 2), ("Cl-", -1), ("Al3+", 3)];

/// Distances at which the point-charge field is tabulated (m).
pub const GAUSS_DISTANCES: [f64; 3] = [1e-9, 10e-9, 1e-6];

/// Biological current sources (name, current in A, note).
pub const NERVE_CURRENTS: [(&str, f64, &str); 5] = [
    ("Resting leak", 1e-12, "Single channel (~1 pA)"),
    ("Single channel", 5e-12, "Open Na+ channel"),
    ("Action potential", 1e-9, "Net membrane current"),
    ("Nerve bundle", 1e-6, "Whole nerve (~1 μA)"),
    ("Cardiac", 1e-3, "Heart muscle (~1 mA)"),
];

/// Magnetometer detectability of a field (T).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detectability {
    /// Above ~100 fT, within MEG reach
    Meg,
    /// Above ~1 fT, SQUID only
    SquidOnly,
    BelowNoise,
}

impl Detectability {
    pub fn classify(b: f64) -> Self {
        if b > 1e-13 {
            Detectability::Meg
        } else if b > 1e-15 {
            Detectability::SquidOnly
        } else {
            Detectability::BelowNoise
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Detectability::Meg => "MEG",
            Detectability::SquidOnly => "SQUID only",
            Detectability::BelowNoise => "Below noise",
        }
    }
}

/// Field magnitude of a point charge `|q| / (4π ε₀ r²)` (V/m).
pub fn point_charge_field(charge: f64, r: f64) -> Result<f64> {
    let r = ensure_positive("distance", r)?;
    Ok(charge.abs() / (4.0 * PI * EPS0 * r.powi(2)))
}

/// Field of ion valence `z` at distance `r` (V/m).
pub fn ion_field(z: i32, r: f64) -> Result<f64> {
    point_charge_field(z as f64 * Q_ELECTRON, r)
}

/// Field around a long straight current `µ₀ I / (2π r)` (T).
pub fn wire_field(current: f64, r: f64) -> Result<f64> {
    let r = ensure_positive("distance", r)?;
    Ok(MU0 * current / (2.0 * PI * r))
}
