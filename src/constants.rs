//! Physical constants in SI units.
//!
//! Values follow the rounded textbook figures the calculators were
//! tabulated with, so printed tables stay comparable across modules.

use std::f64::consts::PI;

/// Reduced Planck constant (J·s)
pub const HBAR: f64 = 1.055e-34;

/// Electron mass (kg)
pub const M_ELECTRON: f64 = 9.109e-31;

/// Elementary charge (C), also one electron-volt in joules
pub const Q_ELECTRON: f64 = 1.602e-19;

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.381e-23;

/// Avogadro's number (1/mol)
pub const N_AVOGADRO: f64 = 6.022e23;

/// Faraday constant (C/mol)
pub const FARADAY: f64 = 96485.0;

/// Molar gas constant (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Vacuum permittivity (F/m)
pub const EPS0: f64 = 8.854e-12;

/// Vacuum permeability (H/m)
pub const MU0: f64 = 4.0 * PI * 1e-7;

/// Speed of light used by the RF and resonance calculators (m/s)
pub const C_LIGHT: f64 = 3e8;

/// Mean Earth radius (m)
pub const R_EARTH: f64 = 6.371e6;

/// Body temperature used by the electrochemistry calculators (K)
pub const T_BODY: f64 = 310.0;

/// Normal skin surface temperature (°C)
pub const T_SKIN_C: f64 = 33.0;

/// Gibbs free energy of ATP hydrolysis (J/mol)
pub const G_ATP: f64 = 30.5e3;

/// Schumann fundamental (Hz)
pub const F_SCHUMANN: f64 = 7.83;

/// Speed of light derived from the vacuum constants (m/s).
pub fn c_from_vacuum() -> f64 {
    1.0 / (EPS0 * MU0).sqrt()
}

/// Thermal energy kT at temperature `t` in electron-volts.
pub fn thermal_voltage(t: f64) -> f64 {
    K_BOLTZMANN * t / Q_ELECTRON
}
