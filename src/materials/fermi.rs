//! Free-electron Fermi energy of metallic contacts.
//!
//! E_F = ħ²/(2mₑ) · (3π² n)^(2/3)
//!
//! with the Sommerfeld low-temperature correction
//!   E_F(T) ≈ E_F · (1 − π²/12 · (k_B T / E_F)²)

use std::f64::consts::PI;

use serde::Serialize;

use crate::constants::{HBAR, K_BOLTZMANN, M_ELECTRON, Q_ELECTRON};
use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

/// A metal's conduction electron density.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    pub symbol: &'static str,
    /// Free electron density (1/m³)
    pub density: f64,
    pub valence: u32,
    pub note: &'static str,
}

/// Metals used for wearable contacts and wiring.
pub const METALS: [Metal; 6] = [
    Metal { symbol: "Na", density: 2.65e28, valence: 1, note: "Alkali metal" },
    Metal { symbol: "Cu", density: 8.49e28, valence: 1, note: "Noble metal (coin/wire)" },
    Metal { symbol: "Al", density: 18.1e28, valence: 3, note: "Trivalent, lightweight" },
    Metal { symbol: "Au", density: 5.90e28, valence: 1, note: "Noble metal (contacts)" },
    Metal { symbol: "Ag", density: 5.86e28, valence: 1, note: "Highest conductivity" },
    Metal { symbol: "Fe", density: 17.0e28, valence: 2, note: "Structural/magnetic" },
];

/// Temperatures (K) for the Sommerfeld sweep.
pub const SWEEP_TEMPERATURES: [f64; 5] = [4.0, 77.0, 300.0, 310.0, 500.0];

/// Derived Fermi quantities for one metal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FermiRow {
    pub symbol: String,
    pub energy_ev: f64,
    pub temperature_k: f64,
    pub velocity: f64,
}

/// Fermi energy in joules for electron density `n` (1/m³).
pub fn fermi_energy(n: f64) -> Result<f64> {
    let n = ensure_positive("electron density", n)?;
    Ok(HBAR.powi(2) / (2.0 * M_ELECTRON) * (3.0 * PI.powi(2) * n).powf(2.0 / 3.0))
}

/// Fermi temperature `E_F / k_B` (K).
pub fn fermi_temperature(energy: f64) -> f64 {
    energy / K_BOLTZMANN
}

/// Fermi velocity `sqrt(2 E_F / mₑ)` (m/s).
pub fn fermi_velocity(energy: f64) -> f64 {
    (2.0 * energy / M_ELECTRON).sqrt()
}

/// Chemical potential at temperature `t` from the Sommerfeld expansion (J).
pub fn sommerfeld_energy(energy: f64, t: f64) -> f64 {
    energy * (1.0 - (PI.powi(2) / 12.0) * (K_BOLTZMANN * t / energy).powi(2))
}

/// Evaluate one metal.
pub fn analyze(metal: &Metal) -> Result<FermiRow> {
    let e_f = fermi_energy(metal.density)?;
    Ok(FermiRow {
        symbol: metal.symbol.to_string(),
        energy_ev: e_f / Q_ELECTRON,
        temperature_k: fermi_temperature(e_f),
        velocity: fermi_velocity(e_f),
    })
}

/// Build the Fermi energy report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Fermi Energy Analysis for Metallic Wearable Components");

    let mut table = Table::new(&[
        ("Metal", 6),
        ("n(10^28/m3)", 14),
        ("Z", 3),
        ("E_F(eV)", 10),
        ("T_F(K)", 12),
        ("v_F(m/s)", 12),
        ("Notes", 0),
    ]);
    for metal in &METALS {
        let row = analyze(metal)?;
        table.row([
            metal.symbol.to_string(),
            format!("{:.2}", metal.density / 1e28),
            metal.valence.to_string(),
            format!("{:.2}", row.energy_ev),
            format!("{:.0}", row.temperature_k),
            format!("{:.0}", row.velocity),
            metal.note.to_string(),
        ]);
    }
    report
        .section("")
        .text("E_F = (hbar^2 / 2m) * (3*pi^2 * n)^(2/3)")
        .text("")
        .table(table);

    let mut columns: Vec<(&str, usize)> = vec![("T(K)", 8)];
    columns.extend(METALS.iter().map(|m| (m.symbol, 10)));
    let mut sweep = Table::new(&columns);
    for &t in &SWEEP_TEMPERATURES {
        let mut cells = vec![format!("{}", t)];
        for metal in &METALS {
            let e_f = fermi_energy(metal.density)?;
            cells.push(format!("{:.4}", sommerfeld_energy(e_f, t) / Q_ELECTRON));
        }
        sweep.row(cells);
    }
    report
        .section("Temperature dependence of electron energy (eV)")
        .table(sweep);

    report
        .section("Wearable relevance")
        .text("  Body temp (310K) << T_F (~50000K) for all metals")
        .text("  Electrons remain deeply degenerate at body temperature")
        .text("  Fermi-Dirac statistics essential, classical Boltzmann fails")
        .text("  Conductivity of wearable contacts determined by E_F and scattering");

    Ok(report)
}
