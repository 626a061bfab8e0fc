//! Nernst-Planck ion flux across a cell membrane.

use serde::Serialize;

use crate::constants::{FARADAY, GAS_CONSTANT, T_BODY};
use crate::error::{ensure_positive, Result, SimError};
use crate::report::{Report, Table};

/// Membrane thickness used for concentration gradients (m).
pub const MEMBRANE_THICKNESS: f64 = 10e-9;

/// Resting membrane potential (V).
pub const RESTING_POTENTIAL: f64 = -0.070;

/// A permeant ion species.
#[derive(Debug, Clone, Copy)]
pub struct Ion {
    pub name: &'static str,
    pub valence: i32,
    /// Diffusion coefficient (m²/s)
    pub diffusivity: f64,
    /// Intracellular concentration (mol/L)
    pub c_in: f64,
    /// Extracellular concentration (mol/L)
    pub c_out: f64,
}

pub const IONS: [Ion; 4] = [
    Ion { name: "Na+", valence: 1, diffusivity: 1.33e-9, c_in: 12e-3, c_out: 145e-3 },
    Ion { name: "K+", valence: 1, diffusivity: 1.96e-9, c_in: 140e-3, c_out: 4e-3 },
    Ion { name: "Ca2+", valence: 2, diffusivity: 0.79e-9, c_in: 0.1e-6, c_out: 2.5e-3 },
    Ion { name: "Cl-", valence: -1, diffusivity: 2.03e-9, c_in: 4e-3, c_out: 110e-3 },
];

/// Net drive direction across the membrane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inward,
    Outward,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Inward => "inward",
            Direction::Outward => "outward",
        }
    }
}

/// Flux decomposition for one ion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluxRow {
    pub name: String,
    /// Nernst reversal potential (V)
    pub nernst: f64,
    pub direction: Direction,
    /// Fick diffusion flux (mol/(m²·s))
    pub diffusion: f64,
    /// Field-driven migration flux at the resting potential (mol/(m²·s))
    pub migration: f64,
}

impl FluxRow {
    pub fn total(&self) -> f64 {
        self.diffusion + self.migration
    }
}

fn check(ion: &Ion) -> Result<()> {
    if ion.valence == 0 {
        return Err(SimError::invalid_parameter(
            format!("{} valence", ion.name),
            "ion valence must be nonzero",
        ));
    }
    ensure_positive("inner concentration", ion.c_in)?;
    ensure_positive("outer concentration", ion.c_out)?;
    Ok(())
}

/// Nernst potential `RT/(zF) · ln(C_out / C_in)` (V).
pub fn nernst_potential(ion: &Ion, t: f64) -> Result<f64> {
    check(ion)?;
    Ok(GAS_CONSTANT * t / (ion.valence as f64 * FARADAY) * (ion.c_out / ion.c_in).ln())
}

/// Fick flux `−D · ΔC / dx` with ΔC = C_out − C_in.
pub fn diffusion_flux(ion: &Ion, dx: f64) -> f64 {
    -ion.diffusivity * (ion.c_out - ion.c_in) / dx
}

/// Migration flux `−D z F C_avg / (RT) · V_m / dx`.
pub fn migration_flux(ion: &Ion, v_m: f64, dx: f64, t: f64) -> f64 {
    let c_avg = (ion.c_in + ion.c_out) / 2.0;
    -ion.diffusivity * ion.valence as f64 * FARADAY * c_avg / (GAS_CONSTANT * t) * (v_m / dx)
}

/// Evaluate one ion at body temperature and resting potential.
pub fn analyze(ion: &Ion) -> Result<FluxRow> {
    let nernst = nernst_potential(ion, T_BODY)?;
    let inward = (ion.valence > 0 && nernst > 0.0) || (ion.valence < 0 && nernst < 0.0);
    Ok(FluxRow {
        name: ion.name.to_string(),
        nernst,
        direction: if inward { Direction::Inward } else { Direction::Outward },
        diffusion: diffusion_flux(ion, MEMBRANE_THICKNESS),
        migration: migration_flux(ion, RESTING_POTENTIAL, MEMBRANE_THICKNESS, T_BODY),
    })
}

/// Build the ion flux report.
pub fn report() -> Result<Report> {
    let rows = IONS.iter().map(analyze).collect::<Result<Vec<_>>>()?;
    let mut report = Report::new("Nernst-Planck Ion Flux Analysis");

    let mut nernst = Table::new(&[
        ("Ion", 8),
        ("z", 4),
        ("C_in(mM)", 12),
        ("C_out(mM)", 12),
        ("E_nernst(mV)", 14),
        ("Direction", 0),
    ]);
    for (ion, row) in IONS.iter().zip(&rows) {
        nernst.row([
            ion.name.to_string(),
            ion.valence.to_string(),
            format!("{:.2}", ion.c_in * 1e3),
            format!("{:.1}", ion.c_out * 1e3),
            format!("{:.1}", row.nernst * 1e3),
            row.direction.label().to_string(),
        ]);
    }
    report
        .section("")
        .text(format!("Temperature: {}K (body temp)", T_BODY))
        .text("")
        .table(nernst);

    let section = report.section("Diffusion Flux (Fick's Law, no electric field)");
    section.text("J = -D * dC/dx");
    for (ion, row) in IONS.iter().zip(&rows) {
        let gradient = (ion.c_out - ion.c_in) / MEMBRANE_THICKNESS;
        section.text(format!(
            "{:<8} D={:.2e} m^2/s  dC/dx={:.2e}  J={:.2e} mol/(m^2·s)",
            ion.name, ion.diffusivity, gradient, row.diffusion
        ));
    }

    let section = report.section(format!(
        "Full Nernst-Planck flux at V_m = {:.0} mV",
        RESTING_POTENTIAL * 1000.0
    ));
    section.text("J = -D(dC/dx + zFC/RT * dV/dx)");
    for row in &rows {
        section.text(format!(
            "{:<8} J_diff={:+.2e}  J_migr={:+.2e}  J_total={:+.2e}",
            row.name,
            row.diffusion,
            row.migration,
            row.total()
        ));
    }

    report
        .section("Key insights")
        .text("  - K+ has outward diffusion gradient but inward electrical drive")
        .text("  - Na+ has both inward diffusion AND electrical drive (strong inward)")
        .text("  - Ca2+ has massive concentration gradient (25000:1 out:in)")
        .text("  - At resting potential, net fluxes are maintained by Na/K ATPase");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nernst_potentials() {
        // Textbook values at 310 K: Na+ ≈ +67 mV, K+ ≈ −95 mV
        let na = nernst_potential(&IONS[0], T_BODY).unwrap();
        let k = nernst_potential(&IONS[1], T_BODY).unwrap();
        assert_relative_eq!(na * 1e3, 66.6, max_relative = 0.01);
        assert_relative_eq!(k * 1e3, -95.0, max_relative = 0.01);
    }

    #[test]
    fn test_directions() {
        let rows: Vec<FluxRow> = IONS.iter().map(|i| analyze(i).unwrap()).collect();
        assert_eq!(rows[0].direction, Direction::Inward);
        assert_eq!(rows[1].direction, Direction::Outward);
        assert_eq!(rows[2].direction, Direction::Inward);
        assert_eq!(rows[3].direction, Direction::Inward);
    }

    #[test]
    fn test_flux_signs() {
        let na = analyze(&IONS[0]).unwrap();
        // Higher outside: diffusion flux is negative along +x (outside → inside)
        assert!(na.diffusion < 0.0);
        // Negative V_m drives cations with positive migration flux
        assert!(na.migration > 0.0);
    }

    #[test]
    fn test_zero_valence_rejected() {
        let neutral = Ion { name: "X", valence: 0, ..IONS[0] };
        assert!(nernst_potential(&neutral, T_BODY).is_err());
    }
}
