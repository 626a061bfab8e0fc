//! Born-Landé lattice energy of ionic crystals.
//!
//! U = −(N_A M z⁺ z⁻ e²) / (4π ε₀ r₀) · (1 − 1/n)

use std::f64::consts::PI;

use serde::Serialize;

use crate::constants::{EPS0, N_AVOGADRO, Q_ELECTRON};
use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

/// Crystal parameters for the Born-Landé equation.
#[derive(Debug, Clone, Copy)]
pub struct Crystal {
    pub formula: &'static str,
    pub structure: &'static str,
    /// Madelung constant
    pub madelung: f64,
    /// Born exponent
    pub born: f64,
    pub z_cation: u32,
    pub z_anion: u32,
    /// Nearest-neighbour distance (pm)
    pub r0_pm: f64,
}

pub const CRYSTALS: [Crystal; 6] = [
    Crystal { formula: "NaCl", structure: "Rock salt", madelung: 1.7476, born: 8.0, z_cation: 1, z_anion: 1, r0_pm: 281.0 },
    Crystal { formula: "CsCl", structure: "CsCl-type", madelung: 1.7627, born: 10.5, z_cation: 1, z_anion: 1, r0_pm: 356.0 },
    Crystal { formula: "ZnS", structure: "Zinc blende", madelung: 1.6381, born: 9.0, z_cation: 2, z_anion: 2, r0_pm: 235.0 },
    Crystal { formula: "MgO", structure: "Rock salt", madelung: 1.7476, born: 7.0, z_cation: 2, z_anion: 2, r0_pm: 210.0 },
    Crystal { formula: "CaF2", structure: "Fluorite", madelung: 2.5194, born: 8.0, z_cation: 2, z_anion: 1, r0_pm: 237.0 },
    Crystal { formula: "TiO2", structure: "Rutile", madelung: 2.408, born: 9.0, z_cation: 4, z_anion: 2, r0_pm: 196.0 },
];

/// Points in the NaCl energy-versus-spacing curve.
pub const CURVE_POINTS: usize = 30;

impl Crystal {
    /// Coulomb prefactor `N_A M z⁺ z⁻ e² / (4π ε₀)` (J·m/mol).
    pub fn coulomb_coefficient(&self) -> f64 {
        N_AVOGADRO * self.madelung * (self.z_cation * self.z_anion) as f64 * Q_ELECTRON.powi(2)
            / (4.0 * PI * EPS0)
    }

    /// Lattice energy (J/mol).
    pub fn lattice_energy(&self) -> Result<f64> {
        let r0 = ensure_positive("r0", self.r0_pm)? * 1e-12;
        let born = ensure_positive("Born exponent", self.born)?;
        Ok(-self.coulomb_coefficient() / r0 * (1.0 - 1.0 / born))
    }
}

/// One point of an energy-versus-spacing curve (kJ/mol).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub r_pm: f64,
    pub attraction: f64,
    pub repulsion: f64,
}

impl CurvePoint {
    pub fn total(&self) -> f64 {
        self.attraction + self.repulsion
    }
}

/// Energy curve `−A/r + B/rⁿ` with `B` fixed by equilibrium at r₀.
///
/// Samples `points` spacings evenly from `r_min` to `r_max` inclusive (pm).
pub fn energy_curve(crystal: &Crystal, r_min_pm: f64, r_max_pm: f64, points: usize) -> Vec<CurvePoint> {
    let a = crystal.coulomb_coefficient();
    let r0 = crystal.r0_pm * 1e-12;
    let b = a * r0.powf(crystal.born - 1.0) / crystal.born;
    let step = if points > 1 {
        (r_max_pm - r_min_pm) / (points - 1) as f64
    } else {
        0.0
    };

    (0..points)
        .map(|i| {
            let r_pm = r_min_pm + step * i as f64;
            let r = r_pm * 1e-12;
            CurvePoint {
                r_pm,
                attraction: -a / r / 1000.0,
                repulsion: b / r.powf(crystal.born) / 1000.0,
            }
        })
        .collect()
}

/// Build the lattice energy report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Born-Lande Lattice Energy Analysis");

    let mut table = Table::new(&[
        ("Crystal", 8),
        ("Struct", 12),
        ("M", 8),
        ("z+z-", 6),
        ("r0(pm)", 8),
        ("n", 6),
        ("U(kJ/mol)", 12),
        ("U(eV/pair)", 0),
    ]);
    for c in &CRYSTALS {
        let u = c.lattice_energy()?;
        table.row([
            c.formula.to_string(),
            c.structure.to_string(),
            format!("{:.4}", c.madelung),
            (c.z_cation * c.z_anion).to_string(),
            format!("{}", c.r0_pm),
            format!("{}", c.born),
            format!("{:.0}", u / 1000.0),
            format!("{:.2}", u / (N_AVOGADRO * Q_ELECTRON)),
        ]);
    }
    report
        .section("")
        .text("U = -(N_A * M * z+ * z- * e^2) / (4*pi*eps0*r0) * (1 - 1/n)")
        .text("")
        .table(table);

    let mut curve = Table::new(&[
        ("r(pm)", 10),
        ("U_attract(kJ)", 16),
        ("U_repel(kJ)", 16),
        ("U_total(kJ)", 0),
    ]);
    for p in energy_curve(&CRYSTALS[0], 200.0, 500.0, CURVE_POINTS) {
        curve.row([
            format!("{:.0}", p.r_pm),
            format!("{:.1}", p.attraction),
            format!("{:.1}", p.repulsion),
            format!("{:.1}", p.total()),
        ]);
    }
    report.section("NaCl Energy vs Spacing (for plotting)").table(curve);

    report
        .section("Wearable material insights")
        .text("  - NaCl: Reference ionic compound, dissolves in sweat")
        .text("  - MgO: Ultra-stable, potential substrate for wearable sensors")
        .text("  - TiO2: Biocompatible, used in wearable UV sensors")
        .text("  - ZnS: Electroluminescent, used in flexible displays")
        .text("  - Higher lattice energy = more stable = harder to dissolve");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nacl_lattice_energy() {
        // Born-Landé estimate for NaCl is about −756 kJ/mol
        let u = CRYSTALS[0].lattice_energy().unwrap();
        assert_relative_eq!(u / 1000.0, -756.0, max_relative = 0.01);
    }

    #[test]
    fn test_divalent_crystals_are_more_stable() {
        let nacl = CRYSTALS[0].lattice_energy().unwrap();
        let mgo = CRYSTALS[3].lattice_energy().unwrap();
        assert!(mgo < 4.0 * nacl * 0.9);
    }

    #[test]
    fn test_curve_minimum_at_equilibrium() {
        let curve = energy_curve(&CRYSTALS[0], 200.0, 500.0, 301);
        let min = curve
            .iter()
            .min_by(|a, b| a.total().partial_cmp(&b.total()).unwrap())
            .unwrap();
        assert_relative_eq!(min.r_pm, 281.0, epsilon = 1.0);
        // At r0 the curve total equals the Born-Landé energy
        let u = CRYSTALS[0].lattice_energy().unwrap() / 1000.0;
        assert_relative_eq!(min.total(), u, max_relative = 1e-3);
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = energy_curve(&CRYSTALS[0], 200.0, 500.0, CURVE_POINTS);
        assert_eq!(curve.len(), 30);
        assert_relative_eq!(curve[0].r_pm, 200.0);
        assert_relative_eq!(curve[29].r_pm, 500.0);
    }
}
