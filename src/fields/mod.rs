//! Maxwell field calculators.
//!
//! Connects electrostatics, magnetostatics and wave propagation for
//! body-scale sources:
//!
//! - [`statics`] - Gauss (ion point fields) and Ampère (nerve current fields)
//! - [`induction`] - Faraday EMF in pickup coils
//! - [`waves`] - Free-space wavelengths and field energy density

pub mod induction;
pub mod statics;
pub mod waves;

use crate::constants::{c_from_vacuum, Q_ELECTRON};
use crate::error::Result;
use crate::report::{Report, Table};
use crate::units::format_power;

use induction::{emf, field_sources, load_power, COIL_AREAS, LOAD_OHMS};
use statics::{ion_field, wire_field, Detectability, GAUSS_DISTANCES, ION_CHARGES, NERVE_CURRENTS};
use waves::{
    dominant_field, electric_energy_density, magnetic_energy_density, wavelength_label,
    FIELD_SCENARIOS, SPECTRUM,
};

/// Build the unified Maxwell report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Maxwell Field Simulation — Unified EM Analysis");

    let mut gauss = Table::new(&[
        ("Ion", 8),
        ("q(e)", 8),
        ("E at 1nm (V/m)", 18),
        ("E at 10nm", 18),
        ("E at 1um", 0),
    ]);
    for (name, z) in ION_CHARGES {
        let mut cells = vec![name.to_string(), format!("{:+}", z)];
        for r in GAUSS_DISTANCES {
            cells.push(format!("{:.3e}", ion_field(z, r)?));
        }
        gauss.row(cells);
    }
    report
        .section("PART 1: Gauss's Law (∇·E = ρ/ε₀)")
        .text("Point charge electric field vs distance")
        .text("")
        .table(gauss);

    let mut ampere = Table::new(&[
        ("Source", 20),
        ("I", 12),
        ("B at 1mm (T)", 16),
        ("B at 1cm", 16),
        ("Detectable?", 0),
    ]);
    for (name, current, _) in NERVE_CURRENTS {
        let b_mm = wire_field(current, 1e-3)?;
        let b_cm = wire_field(current, 1e-2)?;
        ampere.row([
            name.to_string(),
            format!("{:.1e}", current),
            format!("{:.2e}", b_mm),
            format!("{:.2e}", b_cm),
            Detectability::classify(b_cm).label().to_string(),
        ]);
    }
    report
        .section("PART 2: Ampère's Law (∇×B = μ₀J + μ₀ε₀∂E/∂t)")
        .text("Ion current in a nerve fiber → magnetic field")
        .text("")
        .table(ampere);

    let mut faraday = Table::new(&[
        ("Coil", 24),
        ("dB/dt source", 24),
        ("EMF (V)", 14),
        ("Power @ 1kΩ", 0),
    ]);
    for (coil, area) in COIL_AREAS {
        for (source, db_dt) in field_sources() {
            let v = emf(area, db_dt);
            faraday.row([
                coil.to_string(),
                source.to_string(),
                format!("{:.4e}", v),
                format_power(load_power(v, LOAD_OHMS)),
            ]);
        }
    }
    report
        .section("PART 3: Faraday's Law (∇×E = -∂B/∂t)")
        .text("Induction from changing magnetic fields")
        .text("")
        .table(faraday);

    let mut spectrum = Table::new(&[("Band", 20), ("Freq", 14), ("λ", 14), ("Wearable use", 0)]);
    for (band, f, usage) in SPECTRUM {
        spectrum.row([
            band.to_string(),
            format!("{:.2e}", f),
            wavelength_label(f),
            usage.to_string(),
        ]);
    }
    report
        .section("PART 4: Wave Propagation (c = 1/√(μ₀ε₀))")
        .text(format!("Speed of light: c = {:.6e} m/s", c_from_vacuum()))
        .text("")
        .table(spectrum);

    let mut energy = Table::new(&[
        ("Scenario", 30),
        ("u_E (J/m³)", 16),
        ("u_B (J/m³)", 16),
        ("Dominant", 0),
    ]);
    for (name, e, b) in FIELD_SCENARIOS {
        let u_e = electric_energy_density(e);
        let u_b = magnetic_energy_density(b);
        energy.row([
            name.to_string(),
            format!("{:.3e}", u_e),
            format!("{:.3e}", u_b),
            dominant_field(u_e, u_b).to_string(),
        ]);
    }
    report
        .section("PART 5: Field Energy Density")
        .text("u_E = ½ε₀E²  |  u_B = B²/(2μ₀)")
        .text("")
        .table(energy);

    report
        .section("MAXWELL UNIFICATION")
        .text("  ∇·E = ρ/ε₀              Charge → Electric field")
        .text("  ∇·B = 0                 No magnetic monopoles")
        .text("  ∇×E = -∂B/∂t            Changing B → Electric field")
        .text("  ∇×B = μ₀J + μ₀ε₀∂E/∂t   Current + changing E → B")
        .text("")
        .text("  Ions create ρ → E field (Gauss)")
        .text("  Moving ions = J → B field (Ampère)")
        .text("  Changing fields → waves at c (Faraday + Ampère)")
        .text(format!(
            "  Elementary charge e = {:.3e} C links all of the above.",
            Q_ELECTRON
        ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sections() {
        let report = report().unwrap();
        assert_eq!(report.sections.len(), 6);
        let faraday = report.sections[2].tables().next().unwrap();
        assert_eq!(faraday.len(), 9);
        let spectrum = report.sections[3].tables().next().unwrap();
        assert_eq!(spectrum.rows[0][2], "∞");
    }

    #[test]
    fn test_faraday_power_uses_fitting_unit() {
        let report = report().unwrap();
        let faraday = report.sections[2].tables().next().unwrap();
        for row in &faraday.rows {
            let (value, unit) = row[3].split_once(' ').unwrap();
            let value: f64 = value.parse().unwrap();
            assert!(["W", "mW", "μW", "nW"].contains(&unit), "{}", row[3]);
            if unit != "nW" {
                assert!(value >= 1.0, "{} should use a smaller unit", row[3]);
            }
        }
    }
}
