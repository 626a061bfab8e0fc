//! Thermoelectric body-heat harvesting.

use serde::Serialize;

use crate::constants::T_BODY;
use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

/// Skin-to-air temperature difference (K).
pub const SKIN_DELTA_T: f64 = 5.0;

/// Harvesting area (m²), 100 cm².
pub const HARVEST_AREA: f64 = 100e-4;

/// Thermoelectric leg length (m).
pub const LEG_LENGTH: f64 = 1e-3;

/// Room-temperature thermoelectric material properties.
#[derive(Debug, Clone, Copy)]
pub struct TeMaterial {
    pub name: &'static str,
    /// Seebeck coefficient (V/K)
    pub seebeck: f64,
    /// Electrical conductivity (S/m)
    pub sigma: f64,
    /// Thermal conductivity (W/(m·K))
    pub kappa: f64,
    pub note: &'static str,
}

pub const TE_MATERIALS: [TeMaterial; 4] = [
    TeMaterial { name: "Bi2Te3", seebeck: 200e-6, sigma: 1.1e5, kappa: 1.5, note: "Classic TE" },
    TeMaterial { name: "PbTe", seebeck: 250e-6, sigma: 5e4, kappa: 2.0, note: "High-temp TE" },
    TeMaterial { name: "SnSe", seebeck: 500e-6, sigma: 1e4, kappa: 0.5, note: "Record ZT" },
    TeMaterial { name: "Organic", seebeck: 50e-6, sigma: 1e3, kappa: 0.3, note: "Flexible/wearable" },
];

/// Harvest figures for one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarvestRow {
    pub name: String,
    pub zt: f64,
    /// Output power (μW)
    pub power_uw: f64,
    /// Areal power density (μW/cm²)
    pub power_uw_per_cm2: f64,
}

/// Dimensionless figure of merit `ZT = S² σ T / κ`.
pub fn figure_of_merit(m: &TeMaterial, t: f64) -> Result<f64> {
    let kappa = ensure_positive("thermal conductivity", m.kappa)?;
    Ok(m.seebeck.powi(2) * m.sigma * t / kappa)
}

/// Output power `S² σ ΔT² A / L` (W).
pub fn harvest_power(m: &TeMaterial, delta_t: f64, area: f64, length: f64) -> Result<f64> {
    let length = ensure_positive("leg length", length)?;
    Ok(m.seebeck.powi(2) * m.sigma * delta_t.powi(2) * area / length)
}

/// Evaluate one material at body conditions.
pub fn analyze(m: &TeMaterial) -> Result<HarvestRow> {
    let power_uw = harvest_power(m, SKIN_DELTA_T, HARVEST_AREA, LEG_LENGTH)? * 1e6;
    Ok(HarvestRow {
        name: m.name.to_string(),
        zt: figure_of_merit(m, T_BODY)?,
        power_uw,
        power_uw_per_cm2: power_uw / (HARVEST_AREA * 1e4),
    })
}

/// Build the thermoelectric report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Thermoelectric Wearable Energy Harvesting");

    let mut table = Table::new(&[
        ("Material", 10),
        ("S(uV/K)", 10),
        ("ZT", 8),
        ("P(uW)", 10),
        ("P(uW/cm2)", 12),
        ("Note", 0),
    ]);
    for m in &TE_MATERIALS {
        let row = analyze(m)?;
        table.row([
            m.name.to_string(),
            format!("{:.0}", m.seebeck * 1e6),
            format!("{:.2}", row.zt),
            format!("{:.1}", row.power_uw),
            format!("{:.2}", row.power_uw_per_cm2),
            m.note.to_string(),
        ]);
    }
    report
        .section("")
        .text(format!(
            "Body temp: {}K, dT: {}K, Area: {:.0} cm^2",
            T_BODY,
            SKIN_DELTA_T,
            HARVEST_AREA * 1e4
        ))
        .text("")
        .table(table);

    report
        .section("Reality check")
        .text("  Bluetooth LE beacon: ~10-50 uW (achievable with Bi2Te3)")
        .text("  MCU sleep mode: ~1-10 uW (achievable)")
        .text("  Active MCU: ~1-10 mW (NOT achievable from body heat alone)")
        .text("  Phone charging: ~5W (IMPOSSIBLE from body heat)")
        .text("")
        .text("Conclusion: Body thermoelectric can power sensors + sleep-mode MCU.")
        .text("Cannot power active computation or charging.");

    Ok(report)
}
