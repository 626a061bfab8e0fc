//! Metamaterial rectenna and ambient energy analysis.
//!
//! Separates what ambient RF can actually deliver from what it cannot:
//! measured power densities, Schottky junction choices for rectification,
//! metamaterial element geometry, noise-assisted detection, grain-chain
//! inductance and the overall harvest budget.

pub mod resonance;

use std::f64::consts::PI;

use serde::Serialize;

use crate::constants::C_LIGHT;
use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

use resonance::{resonance_sweep, Bistable, GrainChain, CHAIN_CONTACTS, GRAIN_DIAMETER, MU_R_MAGNETITE, NOISE_LEVELS};

/// Ambient RF sources (name, power density in dBm/m², note).
pub const AMBIENT_RF: [(&str, f64, &str); 9] = [
    ("FM Radio (88-108 MHz)", -25.0, "Near urban transmitter"),
    ("TV Broadcast (470-890 MHz)", -30.0, "Urban, line-of-sight"),
    ("GSM 900 MHz", -25.0, "Near cell tower (<200m)"),
    ("GSM 1800 MHz", -30.0, "Urban ambient"),
    ("WiFi 2.4 GHz", -20.0, "Indoor, near router"),
    ("WiFi 5 GHz", -30.0, "Indoor, same room"),
    ("LTE (various)", -28.0, "Urban outdoor"),
    ("Ambient total (urban)", -15.0, "All bands combined"),
    ("CMB (cosmic microwave)", -90.0, "2.725K blackbody, NOT harvestable"),
];

/// Combined urban ambient density (dBm/m²).
pub const URBAN_TOTAL_DBM: f64 = -15.0;

/// Convert a power density in dBm/m² to µW/m².
pub fn dbm_to_uw_per_m2(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0) * 1000.0
}

/// Rectifying junction candidate.
#[derive(Debug, Clone, Copy)]
pub struct Junction {
    pub name: &'static str,
    /// Barrier height (eV)
    pub barrier: f64,
    pub ideality: f64,
    pub note: &'static str,
}

impl Junction {
    /// Practical turn-on voltage `max(0.1, 0.6 φ_B)` (V).
    pub fn turn_on(&self) -> f64 {
        (0.6 * self.barrier).max(0.1)
    }
}

pub const JUNCTIONS: [Junction; 4] = [
    Junction { name: "Au/n-Si", barrier: 0.80, ideality: 1.05, note: "Standard Schottky, well-characterized" },
    Junction { name: "Au/Fe3O4", barrier: 0.45, ideality: 1.8, note: "Black sand heterojunction" },
    Junction { name: "Au/GaAs", barrier: 0.90, ideality: 1.02, note: "High-frequency rectenna standard" },
    Junction { name: "Au/Graphene", barrier: 0.35, ideality: 1.3, note: "Ultra-low barrier, flexible" },
];

/// Metamaterial bands (name, frequency in Hz, use).
pub const BANDS: [(&str, f64, &str); 6] = [
    ("L-Band (1.5 GHz)", 1.5e9, "Power harvest (strongest ambient)"),
    ("S-Band (2.4 GHz)", 2.4e9, "WiFi harvest"),
    ("C-Band (5.8 GHz)", 5.8e9, "WiFi 5GHz harvest"),
    ("X-Band (10 GHz)", 10e9, "Satellite downlink"),
    ("K-Band (20 GHz)", 20e9, "5G mmWave (limited)"),
    ("Ka-Band (30 GHz)", 30e9, "Satellite Ka"),
];

/// Resonant element size as a fraction of the wavelength.
pub const ELEMENT_FRACTION: f64 = 0.1;

/// Patch antenna gain (dBi).
pub const PATCH_GAIN_DBI: f64 = 6.0;

/// Body-worn patch area (m²), 100 cm².
pub const BODY_PATCH_AREA: f64 = 100e-4;

/// RF-to-DC rectification efficiency.
pub const RECTIFIER_EFFICIENCY: f64 = 0.3;

/// Free-space wavelength at `frequency` (m).
pub fn wavelength(frequency: f64) -> Result<f64> {
    Ok(C_LIGHT / ensure_positive("frequency", frequency)?)
}

/// Effective aperture `G λ² / (4π)` for a gain in dBi (m²).
pub fn effective_aperture(gain_dbi: f64, frequency: f64) -> Result<f64> {
    let lambda = wavelength(frequency)?;
    Ok(10f64.powf(gain_dbi / 10.0) * lambda.powi(2) / (4.0 * PI))
}

/// Power captured by `area` in a field of `dbm` dBm/m² (µW).
pub fn captured_power_uw(area: f64, dbm: f64) -> f64 {
    area * dbm_to_uw_per_m2(dbm)
}

fn wavelength_labels(lambda: f64) -> (String, String) {
    let element = lambda * ELEMENT_FRACTION;
    if lambda > 0.01 {
        (format!("{:.1} cm", lambda * 100.0), format!("{:.1} mm", element * 1e3))
    } else {
        (format!("{:.1} mm", lambda * 1e3), format!("{:.2} mm", element * 1e3))
    }
}

/// How a harvest source counts toward the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestKind {
    Ambient,
    SolarIndoor,
    SolarOutdoor,
    Speculative,
}

#[derive(Debug, Clone, Copy)]
pub struct HarvestSource {
    pub name: &'static str,
    pub power_uw: f64,
    pub kind: HarvestKind,
}

impl HarvestSource {
    pub fn is_real(&self) -> bool {
        self.kind != HarvestKind::Speculative
    }

    pub fn harvestable(&self) -> bool {
        self.is_real() && self.power_uw > 0.0
    }

    pub fn status(&self) -> &'static str {
        if self.harvestable() {
            "PROVEN"
        } else if !self.is_real() {
            "THEORETICAL"
        } else {
            "—"
        }
    }
}

pub const HARVEST_SOURCES: [HarvestSource; 8] = [
    HarvestSource { name: "RF rectenna (urban)", power_uw: 10.0, kind: HarvestKind::Ambient },
    HarvestSource { name: "Thermoelectric (body)", power_uw: 80.0, kind: HarvestKind::Ambient },
    HarvestSource { name: "Piezoelectric (shoe)", power_uw: 50.0, kind: HarvestKind::Ambient },
    HarvestSource { name: "Solar (flex, outdoor)", power_uw: 50000.0, kind: HarvestKind::SolarOutdoor },
    HarvestSource { name: "Solar (flex, indoor)", power_uw: 100.0, kind: HarvestKind::SolarIndoor },
    HarvestSource { name: "CMB capture", power_uw: 1e-7, kind: HarvestKind::Speculative },
    HarvestSource { name: "Vacuum fluctuations", power_uw: 0.0, kind: HarvestKind::Speculative },
    HarvestSource { name: "Quantum correlation", power_uw: 0.0, kind: HarvestKind::Speculative },
];

/// Harvest totals under three lighting scenarios (µW).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarvestTotals {
    pub no_solar: f64,
    pub indoor: f64,
    pub outdoor: f64,
}

pub fn harvest_totals(sources: &[HarvestSource]) -> HarvestTotals {
    let sum = |keep: &dyn Fn(HarvestKind) -> bool| -> f64 {
        sources
            .iter()
            .filter(|s| keep(s.kind))
            .map(|s| s.power_uw)
            .sum()
    };
    HarvestTotals {
        no_solar: sum(&|k| k == HarvestKind::Ambient),
        indoor: sum(&|k| matches!(k, HarvestKind::Ambient | HarvestKind::SolarIndoor)),
        outdoor: sum(&|k| k != HarvestKind::Speculative),
    }
}

/// Build the rectenna report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Metamaterial Rectenna & Ambient Energy Analysis");

    let mut ambient = Table::new(&[
        ("Source", 30),
        ("Power density", 16),
        ("uW/m2", 12),
        ("Note", 0),
    ]);
    for (name, dbm, note) in AMBIENT_RF {
        ambient.row([
            name.to_string(),
            format!("{:>5} dBm/m2", dbm),
            format!("{:.4}", dbm_to_uw_per_m2(dbm)),
            note.to_string(),
        ]);
    }
    let wifi = dbm_to_uw_per_m2(-20.0);
    let cmb = dbm_to_uw_per_m2(-90.0);
    report
        .section("PART 1: AMBIENT RF POWER DENSITY")
        .table(ambient)
        .text("")
        .text(format!("  CMB power density: {:.1e} uW/m2", cmb))
        .text(format!("  That is {:.0e} times weaker than indoor WiFi.", wifi / cmb))
        .text("  Harvestable RF comes from human-made transmitters only.");

    let mut junctions = Table::new(&[
        ("Junction", 14),
        ("phi_B(eV)", 10),
        ("n", 6),
        ("V_turn-on", 12),
        ("Use case", 0),
    ]);
    for j in &JUNCTIONS {
        junctions.row([
            j.name.to_string(),
            format!("{:.2}", j.barrier),
            format!("{:.2}", j.ideality),
            format!("{:.2}V", j.turn_on()),
            j.note.to_string(),
        ]);
    }
    let best = JUNCTIONS
        .iter()
        .min_by(|a, b| a.turn_on().total_cmp(&b.turn_on()))
        .map(|j| j.name)
        .unwrap_or("none");
    report
        .section("PART 2: SCHOTTKY BARRIER RECTIFICATION")
        .text("I = I_s (exp(qV/nkT) − 1), Au shell on core materials")
        .text("")
        .table(junctions)
        .text("")
        .text("  Incoming ambient RF amplitude: ~10-100 mV")
        .text(format!("  Lowest turn-on, best passive candidate: {}", best))
        .text("  Tunnel or backward diodes are needed below 50 mV.");

    let mut bands = Table::new(&[
        ("Band", 22),
        ("freq", 12),
        ("lambda", 10),
        ("Element size", 14),
        ("Use", 0),
    ]);
    for (name, f, usage) in BANDS {
        let (lambda, element) = wavelength_labels(wavelength(f)?);
        bands.row([
            name.to_string(),
            format!("{:.1}GHz", f / 1e9),
            lambda,
            element,
            usage.to_string(),
        ]);
    }
    let aperture = effective_aperture(PATCH_GAIN_DBI, 2.4e9)?;
    let patch_uw = captured_power_uw(BODY_PATCH_AREA, URBAN_TOTAL_DBM);
    report
        .section("PART 3: METAMATERIAL ARRAY GEOMETRY")
        .text("Resonant element size ~ λ/10")
        .text("")
        .table(bands)
        .text("")
        .text(format!(
            "  A_eff = G λ²/(4π), G = {} dBi at 2.4 GHz: {:.1} cm2",
            PATCH_GAIN_DBI,
            aperture * 1e4
        ))
        .text(format!(
            "  With -20 dBm/m2 WiFi: P_captured = {:.4} uW",
            captured_power_uw(aperture, -20.0)
        ))
        .text(format!(
            "  {:.0} cm2 body patch in urban RF: {:.3} uW (all bands)",
            BODY_PATCH_AREA * 1e4,
            patch_uw
        ))
        .text(format!(
            "  After rectification ({:.0}% eff): {:.3} uW",
            RECTIFIER_EFFICIENCY * 100.0,
            patch_uw * RECTIFIER_EFFICIENCY
        ));

    let system = Bistable::default();
    let points = resonance_sweep(&system, &NOISE_LEVELS)?;
    let mut sr = Table::new(&[
        ("Noise D", 10),
        ("Kramers rate", 16),
        ("SNR enhancement", 18),
        ("Status", 0),
    ]);
    for p in &points {
        sr.row([
            format!("{:.2}", p.noise),
            format!("{:.6}", p.rate),
            format!("{:.6}", p.snr),
            p.regime.to_string(),
        ]);
    }
    let optimum = points
        .iter()
        .find(|p| p.regime == resonance::NoiseRegime::Optimal)
        .map_or(0.0, |p| p.noise);
    report
        .section("PART 4: STOCHASTIC RESONANCE (Noise-Enhanced Signal)")
        .text("Bistable potential U(x) = -ax²/2 + bx⁴/4")
        .text(format!("Barrier height: {:.2} (normalized units)", system.barrier()))
        .text("")
        .table(sr)
        .text("")
        .text(format!("Optimal noise level: D ~ {:.2}", optimum))
        .text("Too little noise leaves the signal below threshold; too much buries it.");

    let mut chains = Table::new(&[
        ("Chain length", 14),
        ("N contacts", 12),
        ("L (nH)", 10),
        ("f_res (GHz)", 14),
        ("Band", 0),
    ]);
    for n in CHAIN_CONTACTS {
        let chain = GrainChain::new(n)?;
        chains.row([
            format!("{:.2} mm", chain.length * 1e3),
            n.to_string(),
            format!("{:.3}", chain.inductance * 1e9),
            format!("{:.2}", chain.resonance / 1e9),
            chain.band().to_string(),
        ]);
    }
    report
        .section("PART 5: GRAIN-TO-GRAIN MICRO-INDUCTANCE")
        .text(format!("Grain diameter: {:.0} um", GRAIN_DIAMETER * 1e6))
        .text(format!(
            "Grain cross-section: {:.0} um2",
            PI * (GRAIN_DIAMETER / 2.0).powi(2) * 1e12
        ))
        .text(format!("Magnetite mu_r: {}", MU_R_MAGNETITE))
        .text("")
        .table(chains);

    let mut budget = Table::new(&[
        ("Source", 28),
        ("Power (uW)", 14),
        ("Harvestable?", 14),
        ("Engineering status", 0),
    ]);
    for s in &HARVEST_SOURCES {
        budget.row([
            s.name.to_string(),
            format!("{:.4}", s.power_uw),
            if s.harvestable() { "YES" } else { "NO" }.to_string(),
            s.status().to_string(),
        ]);
    }
    let totals = harvest_totals(&HARVEST_SOURCES);
    report
        .section("PART 6: REALISTIC HARVEST BUDGET")
        .table(budget)
        .text("")
        .text(format!("Total harvestable (no solar): {:.0} uW", totals.no_solar))
        .text(format!("Total harvestable (indoor):   {:.0} uW", totals.indoor))
        .text(format!("Total harvestable (outdoor):  {:.0} uW", totals.outdoor));

    report
        .section("CONCLUSION")
        .text("Metamaterial rectenna: real, microwatts from urban RF")
        .text("Schottky Au/Fe3O4: real, needs a low-barrier design")
        .text("Stochastic resonance: real, noise-enhanced detection")
        .text("CMB/vacuum harvest: not real, nothing to rectify");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dbm_conversion() {
        assert_relative_eq!(dbm_to_uw_per_m2(-20.0), 10.0, max_relative = 1e-12);
        assert_relative_eq!(dbm_to_uw_per_m2(-25.0), 3.1623, max_relative = 1e-4);
    }

    #[test]
    fn test_turn_on_voltage() {
        assert_relative_eq!(JUNCTIONS[0].turn_on(), 0.48, max_relative = 1e-12);
        let low = Junction { barrier: 0.1, ..JUNCTIONS[3] };
        assert_eq!(low.turn_on(), 0.1);
    }

    #[test]
    fn test_patch_aperture() {
        // 10^0.6 · 0.125² / 4π ≈ 49.5 cm²
        let a = effective_aperture(PATCH_GAIN_DBI, 2.4e9).unwrap();
        assert_relative_eq!(a * 1e4, 49.5, max_relative = 1e-3);
        assert_relative_eq!(captured_power_uw(a, -20.0), a * 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_band_labels() {
        let (lambda, element) = wavelength_labels(wavelength(2.4e9).unwrap());
        assert_eq!(lambda, "12.5 cm");
        assert_eq!(element, "12.5 mm");
        let (lambda, element) = wavelength_labels(wavelength(30e9).unwrap());
        assert_eq!(lambda, "10.0 mm");
        assert_eq!(element, "1.00 mm");
    }

    #[test]
    fn test_harvest_totals() {
        let totals = harvest_totals(&HARVEST_SOURCES);
        assert_relative_eq!(totals.no_solar, 140.0);
        assert_relative_eq!(totals.indoor, 240.0);
        assert_relative_eq!(totals.outdoor, 50240.0);
        assert_eq!(HARVEST_SOURCES[5].status(), "THEORETICAL");
        assert!(!HARVEST_SOURCES[6].harvestable());
    }
}
