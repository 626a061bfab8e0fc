//! Wearable thermal safety.
//!
//! Duty-cycled heat budget for the electronics, a series thermal
//! resistance stack from die to skin, and the resulting skin temperature
//! rise against contact limits.

use std::fmt;

use serde::Serialize;

use crate::constants::T_SKIN_C;
use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

/// Contact temperature limits (condition, °C, note).
pub const SAFETY_LIMITS: [(&str, f64, &str); 6] = [
    ("Skin contact (continuous)", 43.0, "No burn below 43°C indefinitely"),
    ("Skin contact (1 min)", 48.0, "Reversible discomfort"),
    ("Skin contact (10 sec)", 51.0, "Pain threshold"),
    ("Burn threshold", 55.0, "Tissue damage begins"),
    ("Body core", 37.0, "Normal internal temp"),
    ("Skin surface", 33.0, "Normal skin temp"),
];

/// Continuous skin contact limit (°C).
pub const CONTINUOUS_LIMIT_C: f64 = 43.0;

/// A heat-producing component with its duty cycle.
#[derive(Debug, Clone, Copy)]
pub struct Component {
    pub name: &'static str,
    /// Peak power (mW)
    pub peak_mw: f64,
    /// Fraction of time active, 0..=1
    pub duty: f64,
    pub note: &'static str,
}

impl Component {
    /// Time-averaged power (mW).
    pub fn average_mw(&self) -> f64 {
        self.peak_mw * self.duty
    }
}

pub const COMPONENTS: [Component; 7] = [
    Component { name: "BLE radio (tx burst)", peak_mw: 15.0, duty: 0.01, note: "1% duty, 1 pkt/s" },
    Component { name: "MCU active", peak_mw: 5.0, duty: 0.05, note: "5% duty cycle" },
    Component { name: "MCU sleep", peak_mw: 0.005, duty: 0.95, note: "95% of time" },
    Component { name: "Sensor ADC", peak_mw: 0.5, duty: 0.10, note: "10% sampling" },
    Component { name: "LED indicator", peak_mw: 20.0, duty: 0.001, note: "Brief flash" },
    Component { name: "NFC (passive)", peak_mw: 0.0, duty: 0.0, note: "Powered by reader" },
    Component { name: "Flex display (e-ink)", peak_mw: 5.0, duty: 0.002, note: "Update only" },
];

/// One slab in the die-to-skin heat path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub name: &'static str,
    /// Thermal conductivity (W/(m·K))
    pub k: f64,
    /// Thickness (m)
    pub thickness: f64,
    /// Cross-section (m²)
    pub area: f64,
}

impl Layer {
    /// Conduction resistance `L / (k A)` (K/W).
    pub fn resistance(&self) -> Result<f64> {
        let k = ensure_positive("thermal conductivity", self.k)?;
        let area = ensure_positive("layer area", self.area)?;
        Ok(self.thickness / (k * area))
    }
}

pub const STACK: [Layer; 5] = [
    Layer { name: "Silicon die", k: 150.0, thickness: 0.5e-3, area: 4e-6 },
    Layer { name: "PCB (FR4)", k: 0.3, thickness: 1e-3, area: 100e-6 },
    Layer { name: "Encapsulation", k: 0.2, thickness: 0.5e-3, area: 200e-6 },
    Layer { name: "Air gap", k: 0.026, thickness: 1e-3, area: 200e-6 },
    Layer { name: "Skin (epidermis)", k: 0.21, thickness: 0.1e-3, area: 200e-6 },
];

/// Graphene composite conductivity replacing FR4 (W/(m·K)).
pub const GRAPHENE_K: f64 = 3000.0;

/// Power levels for the skin-rise sweep (mW).
pub const POWER_SWEEP_MW: [f64; 9] = [0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0];

/// Skin temperature classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThermalStatus {
    Safe,
    Caution,
    Warning,
    Danger,
}

impl ThermalStatus {
    pub fn classify(skin_c: f64) -> Self {
        if skin_c < 40.0 {
            ThermalStatus::Safe
        } else if skin_c < CONTINUOUS_LIMIT_C {
            ThermalStatus::Caution
        } else if skin_c < 48.0 {
            ThermalStatus::Warning
        } else {
            ThermalStatus::Danger
        }
    }
}

impl fmt::Display for ThermalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThermalStatus::Safe => "SAFE",
            ThermalStatus::Caution => "CAUTION",
            ThermalStatus::Warning => "WARNING",
            ThermalStatus::Danger => "DANGER",
        };
        f.write_str(label)
    }
}

/// Skin temperature at one dissipated power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinRise {
    pub power_mw: f64,
    pub delta_t: f64,
    pub skin_c: f64,
    pub status: ThermalStatus,
}

/// Total average power of a component set (mW).
pub fn average_power_mw(components: &[Component]) -> f64 {
    components.iter().map(Component::average_mw).sum()
}

/// Series resistance of a layer stack (K/W).
pub fn stack_resistance(stack: &[Layer]) -> Result<f64> {
    stack.iter().map(Layer::resistance).sum()
}

/// The default stack with the FR4 board swapped for a graphene spreader.
pub fn graphene_stack() -> Vec<Layer> {
    STACK
        .iter()
        .map(|layer| {
            if layer.name == "PCB (FR4)" {
                Layer { name: "PCB (graphene)", k: GRAPHENE_K, ..*layer }
            } else {
                *layer
            }
        })
        .collect()
}

/// Skin temperature for `power_mw` through `r_total` K/W.
pub fn skin_rise(power_mw: f64, r_total: f64) -> SkinRise {
    let delta_t = power_mw * 1e-3 * r_total;
    let skin_c = T_SKIN_C + delta_t;
    SkinRise {
        power_mw,
        delta_t,
        skin_c,
        status: ThermalStatus::classify(skin_c),
    }
}

/// Build the thermal safety report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Thermal Safety Model for Wearable Electronics");

    let mut limits = Table::new(&[("Condition", 30), ("T_max (°C)", 12), ("Note", 0)]);
    for (name, t_max, note) in SAFETY_LIMITS {
        limits.row([name.to_string(), format!("{}", t_max), note.to_string()]);
    }
    report.section("SAFETY LIMITS (IEC 60601-1 / ISO 13732)").table(limits);

    let mut budget = Table::new(&[
        ("Component", 24),
        ("Peak (mW)", 12),
        ("Duty", 8),
        ("Avg (mW)", 12),
        ("Note", 0),
    ]);
    for c in &COMPONENTS {
        budget.row([
            c.name.to_string(),
            format!("{:.3}", c.peak_mw),
            format!("{:.3}", c.duty),
            format!("{:.4}", c.average_mw()),
            c.note.to_string(),
        ]);
    }
    let total_avg = average_power_mw(&COMPONENTS);
    report
        .section("HEAT GENERATION BY COMPONENT")
        .text("P = V × I  |  Q = P × t")
        .text("")
        .table(budget)
        .text("")
        .text(format!("{:<24} {:<12} {:<8} {:.4} mW", "TOTAL AVERAGE", "—", "—", total_avg));

    let mut layers = Table::new(&[
        ("Layer", 20),
        ("k (W/m·K)", 12),
        ("L (mm)", 10),
        ("A (mm²)", 10),
        ("R_th (K/W)", 0),
    ]);
    for layer in &STACK {
        layers.row([
            layer.name.to_string(),
            format!("{:.3}", layer.k),
            format!("{:.2}", layer.thickness * 1e3),
            format!("{:.1}", layer.area * 1e6),
            format!("{:.1}", layer.resistance()?),
        ]);
    }
    let r_total = stack_resistance(&STACK)?;
    report
        .section("THERMAL MODEL")
        .text("ΔT = P × R_thermal")
        .text("R_thermal = thickness / (k × area)")
        .text("")
        .table(layers)
        .text("")
        .text(format!("TOTAL R_thermal: {:.1} K/W", r_total));

    let mut sweep = Table::new(&[
        ("Power (mW)", 14),
        ("ΔT (°C)", 12),
        ("T_skin (°C)", 14),
        ("Status", 0),
    ]);
    for p in POWER_SWEEP_MW {
        let rise = skin_rise(p, r_total);
        sweep.row([
            format!("{:.3}", rise.power_mw),
            format!("{:.4}", rise.delta_t),
            format!("{:.4}", rise.skin_c),
            rise.status.to_string(),
        ]);
    }
    report
        .section("TEMPERATURE RISE AT SKIN")
        .text(format!(
            "Ambient skin temp: {}°C  |  Safety limit: {}°C  |  Budget: {}°C",
            T_SKIN_C,
            CONTINUOUS_LIMIT_C,
            CONTINUOUS_LIMIT_C - T_SKIN_C
        ))
        .text("")
        .table(sweep);

    let r_graphene = stack_resistance(&graphene_stack())?;
    report
        .section("GRAPHENE HEAT SPREADER IMPROVEMENT")
        .text(format!("Graphene k = {} W/m·K (vs FR4 k = 0.3)", GRAPHENE_K))
        .text("")
        .text(format!("Standard R_total:  {:.1} K/W", r_total))
        .text(format!("With graphene:     {:.1} K/W", r_graphene))
        .text(format!("Improvement:       {:.1}%", (1.0 - r_graphene / r_total) * 100.0))
        .text(format!(
            "At 1 mW: Standard ΔT = {:.3}°C → Graphene ΔT = {:.3}°C",
            1e-3 * r_total,
            1e-3 * r_graphene
        ));

    let nominal = skin_rise(total_avg, r_total);
    // Highest swept power that stays below the continuous limit
    let max_safe = POWER_SWEEP_MW
        .iter()
        .copied()
        .filter(|&p| skin_rise(p, r_total).skin_c < CONTINUOUS_LIMIT_C)
        .fold(0.0, f64::max);
    report
        .section("CONCLUSION")
        .text(format!("Total wearable avg power: {:.4} mW", total_avg))
        .text(format!("Skin temperature rise:    {:.6}°C", nominal.delta_t))
        .text(format!("Result: {} at the nominal duty-cycled load", nominal.status))
        .text(format!(
            "Highest swept power below {}°C: {} mW",
            CONTINUOUS_LIMIT_C, max_safe
        ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_power() {
        // 0.15 + 0.25 + 0.00475 + 0.05 + 0.02 + 0 + 0.01
        assert_relative_eq!(average_power_mw(&COMPONENTS), 0.48475, max_relative = 1e-9);
    }

    #[test]
    fn test_stack_resistance() {
        let r = stack_resistance(&STACK).unwrap();
        assert_relative_eq!(r, 241.356, max_relative = 1e-4);

        let g = stack_resistance(&graphene_stack()).unwrap();
        assert_relative_eq!(r - g, 33.333 - 0.00333, max_relative = 1e-3);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(ThermalStatus::classify(39.9), ThermalStatus::Safe);
        assert_eq!(ThermalStatus::classify(40.0), ThermalStatus::Caution);
        assert_eq!(ThermalStatus::classify(43.0), ThermalStatus::Warning);
        assert_eq!(ThermalStatus::classify(48.0), ThermalStatus::Danger);
    }

    #[test]
    fn test_skin_rise_sweep() {
        let r = stack_resistance(&STACK).unwrap();
        assert_eq!(skin_rise(10.0, r).status, ThermalStatus::Safe);
        assert_eq!(skin_rise(50.0, r).status, ThermalStatus::Warning);
        assert_eq!(skin_rise(100.0, r).status, ThermalStatus::Danger);
    }

    #[test]
    fn test_zero_area_layer_rejected() {
        let bad = Layer { area: 0.0, ..STACK[0] };
        assert!(bad.resistance().is_err());
    }
}
