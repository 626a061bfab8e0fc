//! Harvest versus load power budget.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Harvest,
    Storage,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Harvest => f.write_str("harvest"),
            SourceKind::Storage => f.write_str("storage"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PowerSource {
    pub name: &'static str,
    pub power_uw: f64,
    pub voltage: f64,
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerSink {
    pub name: &'static str,
    /// Duty-averaged draw (µW)
    pub power_uw: f64,
    /// Minimum operating voltage (V)
    pub v_min: f64,
}

pub const SOURCES: [PowerSource; 6] = [
    PowerSource { name: "Thermoelectric (chest)", power_uw: 80.0, voltage: 0.5, kind: SourceKind::Harvest },
    PowerSource { name: "Thermoelectric (back)", power_uw: 60.0, voltage: 0.4, kind: SourceKind::Harvest },
    PowerSource { name: "Piezo (shoe L)", power_uw: 25.0, voltage: 3.0, kind: SourceKind::Harvest },
    PowerSource { name: "Piezo (shoe R)", power_uw: 25.0, voltage: 3.0, kind: SourceKind::Harvest },
    PowerSource { name: "RF rectenna", power_uw: 5.0, voltage: 0.3, kind: SourceKind::Harvest },
    PowerSource { name: "Supercap reserve", power_uw: 500.0, voltage: 3.3, kind: SourceKind::Storage },
];

pub const SINKS: [PowerSink; 7] = [
    PowerSink { name: "MCU (sleep 95%)", power_uw: 4.75, v_min: 1.8 },
    PowerSink { name: "MCU (active 5%)", power_uw: 250.0, v_min: 1.8 },
    PowerSink { name: "BLE radio (1% duty)", power_uw: 150.0, v_min: 1.8 },
    PowerSink { name: "Sensors x12 (10% duty)", power_uw: 60.0, v_min: 1.2 },
    PowerSink { name: "MRAM writes", power_uw: 10.0, v_min: 1.5 },
    PowerSink { name: "Mesh routing", power_uw: 20.0, v_min: 1.8 },
    PowerSink { name: "LED (0.1% duty)", power_uw: 20.0, v_min: 2.0 },
];

/// Totals of a source/sink budget (µW).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Budget {
    pub harvest: f64,
    pub demand: f64,
}

impl Budget {
    /// Harvest counts only harvesting sources; storage is a buffer.
    pub fn new(sources: &[PowerSource], sinks: &[PowerSink]) -> Self {
        Self {
            harvest: sources
                .iter()
                .filter(|s| s.kind == SourceKind::Harvest)
                .map(|s| s.power_uw)
                .sum(),
            demand: sinks.iter().map(|s| s.power_uw).sum(),
        }
    }

    pub fn margin(&self) -> f64 {
        self.harvest - self.demand
    }

    /// Margin as a percentage of harvest, `None` with nothing harvested.
    pub fn surplus_percent(&self) -> Option<f64> {
        if self.harvest > 0.0 {
            Some(self.margin() / self.harvest * 100.0)
        } else {
            None
        }
    }

    pub fn is_sustainable(&self) -> bool {
        self.margin() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wearable_budget_is_in_deficit() {
        let budget = Budget::new(&SOURCES, &SINKS);
        assert_relative_eq!(budget.harvest, 195.0);
        assert_relative_eq!(budget.demand, 514.75);
        assert_relative_eq!(budget.margin(), -319.75);
        assert!(!budget.is_sustainable());
        assert_relative_eq!(budget.surplus_percent().unwrap(), -163.974, max_relative = 1e-5);
    }

    #[test]
    fn test_no_harvest() {
        let budget = Budget::new(&SOURCES[5..], &SINKS);
        assert_eq!(budget.harvest, 0.0);
        assert_eq!(budget.surplus_percent(), None);
    }
}
