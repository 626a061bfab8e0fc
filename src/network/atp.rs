//! ATP trigger threshold for mechanotransduction.

use serde::Serialize;

use crate::constants::N_AVOGADRO;
use crate::error::{ensure_positive, Result};

/// Stimulation powers (µW).
pub const STIM_POWERS_UW: [f64; 6] = [1.0, 5.0, 10.0, 50.0, 100.0, 500.0];

/// Target area (cm²).
pub const TARGET_AREA_CM2: f64 = 1.0;

/// Mechanotransduction activation threshold (mJ/cm²).
pub const THRESHOLD_MJ_PER_CM2: f64 = 0.5;

/// Energy captured as ATP per mole of glucose (J/mol).
pub const GLUCOSE_ATP_CAPTURE: f64 = 1100e3;

pub const MAX_AMPLIFICATION: f64 = 1e6;

pub const MAX_ATP_EVENTS: u64 = 10_000;

/// ATP molecules per glucose under oxidative phosphorylation.
pub const ATP_PER_GLUCOSE: f64 = 36.0;

/// Outcome of stimulating the target at one power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtpTrigger {
    pub power_uw: f64,
    /// Energy needed to cross the threshold (J)
    pub threshold_energy: f64,
    /// Time to deliver it (s)
    pub time_to_threshold: f64,
    pub atp_triggered: u64,
    pub amplification: f64,
}

/// Energy to reach the activation threshold over `area_cm2` (J).
pub fn threshold_energy(area_cm2: f64) -> f64 {
    THRESHOLD_MJ_PER_CM2 * 1e-3 * area_cm2
}

pub fn trigger(power_uw: f64, area_cm2: f64) -> Result<AtpTrigger> {
    let power_uw = ensure_positive("stimulation power", power_uw)?;
    let energy = threshold_energy(ensure_positive("target area", area_cm2)?);
    let amplification = (GLUCOSE_ATP_CAPTURE / (energy * N_AVOGADRO)).min(MAX_AMPLIFICATION);
    let atp_triggered = ((ATP_PER_GLUCOSE * power_uw / 10.0).floor() as u64).min(MAX_ATP_EVENTS);

    Ok(AtpTrigger {
        power_uw,
        threshold_energy: energy,
        time_to_threshold: energy / (power_uw * 1e-6),
        atp_triggered,
        amplification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_threshold_time() {
        // 0.5 mJ at 100 µW takes 5 s
        let t = trigger(100.0, TARGET_AREA_CM2).unwrap();
        assert_relative_eq!(t.threshold_energy, 5e-4, max_relative = 1e-12);
        assert_relative_eq!(t.time_to_threshold, 5.0, max_relative = 1e-12);
        assert_eq!(t.atp_triggered, 360);
    }

    #[test]
    fn test_atp_count_floor_and_cap() {
        assert_eq!(trigger(1.0, 1.0).unwrap().atp_triggered, 3);
        assert_eq!(trigger(1e4, 1.0).unwrap().atp_triggered, MAX_ATP_EVENTS);
        assert!(trigger(0.0, 1.0).is_err());
    }
}
