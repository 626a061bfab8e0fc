//! Faraday induction in body-worn pickup coils.

use std::f64::consts::TAU;

/// Load resistance for delivered-power estimates (Ω).
pub const LOAD_OHMS: f64 = 1000.0;

/// Pickup coil areas (name, m²).
pub const COIL_AREAS: [(&str, f64); 3] = [
    ("Wearable coil (1cm²)", 1e-4),
    ("Watch coil (4cm²)", 4e-4),
    ("Chest patch (100cm²)", 100e-4),
];

/// Field slew rate of a sinusoid `B(t) = B₀ sin(2πft)` at its peak (T/s).
pub fn sinusoid_slew(frequency: f64, amplitude: f64) -> f64 {
    TAU * frequency * amplitude
}

/// Changing-field sources (name, dB/dt in T/s).
pub fn field_sources() -> [(&'static str, f64); 3] {
    [
        ("Slow (1 T/s)", 1.0),
        ("RF (1kHz, 1mT)", sinusoid_slew(1e3, 1e-3)),
        ("NFC (13.56MHz, 10μT)", sinusoid_slew(13.56e6, 10e-6)),
    ]
}

/// Induced EMF magnitude `A · dB/dt` for a single-turn coil (V).
pub fn emf(area: f64, db_dt: f64) -> f64 {
    area * db_dt
}

/// Power into a resistive load `EMF² / R` (W).
pub fn load_power(emf: f64, load: f64) -> f64 {
    emf.powi(2) / load
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nfc_chest_patch() {
        let (_, db_dt) = field_sources()[2];
        let v = emf(100e-4, db_dt);
        // 0.01 * 2π * 13.56e6 * 1e-5
        assert_relative_eq!(v, 8.5199, max_relative = 1e-4);
        assert_relative_eq!(load_power(v, LOAD_OHMS), v * v / 1000.0);
    }
}
