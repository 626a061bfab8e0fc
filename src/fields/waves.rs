//! Wave propagation and field energy density.

use crate::constants::{c_from_vacuum, EPS0, MU0};
use crate::units::format_length;

/// Spectrum bands relevant to wearables (name, frequency in Hz, use).
pub const SPECTRUM: [(&str, f64, &str); 8] = [
    ("DC (battery)", 0.0, "Power storage"),
    ("ELF (nerve)", 1e3, "Neural signals"),
    ("RF (BLE)", 2.4e9, "Bluetooth Low Energy"),
    ("NFC", 13.56e6, "Payment/ID"),
    ("Sub-GHz (LoRa)", 868e6, "Long-range IoT"),
    ("WiFi", 5.8e9, "Data transfer"),
    ("IR (body heat)", 3e13, "Thermal emission"),
    ("Visible (display)", 5e14, "LED/OLED display"),
];

/// Field scenarios (name, E in V/m, B in T).
pub const FIELD_SCENARIOS: [(&str, f64, f64); 5] = [
    ("Nerve membrane (10⁷ V/m)", 1e7, 0.0),
    ("Cell phone antenna", 1.0, 3.3e-9),
    ("MRI scanner (3T)", 0.0, 3.0),
    ("Earth surface", 100.0, 50e-6),
    ("Lightning (nearby)", 3e6, 1e-4),
];

/// Free-space wavelength, `None` for DC.
pub fn wavelength(frequency: f64) -> Option<f64> {
    if frequency > 0.0 {
        Some(c_from_vacuum() / frequency)
    } else {
        None
    }
}

/// Wavelength formatted with a scaled unit, "∞" for DC.
pub fn wavelength_label(frequency: f64) -> String {
    wavelength(frequency).map_or_else(|| "∞".to_string(), format_length)
}

/// Electric energy density `½ ε₀ E²` (J/m³).
pub fn electric_energy_density(e: f64) -> f64 {
    0.5 * EPS0 * e.powi(2)
}

/// Magnetic energy density `B² / (2 µ₀)` (J/m³).
pub fn magnetic_energy_density(b: f64) -> f64 {
    b.powi(2) / (2.0 * MU0)
}

/// Which field stores more energy.
pub fn dominant_field(u_e: f64, u_b: f64) -> &'static str {
    if u_e > u_b {
        "Electric"
    } else if u_b > u_e {
        "Magnetic"
    } else {
        "Equal"
    }
}
