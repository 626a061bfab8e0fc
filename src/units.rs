//! SI-suffixed value parsing and engineering-unit formatting.
//!
//! Command-line parameters accept the same shorthand a circuit sheet
//! would use: `10k`, `4.7u`, `1m`, `2.2`, `1e-9`.

use crate::error::{Result, SimError};

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            // micro sign (U+00B5) and Greek mu (U+03BC)
            'u' | 'µ' | 'μ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

/// Like [`parse_value`], but reports the offending text on failure.
pub fn parse_value_strict(text: &str) -> Result<f64> {
    parse_value(text).ok_or_else(|| SimError::InvalidValue {
        text: text.to_string(),
    })
}

/// Format a length in metres with the largest fitting unit (m, mm, µm, nm).
pub fn format_length(metres: f64) -> String {
    if metres > 1.0 {
        format!("{:.1} m", metres)
    } else if metres > 1e-3 {
        format!("{:.1} mm", metres * 1e3)
    } else if metres > 1e-6 {
        format!("{:.1} μm", metres * 1e6)
    } else {
        format!("{:.0} nm", metres * 1e9)
    }
}

/// Format a power in watts as W, mW, μW or nW.
pub fn format_power(watts: f64) -> String {
    if watts >= 1.0 {
        format!("{:.2} W", watts)
    } else if watts >= 1e-3 {
        format!("{:.2} mW", watts * 1e3)
    } else if watts >= 1e-6 {
        format!("{:.2} μW", watts * 1e6)
    } else {
        format!("{:.2} nW", watts * 1e9)
    }
}

/// Format a duration in seconds as ms, s or min.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.1} ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1} s", seconds)
    } else {
        format!("{:.1} min", seconds / 60.0)
    }
}

/// Format a frequency in hertz as Hz, kHz or MHz.
pub fn format_frequency(hz: f64) -> String {
    if hz < 1e3 {
        format!("{:.2} Hz", hz)
    } else if hz < 1e6 {
        format!("{:.0} kHz", hz / 1e3)
    } else {
        format!("{:.0} MHz", hz / 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("100n"), Some(100e-9)));
        assert!(approx_eq(parse_value("4.7u"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("4.7\u{00b5}"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("4.7\u{03bc}"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("1m"), Some(1e-3)));
        assert!(approx_eq(parse_value("3.3"), Some(3.3)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value(""), None));
        assert!(approx_eq(parse_value("volts"), None));
    }

    #[test]
    fn test_parse_value_strict_reports_text() {
        let err = parse_value_strict("fast").unwrap_err();
        assert!(err.to_string().contains("'fast'"));
    }

    #[test]
    fn test_format_length_scales() {
        assert_eq!(format_length(12.5), "12.5 m");
        assert_eq!(format_length(0.125), "125.0 mm");
        assert_eq!(format_length(10e-6), "10.0 μm");
        assert_eq!(format_length(600e-9), "600 nm");
    }

    #[test]
    fn test_format_power_scales() {
        assert_eq!(format_power(2.0), "2.00 W");
        assert_eq!(format_power(0.25), "250.00 mW");
        assert_eq!(format_power(1e-3), "1.00 mW");
        assert_eq!(format_power(5e-6), "5.00 μW");
        assert_eq!(format_power(6.2832e-2_f64.powi(2) / 1000.0), "3.95 μW");
        assert_eq!(format_power(5e-12), "0.01 nW");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.05), "50.0 ms");
        assert_eq!(format_duration(5.0), "5.0 s");
        assert_eq!(format_duration(120.0), "2.0 min");
    }
}
