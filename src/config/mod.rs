//! Run configuration.
//!
//! Every calculator runs from fixed parameter tables; only the two
//! iterative solvers expose knobs. A [`RunConfig`] bundles those knobs,
//! can be built fluently, and round-trips through JSON so a sweep can be
//! pinned in a file and replayed.

mod validate;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::solver::{
    DEFAULT_KURAMOTO_DT, DEFAULT_KURAMOTO_DURATION, DEFAULT_KURAMOTO_SEED,
    DEFAULT_LOCK_THRESHOLD, DEFAULT_RELAXATION_ITERATIONS, DEFAULT_SINK_SCALE,
    DEFAULT_TAIL_WINDOW,
};

pub use validate::validate_config;

/// Configuration for the IR-drop grid relaxation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationConfig {
    /// Fixed number of Jacobi sweeps (no tolerance check).
    pub iterations: usize,
    /// Voltage held at the source cell (volts).
    pub supply_voltage: f64,
    /// Per-iteration sink correction factor, applied as `I_mA * R_sheet * scale`.
    pub sink_scale: f64,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_RELAXATION_ITERATIONS,
            supply_voltage: 3.3,
            sink_scale: DEFAULT_SINK_SCALE,
        }
    }
}

impl RelaxationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of Jacobi sweeps.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the source cell voltage (in volts).
    pub fn with_supply_voltage(mut self, supply_voltage: f64) -> Self {
        self.supply_voltage = supply_voltage;
        self
    }

    /// Set the per-iteration sink correction factor.
    pub fn with_sink_scale(mut self, sink_scale: f64) -> Self {
        self.sink_scale = sink_scale;
        self
    }
}

/// Configuration for the Kuramoto oscillator network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KuramotoConfig {
    /// Number of oscillators (network users).
    pub oscillators: usize,
    /// Centre of the natural frequency distribution (Hz).
    pub center_hz: f64,
    /// Standard deviation of the natural frequency distribution (Hz).
    pub sigma_hz: f64,
    /// Euler time step (s).
    pub dt: f64,
    /// Simulated duration (s).
    pub duration: f64,
    /// RNG seed for natural frequencies and initial phases.
    pub seed: u64,
    /// Order parameter above which the network counts as locked.
    pub lock_threshold: f64,
    /// Number of trailing order-parameter samples averaged for the final value.
    pub tail_window: usize,
}

impl Default for KuramotoConfig {
    fn default() -> Self {
        Self {
            oscillators: 20,
            center_hz: crate::constants::F_SCHUMANN,
            sigma_hz: 0.5,
            dt: DEFAULT_KURAMOTO_DT,
            duration: DEFAULT_KURAMOTO_DURATION,
            seed: DEFAULT_KURAMOTO_SEED,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
            tail_window: DEFAULT_TAIL_WINDOW,
        }
    }
}

impl KuramotoConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of oscillators.
    pub fn with_oscillators(mut self, oscillators: usize) -> Self {
        self.oscillators = oscillators;
        self
    }

    /// Set the natural frequency distribution (centre and spread, in Hz).
    pub fn with_frequencies(mut self, center_hz: f64, sigma_hz: f64) -> Self {
        self.center_hz = center_hz;
        self.sigma_hz = sigma_hz;
        self
    }

    /// Set the integration time step (in seconds).
    ///
    /// The coupling term is explicit, so steps much larger than
    /// `1 / (K + max ω)` smear the phase dynamics.
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the simulated duration (in seconds).
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tail window used for the final order parameter.
    pub fn with_tail_window(mut self, tail_window: usize) -> Self {
        self.tail_window = tail_window;
        self
    }

    /// Number of Euler steps in one run.
    pub fn steps(&self) -> usize {
        (self.duration / self.dt) as usize
    }
}

/// All solver knobs for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub relaxation: RelaxationConfig,
    pub kuramoto: KuramotoConfig,
}

impl RunConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the relaxation settings.
    pub fn with_relaxation(mut self, relaxation: RelaxationConfig) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Replace the Kuramoto settings.
    pub fn with_kuramoto(mut self, kuramoto: KuramotoConfig) -> Self {
        self.kuramoto = kuramoto;
        self
    }

    /// Parse a configuration from JSON text. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(text)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SimError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&text)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let config = RunConfig::new()
            .with_relaxation(RelaxationConfig::new().with_iterations(500).with_supply_voltage(5.0))
            .with_kuramoto(KuramotoConfig::new().with_seed(7).with_dt(0.002));

        assert_eq!(config.relaxation.iterations, 500);
        assert_eq!(config.relaxation.supply_voltage, 5.0);
        assert_eq!(config.kuramoto.seed, 7);
        assert_eq!(config.kuramoto.dt, 0.002);
    }

    #[test]
    fn test_default_step_count() {
        assert_eq!(KuramotoConfig::default().steps(), 5000);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = RunConfig::from_json(r#"{ "kuramoto": { "seed": 99 } }"#).unwrap();
        assert_eq!(config.kuramoto.seed, 99);
        assert_eq!(config.kuramoto.oscillators, 20);
        assert_eq!(config.relaxation, RelaxationConfig::default());
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let err = RunConfig::from_json(r#"{ "kuramoto": { "dt": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RunConfig::new().with_kuramoto(KuramotoConfig::new().with_oscillators(8));
        let text = config.to_json().unwrap();
        assert_eq!(RunConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = RunConfig::from_file(Path::new("/nonexistent/run.json")).unwrap_err();
        assert!(matches!(err, SimError::FileReadError { .. }));
    }
}
