//! Kuramoto phase synchronization with explicit Euler integration.

use std::f64::consts::{PI, TAU};
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::debug;

use crate::config::{validate_config, KuramotoConfig, RunConfig};
use crate::error::{Result, SimError};

use super::PARTIAL_COHERENCE;

/// Magnitude of the mean unit phasor of `phases`.
///
/// Returns 0 for an empty slice.
pub fn order_parameter(phases: &[f64]) -> f64 {
    if phases.is_empty() {
        return 0.0;
    }
    let (sin_sum, cos_sum) = phases
        .iter()
        .fold((0.0, 0.0), |(s, c), &theta| (s + theta.sin(), c + theta.cos()));
    sin_sum.hypot(cos_sum) / phases.len() as f64
}

/// Final coherence class of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coherence {
    Locked,
    Partial,
    Incoherent,
}

impl Coherence {
    /// LOCKED above `lock_threshold`, PARTIAL above 0.5, else INCOHERENT.
    pub fn classify(order: f64, lock_threshold: f64) -> Self {
        if order > lock_threshold {
            Coherence::Locked
        } else if order > PARTIAL_COHERENCE {
            Coherence::Partial
        } else {
            Coherence::Incoherent
        }
    }
}

impl fmt::Display for Coherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Coherence::Locked => "LOCKED",
            Coherence::Partial => "PARTIAL",
            Coherence::Incoherent => "INCOHERENT",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of integrating the network at one coupling strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncRun {
    /// Coupling strength K (rad/s)
    pub coupling: f64,
    /// Mean order parameter over the trailing window
    pub final_order: f64,
    /// First step whose order parameter exceeded the lock threshold
    pub lock_step: Option<usize>,
    /// `lock_step * dt`
    pub lock_time: Option<f64>,
    pub status: Coherence,
}

/// A seeded all-to-all oscillator network.
///
/// Natural frequencies are drawn once at construction. Each call to
/// [`KuramotoNetwork::run`] draws fresh initial phases from the same RNG
/// stream, so a sweep replays identically for a given seed.
#[derive(Debug, Clone)]
pub struct KuramotoNetwork {
    config: KuramotoConfig,
    /// Natural angular frequencies (rad/s)
    omega: Vec<f64>,
    rng: StdRng,
}

impl KuramotoNetwork {
    /// Build a network, drawing natural frequencies
    /// `ω_i = 2π (f_center + N(0, σ))`.
    pub fn new(config: KuramotoConfig) -> Result<Self> {
        validate_config(&RunConfig::new().with_kuramoto(config.clone()))?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let spread = Normal::new(0.0, config.sigma_hz)
            .map_err(|e| SimError::invalid_parameter("sigma_hz", e.to_string()))?;
        let omega = (0..config.oscillators)
            .map(|_| TAU * (config.center_hz + spread.sample(&mut rng)))
            .collect();

        Ok(Self { config, omega, rng })
    }

    /// Natural angular frequencies (rad/s).
    pub fn natural_frequencies(&self) -> &[f64] {
        &self.omega
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &KuramotoConfig {
        &self.config
    }

    /// Critical coupling for a normal frequency spread, `K_c = 2(2πσ)/π`.
    pub fn critical_coupling(&self) -> f64 {
        2.0 * (TAU * self.config.sigma_hz) / PI
    }

    /// Integrate from random initial phases at coupling `k`.
    pub fn run(&mut self, k: f64) -> Result<SyncRun> {
        let n = self.omega.len();
        let mut theta: Vec<f64> = (0..n).map(|_| self.rng.gen_range(0.0..TAU)).collect();
        self.integrate(&mut theta, k)
    }

    /// Integrate from the given initial phases at coupling `k`.
    ///
    /// `theta` must hold one phase per oscillator; it is advanced in place.
    pub fn integrate(&self, theta: &mut [f64], k: f64) -> Result<SyncRun> {
        let n = self.omega.len();
        if theta.len() != n {
            return Err(SimError::invalid_parameter(
                "theta",
                format!("expected {n} phases, got {}", theta.len()),
            ));
        }

        let dt = self.config.dt;
        let steps = self.config.steps();
        let window = self.config.tail_window.min(steps.max(1));
        let mut tail: Vec<f64> = Vec::with_capacity(window);
        let mut lock_step = None;

        for step in 0..steps {
            // Mean field z = r e^{iψ}; Σ_j sin(θ_j − θ_i) = N r sin(ψ − θ_i)
            let (sin_sum, cos_sum) = theta
                .iter()
                .fold((0.0, 0.0), |(s, c), &t| (s + t.sin(), c + t.cos()));
            let (z_im, z_re) = (sin_sum / n as f64, cos_sum / n as f64);
            let r = z_im.hypot(z_re);

            if lock_step.is_none() && r > self.config.lock_threshold {
                lock_step = Some(step);
            }

            if steps - step <= window {
                tail.push(r);
            }

            for (t, &w) in theta.iter_mut().zip(&self.omega) {
                let coupling = k * (z_im * t.cos() - z_re * t.sin());
                *t += (w + coupling) * dt;
            }
        }

        let final_order = if tail.is_empty() {
            order_parameter(theta)
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };
        let status = Coherence::classify(final_order, self.config.lock_threshold);

        debug!(coupling = k, final_order, ?lock_step, %status, "kuramoto run finished");

        Ok(SyncRun {
            coupling: k,
            final_order,
            lock_step,
            lock_time: lock_step.map(|s| s as f64 * dt),
            status,
        })
    }

    /// Run one integration per coupling ratio `K / K_c`.
    pub fn sweep(&mut self, ratios: &[f64]) -> Result<Vec<SyncRun>> {
        let k_c = self.critical_coupling();
        ratios.iter().map(|ratio| self.run(ratio * k_c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config() -> KuramotoConfig {
        KuramotoConfig::new()
            .with_oscillators(12)
            .with_duration(2.0)
            .with_tail_window(50)
    }

    #[test]
    fn test_order_parameter_extremes() {
        assert_relative_eq!(order_parameter(&[0.3; 8]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(order_parameter(&[0.0, PI]), 0.0, epsilon = 1e-12);
        let quarter: Vec<f64> = (0..4).map(|i| i as f64 * PI / 2.0).collect();
        assert_relative_eq!(order_parameter(&quarter), 0.0, epsilon = 1e-12);
        assert_eq!(order_parameter(&[]), 0.0);
    }

    #[test]
    fn test_coherence_thresholds_are_strict() {
        assert_eq!(Coherence::classify(0.95, 0.9), Coherence::Locked);
        assert_eq!(Coherence::classify(0.9, 0.9), Coherence::Partial);
        assert_eq!(Coherence::classify(0.5, 0.9), Coherence::Incoherent);
        assert_eq!(Coherence::classify(0.51, 0.9), Coherence::Partial);
    }

    #[test]
    fn test_critical_coupling() {
        let net = KuramotoNetwork::new(KuramotoConfig::default()).unwrap();
        // 2 * (2π · 0.5) / π = 2
        assert_relative_eq!(net.critical_coupling(), 2.0, epsilon = 1e-12);
        assert_eq!(net.natural_frequencies().len(), 20);
    }

    #[test]
    fn test_identical_oscillators_stay_locked() {
        let config = small_config().with_frequencies(7.83, 0.0);
        let net = KuramotoNetwork::new(config).unwrap();
        let mut theta = vec![1.0; 12];
        let run = net.integrate(&mut theta, 0.0).unwrap();
        assert_eq!(run.lock_step, Some(0));
        assert_eq!(run.lock_time, Some(0.0));
        assert_eq!(run.status, Coherence::Locked);
    }

    #[test]
    fn test_strong_coupling_locks_and_zero_coupling_does_not() {
        let mut net = KuramotoNetwork::new(small_config()).unwrap();
        let k_c = net.critical_coupling();

        let strong = net.run(10.0 * k_c).unwrap();
        assert_eq!(strong.status, Coherence::Locked);
        assert!(strong.lock_time.unwrap() < 2.0);

        // Two antipodal pairs with no coupling never cohere.
        let config = KuramotoConfig::new()
            .with_oscillators(4)
            .with_frequencies(7.83, 0.0)
            .with_duration(1.0);
        let net = KuramotoNetwork::new(config).unwrap();
        let mut theta = vec![0.0, PI, PI / 2.0, 3.0 * PI / 2.0];
        let free = net.integrate(&mut theta, 0.0).unwrap();
        assert_eq!(free.lock_step, None);
        assert_eq!(free.status, Coherence::Incoherent);
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let ratios = [0.0, 1.0, 3.0];
        let a = KuramotoNetwork::new(small_config()).unwrap().sweep(&ratios).unwrap();
        let b = KuramotoNetwork::new(small_config()).unwrap().sweep(&ratios).unwrap();
        assert_eq!(a, b);

        let c = KuramotoNetwork::new(small_config().with_seed(7))
            .unwrap()
            .sweep(&ratios)
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_integrate_rejects_wrong_phase_count() {
        let net = KuramotoNetwork::new(small_config()).unwrap();
        let mut short = vec![0.0; 5];
        let err = net.integrate(&mut short, 1.0).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { ref name, .. } if name == "theta"));
        assert_eq!(short, vec![0.0; 5]);

        let mut long = vec![0.0; 13];
        assert!(net.integrate(&mut long, 1.0).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(KuramotoNetwork::new(KuramotoConfig::new().with_oscillators(0)).is_err());
        assert!(KuramotoNetwork::new(KuramotoConfig::new().with_dt(0.0)).is_err());
    }
}
