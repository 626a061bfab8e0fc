//! Run configuration validation.

use crate::error::{Result, SimError};
use crate::solver::MAX_KURAMOTO_STEPS;

use super::RunConfig;

/// Validate a run configuration before any solver starts.
///
/// Checks:
/// - Relaxation runs at least one sweep with a finite, positive supply
/// - Sink scale is finite and non-negative
/// - Kuramoto network has oscillators, a positive step and duration,
///   and between one and [`MAX_KURAMOTO_STEPS`] steps to integrate
/// - Lock threshold lies in (0, 1]
pub fn validate_config(config: &RunConfig) -> Result<()> {
    let relax = &config.relaxation;

    if relax.iterations == 0 {
        return Err(SimError::invalid_config("relaxation needs at least one iteration"));
    }

    if !(relax.supply_voltage.is_finite() && relax.supply_voltage > 0.0) {
        return Err(SimError::invalid_config(format!(
            "supply voltage must be positive, got {}",
            relax.supply_voltage
        )));
    }

    if !(relax.sink_scale.is_finite() && relax.sink_scale >= 0.0) {
        return Err(SimError::invalid_config(format!(
            "sink scale must be non-negative, got {}",
            relax.sink_scale
        )));
    }

    let kura = &config.kuramoto;

    if kura.oscillators == 0 {
        return Err(SimError::invalid_config("Kuramoto network needs at least one oscillator"));
    }

    if !(kura.dt.is_finite() && kura.dt > 0.0) {
        return Err(SimError::invalid_config(format!(
            "time step must be positive, got {}",
            kura.dt
        )));
    }

    if !(kura.duration.is_finite() && kura.duration >= kura.dt) {
        return Err(SimError::invalid_config(format!(
            "duration {} must cover at least one time step of {}",
            kura.duration, kura.dt
        )));
    }

    let steps = kura.duration / kura.dt;
    if !(steps <= MAX_KURAMOTO_STEPS as f64) {
        return Err(SimError::invalid_config(format!(
            "duration {} at time step {} needs {:.3e} steps, limit is {}",
            kura.duration, kura.dt, steps, MAX_KURAMOTO_STEPS
        )));
    }

    if !(kura.sigma_hz.is_finite() && kura.sigma_hz >= 0.0) {
        return Err(SimError::invalid_config(format!(
            "frequency spread must be non-negative, got {}",
            kura.sigma_hz
        )));
    }

    if !(kura.lock_threshold > 0.0 && kura.lock_threshold <= 1.0) {
        return Err(SimError::invalid_config(format!(
            "lock threshold must lie in (0, 1], got {}",
            kura.lock_threshold
        )));
    }

    if kura.tail_window == 0 {
        return Err(SimError::invalid_config("tail window must hold at least one sample"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KuramotoConfig, RelaxationConfig};

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&RunConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = RunConfig::new().with_relaxation(RelaxationConfig::new().with_iterations(0));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_duration_shorter_than_step() {
        let config = RunConfig::new()
            .with_kuramoto(KuramotoConfig::new().with_dt(0.1).with_duration(0.05));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_runaway_step_count() {
        let config = RunConfig::new()
            .with_kuramoto(KuramotoConfig::new().with_dt(1e-300).with_duration(1e300));
        assert!(matches!(
            validate_config(&config),
            Err(SimError::InvalidConfig { .. })
        ));

        let at_limit = RunConfig::new().with_kuramoto(
            KuramotoConfig::new()
                .with_dt(1.0)
                .with_duration(MAX_KURAMOTO_STEPS as f64),
        );
        assert!(validate_config(&at_limit).is_ok());
    }

    #[test]
    fn test_rejects_empty_network() {
        let config = RunConfig::new().with_kuramoto(KuramotoConfig::new().with_oscillators(0));
        assert!(validate_config(&config).is_err());
    }
}
