//! Calculator registry.
//!
//! Every calculator is reachable through [`Simulation`], by its short
//! kebab-case name or by its long script-style alias.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::config::{validate_config, RunConfig};
use crate::error::{Result, SimError};
use crate::report::Report;
use crate::{fields, junction, materials, memory_map, network, power, rectenna, thermal};

/// One runnable calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Simulation {
    Fermi,
    IonFlux,
    Lattice,
    Thermoelectric,
    Maxwell,
    Thermal,
    SparkGap,
    Rectenna,
    PowerDensity,
    MemoryMap,
    Sequinoid,
}

impl Simulation {
    /// All calculators in listing order.
    pub const ALL: [Simulation; 11] = [
        Simulation::Fermi,
        Simulation::IonFlux,
        Simulation::Lattice,
        Simulation::Thermoelectric,
        Simulation::Maxwell,
        Simulation::Thermal,
        Simulation::SparkGap,
        Simulation::Rectenna,
        Simulation::PowerDensity,
        Simulation::MemoryMap,
        Simulation::Sequinoid,
    ];

    /// Canonical short name.
    pub fn name(self) -> &'static str {
        match self {
            Simulation::Fermi => "fermi",
            Simulation::IonFlux => "ion-flux",
            Simulation::Lattice => "lattice",
            Simulation::Thermoelectric => "thermoelectric",
            Simulation::Maxwell => "maxwell",
            Simulation::Thermal => "thermal",
            Simulation::SparkGap => "spark-gap",
            Simulation::Rectenna => "rectenna",
            Simulation::PowerDensity => "power-density",
            Simulation::MemoryMap => "memory-map",
            Simulation::Sequinoid => "sequinoid",
        }
    }

    /// Long script-style alias.
    pub fn alias(self) -> &'static str {
        match self {
            Simulation::Fermi => "fermi_energy_sim",
            Simulation::IonFlux => "ion_flux_sim",
            Simulation::Lattice => "lattice_energy_sim",
            Simulation::Thermoelectric => "thermoelectric_model",
            Simulation::Maxwell => "maxwell_field_sim",
            Simulation::Thermal => "thermal_safety_sim",
            Simulation::SparkGap => "spark_gap_bio_sim",
            Simulation::Rectenna => "metamaterial_rectenna_sim",
            Simulation::PowerDensity => "power_density_sim",
            Simulation::MemoryMap => "memory_map_sim",
            Simulation::Sequinoid => "sequinoid_network_sim",
        }
    }

    /// One-line summary for `--list`.
    pub fn description(self) -> &'static str {
        match self {
            Simulation::Fermi => "Free-electron Fermi energy of contact metals",
            Simulation::IonFlux => "Nernst potentials and Nernst-Planck membrane flux",
            Simulation::Lattice => "Born-Landé lattice energy of ionic crystals",
            Simulation::Thermoelectric => "Thermoelectric ZT and body-heat harvest power",
            Simulation::Maxwell => "Gauss, Ampère, Faraday, wave spectrum and field energy",
            Simulation::Thermal => "Skin temperature rise from wearable electronics",
            Simulation::SparkGap => "Schottky junction, electroporation and Paschen breakdown",
            Simulation::Rectenna => "Ambient RF, metamaterial capture and harvest budget",
            Simulation::PowerDensity => "Power budget and IR drop across a textile mesh",
            Simulation::MemoryMap => "Distributed memory map and energy per bit",
            Simulation::Sequinoid => "Tissue resonance, body channel and Kuramoto sync",
        }
    }

    /// Look up a calculator by name or alias, ignoring case and `-`/`_`.
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = normalize(name);
        Self::ALL
            .iter()
            .copied()
            .find(|sim| normalize(sim.name()) == wanted || normalize(sim.alias()) == wanted)
            .ok_or_else(|| SimError::UnknownSimulation {
                name: name.to_string(),
            })
    }

    /// Validate `config` and produce this calculator's report.
    pub fn report(self, config: &RunConfig) -> Result<Report> {
        validate_config(config)?;
        info!(simulation = self.name(), "running simulation");

        let report = match self {
            Simulation::Fermi => materials::fermi::report(),
            Simulation::IonFlux => materials::ions::report(),
            Simulation::Lattice => materials::lattice::report(),
            Simulation::Thermoelectric => materials::thermoelectric::report(),
            Simulation::Maxwell => fields::report(),
            Simulation::Thermal => thermal::report(),
            Simulation::SparkGap => junction::report(),
            Simulation::Rectenna => rectenna::report(),
            Simulation::PowerDensity => power::report(&config.relaxation),
            Simulation::MemoryMap => memory_map::report(),
            Simulation::Sequinoid => network::report(&config.kuramoto),
        }?;

        info!(
            simulation = self.name(),
            sections = report.sections.len(),
            "simulation finished"
        );
        Ok(report)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('_', "-")
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Simulation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Run several calculators in order, stopping at the first failure.
pub fn run_all(simulations: &[Simulation], config: &RunConfig) -> Result<Vec<Report>> {
    simulations.iter().map(|sim| sim.report(config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_alias() {
        assert_eq!(Simulation::from_name("fermi").unwrap(), Simulation::Fermi);
        assert_eq!(Simulation::from_name("fermi_energy_sim").unwrap(), Simulation::Fermi);
        assert_eq!(Simulation::from_name("Spark_Gap").unwrap(), Simulation::SparkGap);
        assert_eq!("power-density".parse::<Simulation>().unwrap(), Simulation::PowerDensity);
    }

    #[test]
    fn test_unknown_name() {
        let err = Simulation::from_name("warp-drive").unwrap_err();
        assert!(matches!(err, SimError::UnknownSimulation { ref name } if name == "warp-drive"));
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in Simulation::ALL.iter().enumerate() {
            for b in &Simulation::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.alias(), b.alias());
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let mut config = RunConfig::new();
        config.relaxation.iterations = 0;
        assert!(matches!(
            Simulation::Fermi.report(&config),
            Err(SimError::InvalidConfig { .. })
        ));
    }
}
