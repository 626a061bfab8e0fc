//! End-to-end tests: every calculator through the public registry.

use wearable_sims::report::ReportWriter;
use wearable_sims::simulations::run_all;
use wearable_sims::{
    KuramotoConfig, OutputFormat, RelaxationConfig, RunConfig, SimError, Simulation,
};

/// Short solver settings so the whole suite stays quick.
fn quick_config() -> RunConfig {
    RunConfig::new()
        .with_relaxation(RelaxationConfig::new().with_iterations(200))
        .with_kuramoto(KuramotoConfig::new().with_duration(0.5))
}

#[test]
fn test_every_simulation_produces_a_report() {
    let config = quick_config();
    for sim in Simulation::ALL {
        let report = sim.report(&config).unwrap();
        assert!(!report.title.is_empty(), "{sim} has no title");
        assert!(!report.sections.is_empty(), "{sim} has no sections");
        assert!(
            report.sections.iter().any(|s| s.tables().next().is_some()),
            "{sim} renders no tables"
        );
        assert!(report.to_string().contains(&report.title));
    }
}

#[test]
fn test_run_all_preserves_order() {
    let selection = [Simulation::Thermal, Simulation::Fermi, Simulation::MemoryMap];
    let reports = run_all(&selection, &quick_config()).unwrap();
    assert_eq!(reports.len(), 3);
    for (sim, report) in selection.iter().zip(&reports) {
        assert_eq!(*report, sim.report(&quick_config()).unwrap());
    }
}

#[test]
fn test_lookup_accepts_aliases() {
    for sim in Simulation::ALL {
        assert_eq!(Simulation::from_name(sim.name()).unwrap(), sim);
        assert_eq!(Simulation::from_name(sim.alias()).unwrap(), sim);
        assert_eq!(Simulation::from_name(&sim.alias().to_uppercase()).unwrap(), sim);
    }
    assert!(matches!(
        Simulation::from_name("nope"),
        Err(SimError::UnknownSimulation { .. })
    ));
}

#[test]
fn test_json_output_is_an_array_of_reports() {
    let reports = run_all(&[Simulation::SparkGap, Simulation::Rectenna], &quick_config()).unwrap();

    let mut writer = ReportWriter::new(Vec::new(), OutputFormat::Json);
    writer.write_all(&reports).unwrap();
    let bytes = writer.into_inner().unwrap();

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["title"], serde_json::json!(reports[0].title));
    assert!(array[1]["sections"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_text_output_separates_reports() {
    let reports = run_all(&[Simulation::Fermi, Simulation::Lattice], &quick_config()).unwrap();

    let mut writer = ReportWriter::new(Vec::new(), OutputFormat::Text);
    writer.write_all(&reports).unwrap();
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let first = text.find(&reports[0].title).unwrap();
    let second = text.find(&reports[1].title).unwrap();
    assert!(first < second);
}

#[test]
fn test_config_roundtrips_through_json() {
    let config = quick_config().with_kuramoto(
        KuramotoConfig::new()
            .with_seed(7)
            .with_oscillators(12)
            .with_duration(0.5),
    );
    let text = config.to_json().unwrap();
    assert_eq!(RunConfig::from_json(&text).unwrap(), config);
}

#[test]
fn test_sequinoid_depends_only_on_seed() {
    let config = quick_config();
    let a = Simulation::Sequinoid.report(&config).unwrap();
    let b = Simulation::Sequinoid.report(&config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_supply_is_rejected() {
    let config = quick_config()
        .with_relaxation(RelaxationConfig::new().with_supply_voltage(-3.3));
    assert!(matches!(
        Simulation::PowerDensity.report(&config),
        Err(SimError::InvalidConfig { .. })
    ));
}
