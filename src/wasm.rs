//! WASM bindings for Wearable Sims.
//!
//! This module provides JavaScript-friendly bindings that run a calculator
//! in the browser and hand back its rendered report.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSimulation } from 'wearable_sims';
//!
//! await init();
//!
//! const sim = new WasmSimulation();
//! sim.set_seed(7);
//! document.querySelector('pre').textContent = sim.run('sequinoid', 'text');
//! const report = JSON.parse(sim.run('power-density', 'json'));
//! ```

use wasm_bindgen::prelude::*;

use crate::config::RunConfig;
use crate::error::SimError;
use crate::report::OutputFormat;
use crate::simulations::Simulation;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_format(format: &str) -> Result<OutputFormat, SimError> {
    match format {
        "text" | "" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(SimError::WasmError {
            message: format!("unknown output format '{other}', expected 'text' or 'json'"),
        }),
    }
}

/// WASM-compatible calculator runner.
///
/// Holds the solver configuration between calls so the page can tweak
/// a knob and rerun.
#[wasm_bindgen]
pub struct WasmSimulation {
    config: RunConfig,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create a runner with default solver settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSimulation {
        WasmSimulation {
            config: RunConfig::default(),
        }
    }

    /// Create a runner from a JSON configuration string.
    #[wasm_bindgen]
    pub fn from_config(json: &str) -> Result<WasmSimulation, JsValue> {
        let config = RunConfig::from_json(json).map_err(to_js)?;
        Ok(WasmSimulation { config })
    }

    /// Set the number of relaxation sweeps for the power mesh.
    #[wasm_bindgen]
    pub fn set_iterations(&mut self, iterations: usize) {
        self.config.relaxation.iterations = iterations;
    }

    /// Set the Kuramoto RNG seed.
    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u64) {
        self.config.kuramoto.seed = seed;
    }

    /// Set the Kuramoto step and duration, in seconds.
    #[wasm_bindgen]
    pub fn set_timing(&mut self, dt: f64, duration: f64) {
        self.config.kuramoto.dt = dt;
        self.config.kuramoto.duration = duration;
    }

    /// Run one calculator and render it as `"text"` or `"json"`.
    #[wasm_bindgen]
    pub fn run(&self, name: &str, format: &str) -> Result<String, JsValue> {
        let format = parse_format(format).map_err(to_js)?;
        let report = Simulation::from_name(name)
            .and_then(|sim| sim.report(&self.config))
            .map_err(to_js)?;
        match format {
            OutputFormat::Text => Ok(report.to_string()),
            OutputFormat::Json => report.to_json().map_err(to_js),
        }
    }

    /// Current configuration as JSON.
    #[wasm_bindgen(getter)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        self.config.to_json().map_err(to_js)
    }
}

impl Default for WasmSimulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of every calculator, one per line.
#[wasm_bindgen]
pub fn simulation_names() -> String {
    Simulation::ALL
        .iter()
        .map(|sim| sim.name())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
