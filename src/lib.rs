//! # Wearable Sims
//!
//! Physics and engineering calculators for body-worn electronics.
//!
//! This library provides:
//! - Materials calculators (Fermi energy, ion flux, lattice energy, thermoelectrics)
//! - Field, thermal, junction and rectenna analyses for a wearable stack
//! - A Jacobi relaxation solver for IR drop across a textile power mesh
//! - A seeded Kuramoto network for phase synchronization of body-worn nodes
//! - Fixed-width text and JSON report rendering
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`solver`] - Grid relaxation and Kuramoto integration
//! - [`config`] - Solver knobs with builder setters, JSON loading and validation
//! - [`report`] - Report model and rendering
//! - [`materials`], [`fields`], [`thermal`], [`junction`], [`rectenna`],
//!   [`power`], [`memory_map`], [`network`] - The calculators
//! - [`simulations`] - Name lookup and dispatch over every calculator
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! wearsim power-density --iterations 500
//! wearsim sequinoid --seed 7 --dt 0.5m --json
//! wearsim --all > reports.txt
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use wearable_sims::{RunConfig, Simulation};
//!
//! let report = Simulation::from_name("thermal")?.report(&RunConfig::default())?;
//! println!("{report}");
//! # Ok::<(), wearable_sims::SimError>(())
//! ```
//!
//! ## Numerical Methods
//!
//! The IR-drop solver runs a fixed number of Jacobi sweeps over a
//! conductance-weighted five-point stencil; boundary cells are grounded,
//! the source cell is pinned and sinks are pulled down after each sweep.
//!
//! The Kuramoto network advances all phases with explicit Euler steps
//! using the mean-field form of the coupling, so each step is O(N).

pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod junction;
pub mod materials;
pub mod memory_map;
pub mod network;
pub mod power;
pub mod rectenna;
pub mod report;
pub mod simulations;
pub mod solver;
pub mod thermal;
pub mod units;

// Re-export main types for convenience
pub use config::{KuramotoConfig, RelaxationConfig, RunConfig};
pub use error::{Result, SimError};
pub use report::{OutputFormat, Report};
pub use simulations::Simulation;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSimulation;
