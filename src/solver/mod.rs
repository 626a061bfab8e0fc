//! Iterative numerical solvers.
//!
//! Two small fixed-budget integrators back the calculators:
//!
//! ## Grid relaxation
//!
//! The textile power mesh is an N×N sheet of conductive yarn. Its steady
//! voltage field satisfies a conductance-weighted Laplace equation:
//!
//! ```text
//! V[i,j] = Σ g_k V_k / Σ g_k     over the four orthogonal neighbours k
//! g_k    = 1 / R_sheet(k)
//! ```
//!
//! solved by Jacobi sweeps for a fixed count, with a source cell pinned
//! to the supply voltage and a small per-sweep voltage pull at each sink.
//!
//! ## Kuramoto network
//!
//! N phase oscillators with all-to-all sinusoidal coupling:
//!
//! ```text
//! dθ_i/dt = ω_i + (K/N) Σ_j sin(θ_j − θ_i)
//! r       = |(1/N) Σ_j e^{iθ_j}|
//! ```
//!
//! integrated with explicit Euler at a fixed step.

mod kuramoto;
mod relaxation;

pub use kuramoto::{order_parameter, Coherence, KuramotoNetwork, SyncRun};
pub use relaxation::{
    GridSolution, JacobiRelaxation, SheetGrid, Sink, SinkReading, SinkStatus,
};

/// Jacobi sweeps per relaxation run.
pub const DEFAULT_RELAXATION_ITERATIONS: usize = 2000;

/// Sink correction factor per sweep (volts per mA·Ω/□).
pub const DEFAULT_SINK_SCALE: f64 = 0.001;

/// Delivered voltage at or above which a sink is fully powered.
pub const SINK_OK_VOLTAGE: f64 = 1.8;

/// Delivered voltage at or above which a sink still runs, degraded.
pub const SINK_LOW_VOLTAGE: f64 = 1.2;

/// Euler step for the oscillator network (s).
pub const DEFAULT_KURAMOTO_DT: f64 = 0.001;

/// Simulated time per coupling strength (s).
pub const DEFAULT_KURAMOTO_DURATION: f64 = 5.0;

/// Upper bound on Euler steps per run (`duration / dt`).
pub const MAX_KURAMOTO_STEPS: usize = 10_000_000;

/// Seed for natural frequencies and initial phases.
pub const DEFAULT_KURAMOTO_SEED: u64 = 42;

/// Order parameter above which the network counts as phase locked.
pub const DEFAULT_LOCK_THRESHOLD: f64 = 0.9;

/// Order parameter above which the network counts as partially coherent.
pub const PARTIAL_COHERENCE: f64 = 0.5;

/// Trailing samples averaged into the final order parameter.
pub const DEFAULT_TAIL_WINDOW: usize = 100;
