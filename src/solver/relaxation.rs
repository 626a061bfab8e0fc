//! Jacobi relaxation of the conductance-weighted Laplace equation.

use std::fmt;
use std::ops::Range;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::config::RelaxationConfig;
use crate::error::{ensure_positive, Result, SimError};

use super::{SINK_LOW_VOLTAGE, SINK_OK_VOLTAGE};

/// Square map of sheet resistance (Ω/□), one value per mesh cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    resistance: Array2<f64>,
}

impl SheetGrid {
    /// Create a `size`×`size` grid with uniform sheet resistance.
    pub fn uniform(size: usize, ohms_per_square: f64) -> Result<Self> {
        if size < 3 {
            return Err(SimError::invalid_parameter(
                "grid size",
                format!("need at least 3x3 cells for an interior, got {size}x{size}"),
            ));
        }
        ensure_positive("sheet resistance", ohms_per_square)?;
        Ok(Self {
            resistance: Array2::from_elem((size, size), ohms_per_square),
        })
    }

    /// Overwrite a rectangular region (half-open row and column ranges).
    pub fn fill_region(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        ohms_per_square: f64,
    ) -> Result<()> {
        ensure_positive("sheet resistance", ohms_per_square)?;
        let size = self.size();
        if rows.end > size || cols.end > size {
            return Err(SimError::GridOutOfBounds {
                row: rows.end.saturating_sub(1),
                col: cols.end.saturating_sub(1),
                size,
            });
        }
        for i in rows {
            for j in cols.clone() {
                self.resistance[[i, j]] = ohms_per_square;
            }
        }
        Ok(())
    }

    /// Grid edge length in cells.
    pub fn size(&self) -> usize {
        self.resistance.nrows()
    }

    /// Sheet resistance at a cell.
    pub fn resistance(&self, row: usize, col: usize) -> f64 {
        self.resistance[[row, col]]
    }

    /// Borrow the full resistance map.
    pub fn resistances(&self) -> &Array2<f64> {
        &self.resistance
    }

    /// Fail unless `(row, col)` lies on the grid.
    pub fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        let size = self.size();
        if row >= size || col >= size {
            Err(SimError::GridOutOfBounds { row, col, size })
        } else {
            Ok(())
        }
    }
}

/// A current draw at one mesh cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sink {
    pub row: usize,
    pub col: usize,
    /// Current drawn in milliamps
    pub current_ma: f64,
}

impl Sink {
    pub fn new(row: usize, col: usize, current_ma: f64) -> Self {
        Self { row, col, current_ma }
    }
}

/// Supply classification of a sink's delivered voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SinkStatus {
    Ok,
    Low,
    Fail,
}

impl SinkStatus {
    /// Classify a delivered voltage: OK ≥ 1.8 V, LOW ≥ 1.2 V, else FAIL.
    pub fn classify(voltage: f64) -> Self {
        if voltage >= SINK_OK_VOLTAGE {
            SinkStatus::Ok
        } else if voltage >= SINK_LOW_VOLTAGE {
            SinkStatus::Low
        } else {
            SinkStatus::Fail
        }
    }
}

impl fmt::Display for SinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SinkStatus::Ok => "OK",
            SinkStatus::Low => "LOW",
            SinkStatus::Fail => "FAIL",
        };
        write!(f, "{}", label)
    }
}

/// Final state of one sink after relaxation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkReading {
    pub row: usize,
    pub col: usize,
    pub voltage: f64,
    /// Supply voltage minus delivered voltage
    pub drop: f64,
    pub sheet_resistance: f64,
    pub status: SinkStatus,
}

/// Voltage field produced by a relaxation run.
#[derive(Debug, Clone)]
pub struct GridSolution {
    pub voltage: Array2<f64>,
    /// Sweeps performed
    pub iterations: usize,
    /// Largest absolute cell change during the last sweep
    pub residual: f64,
}

impl GridSolution {
    /// Voltage at a cell.
    pub fn voltage_at(&self, row: usize, col: usize) -> f64 {
        self.voltage[[row, col]]
    }
}

/// Fixed-count Jacobi solver for the textile power mesh.
#[derive(Debug, Clone, Default)]
pub struct JacobiRelaxation {
    config: RelaxationConfig,
}

impl JacobiRelaxation {
    /// Create a solver with the given configuration.
    pub fn new(config: RelaxationConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    /// Relax the voltage field.
    ///
    /// Boundary cells stay at 0 V. The source cell starts at the supply
    /// voltage and is never updated by the stencil. After each sweep every
    /// sink cell is pulled down by `I_mA * R_sheet * sink_scale`.
    pub fn solve(
        &self,
        grid: &SheetGrid,
        source: (usize, usize),
        sinks: &[Sink],
    ) -> Result<GridSolution> {
        grid.check_cell(source.0, source.1)?;
        for sink in sinks {
            grid.check_cell(sink.row, sink.col)?;
        }

        let n = grid.size();
        let conductance = grid.resistances().mapv(|r| 1.0 / r);

        let mut v = Array2::<f64>::zeros((n, n));
        v[[source.0, source.1]] = self.config.supply_voltage;
        let mut v_old = v.clone();
        let mut residual = 0.0f64;

        for _ in 0..self.config.iterations {
            v_old.assign(&v);
            residual = 0.0;

            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    if (i, j) == source {
                        continue;
                    }

                    let neighbours = [(i - 1, j), (i + 1, j), (i, j - 1), (i, j + 1)];
                    let mut g_total = 0.0;
                    let mut v_sum = 0.0;
                    for (ni, nj) in neighbours {
                        let g = conductance[[ni, nj]];
                        g_total += g;
                        v_sum += g * v_old[[ni, nj]];
                    }

                    if g_total > 0.0 {
                        let updated = v_sum / g_total;
                        residual = residual.max((updated - v_old[[i, j]]).abs());
                        v[[i, j]] = updated;
                    }
                }
            }

            for sink in sinks {
                v[[sink.row, sink.col]] -=
                    sink.current_ma * grid.resistance(sink.row, sink.col) * self.config.sink_scale;
            }
        }

        if let Some(((row, col), &value)) = v.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(SimError::NumericalOverflow { row, col, value });
        }

        debug!(
            iterations = self.config.iterations,
            residual,
            "grid relaxation finished"
        );

        Ok(GridSolution {
            voltage: v,
            iterations: self.config.iterations,
            residual,
        })
    }

    /// Read back and classify each sink's delivered voltage.
    pub fn sink_readings(
        &self,
        grid: &SheetGrid,
        solution: &GridSolution,
        sinks: &[Sink],
    ) -> Vec<SinkReading> {
        sinks
            .iter()
            .map(|sink| {
                let voltage = solution.voltage_at(sink.row, sink.col);
                SinkReading {
                    row: sink.row,
                    col: sink.col,
                    voltage,
                    drop: self.config.supply_voltage - voltage,
                    sheet_resistance: grid.resistance(sink.row, sink.col),
                    status: SinkStatus::classify(voltage),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solver(iterations: usize) -> JacobiRelaxation {
        JacobiRelaxation::new(RelaxationConfig::new().with_iterations(iterations))
    }

    #[test]
    fn test_sink_status_thresholds_are_inclusive() {
        assert_eq!(SinkStatus::classify(1.8), SinkStatus::Ok);
        assert_eq!(SinkStatus::classify(1.79), SinkStatus::Low);
        assert_eq!(SinkStatus::classify(1.2), SinkStatus::Low);
        assert_eq!(SinkStatus::classify(1.19), SinkStatus::Fail);
        assert_eq!(SinkStatus::classify(-0.5), SinkStatus::Fail);
    }

    #[test]
    fn test_single_interior_cell_averages_neighbours() {
        // 3x3 grid: only (1,1) is interior, all neighbours are 0 V boundary.
        let grid = SheetGrid::uniform(3, 1.0).unwrap();
        let solution = solver(5).solve(&grid, (0, 0), &[]).unwrap();
        assert_eq!(solution.voltage_at(1, 1), 0.0);
        // Source on the boundary keeps its supply value.
        assert_relative_eq!(solution.voltage_at(0, 0), 3.3);
    }

    #[test]
    fn test_one_sweep_matches_hand_computation() {
        // Source at (1,1) of a 4x4 grid; after one Jacobi sweep the
        // interior neighbours see one quarter of the supply.
        let grid = SheetGrid::uniform(4, 1.0).unwrap();
        let solution = solver(1).solve(&grid, (1, 1), &[]).unwrap();
        assert_relative_eq!(solution.voltage_at(1, 2), 3.3 / 4.0);
        assert_relative_eq!(solution.voltage_at(2, 1), 3.3 / 4.0);
        assert_relative_eq!(solution.voltage_at(2, 2), 0.0);
        assert_relative_eq!(solution.residual, 3.3 / 4.0);
    }

    #[test]
    fn test_conductance_weighting() {
        // Cell (1,2) in a 4x4 grid has neighbours (0,2),(2,2),(1,1),(1,3).
        // Make the source neighbour (1,1) twice as conductive as the rest.
        let mut grid = SheetGrid::uniform(4, 1.0).unwrap();
        grid.fill_region(1..2, 1..2, 0.5).unwrap();
        let solution = solver(1).solve(&grid, (1, 1), &[]).unwrap();
        // g = [1, 1, 2, 1] → V = 2 * 3.3 / 5
        assert_relative_eq!(solution.voltage_at(1, 2), 2.0 * 3.3 / 5.0);
    }

    #[test]
    fn test_sink_pull_per_iteration() {
        let grid = SheetGrid::uniform(5, 2.0).unwrap();
        let sinks = [Sink::new(3, 3, 0.5)];
        let solution = solver(1).solve(&grid, (1, 1), &sinks).unwrap();
        // Sink cell has only 0 V neighbours after one sweep: 0 - 0.5 * 2 * 0.001
        assert_relative_eq!(solution.voltage_at(3, 3), -0.001);
    }

    #[test]
    fn test_boundary_cells_stay_grounded() {
        let grid = SheetGrid::uniform(8, 1.0).unwrap();
        for source in [(4, 4), (0, 3)] {
            let solution = solver(100).solve(&grid, source, &[]).unwrap();
            for ((row, col), &v) in solution.voltage.indexed_iter() {
                let edge = row == 0 || col == 0 || row == 7 || col == 7;
                if edge && (row, col) != source {
                    assert_eq!(v, 0.0, "edge cell ({row}, {col}) drifted to {v}");
                }
            }
        }
    }

    #[test]
    fn test_voltage_decays_away_from_source() {
        let grid = SheetGrid::uniform(12, 1.0).unwrap();
        let solution = solver(400).solve(&grid, (6, 6), &[]).unwrap();
        let near = solution.voltage_at(6, 7);
        let far = solution.voltage_at(6, 10);
        assert!(near > far);
        assert!(far > 0.0);
        assert!(near < 3.3);
    }

    #[test]
    fn test_out_of_bounds_source_and_sink() {
        let grid = SheetGrid::uniform(10, 1.0).unwrap();
        let err = solver(1).solve(&grid, (10, 2), &[]).unwrap_err();
        assert!(matches!(err, SimError::GridOutOfBounds { row: 10, col: 2, size: 10 }));

        let err = solver(1)
            .solve(&grid, (5, 5), &[Sink::new(2, 12, 0.1)])
            .unwrap_err();
        assert!(matches!(err, SimError::GridOutOfBounds { .. }));
    }

    #[test]
    fn test_grid_construction_errors() {
        assert!(SheetGrid::uniform(2, 1.0).is_err());
        assert!(SheetGrid::uniform(10, 0.0).is_err());
        let mut grid = SheetGrid::uniform(10, 1.0).unwrap();
        assert!(grid.fill_region(0..11, 0..3, 2.0).is_err());
        assert!(grid.fill_region(0..3, 0..3, -2.0).is_err());
    }

    #[test]
    fn test_readings_report_drop() {
        let grid = SheetGrid::uniform(6, 1.0).unwrap();
        let relax = solver(50);
        let sinks = [Sink::new(2, 2, 0.0)];
        let solution = relax.solve(&grid, (3, 3), &sinks).unwrap();
        let readings = relax.sink_readings(&grid, &solution, &sinks);
        assert_eq!(readings.len(), 1);
        assert_relative_eq!(readings[0].drop, 3.3 - readings[0].voltage);
        assert_eq!(readings[0].status, SinkStatus::classify(readings[0].voltage));
    }
}
