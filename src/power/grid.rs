//! Textile power mesh scenario and Joule heating map.

use ndarray::Array2;
use serde::Serialize;

use crate::error::Result;
use crate::solver::{GridSolution, SheetGrid, Sink};

/// Mesh edge length in cells (one cell per cm of garment).
pub const MESH_SIZE: usize = 30;

/// Baseline conductive yarn sheet resistance (Ω/□).
pub const BASE_SHEET_RESISTANCE: f64 = 1.0;

/// Supply cell at centre-back.
pub const SUPPLY_CELL: (usize, usize) = (15, 28);

/// Fraction of the peak Joule density that marks a hotspot.
pub const HOTSPOT_FRACTION: f64 = 0.5;

/// Hotspots listed in the report.
pub const HOTSPOTS_SHOWN: usize = 5;

/// Flex zones (name, rows, cols, Ω/□).
pub const FLEX_ZONES: [(&str, (usize, usize), (usize, usize), f64); 3] = [
    ("Elbow bend", (12, 18), (10, 20), 5.0),
    ("Shoulder flex", (0, 3), (0, MESH_SIZE), 3.0),
    ("Waist band flex", (25, 30), (12, 18), 2.0),
];

/// Loads on the mesh (label, row, col, mA).
pub const LOADS: [(&str, usize, usize, f64); 8] = [
    ("Sensor left shoulder", 5, 5, 0.1),
    ("Sensor right shoulder", 5, 25, 0.1),
    ("Compute node left", 15, 5, 0.3),
    ("Router center", 15, 15, 0.2),
    ("Piezo node left shoe", 25, 5, 0.05),
    ("Piezo node right shoe", 25, 25, 0.05),
    ("BLE radio chest", 10, 15, 0.15),
    ("Sensor waist", 20, 15, 0.1),
];

/// Sheet resistance map of the garment with its stretch zones applied
/// in order, later zones overwriting earlier ones.
pub fn textile_grid() -> Result<SheetGrid> {
    let mut grid = SheetGrid::uniform(MESH_SIZE, BASE_SHEET_RESISTANCE)?;
    for (_, rows, cols, ohms) in FLEX_ZONES {
        grid.fill_region(rows.0..rows.1, cols.0..cols.1, ohms)?;
    }
    Ok(grid)
}

/// The mesh loads as solver sinks.
pub fn textile_sinks() -> Vec<Sink> {
    LOADS
        .iter()
        .map(|&(_, row, col, ma)| Sink::new(row, col, ma))
        .collect()
}

/// Joule dissipation per cell, `|∇V|² / R` with central differences.
///
/// Edge cells have no centred stencil and are left at zero.
pub fn joule_density(grid: &SheetGrid, solution: &GridSolution) -> Array2<f64> {
    let n = grid.size();
    let v = &solution.voltage;
    let mut density = Array2::<f64>::zeros((n, n));
    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let dvx = (v[[i + 1, j]] - v[[i - 1, j]]) / 2.0;
            let dvy = (v[[i, j + 1]] - v[[i, j - 1]]) / 2.0;
            density[[i, j]] = (dvx.powi(2) + dvy.powi(2)) / grid.resistance(i, j);
        }
    }
    density
}

/// A cell dissipating more than the hotspot fraction of the peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hotspot {
    pub row: usize,
    pub col: usize,
    pub sheet_resistance: f64,
    pub density: f64,
}

/// Peak density and every cell above `fraction` of it, in row-major order.
pub fn hotspots(grid: &SheetGrid, density: &Array2<f64>, fraction: f64) -> (f64, Vec<Hotspot>) {
    let peak = density.iter().copied().fold(0.0, f64::max);
    let threshold = peak * fraction;
    let spots = density
        .indexed_iter()
        .filter(|(_, &p)| p > threshold)
        .map(|((row, col), &p)| Hotspot {
            row,
            col,
            sheet_resistance: grid.resistance(row, col),
            density: p,
        })
        .collect();
    (peak, spots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelaxationConfig;
    use crate::solver::JacobiRelaxation;
    use approx::assert_relative_eq;

    #[test]
    fn test_flex_zones_applied() {
        let grid = textile_grid().unwrap();
        assert_eq!(grid.resistance(14, 15), 5.0);
        assert_eq!(grid.resistance(1, 29), 3.0);
        assert_eq!(grid.resistance(27, 12), 2.0);
        assert_eq!(grid.resistance(18, 15), 1.0);
        assert_eq!(grid.resistance(12, 9), 1.0);
    }

    #[test]
    fn test_joule_density_linear_ramp() {
        // V = 0.1·col gives |∇V|² = 0.01 on every interior cell.
        let grid = SheetGrid::uniform(5, 2.0).unwrap();
        let voltage = Array2::from_shape_fn((5, 5), |(_, j)| 0.1 * j as f64);
        let solution = GridSolution { voltage, iterations: 0, residual: 0.0 };
        let density = joule_density(&grid, &solution);
        assert_relative_eq!(density[[2, 2]], 0.005, max_relative = 1e-12);
        assert_eq!(density[[0, 2]], 0.0);

        let (peak, spots) = hotspots(&grid, &density, HOTSPOT_FRACTION);
        assert_relative_eq!(peak, 0.005, max_relative = 1e-12);
        assert_eq!(spots.len(), 9);
        assert_eq!((spots[0].row, spots[0].col), (1, 1));
    }

    #[test]
    fn test_hotspots_near_supply() {
        let grid = textile_grid().unwrap();
        let solver = JacobiRelaxation::new(RelaxationConfig::new().with_iterations(200));
        let solution = solver.solve(&grid, SUPPLY_CELL, &textile_sinks()).unwrap();
        let density = joule_density(&grid, &solution);
        let (peak, spots) = hotspots(&grid, &density, HOTSPOT_FRACTION);
        assert!(peak > 0.0);
        assert!(!spots.is_empty());
        // The steepest gradient sits next to the fixed supply cell.
        assert!(spots
            .iter()
            .all(|s| s.row.abs_diff(SUPPLY_CELL.0) <= 3 && s.col.abs_diff(SUPPLY_CELL.1) <= 3));
    }
}
