//! Fixed-width text tables.

use std::fmt;

use serde::Serialize;

/// A table column: header text and padded width in characters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub header: String,
    pub width: usize,
}

/// A left-aligned fixed-width table.
///
/// Every column except the last is padded to its width; the last column
/// is free-form so trailing notes never get truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table from `(header, width)` pairs.
    pub fn new(columns: &[(&str, usize)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(header, width)| Column {
                    header: header.to_string(),
                    width: *width,
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
        self
    }

    /// Total width of the padded columns, used for the separator rule.
    pub fn rule_width(&self) -> usize {
        let padded: usize = self.columns.iter().map(|c| c.width + 1).sum();
        padded.max(20)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>, cells: &[String]) -> fmt::Result {
        let last = self.columns.len().saturating_sub(1);
        let mut line = String::new();
        for (i, (column, cell)) in self.columns.iter().zip(cells).enumerate() {
            if i == last {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<width$} ", cell, width = column.width));
            }
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        self.write_line(f, &headers)?;
        writeln!(f, "{}", "-".repeat(self.rule_width()))?;
        for row in &self.rows {
            self.write_line(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_all_but_last_column() {
        let mut table = Table::new(&[("Metal", 6), ("E_F(eV)", 10), ("Notes", 0)]);
        table.row(["Cu", "7.03", "Noble metal"]);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Metal  E_F(eV)    Notes");
        assert_eq!(lines[2], "Cu     7.03       Noble metal");
    }

    #[test]
    fn test_short_rows_are_filled() {
        let mut table = Table::new(&[("a", 3), ("b", 3), ("c", 3)]);
        table.row(["1"]);
        assert_eq!(table.rows[0], vec!["1".to_string(), String::new(), String::new()]);
        assert_eq!(table.len(), 1);
    }
}
