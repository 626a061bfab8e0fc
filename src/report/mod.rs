//! Report model and rendering.
//!
//! Calculators never print. Each one builds a [`Report`]: a title and a
//! list of [`Section`]s holding free text and [`Table`]s. A report
//! renders as fixed-width text through `Display`, or as JSON for
//! downstream tooling.

mod table;
mod writer;

use std::fmt;

use serde::Serialize;

use crate::error::Result;

pub use table::{Column, Table};
pub use writer::{write_reports, OutputFormat, ReportWriter};

/// Width of the `=` rule under a report title.
pub const TITLE_RULE: usize = 70;

/// One piece of section content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Free text, rendered line by line
    Text { text: String },
    /// A fixed-width table
    Table { table: Table },
}

/// A titled group of blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    /// Append a line (or several, separated by `\n`) of free text.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Text { text: text.into() });
        self
    }

    /// Append a table.
    pub fn table(&mut self, table: Table) -> &mut Self {
        self.blocks.push(Block::Table { table });
        self
    }

    /// Iterate over the tables in this section.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table { table } => Some(table),
            Block::Text { .. } => None,
        })
    }
}

/// The output of one calculator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    /// Create an empty report.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Start a new section and return it for filling.
    pub fn section(&mut self, heading: impl Into<String>) -> &mut Section {
        self.sections.push(Section {
            heading: heading.into(),
            blocks: Vec::new(),
        });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Find a section by exact heading.
    pub fn find_section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(TITLE_RULE))?;

        for section in &self.sections {
            writeln!(f)?;
            if !section.heading.is_empty() {
                writeln!(f, "─── {} ───", section.heading)?;
                writeln!(f)?;
            }
            for block in &section.blocks {
                match block {
                    Block::Text { text } => writeln!(f, "{}", text)?,
                    Block::Table { table } => write!(f, "{}", table)?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let mut report = Report::new("Sample Analysis");
        let section = report.section("PART 1");
        section.text("E = mc^2");
        let mut table = Table::new(&[("x", 4), ("y", 0)]);
        table.row(["1", "2"]);
        section.table(table);
        report
    }

    #[test]
    fn test_text_rendering() {
        let text = sample().to_string();
        assert!(text.starts_with("Sample Analysis\n"));
        assert!(text.contains("─── PART 1 ───"));
        assert!(text.contains("E = mc^2"));
        assert!(text.contains("1    2"));
    }

    #[test]
    fn test_json_rendering() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Sample Analysis");
        assert_eq!(value["sections"][0]["blocks"][0]["kind"], "text");
        assert_eq!(value["sections"][0]["blocks"][1]["table"]["rows"][0][1], "2");
    }

    #[test]
    fn test_find_section() {
        let report = sample();
        assert_eq!(report.find_section("PART 1").map(|s| s.tables().count()), Some(1));
        assert!(report.find_section("PART 9").is_none());
    }
}
