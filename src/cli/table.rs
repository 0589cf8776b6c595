//! Table formatting utilities for CLI list commands
//!
//! This module provides a unified table output system so list commands
//! share one formatting path instead of each printing their own columns.

use console::style;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Part or category identifier (cyan colored)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Category / type / attribute value
    Type(String),
    /// Numeric value, right aligned
    Number(i64),
    /// Float value with precision
    Float(f64, usize),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                let display = truncate_str(id, width.saturating_sub(2));
                format!("{:<width$}", style(&display).cyan(), width = width)
            }
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Type(t) => {
                format!(
                    "{:<width$}",
                    truncate_str(t, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Float(f, precision) => {
                format!("{:>width$.prec$}", f, width = width, prec = precision)
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Type(t) => escape_csv(t),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Type(t) => t.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Empty => "-".to_string(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => id.len(),
            CellValue::Text(s) => s.len(),
            CellValue::Type(t) => t.len(),
            CellValue::Number(n) => n.to_string().len(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision).len(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: String) -> Self {
        Self {
            id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Disable the trailing summary line (for piping)
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    /// Output rows in the specified format
    pub fn output(&self, rows: Vec<TableRow>, format: OutputFormat) {
        match format {
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => self.output_md(&rows),
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);

                // +2 truncation buffer; cap at the defined width so one
                // long value cannot blow up the whole table
                let natural = col.header.len().max(max_content.saturating_add(2));
                natural.min(col.width)
            })
            .collect()
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header_parts: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, width)| format!("{:<width$}", style(col.header).bold(), width = width))
            .collect();
        println!("{}", header_parts.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let row_parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, width)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*width),
                    None => format!("{:<width$}", "-", width = width),
                })
                .collect();
            println!("{}", row_parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!(
                "{} {}(s) found.",
                style(rows.len()).cyan(),
                self.entity_name
            );
        }
    }

    fn output_csv(&self, rows: &[TableRow]) {
        let headers: Vec<String> = self.columns.iter().map(|c| c.key.to_string()).collect();
        println!("{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_csv())
                        .unwrap_or_default()
                })
                .collect();
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        println!("| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.id);
        }
    }
}
