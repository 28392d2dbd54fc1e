//! Terminal UI utilities.
//!
//! A box-drawn table for the run summary. Cell widths are measured with
//! `console` so colored cells line up, and the widest columns are shrunk
//! (never below 8 columns) until the table fits the terminal.
//!
//! ```text
//!   ┌──────────┬───────┐
//!   │ Metric   │ Count │
//!   ├──────────┼───────┤
//!   │ Headers  │ 12    │
//!   └──────────┴───────┘
//! ```

use colored::*;
use console::{measure_text_width, truncate_str};

const MIN_COLUMN: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        print!("{}", self.render(term_width as usize));
    }

    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths = self.column_widths(max_width);
        let mut out = String::new();

        out.push_str(&separator(&widths, "┌", "┬", "┐"));
        out.push_str(&row_line(
            &widths,
            self.headers.iter().map(|h| h.bold().to_string()),
        ));
        out.push_str(&separator(&widths, "├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&row_line(&widths, row.iter().map(|c| sanitize(c))));
        }
        out.push_str(&separator(&widths, "└", "┴", "┘"));
        out
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(&sanitize(cell)));
            }
        }

        // Indent, outer borders and one padded separator per column.
        let overhead = 3 + 3 * widths.len();
        let available = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > available {
            let Some(widest) = widths
                .iter_mut()
                .filter(|w| **w > MIN_COLUMN)
                .max_by_key(|w| **w)
            else {
                break;
            };
            *widest -= 1;
        }
        widths
    }
}

fn separator(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("  {}{}{}\n", left, inner.join(mid), right)
}

fn row_line(widths: &[usize], cells: impl Iterator<Item = String>) -> String {
    let mut line = String::from("  │");
    for (cell, &width) in cells.zip(widths) {
        let shown = truncate_str(&cell, width, "...");
        let padding = width.saturating_sub(measure_text_width(&shown));
        line.push_str(&format!(" {}{} │", shown, " ".repeat(padding)));
    }
    line.push('\n');
    line
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            _ => c,
        })
        .collect()
}
