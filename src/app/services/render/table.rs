//! Plain-text and markdown tables

/// A simple table of pre-formatted cells
///
/// The first column is left aligned, the rest right aligned.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.chars().count().max(3))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Render as aligned text with a rule under the header
    pub fn to_text(&self) -> String {
        let widths = self.widths();
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = vec![pad_cells(&self.headers, &widths).join("  "), rule.join("  ")];
        lines.extend(self.rows.iter().map(|row| pad_cells(row, &widths).join("  ")));

        lines
            .iter()
            .map(|line| format!("{}\n", line.trim_end()))
            .collect()
    }

    /// Render as a markdown pipe table
    pub fn to_markdown(&self) -> String {
        let widths = self.widths();
        let rule: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let dashes = "-".repeat(w - 1);
                if i == 0 {
                    format!(":{}", dashes)
                } else {
                    format!("{}:", dashes)
                }
            })
            .collect();

        let mut lines = vec![pad_cells(&self.headers, &widths), rule];
        lines.extend(self.rows.iter().map(|row| pad_cells(row, &widths)));

        lines
            .iter()
            .map(|cells| format!("| {} |\n", cells.join(" | ")))
            .collect()
    }
}

fn pad_cells(cells: &[String], widths: &[usize]) -> Vec<String> {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = *width)
            } else {
                format!("{:>width$}", cell, width = *width)
            }
        })
        .collect()
}
