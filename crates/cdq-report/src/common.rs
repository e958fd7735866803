//! Shared line-building helpers.

const TITLE_RULE: usize = 60;
const SECTION_RULE: usize = 40;

/// Accumulates report lines.
#[derive(Debug, Default)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    /// Starts a report with its title and a double rule.
    pub fn titled(title: &str) -> Self {
        let mut lines = Self::default();
        lines.push(title);
        lines.push("=".repeat(TITLE_RULE));
        lines.blank();
        lines
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Section heading followed by a single rule.
    pub fn section(&mut self, heading: &str) {
        self.push(heading);
        self.push("-".repeat(SECTION_RULE));
    }

    /// Section heading framed by full-width rules.
    pub fn banner(&mut self, heading: &str) {
        self.push("-".repeat(TITLE_RULE));
        self.push(heading);
        self.push("-".repeat(TITLE_RULE));
    }

    /// Closes the report.
    pub fn finish(mut self) -> Vec<String> {
        self.push("END OF REPORT");
        self.push("=".repeat(TITLE_RULE));
        self.lines
    }
}

/// Formats a list of row numbers as `[1, 4, 7]`.
pub fn row_list(rows: &[usize]) -> String {
    let rows: Vec<String> = rows.iter().map(usize::to_string).collect();
    format!("[{}]", rows.join(", "))
}

/// Rounded whole percentage; zero when `total` is zero.
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as usize
    }
}

/// Pads every cell to `width` and joins them with ` | `.
pub fn table_row<'a>(cells: impl IntoIterator<Item = &'a str>, width: usize) -> String {
    let cells: Vec<String> = cells
        .into_iter()
        .map(|cell| format!("{cell:<width$}"))
        .collect();
    format!("  {}", cells.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        assert_eq!(row_list(&[1, 4, 7]), "[1, 4, 7]");
        assert_eq!(row_list(&[]), "[]");
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(table_row(["a", "bb"], 3), "  a   | bb");

        let mut lines = Lines::titled("TITLE");
        lines.section("PART:");
        let lines = lines.finish();
        assert_eq!(lines[0], "TITLE");
        assert_eq!(lines[3], "PART:");
        assert_eq!(lines.last().map(String::len), Some(60));
    }
}
