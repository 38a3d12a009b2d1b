//! Plain-text column formatting for script reports.

/// Per-column text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Format rows of cells into aligned columns.
///
/// Column widths come from the widest cell in each column, columns are joined
/// with two spaces, and trailing whitespace is stripped from every line.
/// Missing alignments default to [`Alignment::Left`]; short rows are padded
/// with empty cells.
pub fn format_columns(rows: &[Vec<String>], alignments: &[Alignment]) -> Vec<String> {
    let column_count = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let padding = width.saturating_sub(cell.chars().count());
                match alignments.get(i).copied().unwrap_or(Alignment::Left) {
                    Alignment::Left => {
                        line.push_str(cell);
                        line.push_str(&" ".repeat(padding));
                    }
                    Alignment::Right => {
                        line.push_str(&" ".repeat(padding));
                        line.push_str(cell);
                    }
                    Alignment::Center => {
                        let left = padding / 2;
                        line.push_str(&" ".repeat(left));
                        line.push_str(cell);
                        line.push_str(&" ".repeat(padding - left));
                    }
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}
