/// Header and content rows of a table that is still being read.
///
/// Empty means no table is open.
#[derive(Debug, Default)]
pub struct TableAccumulator {
    rows: Vec<Vec<String>>,
}

impl TableAccumulator {
    pub fn is_open(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn open(&mut self, header: Vec<String>) {
        log::debug!("table opened with {} columns", header.len());
        self.rows = vec![header];
    }

    /// Appends a content row, padded with empty cells up to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        let width = self.rows.first().map_or(0, Vec::len);
        if row.len() < width {
            row.resize(width, String::new());
        }
        self.rows.push(row);
    }

    /// Closes the table, handing back its rows if one was open.
    pub fn take(&mut self) -> Option<Vec<Vec<String>>> {
        if !self.is_open() {
            return None;
        }
        let rows = std::mem::take(&mut self.rows);
        log::debug!("table closed with {} rows", rows.len());
        Some(rows)
    }
}

/// Splits a row on `|`, trimming cells and dropping empty ones.
///
/// Dropping empties strips the artifacts of leading and trailing pipes.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect()
}

/// Whether every cell is a delimiter: three or more dashes, optionally
/// wrapped in `:` alignment markers.
pub fn is_delimiter_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| is_delimiter_cell(cell))
}

fn is_delimiter_cell(cell: &str) -> bool {
    let dashes = cell.strip_prefix(':').unwrap_or(cell);
    let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
    dashes.len() >= 3 && dashes.chars().all(|c| c == '-')
}
