use super::{
    tables::{TableAccumulator, is_delimiter_row, split_cells},
    types::{ClassifiedLine, Output},
};

enum TableStep {
    /// The line is not part of a table relationship.
    Unrelated,
    /// The line was a delimiter row; the header above was pulled into a new table.
    Opened,
    /// The line was a content row of the open table.
    Absorbed,
}

/// Lets a freshly classified line rewrite or remove the line emitted before it.
#[derive(Debug, Default)]
pub struct RetroactiveAdjuster {
    table: TableAccumulator,
}

impl RetroactiveAdjuster {
    /// Resolves `line` against the output so far and appends whatever remains of it.
    ///
    /// `raw` is the untouched input line, used for splitting table cells.
    pub fn adjust(&mut self, out: &mut Output, mut line: ClassifiedLine, raw: &str) {
        // The entry above an open table is the table itself; an underline
        // there closes the table and stays as a line of its own.
        if let Some(style) = line.style.affects_previous_line()
            && !self.table.is_open()
            && let Some(previous) = out.last_mut()
        {
            log::trace!("{:?} restyles {:?} as {style:?}", line.style, previous.text);
            previous.style = style;
            return;
        }

        if line.style.affects_previous_and_next().is_some() {
            match self.table_step(out, &mut line, raw) {
                TableStep::Absorbed => return,
                TableStep::Opened => {
                    out.push(line);
                    return;
                }
                TableStep::Unrelated => {}
            }
        }

        self.flush(out);
        out.push(line);
    }

    /// Attaches the rows of an open table to the last emitted line.
    pub fn flush(&mut self, out: &mut Output) {
        let Some(rows) = self.table.take() else {
            return;
        };
        if let Some(last) = out.last_mut() {
            last.table_rows = rows;
        }
    }

    fn table_step(&mut self, out: &mut Output, line: &mut ClassifiedLine, raw: &str) -> TableStep {
        let Some(previous) = out.last() else {
            return TableStep::Unrelated;
        };
        if !previous.style.is_table() {
            return TableStep::Unrelated;
        }

        let cells = split_cells(raw);

        if self.table.is_open() {
            if !previous.text.is_empty() {
                return TableStep::Unrelated;
            }
            self.table.push_row(cells);
            return TableStep::Absorbed;
        }

        let header = split_cells(&previous.text);
        if header.is_empty() || !is_delimiter_row(&cells) || cells.len() < header.len() {
            return TableStep::Unrelated;
        }

        out.pop_last();
        self.table.open(header);
        line.text.clear();
        TableStep::Opened
    }
}
