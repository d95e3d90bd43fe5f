use serde::Serialize;

use super::style::LineStyle;

/// One line of output: its text after token removal, its style, and any
/// table rows attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub style: LineStyle,
    /// Header row first, then content rows. Only ever set on `Table` lines.
    pub table_rows: Vec<Vec<String>>,
    /// True for verbatim block content, which skipped trimming and rule matching.
    pub literal: bool,
}

impl ClassifiedLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
            table_rows: vec![],
            literal: false,
        }
    }

    pub fn literal(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            literal: true,
            ..Self::new(text, style)
        }
    }
}

/// The classified lines produced so far.
///
/// Append-only, except that the most recently emitted line may be rewritten
/// or removed through [`last_mut`](Self::last_mut) and [`pop_last`](Self::pop_last).
#[derive(Debug, Default)]
pub(crate) struct Output {
    lines: Vec<ClassifiedLine>,
}

impl Output {
    pub fn push(&mut self, line: ClassifiedLine) {
        self.lines.push(line);
    }

    pub fn last(&self) -> Option<&ClassifiedLine> {
        self.lines.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut ClassifiedLine> {
        self.lines.last_mut()
    }

    pub fn pop_last(&mut self) -> Option<ClassifiedLine> {
        self.lines.pop()
    }

    pub fn into_lines(self) -> Vec<ClassifiedLine> {
        self.lines
    }
}
