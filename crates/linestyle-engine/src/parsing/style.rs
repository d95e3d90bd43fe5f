use serde::{Deserialize, Serialize};

/// The style assigned to a classified line.
///
/// The set is closed; every behaviour the processor needs from a style is
/// answered by one of the `match`-based queries below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Metadata preamble content.
    FrontMatter,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    /// A `===` underline that turns the line above it into an `H1`.
    UnderlineH1,
    /// A `---` underline that turns the line above it into an `H2`.
    UnderlineH2,
    Body,
    Blockquote,
    CodeBlock,
    UnorderedList,
    UnorderedListIndentFirstOrder,
    UnorderedListIndentSecondOrder,
    OrderedList,
    OrderedListIndentFirstOrder,
    OrderedListIndentSecondOrder,
    /// A `[label]: url` link definition line.
    ReferencedLink,
    /// A pipe-delimited table row. The only table-capable style.
    Table,
}

impl LineStyle {
    /// Whether the line's text should be handed to an inline tokenizer.
    pub fn needs_further_tokenization(self) -> bool {
        !matches!(
            self,
            LineStyle::CodeBlock | LineStyle::ReferencedLink | LineStyle::FrontMatter
        )
    }

    /// If a line with this style is found, the style it gives to the line above.
    ///
    /// A `Some` result means the line itself is a marker and is never emitted.
    pub fn affects_previous_line(self) -> Option<LineStyle> {
        match self {
            LineStyle::UnderlineH1 => Some(LineStyle::H1),
            LineStyle::UnderlineH2 => Some(LineStyle::H2),
            _ => None,
        }
    }

    /// If a line with this style is found, the style it pairs with the line above.
    pub fn affects_previous_and_next(self) -> Option<LineStyle> {
        match self {
            LineStyle::Table => Some(LineStyle::Table),
            _ => None,
        }
    }

    pub fn is_table(self) -> bool {
        self.affects_previous_and_next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LineStyle::UnderlineH1, Some(LineStyle::H1))]
    #[case(LineStyle::UnderlineH2, Some(LineStyle::H2))]
    #[case(LineStyle::H1, None)]
    #[case(LineStyle::Table, None)]
    fn underline_styles_restyle_previous(
        #[case] style: LineStyle,
        #[case] expected: Option<LineStyle>,
    ) {
        assert_eq!(style.affects_previous_line(), expected);
    }

    #[test]
    fn only_table_is_table_capable() {
        assert!(LineStyle::Table.is_table());
        assert!(!LineStyle::Body.is_table());
        assert!(!LineStyle::UnderlineH2.is_table());
    }

    #[test]
    fn verbatim_styles_skip_tokenization() {
        assert!(!LineStyle::CodeBlock.needs_further_tokenization());
        assert!(!LineStyle::ReferencedLink.needs_further_tokenization());
        assert!(LineStyle::Body.needs_further_tokenization());
        assert!(LineStyle::Table.needs_further_tokenization());
    }
}
