use regex::Regex;
use serde::{Deserialize, Serialize};

use super::style::LineStyle;

/// Which part of a line a matched token is stripped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveFrom {
    Leading,
    Trailing,
    Both,
    /// Matches only when removing every occurrence of the token empties the line.
    EntireLine,
    /// Leaves the text untouched; the rule matches whenever the token is present.
    None,
}

/// Which line a rule's style lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Current,
    /// The line is a marker made only of the token's characters; it restyles the line above.
    Previous,
    /// The token brackets a region whose lines are dropped until the token reappears.
    UntilClose,
    /// The line takes part in a table together with the line above.
    PreAndBack,
}

/// A token-driven rule tested against a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRule {
    pub token: String,
    pub remove_from: RemoveFrom,
    pub trim: bool,
    pub scope: Scope,
    pub style: LineStyle,
    /// Minimum marker length for `Scope::Previous` rules.
    pub min_length: usize,
}

impl LineRule {
    pub fn new(token: impl Into<String>, style: LineStyle, remove_from: RemoveFrom) -> Self {
        Self {
            token: token.into(),
            remove_from,
            trim: true,
            scope: Scope::Current,
            style,
            min_length: 1,
        }
    }

    #[must_use]
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length.max(1);
        self
    }
}

/// A fenced verbatim region: opened by a line matching `start`, closed by a line equal to `end_token`.
#[derive(Debug, Clone)]
pub struct BlockRule {
    pub start: Regex,
    pub end_token: String,
    pub style: LineStyle,
}

impl BlockRule {
    pub fn new(start: Regex, end_token: impl Into<String>, style: LineStyle) -> Self {
        Self {
            start,
            end_token: end_token.into(),
            style,
        }
    }
}

/// Delimiters and separator of a key/value metadata preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatterRule {
    pub open_tag: String,
    pub close_tag: String,
    pub separator: char,
}

impl FrontMatterRule {
    pub fn new(open_tag: impl Into<String>, close_tag: impl Into<String>, separator: char) -> Self {
        Self {
            open_tag: open_tag.into(),
            close_tag: close_tag.into(),
            separator,
        }
    }
}

/// Every input a [`LineProcessor`](super::LineProcessor) is configured with.
///
/// Table order is significant everywhere: the first matching rule wins.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub block_rules: Vec<BlockRule>,
    pub line_rules: Vec<LineRule>,
    pub default_style: LineStyle,
    pub front_matter_rules: Vec<FrontMatterRule>,
    pub empty_line_style: Option<LineStyle>,
}

impl RuleSet {
    /// An empty table: every non-blank line gets `default_style`.
    pub fn new(default_style: LineStyle) -> Self {
        Self {
            block_rules: vec![],
            line_rules: vec![],
            default_style,
            front_matter_rules: vec![],
            empty_line_style: None,
        }
    }

    #[must_use]
    pub fn with_block_rules(mut self, rules: Vec<BlockRule>) -> Self {
        self.block_rules = rules;
        self
    }

    #[must_use]
    pub fn with_line_rules(mut self, rules: Vec<LineRule>) -> Self {
        self.line_rules = rules;
        self
    }

    #[must_use]
    pub fn with_front_matter_rules(mut self, rules: Vec<FrontMatterRule>) -> Self {
        self.front_matter_rules = rules;
        self
    }

    #[must_use]
    pub fn with_empty_line_style(mut self, style: LineStyle) -> Self {
        self.empty_line_style = Some(style);
        self
    }
}
