use std::sync::OnceLock;

use regex::Regex;

use super::{
    rules::{BlockRule, FrontMatterRule, LineRule, RemoveFrom, RuleSet, Scope},
    style::LineStyle,
};

pub const BACKTICK_FENCE: &str = "```";
pub const TILDE_FENCE: &str = "~~~";

impl RuleSet {
    /// The conventional Markdown line rules.
    ///
    /// Order matters: indented list markers precede their plain forms, and
    /// longer heading markers precede shorter ones.
    pub fn markdown() -> Self {
        use LineStyle::*;

        let line_rules = vec![
            underline("=", UnderlineH1),
            underline("-", UnderlineH2),
            LineRule::new("\t\t- ", UnorderedListIndentSecondOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("\t- ", UnorderedListIndentFirstOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("- ", UnorderedList, RemoveFrom::Leading),
            LineRule::new("\t\t* ", UnorderedListIndentSecondOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("\t* ", UnorderedListIndentFirstOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("* ", UnorderedList, RemoveFrom::Leading),
            LineRule::new("\t\t1. ", OrderedListIndentSecondOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("\t1. ", OrderedListIndentFirstOrder, RemoveFrom::Leading).untrimmed(),
            LineRule::new("1. ", OrderedList, RemoveFrom::Leading),
            LineRule::new("    ", CodeBlock, RemoveFrom::Leading).untrimmed(),
            LineRule::new("\t", CodeBlock, RemoveFrom::Leading).untrimmed(),
            LineRule::new(">", Blockquote, RemoveFrom::Leading),
            LineRule::new("###### ", H6, RemoveFrom::Both),
            LineRule::new("##### ", H5, RemoveFrom::Both),
            LineRule::new("#### ", H4, RemoveFrom::Both),
            LineRule::new("### ", H3, RemoveFrom::Both),
            LineRule::new("## ", H2, RemoveFrom::Both),
            LineRule::new("# ", H1, RemoveFrom::Both),
            LineRule::new("|", Table, RemoveFrom::None).scope(Scope::PreAndBack),
        ];

        RuleSet::new(Body)
            .with_block_rules(vec![
                BlockRule::new(backtick_fence().clone(), BACKTICK_FENCE, CodeBlock),
                BlockRule::new(tilde_fence().clone(), TILDE_FENCE, CodeBlock),
            ])
            .with_line_rules(line_rules)
            .with_front_matter_rules(vec![FrontMatterRule::new("---", "---", ':')])
    }
}

fn underline(token: &str, style: LineStyle) -> LineRule {
    LineRule::new(token, style, RemoveFrom::EntireLine)
        .scope(Scope::Previous)
        .min_length(2)
}

fn backtick_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^```").expect("Invalid backtick fence regex"))
}

fn tilde_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^~~~").expect("Invalid tilde fence regex"))
}
