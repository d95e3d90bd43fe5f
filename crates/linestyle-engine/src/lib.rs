pub mod parsing;

// Re-export key types for easier usage
pub use parsing::{
    BlockRule, ClassifiedLine, FrontMatterAttributes, FrontMatterRule, LineProcessor, LineRule,
    LineStyle, ProcessError, ProcessedDocument, RemoveFrom, RuleSet, Scope,
};
