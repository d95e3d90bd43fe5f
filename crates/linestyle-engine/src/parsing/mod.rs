//! # Line Classification
//!
//! Turns raw text into an ordered list of [`ClassifiedLine`]s driven entirely
//! by a caller-supplied [`RuleSet`].
//!
//! ## Phases
//!
//! 1. **Front matter** (`front_matter`): a leading key/value preamble is
//!    stripped and captured as attributes
//! 2. **Block regions** (`blocks`): fenced regions are emitted verbatim
//! 3. **Line rules** (`classify`): every other line is matched against the
//!    ordered rule table, first match wins
//! 4. **Retroactive adjustment** (`adjust`, `tables`): underline markers
//!    restyle the line above; delimiter and content rows fold into a table
//!
//! ## Key Invariants
//!
//! - All mutable scan state lives in a per-call context, so one
//!   [`LineProcessor`] can be shared and reused freely
//! - Block markers, consumed underlines and table delimiter rows never
//!   appear in the output as lines of their own

pub(crate) mod adjust;
pub mod blocks;
pub mod classify;
pub mod error;
pub mod front_matter;
pub mod lines;
pub mod markdown;
pub mod rules;
pub mod style;
pub mod tables;
pub mod types;


use adjust::RetroactiveAdjuster;
use blocks::{BlockMatcher, BlockStep};
use classify::LineClassifier;
use lines::split_lines;

pub use error::ProcessError;
pub use front_matter::FrontMatterAttributes;
pub use rules::{BlockRule, FrontMatterRule, LineRule, RemoveFrom, RuleSet, Scope};
pub use style::LineStyle;
pub use types::ClassifiedLine;
use types::Output;

/// The result of one [`LineProcessor::process`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub lines: Vec<ClassifiedLine>,
    pub front_matter: FrontMatterAttributes,
    /// Token of an `UntilClose` region still open when the input ended.
    /// Every line after its opening marker was dropped.
    pub unterminated_region: Option<String>,
}

/// Classifies documents against an immutable rule set.
#[derive(Debug, Clone)]
pub struct LineProcessor {
    rules: RuleSet,
}

impl LineProcessor {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// A processor using [`RuleSet::markdown`].
    pub fn markdown() -> Self {
        Self::new(RuleSet::markdown())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn process(&self, text: &str) -> Result<ProcessedDocument, ProcessError> {
        let lines = split_lines(text);
        let (lines, front_matter) = front_matter::extract(&lines, &self.rules.front_matter_rules)?;

        let mut ctx = ParseContext::new(&self.rules);
        for line in lines {
            ctx.push(line);
        }
        Ok(ctx.finish(front_matter))
    }
}

/// Scan state for a single `process` call.
struct ParseContext<'r> {
    blocks: BlockMatcher<'r>,
    classifier: LineClassifier<'r>,
    open_region: Option<&'r str>,
    adjuster: RetroactiveAdjuster,
    out: Output,
}

impl<'r> ParseContext<'r> {
    fn new(rules: &'r RuleSet) -> Self {
        Self {
            blocks: BlockMatcher::new(&rules.block_rules),
            classifier: LineClassifier::new(rules),
            open_region: None,
            adjuster: RetroactiveAdjuster::default(),
            out: Output::default(),
        }
    }

    fn push(&mut self, line: &str) {
        match self.blocks.push(line) {
            BlockStep::Opened(_) | BlockStep::Closed(_) => return,
            BlockStep::Inside(rule) => {
                self.adjuster.flush(&mut self.out);
                self.out.push(ClassifiedLine::literal(line, rule.style));
                return;
            }
            BlockStep::Outside => {}
        }

        match self.classifier.classify(line, &mut self.open_region) {
            Some(classified) => self.adjuster.adjust(&mut self.out, classified, line),
            // A dropped line cannot continue a table.
            None => self.adjuster.flush(&mut self.out),
        }
    }

    fn finish(mut self, front_matter: FrontMatterAttributes) -> ProcessedDocument {
        // EOF flush
        self.adjuster.flush(&mut self.out);

        if let Some(rule) = self.blocks.active() {
            log::debug!("input ended inside block opened by {:?}", rule.start.as_str());
        }
        if let Some(token) = self.open_region {
            log::warn!("input ended inside region opened by {token:?}; remaining lines were dropped");
        }

        ProcessedDocument {
            lines: self.out.into_lines(),
            front_matter,
            unterminated_region: self.open_region.map(String::from),
        }
    }
}
