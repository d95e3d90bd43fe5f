use super::rules::BlockRule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum BlockState {
    #[default]
    Inactive,
    /// Index into the rule table of the block currently open.
    Active(usize),
}

/// What the block matcher decided about one line.
#[derive(Debug, Clone, Copy)]
pub enum BlockStep<'r> {
    /// Not inside any block; the line goes on to line classification.
    Outside,
    /// The line opened a block and is consumed.
    Opened(&'r BlockRule),
    /// The line closed the open block and is consumed.
    Closed(&'r BlockRule),
    /// The line is verbatim content of the open block.
    Inside(&'r BlockRule),
}

/// Two-state machine recognizing fenced verbatim regions.
///
/// At most one block rule is active at a time; while one is, no other rule's
/// start pattern is consulted.
pub struct BlockMatcher<'r> {
    rules: &'r [BlockRule],
    state: BlockState,
}

impl<'r> BlockMatcher<'r> {
    pub fn new(rules: &'r [BlockRule]) -> Self {
        Self {
            rules,
            state: BlockState::Inactive,
        }
    }

    pub fn push(&mut self, line: &str) -> BlockStep<'r> {
        match self.state {
            BlockState::Inactive => {
                let Some((idx, rule)) = self
                    .rules
                    .iter()
                    .enumerate()
                    .find(|(_, r)| r.start.is_match(line))
                else {
                    return BlockStep::Outside;
                };
                log::debug!("block opened by {:?}", rule.start.as_str());
                self.state = BlockState::Active(idx);
                BlockStep::Opened(rule)
            }
            BlockState::Active(idx) => {
                let rule = &self.rules[idx];
                if line == rule.end_token {
                    log::debug!("block closed by {:?}", rule.end_token);
                    self.state = BlockState::Inactive;
                    BlockStep::Closed(rule)
                } else {
                    BlockStep::Inside(rule)
                }
            }
        }
    }

    pub fn active(&self) -> Option<&'r BlockRule> {
        match self.state {
            BlockState::Inactive => None,
            BlockState::Active(idx) => Some(&self.rules[idx]),
        }
    }
}
