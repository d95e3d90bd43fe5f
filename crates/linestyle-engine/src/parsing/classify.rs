use super::{
    rules::{LineRule, RemoveFrom, RuleSet, Scope},
    types::ClassifiedLine,
};

/// Classifies lines that sit outside any block region against the rule table.
pub struct LineClassifier<'r> {
    rules: &'r RuleSet,
}

impl<'r> LineClassifier<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Classifies one line.
    ///
    /// `open_region` holds the token of an `UntilClose` region opened by an
    /// earlier line. `None` means the line produces no output: it was blank
    /// with no empty-line style, it bracketed a region, or it sat inside one.
    pub fn classify(&self, line: &str, open_region: &mut Option<&'r str>) -> Option<ClassifiedLine> {
        let rules: &'r RuleSet = self.rules;

        if let Some(token) = *open_region
            && line.trim() != token
        {
            return None;
        }

        if line.trim().is_empty() {
            return rules
                .empty_line_style
                .map(|style| ClassifiedLine::new("", style));
        }

        let current = rules
            .line_rules
            .iter()
            .filter(|r| !r.token.is_empty() && r.scope != Scope::Previous);

        for rule in current {
            let working = if rule.trim { line.trim() } else { line };
            if !working.contains(rule.token.as_str()) {
                continue;
            }
            let Some(stripped) = strip_token(rule, working) else {
                continue;
            };

            if rule.scope == Scope::UntilClose {
                *open_region = match *open_region {
                    None => Some(rule.token.as_str()),
                    Some(token) if token == rule.token => None,
                    other => other,
                };
                return None;
            }

            let text = if rule.trim { stripped.trim() } else { stripped };
            return Some(ClassifiedLine::new(text, rule.style));
        }

        let previous = rules
            .line_rules
            .iter()
            .filter(|r| !r.token.is_empty() && r.scope == Scope::Previous);

        for rule in previous {
            let working = if rule.trim { line.trim() } else { line };
            if is_marker(rule, working) {
                return Some(ClassifiedLine::new("", rule.style));
            }
        }

        Some(ClassifiedLine::new(line.trim(), rules.default_style))
    }
}

/// Applies the rule's removal policy, returning the new text only if the rule matched.
fn strip_token<'a>(rule: &LineRule, text: &'a str) -> Option<&'a str> {
    let token = rule.token.as_str();
    match rule.remove_from {
        RemoveFrom::Leading => text.strip_prefix(token),
        RemoveFrom::Trailing => strip_trailing(text, token),
        RemoveFrom::Both => {
            let leading = text.strip_prefix(token);
            strip_trailing(leading.unwrap_or(text), token).or(leading)
        }
        // Only a line made entirely of the token matches, not one that merely mentions it.
        RemoveFrom::EntireLine => text.replace(token, "").is_empty().then_some(""),
        RemoveFrom::None => Some(text),
    }
}

fn strip_trailing<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    text.strip_suffix(token)
}

fn is_marker(rule: &LineRule, text: &str) -> bool {
    text.chars().count() >= rule.min_length && text.chars().all(|c| rule.token.contains(c))
}
