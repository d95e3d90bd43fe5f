use std::collections::BTreeMap;

use super::{error::ProcessError, rules::FrontMatterRule};

/// Key/value pairs captured from a document's metadata preamble.
pub type FrontMatterAttributes = BTreeMap<String, String>;

/// Strips a front-matter preamble from the start of `lines`.
///
/// Returns the remaining lines and the captured attributes. When the first
/// line opens none of the rules, the lines come back untouched.
///
/// Each attribute line is split at its first separator. Both key and value
/// are trimmed, so `title: value` yields `"value"`; later separators stay in
/// the value.
pub fn extract<'a>(
    lines: &[&'a str],
    rules: &[FrontMatterRule],
) -> Result<(Vec<&'a str>, FrontMatterAttributes), ProcessError> {
    let mut attributes = FrontMatterAttributes::new();

    let Some(first) = lines.first() else {
        return Ok((vec![], attributes));
    };
    let Some(rule) = rules.iter().find(|r| first.trim() == r.open_tag) else {
        return Ok((lines.to_vec(), attributes));
    };

    let mut rest = lines[1..].iter();
    let mut closed = false;
    for line in rest.by_ref() {
        if line.trim() == rule.close_tag {
            closed = true;
            break;
        }
        // Lines without a separator carry no pair.
        if let Some((key, value)) = line.split_once(rule.separator) {
            log::trace!("front matter {key:?} = {value:?}");
            attributes.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    if !closed {
        return Err(ProcessError::UnterminatedFrontMatter {
            open_tag: rule.open_tag.clone(),
            close_tag: rule.close_tag.clone(),
        });
    }

    let remaining = rest
        .skip_while(|line| line.trim().is_empty())
        .copied()
        .collect();
    log::debug!("extracted {} front matter attributes", attributes.len());
    Ok((remaining, attributes))
}
