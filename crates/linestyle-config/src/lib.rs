use linestyle_engine::{
    BlockRule, FrontMatterRule, LineProcessor, LineRule, LineStyle, RemoveFrom, RuleSet, Scope,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read rules file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse rules file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid block start pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A fenced block rule as written in the rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Regular expression a line must match to open the block.
    pub start: String,
    /// Exact line that closes the block.
    pub end: String,
    pub style: LineStyle,
}

/// A line rule as written in the rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConfig {
    pub token: String,
    pub remove_from: RemoveFrom,
    #[serde(default = "default_trim")]
    pub trim: bool,
    #[serde(default)]
    pub scope: Scope,
    pub style: LineStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

fn default_trim() -> bool {
    true
}

/// Rule tables loaded from TOML. Array order is rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub default_style: LineStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_line_style: Option<LineStyle>,
    #[serde(default, rename = "front_matter")]
    pub front_matter: Vec<FrontMatterRule>,
    #[serde(default, rename = "block")]
    pub blocks: Vec<BlockConfig>,
    #[serde(default, rename = "line")]
    pub lines: Vec<LineConfig>,
}

impl RulesConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path = Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            log::debug!("no rules file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: RulesConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        log::info!(
            "Loaded {} line rules and {} block rules from {}",
            config.lines.len(),
            config.blocks.len(),
            config_path.display()
        );
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/linestyle");
        PathBuf::from(config_dir.as_ref()).join("rules.toml")
    }

    /// The stock Markdown table, ready to be saved and edited.
    pub fn markdown() -> Self {
        Self::from(&RuleSet::markdown())
    }

    /// Compiles block patterns and builds the engine's rule set.
    pub fn into_rule_set(self) -> Result<RuleSet, ConfigError> {
        let block_rules = self
            .blocks
            .into_iter()
            .map(|b| -> Result<BlockRule, ConfigError> {
                let start = Regex::new(&b.start).map_err(|source| ConfigError::InvalidPattern {
                    pattern: b.start.clone(),
                    source,
                })?;
                Ok(BlockRule::new(start, b.end, b.style))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let line_rules = self.lines.into_iter().map(LineRule::from).collect();

        let mut rules = RuleSet::new(self.default_style)
            .with_block_rules(block_rules)
            .with_line_rules(line_rules)
            .with_front_matter_rules(self.front_matter);
        rules.empty_line_style = self.empty_line_style;
        Ok(rules)
    }

    pub fn into_processor(self) -> Result<LineProcessor, ConfigError> {
        Ok(LineProcessor::new(self.into_rule_set()?))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl From<LineConfig> for LineRule {
    fn from(config: LineConfig) -> Self {
        let mut rule = LineRule::new(config.token, config.style, config.remove_from)
            .scope(config.scope)
            .min_length(config.min_length.unwrap_or(1));
        rule.trim = config.trim;
        rule
    }
}

impl From<&LineRule> for LineConfig {
    fn from(rule: &LineRule) -> Self {
        Self {
            token: rule.token.clone(),
            remove_from: rule.remove_from,
            trim: rule.trim,
            scope: rule.scope,
            style: rule.style,
            min_length: (rule.min_length > 1).then_some(rule.min_length),
        }
    }
}

impl From<&RuleSet> for RulesConfig {
    fn from(rules: &RuleSet) -> Self {
        Self {
            default_style: rules.default_style,
            empty_line_style: rules.empty_line_style,
            front_matter: rules.front_matter_rules.clone(),
            blocks: rules
                .block_rules
                .iter()
                .map(|b| BlockConfig {
                    start: b.start.as_str().to_string(),
                    end: b.end_token.clone(),
                    style: b.style,
                })
                .collect(),
            lines: rules.line_rules.iter().map(LineConfig::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    const SAMPLE: &str = r##"
default_style = "body"
empty_line_style = "body"

[[front_matter]]
open_tag = "+++"
close_tag = "+++"
separator = "="

[[block]]
start = "^```"
end = "```"
style = "code_block"

[[line]]
token = "# "
remove_from = "both"
style = "h1"

[[line]]
token = "    "
remove_from = "leading"
trim = false
style = "code_block"

[[line]]
token = "="
remove_from = "entire_line"
scope = "previous"
style = "underline_h1"
min_length = 3
"##;

    #[test]
    fn test_config_path() {
        let config_path = RulesConfig::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/linestyle/rules.toml"));
    }

    #[test]
    fn test_parse_sample_rules() {
        let config: RulesConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.default_style, LineStyle::Body);
        assert_eq!(config.empty_line_style, Some(LineStyle::Body));
        assert_eq!(config.front_matter, vec![FrontMatterRule::new("+++", "+++", '=')]);
        assert_eq!(config.blocks.len(), 1);
        assert_eq!(config.lines.len(), 3);
        assert!(config.lines[0].trim);
        assert!(!config.lines[1].trim);
        assert_eq!(config.lines[0].scope, Scope::Current);
        assert_eq!(config.lines[2].scope, Scope::Previous);
        assert_eq!(config.lines[2].min_length, Some(3));
    }

    #[test]
    fn test_rule_order_is_preserved() {
        let config: RulesConfig = toml::from_str(SAMPLE).unwrap();
        let rules = config.into_rule_set().unwrap();

        let tokens: Vec<_> = rules.line_rules.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["# ", "    ", "="]);
        assert_eq!(rules.line_rules[2].min_length, 3);
    }

    #[test]
    fn test_processor_from_config() {
        let config: RulesConfig = toml::from_str(SAMPLE).unwrap();
        let processor = config.into_processor().unwrap();

        let doc = processor
            .process("+++\ntitle = Hi\n+++\nTitle\n===\n```\n  raw\n```")
            .unwrap();

        assert_eq!(doc.front_matter["title"], "Hi");
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[0].style, LineStyle::H1);
        assert_eq!(doc.lines[1].text, "  raw");
        assert!(doc.lines[1].literal);
    }

    #[test]
    fn test_invalid_block_pattern() {
        let config = RulesConfig {
            default_style: LineStyle::Body,
            empty_line_style: None,
            front_matter: vec![],
            blocks: vec![BlockConfig {
                start: "(unclosed".into(),
                end: ")".into(),
                style: LineStyle::CodeBlock,
            }],
            lines: vec![],
        };

        let err = config.into_rule_set().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_unknown_style_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("rules.toml");
        std::fs::write(&config_file, "default_style = \"sparkly\"\n").unwrap();

        let err = RulesConfig::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = RulesConfig::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_markdown_rules() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("rules.toml");
        let markdown = RulesConfig::markdown();

        markdown.save_to_path(&config_file).unwrap();
        let loaded = RulesConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, markdown);
    }

    #[test]
    fn test_markdown_config_matches_stock_processor() {
        let text = "---\nk: v\n---\nTitle\n===\n- a\n\t- b\n```\ncode\n```\n| A | B |\n| --- | --- |\n| 1 | 2 |";
        let from_config = RulesConfig::markdown().into_processor().unwrap();

        assert_eq!(
            from_config.process(text).unwrap(),
            LineProcessor::markdown().process(text).unwrap()
        );
    }

    #[test]
    fn test_load_expands_env_var_in_path() {
        let temp_dir = TempDir::new().unwrap();
        RulesConfig::markdown()
            .save_to_path(temp_dir.path().join("rules.toml"))
            .unwrap();

        unsafe {
            env::set_var("LINESTYLE_TEST_RULES_DIR", temp_dir.path());
        }

        let loaded = RulesConfig::load_from_path("$LINESTYLE_TEST_RULES_DIR/rules.toml").unwrap();
        assert!(loaded.is_some());

        unsafe {
            env::remove_var("LINESTYLE_TEST_RULES_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = RulesConfig::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }
}
