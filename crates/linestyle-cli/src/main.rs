use anyhow::{Context, Result};
use linestyle_config::RulesConfig;
use linestyle_engine::{LineProcessor, ProcessedDocument};
use std::io::{self, Read, Write};
use std::{env, path::PathBuf, process};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "linestyle".to_string());

    let (input, rules_path) = match args.as_slice() {
        [_, input] => (input.clone(), None),
        [_, input, rules] => (input.clone(), Some(PathBuf::from(rules))),
        _ => {
            eprintln!("Usage: {program_name} <file|-> [rules.toml]");
            eprintln!(
                "Without a rules file, {} is used if present, else the stock Markdown rules",
                RulesConfig::config_path().display()
            );
            process::exit(1);
        }
    };

    if let Err(e) = run(&input, rules_path) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(input: &str, rules_path: Option<PathBuf>) -> Result<()> {
    let processor = load_processor(rules_path)?;
    let text = read_input(input)?;
    let doc = processor
        .process(&text)
        .with_context(|| format!("Failed to classify {input}"))?;

    let mut stdout = io::stdout().lock();
    render(&doc, &mut stdout).context("Failed to write output")?;
    stdout.flush().context("Failed to write output")
}

fn load_processor(rules_path: Option<PathBuf>) -> Result<LineProcessor> {
    let config = match rules_path {
        Some(path) => Some(
            RulesConfig::load_from_path(&path)?
                .with_context(|| format!("Rules file not found: {}", path.display()))?,
        ),
        None => RulesConfig::load()?,
    };

    match config {
        Some(config) => Ok(config.into_processor()?),
        None => {
            log::info!("No rules file found, using stock Markdown rules");
            Ok(LineProcessor::markdown())
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
}

/// Writes a classified document: front matter first, then one line per entry.
fn render(doc: &ProcessedDocument, out: &mut impl Write) -> io::Result<()> {
    for (key, value) in &doc.front_matter {
        writeln!(out, "{key} = {value}")?;
    }
    if !doc.front_matter.is_empty() {
        writeln!(out, "---")?;
    }

    for line in &doc.lines {
        let marker = if line.literal { " [literal]" } else { "" };
        writeln!(out, "{:?}{marker}\t{}", line.style, line.text)?;
        for row in &line.table_rows {
            writeln!(out, "\t| {} |", row.join(" | "))?;
        }
    }

    if let Some(token) = &doc.unterminated_region {
        writeln!(out, "(unterminated region opened by {token:?})")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(doc: &ProcessedDocument) -> String {
        let mut out = Vec::new();
        render(doc, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_front_matter_lines_and_tables() {
        let doc = LineProcessor::markdown()
            .process("---\ntitle: Demo\n---\n# Hello\n```\n  code\n```\n| A | B |\n| --- | --- |\n| 1 | 2 |")
            .unwrap();

        assert_eq!(
            rendered(&doc),
            "title = Demo\n---\nH1\tHello\nCodeBlock [literal]\t  code\nTable\t\n\t| A | B |\n\t| 1 | 2 |\n"
        );
    }

    #[test]
    fn renders_plain_document_without_front_matter_separator() {
        let doc = LineProcessor::markdown().process("just text").unwrap();
        assert_eq!(rendered(&doc), "Body\tjust text\n");
    }
}
