use crate::kb::{DataPaths, KnowledgeBase};
use crate::oracle::Evaluation;
use crate::splitters::SplitterKind;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How many failures to list per oracle set in text mode.
const MAX_LISTED_FAILURES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One split identifier, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitRecord {
    pub identifier: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonInfo<'a> {
    frequencies: &'a str,
    dictionary: &'a str,
    special_terms: Option<String>,
    frequency_entries: usize,
    frequency_total: u64,
    dictionary_words: usize,
    special_term_count: usize,
}

pub fn print_splits(records: &[SplitRecord], colored_output: bool, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for record in records {
                println!("{}", format_split(record, colored_output));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
    }
    Ok(())
}

pub fn format_split(record: &SplitRecord, colored_output: bool) -> String {
    if colored_output {
        let tokens = record
            .tokens
            .iter()
            .map(|t| t.green().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", format!("{}:", record.identifier).bold(), tokens)
    } else {
        format!("{}: {}", record.identifier, record.tokens.join(" "))
    }
}

pub fn print_evaluations(
    evaluations: &[Evaluation],
    colored_output: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => evaluations
            .iter()
            .for_each(|e| print_text_evaluation(e, colored_output)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(evaluations)?),
    }
    Ok(())
}

fn print_text_evaluation(evaluation: &Evaluation, colored_output: bool) {
    if colored_output {
        println!("\n{}", evaluation.name.bold().underline());
    } else {
        println!("\n{}", evaluation.name);
    }

    for failure in evaluation.failures.iter().take(MAX_LISTED_FAILURES) {
        let expected = failure.expected.join(",");
        let actual = failure.actual.join(",");
        if colored_output {
            println!(
                "  {} {} {} {}",
                failure.identifier.bold(),
                expected.green(),
                "≠".dimmed(),
                actual.red()
            );
        } else {
            println!("  {} {} ≠ {}", failure.identifier, expected, actual);
        }
    }
    let hidden = evaluation.failures.len().saturating_sub(MAX_LISTED_FAILURES);
    if hidden > 0 {
        println!("  ... and {} more", hidden);
    }

    let summary = format!(
        "{}/{} correct ({:.2}%)",
        evaluation.passed(),
        evaluation.total,
        evaluation.accuracy() * 100.0
    );
    match (colored_output, evaluation.failures.is_empty()) {
        (true, true) => println!("{} {}", "✓".green().bold(), summary.green().bold()),
        (true, false) => println!("{} {}", "✗".red().bold(), summary.bold()),
        (false, true) => println!("✓ {}", summary),
        (false, false) => println!("✗ {}", summary),
    }
}

pub fn print_splitter_list(colored_output: bool) {
    for kind in SplitterKind::ALL {
        let data = if kind.needs_knowledge_base() { " [data]" } else { "" };
        if colored_output {
            println!(
                "  {:<16}{}{}",
                kind.name().cyan().bold(),
                kind.description(),
                data.dimmed()
            );
        } else {
            println!("  {:<16}{}{}", kind.name(), kind.description(), data);
        }
    }
}

pub fn print_info(
    kb: &KnowledgeBase,
    paths: &DataPaths,
    colored_output: bool,
    format: &OutputFormat,
) -> Result<()> {
    let frequencies = paths.frequencies.display().to_string();
    let dictionary = paths.dictionary.display().to_string();
    let info = JsonInfo {
        frequencies: &frequencies,
        dictionary: &dictionary,
        special_terms: paths
            .special_terms
            .as_ref()
            .map(|p| p.display().to_string()),
        frequency_entries: kb.frequencies().len(),
        frequency_total: kb.frequencies().total(),
        dictionary_words: kb.dictionary().len(),
        special_term_count: kb.special_terms().len(),
    };

    if *format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let rows = [
        ("Frequencies:", format!("{} ({} entries, {} occurrences)", info.frequencies, info.frequency_entries, info.frequency_total)),
        ("Dictionary:", format!("{} ({} words)", info.dictionary, info.dictionary_words)),
        (
            "Special terms:",
            format!(
                "{} ({} terms)",
                info.special_terms.as_deref().unwrap_or("built-in"),
                info.special_term_count
            ),
        ),
    ];
    for (label, value) in rows {
        if colored_output {
            println!("{:<15} {}", label.bold(), value);
        } else {
            println!("{:<15} {}", label, value);
        }
    }
    Ok(())
}
