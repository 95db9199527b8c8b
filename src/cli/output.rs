use crate::TypoReport;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
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

#[derive(Debug, Serialize)]
struct JsonTypo {
    word: String,
    suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    total_typos: usize,
    typos: Vec<JsonTypo>,
    unresolved: Vec<String>,
}

pub fn print_report(report: &TypoReport, colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print_table(report, colored_output),
        OutputFormat::Json => print_json(report),
    }
}

fn print_table(report: &TypoReport, colored_output: bool) {
    if report.typos.is_empty() {
        return;
    }

    let word_header = "Found word";
    let width = report
        .typos
        .iter()
        .map(|typo| typo.original.chars().count())
        .max()
        .unwrap_or(0)
        .max(word_header.chars().count());

    if colored_output {
        println!(
            "{:<width$}  {}",
            word_header.bold(),
            "Suggested corrections".bold(),
            width = width
        );
    } else {
        println!("{:<width$}  Suggested corrections", word_header, width = width);
    }
    println!("{}  {}", "-".repeat(width), "-".repeat(21));

    for typo in &report.typos {
        let options = typo.possible_options.join(", ");
        // Pad manually: format width counts bytes, not characters.
        let padding = " ".repeat(width - typo.original.chars().count());
        if colored_output {
            println!("{}{}  {}", typo.original.red().bold(), padding, options.green());
        } else {
            println!("{}{}  {}", typo.original, padding, options);
        }
    }
}

fn print_json(report: &TypoReport) {
    let output = JsonReport {
        total_typos: report.typos.len(),
        typos: report
            .typos
            .iter()
            .map(|typo| JsonTypo {
                word: typo.original.clone(),
                suggestions: typo.possible_options.clone(),
            })
            .collect(),
        unresolved: report.unresolved.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_summary(report: &TypoReport, colored_output: bool) {
    println!();
    if report.typos.is_empty() {
        if colored_output {
            println!("{}", "✓ No typos found!".green().bold());
        } else {
            println!("✓ No typos found!");
        }
    } else {
        let count = report.typos.len();
        let typo_word = if count == 1 { "typo" } else { "typos" };
        if colored_output {
            println!(
                "{} {} possible {} found",
                "✗".red().bold(),
                count.to_string().red().bold(),
                typo_word
            );
        } else {
            println!("✗ {} possible {} found", count, typo_word);
        }
    }

    if !report.unresolved.is_empty() {
        let line = format!(
            "{} word(s) could not be checked (spelling service unreachable?)",
            report.unresolved.len()
        );
        if colored_output {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}
