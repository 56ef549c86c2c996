use crate::render::{self, html, terminal, Misspelling, Segment};
use crate::CheckResult;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// A misspelling with its 1-based position in the checked text
#[derive(Debug, Serialize)]
pub struct Located<'a> {
    pub line: usize,
    pub column: usize,
    pub word: &'a str,
    pub suggestions: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    source: &'a str,
    errors: usize,
    words: usize,
    misspellings: Vec<Located<'a>>,
}

/// Walk the overlay and attach line/column positions to each misspelling
pub fn locate(result: &CheckResult) -> Vec<Located<'_>> {
    let mut located = Vec::new();
    let mut position = (1, 1);

    for segment in &result.overlay.segments {
        match segment {
            Segment::Text { text } => advance(&mut position, text),
            Segment::Misspelled(Misspelling { word, suggestions }) => {
                located.push(Located {
                    line: position.0,
                    column: position.1,
                    word,
                    suggestions,
                });
                advance(&mut position, word);
            }
        }
    }

    located
}

fn advance(position: &mut (usize, usize), text: &str) {
    for ch in text.chars() {
        if ch == '\n' {
            position.0 += 1;
            position.1 = 1;
        } else {
            position.1 += 1;
        }
    }
}

pub fn print_report(
    source: &str,
    result: &CheckResult,
    colored_output: bool,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_report(source, result, colored_output),
        OutputFormat::Json => print_json_report(source, result),
        OutputFormat::Html => {
            println!("{}", result.markup());
            println!("{}", html::stats_markup(result.error_count, result.word_count));
        }
    }
}

fn print_text_report(source: &str, result: &CheckResult, colored_output: bool) {
    if result.error_count > 0 {
        if colored_output {
            println!("\n{}", source.bold().underline());
        } else {
            println!("\n{}", source);
        }

        for located in locate(result) {
            let line_info = format!("{}:{}", located.line, located.column);
            let description =
                terminal::describe(located.word, located.suggestions, colored_output);
            if colored_output {
                println!("  {} {}", line_info.blue().bold(), description);
            } else {
                println!("  {} {}", line_info, description);
            }
        }
    }

    println!();
    let stats = render::stats_line(result.error_count, result.word_count);
    if colored_output {
        println!("{}", stats.dimmed());
    } else {
        println!("{}", stats);
    }
}

fn print_json_report(source: &str, result: &CheckResult) {
    let output = JsonOutput {
        source,
        errors: result.error_count,
        words: result.word_count,
        misspellings: locate(result),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize report: {}", e),
    }
}

pub fn print_fix_summary(total_fixed: usize, colored: bool) {
    if total_fixed == 0 {
        if colored {
            eprintln!("{}", "No corrections to apply.".green().bold());
        } else {
            eprintln!("No corrections to apply.");
        }
    } else {
        let fix_word = if total_fixed == 1 { "error" } else { "errors" };
        if colored {
            eprintln!(
                "{} Corrected {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word
            );
        } else {
            eprintln!("✓ Corrected {} {}", total_fixed, fix_word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Overlay;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_locate_positions() {
        let mut overlay = Overlay::new();
        overlay.push_text("first line\nsecond ");
        overlay.push_misspelling("lne", vec!["line".to_string()]);
        overlay.push_text(" ");
        overlay.push_misspelling("agan", Vec::new());

        let result = CheckResult {
            error_count: overlay.error_count(),
            word_count: 4,
            overlay,
        };
        let located = locate(&result);

        assert_eq!(located.len(), 2);
        assert_eq!((located[0].line, located[0].column), (2, 8));
        assert_eq!(located[0].word, "lne");
        assert_eq!((located[1].line, located[1].column), (2, 12));
        assert!(located[1].suggestions.is_empty());
    }
}
