use std::io::{self, Write};

use serde::Serialize;

use crate::check::ValidationResult;
use crate::formatter::Formatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: Metadata<'a>,
    warnings: Vec<Warning<'a>>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    file: &'a str,
    lines_inspected: usize,
    rules_inspected: usize,
    warning_count: usize,
}

#[derive(Serialize)]
struct Warning<'a> {
    line: usize,
    checks: Vec<&'static str>,
    message: String,
    source: &'a str,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, result: &ValidationResult<'_>, out: &mut dyn Write) -> io::Result<()> {
        let output = JsonOutput {
            metadata: Metadata {
                file: &result.path,
                lines_inspected: result.lines.len(),
                rules_inspected: result.rules_inspected,
                warning_count: result.warning_count,
            },
            warnings: result
                .warnings()
                .map(|report| Warning {
                    line: report.line,
                    checks: report.diagnostics.iter().map(|d| d.check_name).collect(),
                    message: report.reasons().trim_end().to_string(),
                    source: report.text.trim_end(),
                })
                .collect(),
        };
        serde_json::to_writer(&mut *out, &output)?;
        writeln!(out)
    }
}
