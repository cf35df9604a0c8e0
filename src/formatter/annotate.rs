use std::io::{self, Write};

use crate::check::ValidationResult;
use crate::formatter::Formatter;

/// Echoes the input with a `;; warning: …` line in front of every
/// suspicious rule. Trailing whitespace is trimmed from every line written.
pub struct AnnotateFormatter {
    pub line_numbers: bool,
}

impl Formatter for AnnotateFormatter {
    fn format_to(&self, result: &ValidationResult<'_>, out: &mut dyn Write) -> io::Result<()> {
        for report in &result.lines {
            if let Some(annotation) = report.annotation(self.line_numbers) {
                writeln!(out, "{annotation}")?;
            }
            writeln!(out, "{}", report.text.trim_end())?;
        }
        Ok(())
    }
}
