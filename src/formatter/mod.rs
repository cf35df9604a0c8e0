pub mod annotate;
pub mod json;

use std::io::{self, Write};

use crate::check::ValidationResult;

pub trait Formatter {
    fn format_to(&self, result: &ValidationResult<'_>, out: &mut dyn Write) -> io::Result<()>;

    fn print(&self, result: &ValidationResult<'_>) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.format_to(result, &mut lock)?;
        lock.flush()
    }
}

pub fn create_formatter(format: &str, line_numbers: bool) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "annotate" and any unknown value
        _ => Box::new(annotate::AnnotateFormatter { line_numbers }),
    }
}
