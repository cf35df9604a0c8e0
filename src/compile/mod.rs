pub mod template;
pub mod term;

use std::fmt;
use std::io::{self, Write};

use crate::parse::rule_line::{Extraction, Field, RuleLine};
use crate::parse::source::SourceFile;

use template::{RuleBlock, rule_block};

/// The only pattern marker the stock rule file uses.
pub const DEFAULT_MARKER: &str = "[BE]";

/// A block generated from one definition line.
#[derive(Debug, Clone)]
pub struct EmittedBlock {
    /// 1-indexed line the block was generated from.
    pub line: usize,
    pub block: RuleBlock,
}

/// An active line that could not be compiled because some positional
/// field was absent or lacked its `(`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub marker: String,
    pub missing: Vec<Field>,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.missing.iter().map(|m| m.to_string()).collect();
        write!(
            f,
            "{} rule is missing {}; skipped",
            self.marker,
            fields.join(", ")
        )
    }
}

#[derive(Debug, Default)]
pub struct CompileResult {
    pub blocks: Vec<EmittedBlock>,
    pub skipped: Vec<SkippedLine>,
    pub lines_read: usize,
}

/// Compile every active line of `source`. A line is active when its first
/// token equals one of `markers` exactly.
pub fn compile_source(source: &SourceFile, markers: &[String]) -> CompileResult {
    let mut result = CompileResult::default();

    for (lineno, text) in source.numbered_lines() {
        result.lines_read += 1;
        let Some(line) = RuleLine::parse(text) else {
            continue;
        };
        if !markers.iter().any(|m| m == line.marker) {
            continue;
        }
        let category = line.category();
        match line.extraction {
            Extraction::Complete(idents) => result.blocks.push(EmittedBlock {
                line: lineno,
                block: rule_block(&category, &idents),
            }),
            Extraction::Incomplete { missing } => result.skipped.push(SkippedLine {
                line: lineno,
                marker: line.marker.to_string(),
                missing,
            }),
        }
    }

    result
}

/// Write each block followed by a blank line.
pub fn write_blocks(blocks: &[EmittedBlock], out: &mut dyn Write) -> io::Result<()> {
    for emitted in blocks {
        writeln!(out, "{}", emitted.block)?;
    }
    Ok(())
}
