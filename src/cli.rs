use std::path::PathBuf;

use clap::Parser;

/// Rule-definition file `r2l-compile` reads when no input is given.
pub const DEFAULT_RULE_FILE: &str = "RuleImplicationToRelEx2Logic.txt";

pub const CHECK_PROGRAM: &str = "relex2frame-check";

#[derive(Parser, Debug)]
#[command(
    name = "r2l-compile",
    version,
    about = "Compile RelEx2Logic pattern rules into Atomese BindLink definitions"
)]
pub struct CompileArgs {
    /// Rule-definition file
    #[arg(default_value = DEFAULT_RULE_FILE)]
    pub input: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pattern marker that activates a line (repeatable; replaces Compile.Markers)
    #[arg(long = "marker", value_name = "MARKER")]
    pub markers: Vec<String>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = CHECK_PROGRAM,
    version,
    about = "Check relex2frame mapping rules for unbound variables and disjunct frames"
)]
pub struct CheckArgs {
    /// Mapping rules file
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "annotate", value_parser = ["annotate", "json"])]
    pub format: String,

    /// Also run checks that are off by default (UnusedLhsVar)
    #[arg(long)]
    pub strict: bool,

    /// Prefix each warning with the rule's line number
    #[arg(long)]
    pub line_numbers: bool,

    /// Print the number of warnings to stderr when done
    #[arg(long)]
    pub summary: bool,

    /// Run only the specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip the specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// List all checks, one per line, then exit
    #[arg(long)]
    pub list_checks: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// The one-line usage message printed (to stdout) when the mapping rules
/// file argument is missing or the arguments do not parse.
pub fn check_usage(program: &str) -> String {
    format!("Usage: {program} [name of mapping rules file]")
}
