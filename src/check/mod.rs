pub mod binding;
pub mod disjunct_frames;
pub mod loose_dollar_sign;
pub mod registry;
pub mod unused_lhs_var;

use std::collections::HashSet;

use anyhow::Result;

use crate::config::ResolvedConfig;
use crate::diagnostic::{Diagnostic, LineReport};
use crate::parse::mapping_line::{MappingRule, extract_vars};
use crate::parse::source::SourceFile;

use registry::CheckRegistry;

/// Everything a check may look at for one mapping rule. Variables are
/// extracted once per line and shared by all checks.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub line: usize,
    /// The raw source line.
    pub text: &'a str,
    pub rule: MappingRule<'a>,
    pub lhs_vars: Vec<&'a str>,
    pub rhs_vars: Vec<&'a str>,
}

impl<'a> RuleContext<'a> {
    pub fn new(line: usize, text: &'a str, rule: MappingRule<'a>) -> Self {
        Self {
            line,
            text,
            lhs_vars: extract_vars(rule.lhs),
            rhs_vars: extract_vars(rule.rhs),
            rule,
        }
    }
}

/// A mapping-rule check. Each implementation wraps one predicate and turns
/// its verdict into annotation fragments.
pub trait Check: Send + Sync {
    /// Stable name used by `--only`, `--except` and the config file.
    fn name(&self) -> &'static str;

    fn enabled_by_default(&self) -> bool {
        true
    }

    fn check_rule(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>);

    fn diagnostic(&self, ctx: &RuleContext<'_>, message: String) -> Diagnostic {
        Diagnostic {
            line: ctx.line,
            check_name: self.name(),
            message,
        }
    }
}

/// Outcome of checking one mapping-rule file.
#[derive(Debug)]
pub struct ValidationResult<'a> {
    pub path: String,
    pub lines: Vec<LineReport<'a>>,
    pub rules_inspected: usize,
    /// Number of lines that received a warning.
    pub warning_count: usize,
}

impl ValidationResult<'_> {
    pub fn warnings(&self) -> impl Iterator<Item = &LineReport<'_>> {
        self.lines.iter().filter(|l| l.has_warning())
    }
}

/// Run `checks`, in order, over every `# IF … THEN …` line of `source`.
/// Other lines are carried through untouched.
pub fn validate_source<'a>(source: &'a SourceFile, checks: &[&dyn Check]) -> ValidationResult<'a> {
    let mut lines = Vec::new();
    let mut rules_inspected = 0;
    let mut warning_count = 0;

    for (lineno, text) in source.numbered_lines() {
        let Some(rule) = MappingRule::parse(text) else {
            lines.push(LineReport {
                line: lineno,
                text,
                is_rule: false,
                diagnostics: Vec::new(),
            });
            continue;
        };

        rules_inspected += 1;
        let ctx = RuleContext::new(lineno, text, rule);
        let mut diagnostics = Vec::new();
        for check in checks {
            check.check_rule(&ctx, &mut diagnostics);
        }
        if !diagnostics.is_empty() {
            warning_count += 1;
        }
        lines.push(LineReport {
            line: lineno,
            text,
            is_rule: true,
            diagnostics,
        });
    }

    ValidationResult {
        path: source.path_str().to_string(),
        lines,
        rules_inspected,
        warning_count,
    }
}

/// Which checks to run, given the config file and command-line filters.
///
/// Starts from each check's default, applies `Enabled:` from the config,
/// then `strict` (turns on the checks that are off by default), then `only`
/// and `except`.
/// Unknown names in `only`/`except` are an error.
pub fn select_checks<'r>(
    registry: &'r CheckRegistry,
    config: &ResolvedConfig,
    only: &[String],
    except: &[String],
    strict: bool,
) -> Result<Vec<&'r dyn Check>> {
    for name in only.iter().chain(except) {
        if registry.get(name).is_none() {
            anyhow::bail!(
                "unknown check: {name} (available: {})",
                registry.names().join(", ")
            );
        }
    }
    let only: HashSet<&str> = only.iter().map(String::as_str).collect();
    let except: HashSet<&str> = except.iter().map(String::as_str).collect();

    let selected = registry
        .checks()
        .iter()
        .map(|c| &**c)
        .filter(|c| {
            let name = c.name();
            let enabled = config.is_check_enabled(name, c.enabled_by_default())
                || (strict && !c.enabled_by_default());
            let enabled = if only.is_empty() {
                enabled
            } else {
                only.contains(name)
            };
            enabled && !except.contains(name)
        })
        .collect();
    Ok(selected)
}
