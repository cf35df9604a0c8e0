//! Grammar for relex2frame mapping rules.
//!
//! A mapping rule is a comment line of the form
//!
//! ```text
//! # IF _subj(be,$var1) ^ _obj(be,$var2) THEN ^1_Identity:Entity($var1,$var2)
//! ```
//!
//! Variables are `$` followed by ASCII word characters. A variable whose
//! second character is uppercase (`$X`, `$Frame`) is a wildcard and is never
//! bound.

use std::sync::LazyLock;

use regex::Regex;

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# IF (?P<lhs>.+) THEN (?P<rhs>.+)$").unwrap());

/// A variable preceded by anything but `=`. Applied to `" " + clause` so that
/// a variable at the very start of a clause still has a preceding character.
static VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^=](\$[0-9A-Za-z_]+)").unwrap());

/// A mapping rule split into its two clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule<'a> {
    pub lhs: &'a str,
    pub rhs: &'a str,
}

impl<'a> MappingRule<'a> {
    /// Match `# IF <lhs> THEN <rhs>` at the start of the line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = RULE_RE.captures(line)?;
        Some(Self {
            lhs: caps.name("lhs")?.as_str(),
            rhs: caps.name("rhs")?.as_str(),
        })
    }

    pub fn lhs_vars(&self) -> Vec<&'a str> {
        extract_vars(self.lhs)
    }

    pub fn rhs_vars(&self) -> Vec<&'a str> {
        extract_vars(self.rhs)
    }
}

/// All variable occurrences in a clause, in order, duplicates included.
/// A clause without variables yields an empty list.
pub fn extract_vars(clause: &str) -> Vec<&str> {
    // Run over a padded copy, then map the offsets back onto `clause` so the
    // returned slices borrow from the caller's string.
    let padded = format!(" {clause}");
    VAR_RE
        .captures_iter(&padded)
        .filter_map(|c| c.get(1))
        .map(|m| &clause[m.start() - 1..m.end() - 1])
        .collect()
}

/// `$X` and `$Frame` are wildcards; `$var1` and `$x` are not.
pub fn is_wildcard(var: &str) -> bool {
    var.chars().nth(1).is_some_and(char::is_uppercase)
}
