//! Grammar for RelEx2Logic rule-definition lines.
//!
//! A definition line is a run of whitespace-separated tokens. Only a few
//! positions carry information:
//!
//! ```text
//! [BE] {3} <SVO, SV> _subj(be, $subj) & _obj(be, $obj) => (be-inheritance-rule $subj ...)
//!  0    1    2    3      4        5   6    7       8    9          10
//! ```
//!
//! Token 0 is the pattern marker, token 4 names the subject relation, token 7
//! the object relation and token 10 the rule. Everything else is ignored.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Positional layout of a definition line. Every group after `marker` is
/// optional so that short lines still yield whatever prefix they have.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<marker>\S+)",
        r"(?:(?:\s+\S+){3}\s+(?P<subject>\S+)",
        r"(?:(?:\s+\S+){2}\s+(?P<object>\S+)",
        r"(?:(?:\s+\S+){2}\s+(?P<rule>\S+))?)?)?",
    ))
    .unwrap()
});

/// An identifier token must contain `(`; the identifier is whatever precedes it.
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?P<ident>[^(]*)\(").unwrap());

/// The positional fields a complete definition line provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Object,
    RuleName,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Subject, Field::Object, Field::RuleName];

    /// 0-indexed token position of this field.
    pub fn token_index(self) -> usize {
        match self {
            Field::Subject => 4,
            Field::Object => 7,
            Field::RuleName => 10,
        }
    }

    fn group(self) -> &'static str {
        match self {
            Field::Subject => "subject",
            Field::Object => "object",
            Field::RuleName => "rule",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Subject => "subject relation",
            Field::Object => "object relation",
            Field::RuleName => "rule name",
        };
        write!(f, "{label} (token {})", self.token_index())
    }
}

/// The identifiers pulled out of one complete definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIdents {
    /// Subject relation, e.g. `_subj`.
    pub subject: String,
    /// Object relation, e.g. `_obj`.
    pub object: String,
    /// Rule name, e.g. `be-inheritance`.
    pub rule_name: String,
    /// Grounded predicate name derived from the rule name, e.g. `pre-inheritance`.
    pub predicate: String,
}

/// Result of extracting identifiers from a single line. Nothing is carried
/// over from earlier lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Complete(RuleIdents),
    Incomplete { missing: Vec<Field> },
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine<'a> {
    /// Token 0, verbatim (e.g. `[BE]`).
    pub marker: &'a str,
    pub extraction: Extraction,
}

impl<'a> RuleLine<'a> {
    /// Parse a definition line. Returns `None` for blank lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = LINE_RE.captures(line)?;
        let marker = caps.name("marker")?.as_str();

        let token = |field: Field| caps.name(field.group()).map(|m| m.as_str());
        let subject = token(Field::Subject).and_then(relation_ident);
        let object = token(Field::Object).and_then(relation_ident);
        let rule = token(Field::RuleName).and_then(rule_name);

        let extraction = match (subject, object, rule) {
            (Some(subject), Some(object), Some(rule_name)) => Extraction::Complete(RuleIdents {
                subject: subject.to_string(),
                object: object.to_string(),
                predicate: predicate_name(&rule_name),
                rule_name,
            }),
            (subject, object, rule) => {
                let present = [subject.is_some(), object.is_some(), rule.is_some()];
                let missing = Field::ALL
                    .into_iter()
                    .zip(present)
                    .filter(|&(_, ok)| !ok)
                    .map(|(field, _)| field)
                    .collect();
                Extraction::Incomplete { missing }
            }
        };

        Some(Self { marker, extraction })
    }

    /// The marker with its brackets removed: `[BE]` becomes `BE`.
    pub fn category(&self) -> String {
        category_label(self.marker)
    }
}

pub fn category_label(marker: &str) -> String {
    marker.replace(['[', ']'], "")
}

/// `_subj(be,` yields `_subj`. Tokens without `(` yield nothing.
pub fn relation_ident(token: &str) -> Option<&str> {
    IDENT_RE
        .captures(token)
        .and_then(|c| c.name("ident"))
        .map(|m| m.as_str())
}

/// `(be-inheritance-rule` yields `be-inheritance`: every `(` is removed and a
/// trailing `-rule` is stripped. Tokens without `(` yield nothing.
pub fn rule_name(token: &str) -> Option<String> {
    if !token.contains('(') {
        return None;
    }
    let bare = token.replace('(', "");
    let name = bare.strip_suffix("-rule").unwrap_or(&bare);
    Some(name.to_string())
}

/// Replace the first `b` with `pr`. This is a plain character substitution,
/// not a prefix rewrite: `be-inheritance` becomes `pre-inheritance`, but so
/// does `abc` become `aprc`. Rule files in the wild depend on that spelling.
pub fn predicate_name(rule_name: &str) -> String {
    rule_name.replacen('b', "pr", 1)
}
