use std::sync::LazyLock;

use regex::Regex;

use crate::check::{Check, RuleContext};
use crate::diagnostic::Diagnostic;

/// A two-element tuple `(tag,value)` of ASCII words, no space around the comma.
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\$?[0-9A-Za-z_]+),(\$?[0-9A-Za-z_]+)\)").unwrap()
});

/// A RHS should describe a single frame. Two tuples whose first elements
/// differ mean the rule mixes frames.
pub struct DisjunctFrames;

impl Check for DisjunctFrames {
    fn name(&self) -> &'static str {
        "DisjunctFrames"
    }

    fn check_rule(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        if has_disjunct_frames(ctx.rule.rhs) {
            diagnostics.push(self.diagnostic(ctx, "==has disjunct frames==!".to_string()));
        }
    }
}

/// First element of every `(tag,value)` pair in `clause`, in order.
pub fn frame_tags(clause: &str) -> Vec<&str> {
    PAIR_RE
        .captures_iter(clause)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn has_disjunct_frames(clause: &str) -> bool {
    let tags = frame_tags(clause);
    tags.iter().skip(1).any(|t| Some(t) != tags.first())
}
