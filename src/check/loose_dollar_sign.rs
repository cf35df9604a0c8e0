use std::sync::LazyLock;

use regex::Regex;

use crate::check::{Check, RuleContext};
use crate::diagnostic::Diagnostic;

/// A sigil separated from its name by a space: `$ var`.
static LOOSE_SIGIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$ [0-9A-Za-z_]+").unwrap());

pub struct LooseDollarSign;

impl Check for LooseDollarSign {
    fn name(&self) -> &'static str {
        "LooseDollarSign"
    }

    fn check_rule(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        if has_loose_dollar_sign(ctx.text) {
            diagnostics.push(self.diagnostic(ctx, "has loose dollar sign; ".to_string()));
        }
    }
}

/// Looks at the whole line, not just one clause.
pub fn has_loose_dollar_sign(text: &str) -> bool {
    LOOSE_SIGIL_RE.is_match(text)
}
