use crate::check::{Check, RuleContext};
use crate::diagnostic::Diagnostic;
use crate::parse::mapping_line::is_wildcard;

/// Flags LHS variables the RHS never mentions. Plenty of valid rules bind a
/// variable only to constrain the match, so this is off unless `--strict`
/// or the config file turns it on.
pub struct UnusedLhsVar;

impl Check for UnusedLhsVar {
    fn name(&self) -> &'static str {
        "UnusedLhsVar"
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn check_rule(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for var in unused_lhs_vars(&ctx.lhs_vars, &ctx.rhs_vars) {
            diagnostics.push(self.diagnostic(ctx, format!("missing LHS var {var} from RHS; ")));
        }
    }
}

/// Distinct non-wildcard LHS variables that never occur on the RHS, in
/// order of first appearance.
pub fn unused_lhs_vars<'a>(lhs: &[&'a str], rhs: &[&str]) -> Vec<&'a str> {
    let mut unused: Vec<&str> = Vec::new();
    for &var in lhs {
        if is_wildcard(var) || rhs.contains(&var) || unused.contains(&var) {
            continue;
        }
        unused.push(var);
    }
    unused
}
