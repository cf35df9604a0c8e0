use crate::check::{Check, RuleContext};
use crate::diagnostic::Diagnostic;
use crate::parse::mapping_line::is_wildcard;

/// Every non-wildcard variable used on the RHS must be bound on the LHS.
pub struct Binding;

impl Check for Binding {
    fn name(&self) -> &'static str {
        "Binding"
    }

    fn check_rule(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for var in missing_bindings(&ctx.lhs_vars, &ctx.rhs_vars) {
            diagnostics.push(self.diagnostic(ctx, format!("missing RHS var {var} from LHS; ")));
        }
    }
}

/// Distinct non-wildcard RHS variables absent from the LHS, in order of
/// first appearance.
pub fn missing_bindings<'a>(lhs: &[&str], rhs: &[&'a str]) -> Vec<&'a str> {
    let mut missing: Vec<&str> = Vec::new();
    for &var in rhs {
        if is_wildcard(var) || lhs.contains(&var) || missing.contains(&var) {
            continue;
        }
        missing.push(var);
    }
    missing
}
