#![no_main]

use libfuzzer_sys::fuzz_target;
use relex_rules::check::registry::CheckRegistry;
use relex_rules::check::{Check, validate_source};
use relex_rules::parse::mapping_line::MappingRule;
use relex_rules::parse::source::SourceFile;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for line in text.lines() {
        if let Some(rule) = MappingRule::parse(line) {
            for var in rule.lhs_vars().into_iter().chain(rule.rhs_vars()) {
                assert!(var.starts_with('$') && var.len() > 1);
            }
        }
    }

    let source = SourceFile::from_string("fuzz.txt".into(), text.to_string());
    let registry = CheckRegistry::default_registry();
    let checks: Vec<&dyn Check> = registry.checks().iter().map(|c| &**c).collect();
    let result = validate_source(&source, &checks);
    assert_eq!(result.lines.len(), source.line_count());
});
