#![no_main]

use libfuzzer_sys::fuzz_target;
use relex_rules::compile::template::rule_block;
use relex_rules::parse::rule_line::{Extraction, RuleLine};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    let Some(parsed) = RuleLine::parse(line) else {
        return;
    };
    if let Extraction::Complete(idents) = &parsed.extraction {
        let text = rule_block(&parsed.category(), idents).to_string();
        // Only the marker can carry a `(` into the output; a `)` can come
        // from any token.
        if !line.contains(')') && !parsed.marker.contains('(') {
            let open = text.matches('(').count();
            let close = text.matches(')').count();
            assert_eq!(open, close, "unbalanced block for {line:?}");
        }
    }
});
