use std::fmt;

/// One reason a mapping rule looks suspicious.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-indexed line number of the rule.
    pub line: usize,
    pub check_name: &'static str,
    /// Reason fragment as it appears in the warning annotation, including
    /// its trailing separator (e.g. `"has loose dollar sign; "`).
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.line,
            self.check_name,
            self.message.trim_end()
        )
    }
}

/// A source line together with whatever the checks found on it.
#[derive(Debug, Clone)]
pub struct LineReport<'a> {
    pub line: usize,
    pub text: &'a str,
    /// Whether the line matched `# IF … THEN …` at all.
    pub is_rule: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl LineReport<'_> {
    pub fn has_warning(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// All reason fragments joined in check order.
    pub fn reasons(&self) -> String {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// The `;; warning: …` line written before a suspicious rule, or `None`
    /// when every check passed.
    pub fn annotation(&self, line_numbers: bool) -> Option<String> {
        if !self.has_warning() {
            return None;
        }
        let prefix = if line_numbers {
            format!("line {}: ", self.line)
        } else {
            String::new()
        };
        let text = format!(";; warning: {prefix}{}", self.reasons());
        Some(text.trim_end().to_string())
    }
}
