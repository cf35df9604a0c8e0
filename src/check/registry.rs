use super::Check;
use super::binding::Binding;
use super::disjunct_frames::DisjunctFrames;
use super::loose_dollar_sign::LooseDollarSign;
use super::unused_lhs_var::UnusedLhsVar;

/// The mapping-rule checks, in the order their reasons are joined into a
/// warning annotation.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn default_registry() -> Self {
        Self {
            checks: vec![
                Box::new(Binding),
                Box::new(UnusedLhsVar),
                Box::new(LooseDollarSign),
                Box::new(DisjunctFrames),
            ],
        }
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Look a check up by the name used in `--only`, `--except` and the
    /// config file. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .map(|c| &**c)
            .find(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::default_registry()
    }
}
