//! The RelEx2Logic rule template.
//!
//! One template instance binds a parse and three word instances, requires
//! the two named relations and the rule's lemma, and fires a grounded
//! Scheme predicate on `$X` and `$Z`.

use std::fmt;

use crate::compile::term::{Form, Term, TruthValue};
use crate::parse::rule_line::RuleIdents;

const PARSE_VAR: &str = "$a-parse";
const WORD_VARS: [&str; 3] = ["$X", "$Y", "$Z"];

/// Emitted verbatim above every `pre-<rule>-rule` wrapper.
const FORWARD_COMMENT: [&str; 2] = [
    "This is function is not needed. It is added so as not to break the existing",
    "r2l pipeline.",
];

const DECLARATION_TV: TruthValue = TruthValue {
    strength: 1.0,
    confidence: 0.99,
};

/// A generated rule: the definition, its two declarations and the legacy
/// wrapper, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBlock {
    pub name: String,
    pub forms: Vec<Form>,
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, form) in self.forms.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{form}")?;
        }
        f.write_str("\n")
    }
}

/// Instantiate the template for one definition line. `category` is the
/// marker without brackets (`BE`). Identifiers are substituted verbatim.
pub fn rule_block(category: &str, idents: &RuleIdents) -> RuleBlock {
    let concept = format!("{category}-Rule");
    RuleBlock {
        name: idents.rule_name.clone(),
        forms: vec![
            Form::Define {
                name: idents.rule_name.clone(),
                body: bind_link(idents),
            },
            Form::Statement(
                Term::link(
                    "InheritanceLink",
                    vec![
                        Term::node("ConceptNode", concept.as_str()),
                        Term::node("ConceptNode", "Rule"),
                    ],
                )
                .with_tv(DECLARATION_TV),
            ),
            Form::Statement(
                Term::link(
                    "ReferenceLink",
                    vec![
                        Term::node("ConceptNode", concept),
                        Term::symbol(idents.rule_name.as_str()),
                    ],
                )
                .with_tv(DECLARATION_TV),
            ),
            Form::Forward {
                comment: FORWARD_COMMENT.iter().map(|l| l.to_string()).collect(),
                name: format!("pre-{}-rule", idents.rule_name),
                params: vec!["subj".to_string(), "obj".to_string()],
                target: format!("{}-rule", idents.rule_name),
                accessors: vec!["word-inst-get-word-str", "cog-name"],
            },
        ],
    }
}

fn bind_link(idents: &RuleIdents) -> Term {
    let mut declarations = vec![typed_var(PARSE_VAR, "ParseNode")];
    declarations.extend(WORD_VARS.map(|v| typed_var(v, "WordInstanceNode")));

    let mut conditions: Vec<Term> = WORD_VARS
        .iter()
        .map(|v| Term::link("WordInstanceLink", vec![Term::var(*v), Term::var(PARSE_VAR)]))
        .collect();
    conditions.push(relation(&idents.subject));
    conditions.push(relation(&idents.object));
    conditions.push(Term::link(
        "LemmaLink",
        vec![Term::var("$Y"), Term::node("WordNode", idents.rule_name.as_str())],
    ));

    let consequent = Term::link(
        "EvaluationLink",
        vec![
            Term::node("GroundedSchemaNode", format!("scm: {}", idents.predicate)),
            Term::link("ListLink", vec![Term::var("$X"), Term::var("$Z")]),
        ],
    );

    Term::link(
        "BindLink",
        vec![
            Term::link("ListLink", declarations),
            Term::link(
                "ImplicationLink",
                vec![Term::link("AndLink", conditions), consequent],
            ),
        ],
    )
}

fn typed_var(name: &str, ty: &str) -> Term {
    Term::link(
        "TypedVariableLink",
        vec![Term::var(name), Term::var(ty)],
    )
}

/// `(EvaluationLink (DefinedLinguisticRelationshipNode rel) (ListLink $Y $X))`
fn relation(name: &str) -> Term {
    Term::link(
        "EvaluationLink",
        vec![
            Term::node("DefinedLinguisticRelationshipNode", name),
            Term::link("ListLink", vec![Term::var("$Y"), Term::var("$X")]),
        ],
    )
}
