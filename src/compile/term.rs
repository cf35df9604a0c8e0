//! Typed terms for the generated logic network and their text serialization.
//!
//! Terms render in two layouts. The tree layout puts every link's outgoing
//! set on its own lines, one tab deeper than the link; the inline layout
//! keeps a whole term on a single line. Both produce balanced parentheses
//! for any term.

use std::fmt::{self, Write};

/// A simple truth value, `(stv strength confidence)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthValue {
    pub strength: f64,
    pub confidence: f64,
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(stv {} {})", self.strength, self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A named atom, e.g. `(ConceptNode "Rule")`.
    Node { kind: &'static str, name: String },
    /// A link over an ordered outgoing set.
    Link {
        kind: &'static str,
        tv: Option<TruthValue>,
        outgoing: Vec<Term>,
    },
    /// A bare Scheme symbol, e.g. a reference to a `define`d rule.
    Symbol(String),
}

impl Term {
    pub fn node(kind: &'static str, name: impl Into<String>) -> Self {
        Term::Node {
            kind,
            name: name.into(),
        }
    }

    pub fn link(kind: &'static str, outgoing: Vec<Term>) -> Self {
        Term::Link {
            kind,
            tv: None,
            outgoing,
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::node("VariableNode", name)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    /// Attach a truth value. Has no effect on nodes and symbols.
    pub fn with_tv(mut self, value: TruthValue) -> Self {
        if let Term::Link { tv, .. } = &mut self {
            *tv = Some(value);
        }
        self
    }

    /// Write the term in tree layout, starting at `depth` tabs. No trailing newline.
    pub fn write_tree<W: Write>(&self, out: &mut W, depth: usize) -> fmt::Result {
        indent(out, depth)?;
        match self {
            Term::Node { .. } | Term::Symbol(_) => write!(out, "{self}"),
            Term::Link { kind, tv, outgoing } => {
                write!(out, "({kind}")?;
                if let Some(tv) = tv {
                    write!(out, " {tv}")?;
                }
                for child in outgoing {
                    out.write_char('\n')?;
                    child.write_tree(out, depth + 1)?;
                }
                out.write_char('\n')?;
                indent(out, depth)?;
                out.write_char(')')
            }
        }
    }
}

/// Inline layout.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Node { kind, name } => write!(f, "({kind} \"{name}\")"),
            Term::Symbol(name) => f.write_str(name),
            Term::Link { kind, tv, outgoing } => {
                write!(f, "({kind}")?;
                if let Some(tv) = tv {
                    write!(f, " {tv}")?;
                }
                for child in outgoing {
                    write!(f, " {child}")?;
                }
                f.write_char(')')
            }
        }
    }
}

/// A top-level Scheme form in a generated block.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// `(define name <body in tree layout>)`
    Define { name: String, body: Term },
    /// A term on a single line.
    Statement(Term),
    /// A wrapper function that forwards to `target`, applying every accessor
    /// to every parameter in turn:
    ///
    /// ```text
    /// (define (name p q)
    ///     (target (acc1 p) (acc2 p)
    ///         (acc1 q) (acc2 q)
    ///     )
    /// )
    /// ```
    Forward {
        comment: Vec<String>,
        name: String,
        params: Vec<String>,
        target: String,
        accessors: Vec<&'static str>,
    },
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Define { name, body } => {
                writeln!(f, "(define {name}")?;
                body.write_tree(f, 1)?;
                f.write_str("\n)")
            }
            Form::Statement(term) => write!(f, "{term}"),
            Form::Forward {
                comment,
                name,
                params,
                target,
                accessors,
            } => {
                for line in comment {
                    writeln!(f, "; {line}")?;
                }
                writeln!(f, "(define ({name} {})", params.join(" "))?;
                write!(f, "\t({target}")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\t\t")?;
                    }
                    for (j, accessor) in accessors.iter().enumerate() {
                        let sep = if i == 0 || j > 0 { " " } else { "" };
                        write!(f, "{sep}({accessor} {param})")?;
                    }
                }
                f.write_str("\n\t)\n)")
            }
        }
    }
}

fn indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_char('\t')?;
    }
    Ok(())
}
