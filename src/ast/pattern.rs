//! # Pattern AST Nodes
//!
//! Patterns appear as `match` clauses and as lambda parameters:
//!
//! ```text
//! match l with
//!   []      -> 0
//! | x :: xs -> 1 + len xs
//!
//! fun (a, b) -> a + b
//! ```
//!
//! Variables bound by a pattern are visible in the clause body (or lambda
//! body) only. Constructor patterns are representable so a front-end can
//! hand them over, but the type checker rejects them.

use super::expression::Constant;

/// All pattern forms.
///
/// # Variants
///
/// * `Wildcard` - Match anything without binding (`_`)
/// * `Constant` - Match a literal (`42`, `"hi"`, `true`, `()`, `[]`)
/// * `Var` - Bind the matched value (`x`)
/// * `Cons` - Match a non-empty list (`x :: xs`)
/// * `Tuple` - Match a tuple component-wise (`(a, b)`)
/// * `Constructor` - Match a data constructor (`Some x`); unsupported
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Wildcard,
    Constant(Constant),
    Var(String),
    Cons(Box<Pattern>, Box<Pattern>),
    Tuple(Vec<Pattern>),
    Constructor(String, Option<Box<Pattern>>),
}

impl Pattern {
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var(name.into())
    }

    pub fn int(value: i64) -> Self {
        Pattern::Constant(Constant::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Pattern::Constant(Constant::Bool(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Pattern::Constant(Constant::String(value.into()))
    }

    pub fn unit() -> Self {
        Pattern::Constant(Constant::Unit)
    }

    pub fn nil() -> Self {
        Pattern::Constant(Constant::EmptyList)
    }

    pub fn cons(head: Pattern, tail: Pattern) -> Self {
        Pattern::Cons(Box::new(head), Box::new(tail))
    }

    pub fn tuple(items: Vec<Pattern>) -> Self {
        Pattern::Tuple(items)
    }

    /// Names bound by this pattern, left to right. Duplicates are kept.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Pattern::Wildcard | Pattern::Constant(_) => {}
            Pattern::Var(name) => names.push(name),
            Pattern::Cons(head, tail) => {
                head.collect_names(names);
                tail.collect_names(names);
            }
            Pattern::Tuple(items) => {
                for item in items {
                    item.collect_names(names);
                }
            }
            Pattern::Constructor(_, arg) => {
                if let Some(arg) = arg {
                    arg.collect_names(names);
                }
            }
        }
    }
}
