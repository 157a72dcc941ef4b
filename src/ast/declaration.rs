use super::expression::{Expr, LetBinding};

/// A top-level item of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `let [rec] name = value`
    Value(LetBinding),
    /// A bare expression, checked and then discarded.
    Expr(Expr),
    /// `type name = A | B of ...`. Not typed.
    Type(TypeDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub constructors: Vec<String>,
}

impl Declaration {
    pub fn value(name: impl Into<String>, value: Expr) -> Self {
        Declaration::Value(LetBinding::new(name, value))
    }

    pub fn value_rec(name: impl Into<String>, value: Expr) -> Self {
        Declaration::Value(LetBinding::recursive(name, value))
    }

    pub fn expr(expr: Expr) -> Self {
        Declaration::Expr(expr)
    }
}
