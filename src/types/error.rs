//! # Type Error Definitions
//!
//! Every failure of the inference core is one of five kinds:
//!
//! - A type variable would have to contain itself (`OccursCheck`)
//! - An identifier is used but not bound (`UnboundVariable`)
//! - Two types cannot be made equal (`UnificationFailure`)
//! - A pattern form cannot be typed (`PatternMatching`)
//! - An expression or declaration form is outside the typed subset (`NotImplemented`)
//!
//! Inference stops at the first error; there is no recovery and no partial
//! result. The variants carry the offending names and types so a caller can
//! build its own diagnostics, and `Display` gives a readable default.

use thiserror::Error;

use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Binding `var` to `ty` would create an infinite type such as `'t0 = 't0 -> int`.
    #[error("cannot construct infinite type: {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },

    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    #[error("cannot unify {left} with {right}")]
    UnificationFailure { left: Type, right: Type },

    #[error("unsupported pattern: {reason}")]
    PatternMatching { reason: String },

    #[error("not implemented: {construct}")]
    NotImplemented { construct: String },
}

impl TypeError {
    pub fn occurs_check(var: TypeVar, ty: Type) -> Self {
        TypeError::OccursCheck { var, ty }
    }

    pub fn unbound_variable(name: impl Into<String>) -> Self {
        TypeError::UnboundVariable { name: name.into() }
    }

    pub fn unification_failure(left: Type, right: Type) -> Self {
        TypeError::UnificationFailure { left, right }
    }

    pub fn pattern_matching(reason: impl Into<String>) -> Self {
        TypeError::PatternMatching {
            reason: reason.into(),
        }
    }

    pub fn not_implemented(construct: impl Into<String>) -> Self {
        TypeError::NotImplemented {
            construct: construct.into(),
        }
    }
}

pub type InferResult<T> = Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unification_failure_display() {
        let err = TypeError::unification_failure(Type::int(), Type::bool());
        assert_eq!(err.to_string(), "cannot unify int with bool");
    }

    #[test]
    fn test_occurs_check_display() {
        let var = TypeVar::new(0);
        let err = TypeError::occurs_check(var, Type::arrow(Type::Var(var), Type::int()));
        assert_eq!(
            err.to_string(),
            "cannot construct infinite type: 't0 = 't0 -> int"
        );
    }

    #[test]
    fn test_unbound_variable_display() {
        let err = TypeError::unbound_variable("undefined_var");
        assert_eq!(err.to_string(), "unbound variable: undefined_var");
    }

    #[test]
    fn test_unsupported_forms_display() {
        let err = TypeError::pattern_matching("constructor pattern `Some`");
        assert!(err.to_string().contains("constructor pattern `Some`"));

        let err = TypeError::not_implemented("type definition `color`");
        assert!(err.to_string().starts_with("not implemented"));
    }
}
