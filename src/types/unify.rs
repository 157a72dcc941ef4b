use tracing::trace;

use super::error::{InferResult, TypeError};
use super::subst::Substitution;
use super::ty::Type;

/// Unify two types, finding a substitution that makes them equal.
///
/// # Algorithm
///
/// Structural recursion on both types:
///
/// ```text
/// Unify(int, int) = ∅
/// Unify(int, string) = Error
/// Unify('t0, 't0) = ∅
/// Unify('t0, 't1) = ['t0 := 't1]
/// Unify(int, 't0) = ['t0 := int]        // a bare variable on either side is the key
/// Unify('t0, 't0 -> int) = Error         // occurs check
/// ```
///
/// Arrows unify their domains first and apply that result to the ranges
/// before unifying them:
///
/// ```text
/// Unify('t0 -> 't0, int -> 't1):
///   Unify 't0 with int  → S1 = ['t0 := int]
///   Unify S1('t0) = int with S1('t1) = 't1 → S2 = ['t1 := int]
///   Result: S1 ∘ S2 = ['t0 := int, 't1 := int]
/// ```
///
/// Tuples must have the same arity and are unified component-wise left to
/// right, each pair seen through the substitution accumulated so far.
/// Lists unify their element types.
pub fn unify(t1: &Type, t2: &Type) -> InferResult<Substitution> {
    trace!(left = %t1, right = %t2, "unify");
    match (t1, t2) {
        (Type::Primitive(a), Type::Primitive(b)) if a == b => Ok(Substitution::empty()),

        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(Substitution::empty()),
        (Type::Var(v), t) | (t, Type::Var(v)) => Substitution::singleton(*v, t.clone()),

        (Type::Arrow(l1, r1), Type::Arrow(l2, r2)) => {
            let s1 = unify(l1, l2)?;
            let s2 = unify(&s1.apply(r1), &s1.apply(r2))?;
            s1.compose(&s2)
        }

        (Type::List(a), Type::List(b)) => unify(a, b),

        (Type::Tuple(xs), Type::Tuple(ys)) => {
            if xs.len() != ys.len() {
                return Err(TypeError::unification_failure(t1.clone(), t2.clone()));
            }
            xs.iter()
                .zip(ys)
                .try_fold(Substitution::empty(), |acc, (x, y)| {
                    let step = unify(&acc.apply(x), &acc.apply(y))?;
                    acc.compose(&step)
                })
        }

        _ => Err(TypeError::unification_failure(t1.clone(), t2.clone())),
    }
}
