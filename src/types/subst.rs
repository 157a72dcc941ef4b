use std::collections::BTreeMap;

use super::error::{InferResult, TypeError};
use super::ty::{Type, TypeVar};
use super::unify::unify;

/// A finite map from type variables to types.
///
/// Bindings are kept resolved against each other: no target mentions a
/// variable that is itself a key. `apply` still rewrites recursively, so
/// a hand-built chain such as `['t0 := 't1, 't1 := int]` resolves fully.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(BTreeMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(BTreeMap::new())
    }

    /// `[var := ty]`, rejected when `var` occurs in `ty`.
    pub fn singleton(var: TypeVar, ty: Type) -> InferResult<Self> {
        if ty.occurs(var) {
            return Err(TypeError::occurs_check(var, ty));
        }
        let mut map = BTreeMap::new();
        map.insert(var, ty);
        Ok(Substitution(map))
    }

    pub fn get(&self, var: TypeVar) -> Option<&Type> {
        self.0.get(&var)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVar, &Type)> {
        self.0.iter()
    }

    /// This substitution with `vars` unbound.
    pub fn without(&self, vars: &[TypeVar]) -> Substitution {
        Substitution(
            self.0
                .iter()
                .filter(|(var, _)| !vars.contains(*var))
                .map(|(var, ty)| (*var, ty.clone()))
                .collect(),
        )
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Primitive(_) => ty.clone(),
            Type::Var(v) => match self.0.get(v) {
                Some(target) => self.apply(target),
                None => ty.clone(),
            },
            Type::Arrow(t1, t2) => Type::arrow(self.apply(t1), self.apply(t2)),
            Type::Tuple(items) => Type::Tuple(items.iter().map(|t| self.apply(t)).collect()),
            Type::List(elem) => Type::list(self.apply(elem)),
        }
    }

    /// Fold every binding of `other` into `self`.
    ///
    /// A key bound on both sides has its two targets unified and the
    /// unifier merged in. A new key has `self` applied to its target, is
    /// occurs-checked and inserted, and existing targets are rewritten
    /// through it.
    pub fn compose(&self, other: &Substitution) -> InferResult<Substitution> {
        let mut result = self.clone();
        for (var, ty) in &other.0 {
            result = result.bind(*var, ty)?;
        }
        Ok(result)
    }

    fn bind(mut self, var: TypeVar, ty: &Type) -> InferResult<Substitution> {
        let incoming = self.apply(ty);

        if let Some(existing) = self.0.get(&var) {
            let existing = self.apply(existing);
            let unifier = unify(&existing, &incoming)?;
            return self.compose(&unifier);
        }

        if incoming == Type::Var(var) {
            return Ok(self);
        }
        if incoming.occurs(var) {
            return Err(TypeError::occurs_check(var, incoming));
        }

        let single = Substitution::singleton(var, incoming.clone())?;
        for target in self.0.values_mut() {
            *target = single.apply(target);
        }
        self.0.insert(var, incoming);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(id: usize, ty: Type) -> Substitution {
        Substitution::singleton(TypeVar::new(id), ty).unwrap()
    }

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        let ty = Type::arrow(Type::int(), Type::var(0));
        assert_eq!(subst.apply(&ty), ty);
    }

    #[test]
    fn test_singleton_substitution() {
        let subst = single(0, Type::int());
        assert_eq!(subst.apply(&Type::var(0)), Type::int());
    }

    #[test]
    fn test_singleton_occurs_check() {
        let var = TypeVar::new(0);
        let result = Substitution::singleton(var, Type::list(Type::Var(var)));
        assert!(matches!(result, Err(TypeError::OccursCheck { .. })));
    }

    #[test]
    fn test_apply_to_structures() {
        let subst = single(0, Type::int());
        let ty = Type::arrow(
            Type::tuple(vec![Type::var(0), Type::string()]),
            Type::list(Type::var(0)),
        );
        assert_eq!(
            subst.apply(&ty),
            Type::arrow(
                Type::tuple(vec![Type::int(), Type::string()]),
                Type::list(Type::int()),
            )
        );
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = single(0, Type::int());
        assert_eq!(subst.apply(&Type::var(1)), Type::var(1));
    }

    #[test]
    fn test_compose_substitutions() {
        let s1 = single(0, Type::var(1));
        let s2 = single(1, Type::int());

        let composed = s1.compose(&s2).unwrap();
        assert_eq!(composed.apply(&Type::var(0)), Type::int());
        assert_eq!(composed.apply(&Type::var(1)), Type::int());
    }

    #[test]
    fn test_compose_keeps_targets_resolved() {
        let s1 = single(0, Type::list(Type::var(1)));
        let s2 = single(1, Type::bool());

        let composed = s1.compose(&s2).unwrap();
        assert_eq!(composed.get(TypeVar::new(0)), Some(&Type::list(Type::bool())));
    }

    #[test]
    fn test_compose_overlap_unifies_targets() {
        let s1 = single(0, Type::list(Type::var(1)));
        let s2 = single(0, Type::list(Type::int()));

        let composed = s1.compose(&s2).unwrap();
        assert_eq!(composed.apply(&Type::var(1)), Type::int());
        assert_eq!(composed.apply(&Type::var(0)), Type::list(Type::int()));
    }

    #[test]
    fn test_compose_overlap_conflict() {
        let s1 = single(0, Type::int());
        let s2 = single(0, Type::string());

        let result = s1.compose(&s2);
        assert_eq!(
            result,
            Err(TypeError::unification_failure(Type::int(), Type::string()))
        );
    }

    #[test]
    fn test_compose_rejects_indirect_cycle() {
        let s1 = single(0, Type::list(Type::var(1)));
        let s2 = single(1, Type::var(0));

        let result = s1.compose(&s2);
        assert!(matches!(result, Err(TypeError::OccursCheck { .. })));
    }

    #[test]
    fn test_compose_variable_alias_is_noop() {
        let s1 = single(0, Type::var(1));
        let s2 = single(1, Type::var(0));

        let composed = s1.compose(&s2).unwrap();
        assert_eq!(composed.apply(&Type::var(0)), composed.apply(&Type::var(1)));
    }

    #[test]
    fn test_composed_chain_matches_sequential_application() {
        let chain = [
            single(0, Type::arrow(Type::var(1), Type::var(2))),
            single(1, Type::list(Type::var(3))),
            single(2, Type::tuple(vec![Type::var(3), Type::bool()])),
            single(3, Type::int()),
        ];
        let ty = Type::tuple(vec![Type::var(0), Type::var(4), Type::list(Type::var(2))]);

        let sequential = chain.iter().fold(ty.clone(), |t, s| s.apply(&t));
        let composed = chain
            .iter()
            .try_fold(Substitution::empty(), |acc, s| acc.compose(s))
            .unwrap();

        assert_eq!(composed.apply(&ty), sequential);
    }

    #[test]
    fn test_substitution_idempotent() {
        let subst = single(0, Type::arrow(Type::int(), Type::var(1)));
        let once = subst.apply(&Type::var(0));
        let twice = subst.apply(&once);
        assert_eq!(once, twice);
    }
}
