use std::collections::{BTreeSet, HashMap};

use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};

/// Identifier to scheme bindings.
///
/// Every update returns a new environment; callers pass the result onward
/// explicitly, so an environment that was handed out never changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, TypeScheme>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: Vec<(String, TypeScheme)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings sorted by name.
    pub fn bindings(&self) -> Vec<(&str, &TypeScheme)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, scheme)| (name.as_str(), scheme))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Bind `name`, shadowing any previous binding.
    pub fn extend(&self, name: impl Into<String>, scheme: TypeScheme) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), scheme);
        TypeEnv { bindings }
    }

    pub fn remove(&self, name: &str) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.remove(name);
        TypeEnv { bindings }
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        self.bindings
            .values()
            .flat_map(|scheme| scheme.free_type_vars())
            .collect()
    }

    /// Apply `subst` to every scheme's body. Quantified variables are left alone.
    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        if subst.is_empty() {
            return self.clone();
        }
        let bindings = self
            .bindings
            .iter()
            .map(|(name, scheme)| {
                let ty = if scheme.is_monomorphic() {
                    subst.apply(&scheme.ty)
                } else {
                    subst.without(&scheme.vars).apply(&scheme.ty)
                };
                (
                    name.clone(),
                    TypeScheme {
                        vars: scheme.vars.clone(),
                        ty,
                    },
                )
            })
            .collect();
        TypeEnv { bindings }
    }

    /// Quantify every variable of `ty` that is not free in this environment.
    pub fn generalize(&self, ty: &Type) -> TypeScheme {
        let free_in_env = self.free_type_vars();
        let vars = ty
            .vars_in_order()
            .into_iter()
            .filter(|v| !free_in_env.contains(v))
            .collect();
        TypeScheme {
            vars,
            ty: ty.clone(),
        }
    }

    /// Generalize a recursive binding, ignoring its own monomorphic placeholder.
    pub fn generalize_rec(&self, ty: &Type, name: &str) -> TypeScheme {
        self.remove(name).generalize(ty)
    }
}
