use super::env::TypeEnv;
use super::error::{InferResult, TypeError};
use super::infer::Infer;
use super::ty::{Type, TypeScheme};
use super::unify::unify;
use crate::ast::Pattern;

impl Infer {
    /// Type a pattern and return the environment extended with its bindings.
    ///
    /// Sub-patterns are visited left to right, each against the environment
    /// produced by the ones before it. Pattern variables are always bound
    /// monomorphically.
    pub fn infer_pattern(&mut self, env: &TypeEnv, pattern: &Pattern) -> InferResult<(TypeEnv, Type)> {
        match pattern {
            Pattern::Wildcard => Ok((env.clone(), self.fresh())),

            Pattern::Constant(constant) => Ok((env.clone(), self.constant_type(constant))),

            Pattern::Var(name) => {
                let ty = self.fresh();
                let env1 = env.extend(name.clone(), TypeScheme::monomorphic(ty.clone()));
                Ok((env1, ty))
            }

            Pattern::Cons(head, tail) => {
                let (env1, head_ty) = self.infer_pattern(env, head)?;
                let (env2, tail_ty) = self.infer_pattern(&env1, tail)?;
                let s = unify(&Type::list(head_ty), &tail_ty)?;
                Ok((env2.apply_subst(&s), s.apply(&tail_ty)))
            }

            Pattern::Tuple(items) => {
                let mut current = env.clone();
                let mut types = Vec::with_capacity(items.len());
                for item in items {
                    let (next, ty) = self.infer_pattern(&current, item)?;
                    current = next;
                    types.push(ty);
                }
                Ok((current, Type::Tuple(types)))
            }

            Pattern::Constructor(name, _) => Err(TypeError::pattern_matching(format!(
                "constructor pattern `{}`",
                name
            ))),
        }
    }
}
