use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::env::TypeEnv;
use super::error::{InferResult, TypeError};
use super::options::{ComponentOrder, InferOptions};
use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::unify;
use crate::ast::{BinOp, Constant, Declaration, Expr, LetBinding, MatchArm, OperatorClass, RecFlag};

/// Algorithm W driver.
///
/// Owns the fresh-variable counter, which starts at 0 and only grows, so
/// two runs over the same input draw the same variables.
pub struct Infer {
    next_var: usize,
    options: InferOptions,
}

impl Infer {
    pub fn new() -> Self {
        Self::with_options(InferOptions::default())
    }

    pub fn with_options(options: InferOptions) -> Self {
        Infer {
            next_var: 0,
            options,
        }
    }

    pub fn options(&self) -> &InferOptions {
        &self.options
    }

    /// Number of type variables drawn so far.
    pub fn counter(&self) -> usize {
        self.next_var
    }

    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        trace!(id, "fresh type variable");
        TypeVar::new(id)
    }

    pub fn fresh(&mut self) -> Type {
        Type::Var(self.fresh_var())
    }

    /// Replace every quantified variable with a fresh one.
    ///
    /// Two instantiations of the same scheme share no variables, which is
    /// what lets a `let`-bound name be used at several types.
    pub fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        if scheme.is_monomorphic() {
            return scheme.ty.clone();
        }
        let renaming: BTreeMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| (*v, self.fresh_var()))
            .collect();
        scheme.ty.rename_vars(&renaming)
    }

    pub(super) fn constant_type(&mut self, constant: &Constant) -> Type {
        match constant {
            Constant::Int(_) => Type::int(),
            Constant::Bool(_) => Type::bool(),
            Constant::String(_) => Type::string(),
            Constant::Unit => Type::unit(),
            Constant::EmptyList => Type::list(self.fresh()),
        }
    }

    pub fn infer_expr(&mut self, env: &TypeEnv, expr: &Expr) -> InferResult<(Substitution, Type)> {
        match expr {
            Expr::Constant(constant) => Ok((Substitution::empty(), self.constant_type(constant))),

            Expr::Var(name) => match env.lookup(name) {
                Some(scheme) => {
                    let ty = self.instantiate(scheme);
                    Ok((Substitution::empty(), ty))
                }
                None => Err(TypeError::unbound_variable(name.clone())),
            },

            Expr::BinaryOp { op, left, right } => self.infer_binop(env, *op, left, right),

            Expr::If {
                condition,
                then_expr,
                else_expr,
            } => self.infer_if(env, condition, then_expr, else_expr),

            Expr::Match { scrutinee, arms } => self.infer_match(env, scrutinee, arms),

            Expr::Let { binding, body } => self.infer_let(env, binding, body),

            Expr::Lambda { param, body } => {
                let (param_env, param_ty) = self.infer_pattern(env, param)?;
                let (s, body_ty) = self.infer_expr(&param_env, body)?;
                let ty = s.apply(&Type::arrow(param_ty, body_ty));
                Ok((s, ty))
            }

            Expr::Tuple(items) => {
                let (s, types) = self.infer_components(env, items)?;
                let ty = Type::Tuple(types.iter().map(|t| s.apply(t)).collect());
                Ok((s, ty))
            }

            Expr::Cons { head, tail } => self.infer_cons(env, head, tail),

            Expr::App { func, arg } => self.infer_app(env, func, arg),

            Expr::Constructor { name, .. } => Err(TypeError::not_implemented(format!(
                "constructor `{}`",
                name
            ))),

            Expr::Variant { tag, .. } => Err(TypeError::not_implemented(format!(
                "polymorphic variant `{}`",
                tag
            ))),
        }
    }

    /// Expected (left, right, result) types for an operator.
    fn operator_signature(&mut self, op: BinOp) -> (Type, Type, Type) {
        match op.class() {
            OperatorClass::Arithmetic => (Type::int(), Type::int(), Type::int()),
            OperatorClass::Comparison => {
                let operand = self.fresh();
                (operand.clone(), operand, Type::bool())
            }
            OperatorClass::Boolean => (Type::bool(), Type::bool(), Type::bool()),
        }
    }

    fn infer_binop(
        &mut self,
        env: &TypeEnv,
        op: BinOp,
        left: &Expr,
        right: &Expr,
    ) -> InferResult<(Substitution, Type)> {
        let (s1, left_ty) = self.infer_expr(env, left)?;
        let env1 = env.apply_subst(&s1);
        let (s2, right_ty) = self.infer_expr(&env1, right)?;

        let (expected_left, expected_right, result_ty) = self.operator_signature(op);

        let s = s1.compose(&s2)?;
        let s3 = unify(&s.apply(&left_ty), &s.apply(&expected_left))?;
        let s = s.compose(&s3)?;
        let s4 = unify(&s.apply(&right_ty), &s.apply(&expected_right))?;
        let s = s.compose(&s4)?;

        let ty = s.apply(&result_ty);
        Ok((s, ty))
    }

    fn infer_if(
        &mut self,
        env: &TypeEnv,
        condition: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> InferResult<(Substitution, Type)> {
        let (s1, cond_ty) = self.infer_expr(env, condition)?;
        let env1 = env.apply_subst(&s1);
        let (s2, then_ty) = self.infer_expr(&env1, then_expr)?;
        let env2 = env1.apply_subst(&s2);
        let (s3, else_ty) = self.infer_expr(&env2, else_expr)?;

        let s = s1.compose(&s2)?.compose(&s3)?;
        let s4 = unify(&s.apply(&cond_ty), &Type::bool())?;
        let s = s.compose(&s4)?;
        let s5 = unify(&s.apply(&then_ty), &s.apply(&else_ty))?;
        let s = s.compose(&s5)?;

        let ty = s.apply(&then_ty);
        Ok((s, ty))
    }

    /// Each clause's pattern is unified with the scrutinee and each body
    /// with one shared result type, threading the substitution so earlier
    /// clauses narrow what later ones see.
    fn infer_match(
        &mut self,
        env: &TypeEnv,
        scrutinee: &Expr,
        arms: &[MatchArm],
    ) -> InferResult<(Substitution, Type)> {
        if arms.is_empty() {
            return Err(TypeError::pattern_matching("match expression without clauses"));
        }

        let (mut subst, scrutinee_ty) = self.infer_expr(env, scrutinee)?;
        let result_ty = self.fresh();

        for arm in arms {
            let arm_env = env.apply_subst(&subst);
            let (pattern_env, pattern_ty) = self.infer_pattern(&arm_env, &arm.pattern)?;

            let s1 = unify(&subst.apply(&scrutinee_ty), &subst.apply(&pattern_ty))?;
            subst = subst.compose(&s1)?;

            let body_env = pattern_env.apply_subst(&subst);
            let (s2, body_ty) = self.infer_expr(&body_env, &arm.body)?;
            subst = subst.compose(&s2)?;

            let s3 = unify(&subst.apply(&result_ty), &subst.apply(&body_ty))?;
            subst = subst.compose(&s3)?;
        }

        let ty = subst.apply(&result_ty);
        Ok((subst, ty))
    }

    fn infer_let(
        &mut self,
        env: &TypeEnv,
        binding: &LetBinding,
        body: &Expr,
    ) -> InferResult<(Substitution, Type)> {
        let (s1, bound_env) = self.infer_binding(env, binding)?;
        let (s2, body_ty) = self.infer_expr(&bound_env, body)?;
        let s = s1.compose(&s2)?;
        let ty = s.apply(&body_ty);
        Ok((s, ty))
    }

    /// Infer a `let` or `let rec` right-hand side and return the
    /// environment extended with its generalized scheme.
    fn infer_binding(
        &mut self,
        env: &TypeEnv,
        binding: &LetBinding,
    ) -> InferResult<(Substitution, TypeEnv)> {
        let name = binding.name.as_str();
        match binding.rec_flag {
            RecFlag::NonRecursive => {
                let (s1, ty) = self.infer_expr(env, &binding.value)?;
                let env1 = env.apply_subst(&s1);
                let scheme = env1.generalize(&ty);
                debug!(name, scheme = %scheme, "generalized binding");
                Ok((s1, env1.extend(name, scheme)))
            }
            RecFlag::Recursive => {
                let placeholder = self.fresh();
                let env1 = env.extend(name, TypeScheme::monomorphic(placeholder.clone()));
                let (s1, ty) = self.infer_expr(&env1, &binding.value)?;

                let s2 = unify(&s1.apply(&placeholder), &ty)?;
                let s = s1.compose(&s2)?;

                let env2 = env1.apply_subst(&s);
                let ty = s.apply(&ty);
                let scheme = env2.generalize_rec(&ty, name);
                debug!(name, scheme = %scheme, "generalized recursive binding");
                Ok((s, env2.extend(name, scheme)))
            }
        }
    }

    /// Infer tuple components (or cons operands) in order, honoring
    /// [`ComponentOrder`]. Returned types are not yet rewritten by the
    /// final substitution.
    fn infer_components<'e>(
        &mut self,
        env: &TypeEnv,
        items: impl IntoIterator<Item = &'e Expr>,
    ) -> InferResult<(Substitution, Vec<Type>)> {
        let mut subst = Substitution::empty();
        let mut types = Vec::new();
        for item in items {
            let (s, ty) = match self.options.component_order {
                ComponentOrder::Sequential => self.infer_expr(&env.apply_subst(&subst), item)?,
                ComponentOrder::Independent => self.infer_expr(env, item)?,
            };
            subst = subst.compose(&s)?;
            types.push(ty);
        }
        Ok((subst, types))
    }

    fn infer_cons(
        &mut self,
        env: &TypeEnv,
        head: &Expr,
        tail: &Expr,
    ) -> InferResult<(Substitution, Type)> {
        let (s1, types) = self.infer_components(env, [head, tail])?;
        let head_ty = s1.apply(&types[0]);
        let tail_ty = s1.apply(&types[1]);

        let s2 = unify(&Type::list(head_ty), &tail_ty)?;
        let s = s1.compose(&s2)?;

        let ty = s.apply(&tail_ty);
        Ok((s, ty))
    }

    fn infer_app(
        &mut self,
        env: &TypeEnv,
        func: &Expr,
        arg: &Expr,
    ) -> InferResult<(Substitution, Type)> {
        let (s1, func_ty) = self.infer_expr(env, func)?;
        let env1 = env.apply_subst(&s1);
        let (s2, arg_ty) = self.infer_expr(&env1, arg)?;

        let result_ty = self.fresh();
        let s = s1.compose(&s2)?;
        let expected_func_ty = Type::arrow(s.apply(&arg_ty), result_ty.clone());
        let s3 = unify(&s.apply(&func_ty), &expected_func_ty)?;
        let s = s.compose(&s3)?;

        let ty = s.apply(&result_ty);
        Ok((s, ty))
    }

    /// Type one top-level item and return the environment that follows it.
    pub fn infer_declaration(
        &mut self,
        env: &TypeEnv,
        declaration: &Declaration,
    ) -> InferResult<TypeEnv> {
        match declaration {
            Declaration::Value(binding) => {
                let (_, env1) = self.infer_binding(env, binding)?;
                Ok(env1)
            }
            Declaration::Expr(expr) => {
                let (_, ty) = self.infer_expr(env, expr)?;
                debug!(ty = %ty, "checked top-level expression");
                Ok(env.clone())
            }
            Declaration::Type(def) => Err(TypeError::not_implemented(format!(
                "type definition `{}`",
                def.name
            ))),
        }
    }

    /// Fold over the declarations, stopping at the first error.
    pub fn infer_program(&mut self, program: &[Declaration]) -> InferResult<TypeEnv> {
        let env = program
            .iter()
            .try_fold(TypeEnv::empty(), |env, decl| self.infer_declaration(&env, decl))?;
        debug!(bindings = env.len(), "program typed");
        Ok(env)
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}
