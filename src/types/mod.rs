pub mod env;
pub mod error;
pub mod infer;
pub mod options;
pub mod pattern;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::{InferResult, TypeError};
pub use infer::Infer;
pub use options::{ComponentOrder, InferOptions};
pub use subst::Substitution;
pub use ty::{Primitive, Type, TypeScheme, TypeVar};
pub use unify::unify;

use crate::ast::Declaration;

/// Type a whole program with default options.
///
/// Returns the environment after the last declaration, or the first error.
pub fn infer_program(program: &[Declaration]) -> InferResult<TypeEnv> {
    Infer::new().infer_program(program)
}
