pub mod declaration;
pub mod expression;
pub mod pattern;

pub use declaration::{Declaration, TypeDefinition};
pub use expression::{BinOp, Constant, Expr, LetBinding, MatchArm, OperatorClass, RecFlag};
pub use pattern::Pattern;

/// A whole program: top-level declarations in source order.
pub type Program = Vec<Declaration>;
