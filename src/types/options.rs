//! Configuration options for type inference.

/// How the components of a tuple, and the two operands of `::`, are inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentOrder {
    /// Infer left to right, each component against the environment
    /// rewritten by the substitutions of the components before it.
    #[default]
    Sequential,
    /// Infer every component against the original environment and compose
    /// the substitutions only at the end.
    Independent,
}

/// Configuration options for an [`Infer`](super::Infer) run.
///
/// # Example
///
/// ```
/// use mini_ml_typer::types::{ComponentOrder, Infer, InferOptions};
///
/// let infer = Infer::with_options(InferOptions {
///     component_order: ComponentOrder::Independent,
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InferOptions {
    /// Default: [`ComponentOrder::Sequential`]
    pub component_order: ComponentOrder,
}
