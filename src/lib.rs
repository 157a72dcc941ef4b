//! # mini-ml-typer - Hindley-Milner inference for a small ML
//!
//! Types programs written in a small ML-like expression language: constants,
//! variables, binary operators, conditionals, pattern matching, `let` and
//! `let rec`, lambdas, application, tuples and lists.
//!
//! ## Pipeline Position
//!
//! ```text
//! Front-end (parser, not included)
//!     ↓
//! [ast] → Vec<Declaration>
//!     ↓
//! [types] → TypeEnv (name → type scheme) or the first TypeError
//! ```
//!
//! ## Type System
//! The checker implements Algorithm W:
//! - Unification with an occurs check, so no infinite types are built
//! - Substitutions composed as a finite, always-resolved map
//! - Let-polymorphism via generalization and instantiation
//! - Fresh type variables drawn from a counter owned by the [`types::Infer`] run
//!
//! Data constructors, polymorphic variants and type definitions are
//! representable in the tree but rejected with [`types::TypeError::NotImplemented`]
//! (or [`types::TypeError::PatternMatching`] in patterns).
//!
//! ## Example
//!
//! ```
//! use mini_ml_typer::ast::{Declaration, Expr};
//! use mini_ml_typer::types::infer_program;
//!
//! // let id = fun x -> x
//! // let pair = (id 1, id true)
//! let program = vec![
//!     Declaration::value("id", Expr::fun("x", Expr::var("x"))),
//!     Declaration::value(
//!         "pair",
//!         Expr::tuple(vec![
//!             Expr::app(Expr::var("id"), Expr::int(1)),
//!             Expr::app(Expr::var("id"), Expr::bool(true)),
//!         ]),
//!     ),
//! ];
//!
//! let env = infer_program(&program).unwrap();
//! assert_eq!(env.lookup("id").unwrap().to_string(), "'a -> 'a");
//! assert_eq!(env.lookup("pair").unwrap().to_string(), "int * bool");
//! ```
//!
//! ## Module Structure
//!
//! - [`ast`] - Expressions, patterns and declarations consumed by inference
//! - [`types`] - Types, substitutions, unification, environments and the driver

pub mod ast;
pub mod types;
