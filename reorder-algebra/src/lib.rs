//! Expression trees and the rewrite operations of the `reorder` stack calculator.
//!
//! The [`Expr`] type represents an algebraic expression as a tree of tagged nodes: n-ary sums and
//! products, unary negation and multiplicative inverse, powers, logarithms, named unary functions
//! with a declared inverse, free variables and numeric constants.
//!
//! Every rewrite operation in this crate takes an expression and returns a new, mathematically
//! equivalent one (or a pair of them), never mutating its input:
//!
//! - [`simplify`](crate::simplify::simplify) reduces an expression to a structurally smaller
//!   equivalent form and is idempotent;
//! - [`distribute`](crate::distribute::distribute) expands a product over its first sum factor;
//! - [`factor`](crate::factor::factor) is its inverse for a chosen shared factor;
//! - [`extract`](crate::isolate::extract) isolates a sub-term, adjusting a right-hand side the way
//!   one moves everything else to the other side of an equation;
//! - [`select`](crate::isolate::select) isolates a sub-term while leaving a named placeholder in
//!   its position;
//! - [`substitute`](crate::substitute::substitute) replaces every occurrence of a sub-tree;
//! - [`eval_consts`](crate::eval::eval_consts) folds numeric subtrees into constants.
//!
//! Fallible operations report failures through [`reorder_error::Error`] with distinguishable
//! kinds (see [`error`]), so callers can match on what went wrong rather than on message text.

pub mod distribute;
pub mod error;
pub mod eval;
pub mod expr;
pub mod factor;
pub mod functions;
pub mod isolate;
pub mod layout;
pub mod simplify;
pub mod step_collector;
pub mod substitute;

pub use expr::Expr;
pub use isolate::Index;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
