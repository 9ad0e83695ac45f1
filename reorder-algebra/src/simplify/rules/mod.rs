//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply.

pub mod function;
pub mod invert;
pub mod log;
pub mod negate;
pub mod power;
pub mod product;
pub mod sum;

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a sum, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_sum(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Sum(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function with the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_product(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Product(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a negation, calls the given transformation function with the operand.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_negate(expr: &Expr, f: impl Copy + Fn(&Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Neg(inner) = expr {
        f(inner)
    } else {
        None
    }
}

/// If the expression is an inverse, calls the given transformation function with the operand.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_invert(expr: &Expr, f: impl Copy + Fn(&Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Inv(inner) = expr {
        f(inner)
    } else {
        None
    }
}

/// If the expression is a power, calls the given transformation function with the base and
/// exponent.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl Copy + Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp(base, exponent) = expr {
        f(base, exponent)
    } else {
        None
    }
}

/// If the expression is a logarithm, calls the given transformation function with the base and
/// argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_log(expr: &Expr, f: impl Copy + Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Log(base, argument) = expr {
        f(base, argument)
    } else {
        None
    }
}

/// If the expression is a function application, calls the given transformation function with the
/// function name, inverse name, and argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_func(
    expr: &Expr,
    f: impl Copy + Fn(&str, &str, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    if let Expr::Func { name, inverse, arg } = expr {
        f(name, inverse, arg)
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sum::all(expr, step_collector)
        .or_else(|| product::all(expr, step_collector))
        .or_else(|| negate::all(expr, step_collector))
        .or_else(|| invert::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| log::all(expr, step_collector))
        .or_else(|| function::all(expr, step_collector))
}
