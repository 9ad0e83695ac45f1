//! Simplification rules for multiplicative inverses.

use crate::expr::Expr;
use crate::simplify::{rules::do_invert, step::Step};
use crate::step_collector::StepCollector;

/// `1/(1/x) = x`
pub fn double_inverse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_invert(expr, |inner| {
        if let Expr::Inv(inner) = inner {
            Some((**inner).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::DoubleInverse);
    Some(opt)
}

/// Moves a negation out of an inverse.
///
/// `1/(-x) = -(1/x)`
pub fn invert_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_invert(expr, |inner| {
        if let Expr::Neg(inner) = inner {
            Some(Expr::Neg(Box::new(Expr::Inv(inner.clone()))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::InvertNegation);
    Some(opt)
}

/// Distributes an inverse over a product.
///
/// `1/(a*b) = (1/a)*(1/b)`
pub fn invert_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_invert(expr, |inner| {
        if let Expr::Product(factors) = inner {
            let new_factors = factors.iter()
                .map(|factor| Expr::Inv(Box::new(factor.clone())))
                .collect::<Vec<_>>();
            Some(Expr::Product(new_factors))
        } else {
            None
        }
    })?;

    step_collector.push(Step::InvertProduct);
    Some(opt)
}

/// Applies all inverse rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_inverse(expr, step_collector)
        .or_else(|| invert_negation(expr, step_collector))
        .or_else(|| invert_product(expr, step_collector))
}
