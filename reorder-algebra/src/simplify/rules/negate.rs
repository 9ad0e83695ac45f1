//! Simplification rules for negation.

use crate::expr::Expr;
use crate::simplify::{rules::do_negate, step::Step};
use crate::step_collector::StepCollector;

/// `-(-x) = x`
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negate(expr, |inner| {
        if let Expr::Neg(inner) = inner {
            Some((**inner).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::DoubleNegation);
    Some(opt)
}

/// Distributes a negation over a sum.
///
/// `-(a + b) = -a + -b`
pub fn negate_sum(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negate(expr, |inner| {
        if let Expr::Sum(terms) = inner {
            let new_terms = terms.iter()
                .map(|term| Expr::Neg(Box::new(term.clone())))
                .collect::<Vec<_>>();
            Some(Expr::Sum(new_terms))
        } else {
            None
        }
    })?;

    step_collector.push(Step::NegateSum);
    Some(opt)
}

/// Applies all negation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_negation(expr, step_collector)
        .or_else(|| negate_sum(expr, step_collector))
}
