//! Simplification rules for sums.

use crate::expr::Expr;
use crate::simplify::{rules::do_sum, step::Step};
use crate::step_collector::StepCollector;

/// Flattens nested sums into the outer sum.
///
/// `a + (b + c) = a + b + c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Sum(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Sum(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(Expr::Sum(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenSum);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn drop_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| {
                // keep all non-zero terms; both `Const` and numeric-string `Var` count as zero
                term.as_number() != Some(0.0)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Sum(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::DropZero);
    Some(opt)
}

/// Collapses a sum with zero or one terms.
pub fn collapse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        if terms.len() <= 1 {
            Some(Expr::Sum(terms.to_vec()).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CollapseSum);
    Some(opt)
}

/// Applies all sum rules.
///
/// All sum rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| drop_zero(expr, step_collector))
        .or_else(|| collapse(expr, step_collector))
}
