//! Simplification rules for named functions with declared inverses.

use crate::expr::Expr;
use crate::simplify::{rules::do_func, step::Step};
use crate::step_collector::StepCollector;

/// A function applied to its declared inverse cancels.
///
/// `f(g(x)) = x` when `f` names `g` as its inverse and `g` names `f` back.
pub fn inverse_cancel(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_func(expr, |name, inverse, arg| {
        if let Expr::Func { name: inner_name, inverse: inner_inverse, arg: inner_arg } = arg {
            // both declarations must agree before cancelling
            if inner_inverse == name && inner_name == inverse {
                return Some((**inner_arg).clone());
            }
        }

        None
    })?;

    step_collector.push(Step::InverseCancel);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    inverse_cancel(expr, step_collector)
}
