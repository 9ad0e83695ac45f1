//! Simplification rules for powers.

use crate::expr::Expr;
use crate::simplify::{rules::do_power, step::Step};
use crate::step_collector::StepCollector;

/// Nested exponents multiply.
///
/// `(a^b)^c = a^(b*c)`
pub fn nested_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exponent| {
        if let Expr::Exp(inner_base, inner_exponent) = base {
            Some(Expr::power(
                (**inner_base).clone(),
                Expr::Product(vec![(**inner_exponent).clone(), exponent.clone()]),
            ))
        } else {
            None
        }
    })?;

    step_collector.push(Step::NestedPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    nested_power(expr, step_collector)
}
