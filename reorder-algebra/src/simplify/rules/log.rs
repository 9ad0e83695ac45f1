//! Simplification rules for logarithms.

use crate::expr::Expr;
use crate::simplify::{rules::do_log, step::Step};
use crate::step_collector::StepCollector;

/// A power inside a logarithm becomes a coefficient.
///
/// `log_b(a^c) = c*log_b(a)`
pub fn log_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_log(expr, |base, argument| {
        if let Expr::Exp(arg_base, arg_exponent) = argument {
            Some(Expr::Product(vec![
                (**arg_exponent).clone(),
                Expr::log(base.clone(), (**arg_base).clone()),
            ]))
        } else {
            None
        }
    })?;

    step_collector.push(Step::LogOfPower);
    Some(opt)
}

/// A power in a logarithm's base divides the result.
///
/// `log_(a^c)(x) = log_a(x)/c`
pub fn power_base_log(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_log(expr, |base, argument| {
        if let Expr::Exp(base_base, base_exponent) = base {
            Some(Expr::Product(vec![
                Expr::log((**base_base).clone(), argument.clone()),
                Expr::Inv(base_exponent.clone()),
            ]))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerBaseLog);
    Some(opt)
}

/// Applies all logarithm rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    log_of_power(expr, step_collector)
        .or_else(|| power_base_log(expr, step_collector))
}
