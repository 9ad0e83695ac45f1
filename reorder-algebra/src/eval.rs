//! Constant folding.

use crate::expr::Expr;

/// Folds every numeric subtree into a single [`Expr::Const`].
///
/// Sums and products fold their numeric children — in either spelling, see
/// [`Expr::as_number`] — and keep the folded constant first, ahead of any symbolic remainders.
/// Powers and logarithms fold when both operands are numeric. Function applications fold their
/// argument but are never folded themselves, since their numeric behavior is unknown. A purely
/// numeric tree therefore folds to one constant equal to its direct `f64` evaluation.
pub fn eval_consts(expr: &Expr) -> Expr {
    match expr {
        Expr::Sum(terms) => {
            let mut total = 0.0;
            let mut rest = Vec::new();
            for term in terms {
                let term = eval_consts(term);
                match term.as_number() {
                    Some(value) => total += value,
                    None => rest.push(term),
                }
            }

            if rest.is_empty() {
                Expr::Const(total)
            } else {
                let mut terms = vec![Expr::Const(total)];
                terms.extend(rest);
                Expr::Sum(terms)
            }
        },
        Expr::Product(factors) => {
            let mut total = 1.0;
            let mut rest = Vec::new();
            for factor in factors {
                let factor = eval_consts(factor);
                match factor.as_number() {
                    Some(value) => total *= value,
                    None => rest.push(factor),
                }
            }

            if rest.is_empty() {
                Expr::Const(total)
            } else {
                let mut factors = vec![Expr::Const(total)];
                factors.extend(rest);
                Expr::Product(factors)
            }
        },
        Expr::Neg(inner) => {
            let inner = eval_consts(inner);
            match inner.as_number() {
                Some(value) => Expr::Const(-value),
                None => Expr::Neg(Box::new(inner)),
            }
        },
        Expr::Inv(inner) => {
            let inner = eval_consts(inner);
            match inner.as_number() {
                Some(value) => Expr::Const(1.0 / value),
                None => Expr::Inv(Box::new(inner)),
            }
        },
        Expr::Exp(base, exponent) => {
            let base = eval_consts(base);
            let exponent = eval_consts(exponent);
            match (base.as_number(), exponent.as_number()) {
                (Some(base), Some(exponent)) => Expr::Const(base.powf(exponent)),
                _ => Expr::Exp(Box::new(base), Box::new(exponent)),
            }
        },
        Expr::Log(base, argument) => {
            let base = eval_consts(base);
            let argument = eval_consts(argument);
            match (base.as_number(), argument.as_number()) {
                (Some(base), Some(argument)) => Expr::Const(argument.log(base)),
                _ => Expr::Log(Box::new(base), Box::new(argument)),
            }
        },
        Expr::Func { name, inverse, arg } => Expr::Func {
            name: name.clone(),
            inverse: inverse.clone(),
            arg: Box::new(eval_consts(arg)),
        },
        Expr::Var(_) => match expr.as_number() {
            // normalize the legacy numeric-string spelling
            Some(value) => Expr::Const(value),
            None => expr.clone(),
        },
        Expr::Const(_) => expr.clone(),
    }
}

impl Expr {
    /// Folds every numeric subtree into a constant. See [`eval_consts`].
    pub fn eval_consts(&self) -> Expr {
        eval_consts(self)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numeric_sum_folds_completely() {
        // scenario A: 2 + 3 = 5
        let expr = Expr::num(2.0) + Expr::num(3.0);
        assert_eq!(expr.eval_consts(), Expr::Const(5.0));
    }

    #[test]
    fn folded_constant_stays_first() {
        let expr = Expr::Sum(vec![Expr::var("x"), Expr::num(2.0), Expr::num(3.0)]);
        assert_eq!(
            expr.eval_consts(),
            Expr::Sum(vec![Expr::Const(5.0), Expr::var("x")]),
        );

        let expr = Expr::Product(vec![Expr::var("x"), Expr::num(2.0), Expr::num(3.0)]);
        assert_eq!(
            expr.eval_consts(),
            Expr::Product(vec![Expr::Const(6.0), Expr::var("x")]),
        );
    }

    #[test]
    fn legacy_numeric_variables_fold_identically() {
        let expr = Expr::Sum(vec![Expr::var("2"), Expr::var("3")]);
        assert_eq!(expr.eval_consts(), Expr::Const(5.0));

        // a lone numeric name normalizes to the canonical spelling
        assert_eq!(Expr::var("2.5").eval_consts(), Expr::Const(2.5));
    }

    #[test]
    fn signs_and_inverses_fold() {
        assert_eq!(
            Expr::Neg(Box::new(Expr::num(4.0))).eval_consts(),
            Expr::Const(-4.0),
        );
        assert_eq!(
            Expr::Inv(Box::new(Expr::num(4.0))).eval_consts(),
            Expr::Const(0.25),
        );
        // symbolic operands keep their wrapper
        assert_eq!(
            Expr::Neg(Box::new(Expr::var("x"))).eval_consts(),
            Expr::Neg(Box::new(Expr::var("x"))),
        );
    }

    #[test]
    fn powers_and_logs_fold() {
        assert_eq!(
            Expr::power(Expr::num(2.0), Expr::num(10.0)).eval_consts(),
            Expr::Const(1024.0),
        );
        let Expr::Const(value) = Expr::log(Expr::num(2.0), Expr::num(8.0)).eval_consts() else {
            panic!("expected the logarithm to fold");
        };
        assert_float_absolute_eq!(value, 3.0);
        // a symbolic operand blocks folding at this node only
        assert_eq!(
            Expr::power(Expr::var("x"), Expr::num(2.0) + Expr::num(1.0)).eval_consts(),
            Expr::power(Expr::var("x"), Expr::Const(3.0)),
        );
    }

    #[test]
    fn matches_direct_evaluation() {
        // -(2 * (3 + 4)) / 2 = -7
        let expr = Expr::Neg(Box::new(
            Expr::num(2.0) * (Expr::num(3.0) + Expr::num(4.0)),
        )) / Expr::num(2.0);
        assert_eq!(expr.eval_consts(), Expr::Const(-(2.0 * (3.0 + 4.0)) / 2.0));
    }

    #[test]
    fn function_arguments_fold_but_calls_do_not() {
        let expr = Expr::func("sin", "asin", Expr::num(1.0) + Expr::num(2.0));
        assert_eq!(
            expr.eval_consts(),
            Expr::func("sin", "asin", Expr::Const(3.0)),
        );
    }
}
