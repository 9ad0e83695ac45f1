//! Reduction of expressions to a canonical-ish smaller equivalent form.
//!
//! Simplification is done by applying a set of rewrite rules to the expression in multiple
//! passes. Each rule is simply a function that accepts an expression and returns [`Option<Expr>`];
//! if the rule is applicable to the expression, the rule is applied and the result is returned.
//! The current set of rules is defined in [`rules`], and covers dropping identity operands,
//! flattening nested sums / products, sign normalization, basic power and logarithm rules, and
//! inverse-function cancellation.
//!
//! A pass walks the tree bottom-up and applies the first applicable rule at every node; passes
//! repeat until one changes nothing. Because [`simplify`] runs to a fixed point, it is idempotent:
//! `simplify(simplify(e)) == simplify(e)` for every well-formed expression.

pub mod rules;
pub mod step;

pub use step::Step;

use crate::expr::Expr;
use crate::step_collector::StepCollector;

/// Simplifies an expression, discarding the steps taken.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &mut ())
}

/// Simplifies an expression, returning the simplified form together with every rule that fired,
/// in firing order.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let result = simplify_with(expr, &mut steps);
    (result, steps)
}

/// Simplifies an expression, reporting each applied rule to the given step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut current = expr.clone();
    loop {
        let next = simplify_pass(&current, step_collector);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Runs one bottom-up pass over the tree, applying at most one rule per node.
fn simplify_pass(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = match expr {
        Expr::Sum(terms) => Expr::Sum(
            terms.iter().map(|term| simplify_pass(term, step_collector)).collect(),
        ),
        Expr::Product(factors) => Expr::Product(
            factors.iter().map(|factor| simplify_pass(factor, step_collector)).collect(),
        ),
        Expr::Neg(inner) => Expr::Neg(Box::new(simplify_pass(inner, step_collector))),
        Expr::Inv(inner) => Expr::Inv(Box::new(simplify_pass(inner, step_collector))),
        Expr::Exp(base, exponent) => Expr::Exp(
            Box::new(simplify_pass(base, step_collector)),
            Box::new(simplify_pass(exponent, step_collector)),
        ),
        Expr::Log(base, argument) => Expr::Log(
            Box::new(simplify_pass(base, step_collector)),
            Box::new(simplify_pass(argument, step_collector)),
        ),
        Expr::Func { name, inverse, arg } => Expr::Func {
            name: name.clone(),
            inverse: inverse.clone(),
            arg: Box::new(simplify_pass(arg, step_collector)),
        },
        Expr::Var(_) | Expr::Const(_) => expr.clone(),
    };

    rules::all(&expr, step_collector).unwrap_or(expr)
}

impl Expr {
    /// Returns a structurally reduced but mathematically equivalent form of this expression.
    ///
    /// The result is a fixed point: simplifying it again returns it unchanged.
    pub fn simplify(&self) -> Expr {
        simplify(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Asserts that `expr` simplifies to `expected`, and that the result is a fixed point.
    fn check(expr: Expr, expected: Expr) {
        let simplified = expr.simplify();
        assert_eq!(simplified, expected);
        assert_eq!(simplified.simplify(), simplified);
    }

    #[test]
    fn sum_drops_zero_terms() {
        check(
            Expr::Sum(vec![Expr::var("x"), Expr::num(0.0), Expr::var("y")]),
            Expr::Sum(vec![Expr::var("x"), Expr::var("y")]),
        );
        // legacy numeric-string zero folds identically
        check(
            Expr::Sum(vec![Expr::var("x"), Expr::var("0"), Expr::var("y")]),
            Expr::Sum(vec![Expr::var("x"), Expr::var("y")]),
        );
    }

    #[test]
    fn sum_flattens_and_collapses() {
        check(
            Expr::Sum(vec![
                Expr::var("a"),
                Expr::Sum(vec![Expr::var("b"), Expr::var("c")]),
            ]),
            Expr::Sum(vec![Expr::var("a"), Expr::var("b"), Expr::var("c")]),
        );
        check(
            Expr::Sum(vec![Expr::num(0.0), Expr::var("x")]),
            Expr::var("x"),
        );
        check(Expr::Sum(vec![Expr::num(0.0)]), Expr::num(0.0));
        check(Expr::Sum(Vec::new()), Expr::num(0.0));
    }

    #[test]
    fn product_drops_ones_and_short_circuits_zero() {
        check(
            Expr::Product(vec![Expr::num(1.0), Expr::var("x"), Expr::num(1.0)]),
            Expr::var("x"),
        );
        check(
            Expr::Product(vec![Expr::var("x"), Expr::num(0.0), Expr::var("y")]),
            Expr::num(0.0),
        );
        check(Expr::Product(Vec::new()), Expr::num(1.0));
    }

    #[test]
    fn product_flattens() {
        check(
            Expr::Product(vec![
                Expr::var("a"),
                Expr::Product(vec![Expr::var("b"), Expr::var("c")]),
            ]),
            Expr::Product(vec![Expr::var("a"), Expr::var("b"), Expr::var("c")]),
        );
    }

    #[test]
    fn product_normalizes_signs_by_parity() {
        // two negations cancel
        check(
            Expr::Product(vec![
                Expr::Neg(Box::new(Expr::var("a"))),
                Expr::Neg(Box::new(Expr::var("b"))),
            ]),
            Expr::Product(vec![Expr::var("a"), Expr::var("b")]),
        );
        // an odd count leaves one outer sign
        check(
            Expr::Product(vec![
                Expr::Neg(Box::new(Expr::var("a"))),
                Expr::var("b"),
            ]),
            Expr::Neg(Box::new(Expr::Product(vec![Expr::var("a"), Expr::var("b")]))),
        );
    }

    #[test]
    fn product_combines_repeated_factors() {
        // scenario B: x * x = x^2
        check(
            Expr::var("x") * Expr::var("x"),
            Expr::power(Expr::var("x"), Expr::num(2.0)),
        );
        check(
            Expr::Product(vec![Expr::var("x"), Expr::var("y"), Expr::var("x"), Expr::var("x")]),
            Expr::Product(vec![
                Expr::power(Expr::var("x"), Expr::num(3.0)),
                Expr::var("y"),
            ]),
        );
        // numeric factors are left for eval_consts
        check(
            Expr::num(2.0) * Expr::num(2.0),
            Expr::Product(vec![Expr::num(2.0), Expr::num(2.0)]),
        );
    }

    #[test]
    fn negation_rules() {
        check(
            Expr::Neg(Box::new(Expr::Neg(Box::new(Expr::var("x"))))),
            Expr::var("x"),
        );
        check(
            Expr::Neg(Box::new(Expr::var("a") + Expr::var("b"))),
            Expr::Sum(vec![
                Expr::Neg(Box::new(Expr::var("a"))),
                Expr::Neg(Box::new(Expr::var("b"))),
            ]),
        );
    }

    #[test]
    fn inverse_rules() {
        check(
            Expr::Inv(Box::new(Expr::Inv(Box::new(Expr::var("x"))))),
            Expr::var("x"),
        );
        check(
            Expr::Inv(Box::new(Expr::Neg(Box::new(Expr::var("x"))))),
            Expr::Neg(Box::new(Expr::Inv(Box::new(Expr::var("x"))))),
        );
        check(
            Expr::Inv(Box::new(Expr::var("a") * Expr::var("b"))),
            Expr::Product(vec![
                Expr::Inv(Box::new(Expr::var("a"))),
                Expr::Inv(Box::new(Expr::var("b"))),
            ]),
        );
    }

    #[test]
    fn nested_powers_multiply() {
        check(
            Expr::power(
                Expr::power(Expr::var("a"), Expr::var("b")),
                Expr::var("c"),
            ),
            Expr::power(
                Expr::var("a"),
                Expr::Product(vec![Expr::var("b"), Expr::var("c")]),
            ),
        );
    }

    #[test]
    fn log_rules() {
        // log_b(a^c) = c log_b(a)
        check(
            Expr::log(
                Expr::var("b"),
                Expr::power(Expr::var("a"), Expr::var("c")),
            ),
            Expr::Product(vec![
                Expr::var("c"),
                Expr::log(Expr::var("b"), Expr::var("a")),
            ]),
        );
        // log_(a^c)(x) = log_a(x)/c
        check(
            Expr::log(
                Expr::power(Expr::var("a"), Expr::var("c")),
                Expr::var("x"),
            ),
            Expr::Product(vec![
                Expr::log(Expr::var("a"), Expr::var("x")),
                Expr::Inv(Box::new(Expr::var("c"))),
            ]),
        );
    }

    #[test]
    fn inverse_functions_cancel() {
        check(
            Expr::func("sin", "asin", Expr::func("asin", "sin", Expr::var("x"))),
            Expr::var("x"),
        );
        // mismatched declarations do not cancel
        check(
            Expr::func("sin", "asin", Expr::func("cos", "acos", Expr::var("x"))),
            Expr::func("sin", "asin", Expr::func("cos", "acos", Expr::var("x"))),
        );
    }

    #[test]
    fn deep_composition() {
        // -(-x * 1 + 0) simplifies all the way down to x
        let expr = Expr::Neg(Box::new(Expr::Sum(vec![
            Expr::Product(vec![
                Expr::Neg(Box::new(Expr::var("x"))),
                Expr::num(1.0),
            ]),
            Expr::num(0.0),
        ])));
        check(expr, Expr::var("x"));
    }

    #[test]
    fn steps_are_recorded() {
        let expr = Expr::Sum(vec![Expr::var("x"), Expr::num(0.0)]);
        let (result, steps) = simplify_with_steps(&expr);
        assert_eq!(result, Expr::var("x"));
        assert!(steps.contains(&Step::DropZero));
    }

    #[test]
    fn idempotence_over_shapes() {
        let shapes = vec![
            Expr::var("x"),
            Expr::num(3.5),
            Expr::var("x") + Expr::var("x"),
            (Expr::var("a") + Expr::var("b")) * Expr::var("c"),
            Expr::Inv(Box::new(Expr::Product(vec![
                Expr::Neg(Box::new(Expr::var("p"))),
                Expr::var("q"),
            ]))),
            Expr::log(
                Expr::power(Expr::num(2.0), Expr::var("k")),
                Expr::power(Expr::var("x"), Expr::num(3.0)),
            ),
            Expr::func("exp", "ln", Expr::func("ln", "exp", Expr::var("t"))),
        ];
        for expr in shapes {
            let once = expr.simplify();
            assert_eq!(once.simplify(), once, "not a fixed point: {}", expr);
        }
    }
}
