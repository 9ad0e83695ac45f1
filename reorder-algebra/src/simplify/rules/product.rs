//! Simplification rules for products, including sign normalization and combining repeated
//! factors.

use crate::expr::Expr;
use crate::simplify::{rules::do_product, step::Step};
use crate::step_collector::StepCollector;

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if !factors.is_empty() && factors.iter().any(|factor| factor.as_number() == Some(0.0)) {
            Some(Expr::Const(0.0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn drop_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| {
                // keep all non-one factors; both `Const` and numeric-string `Var` count as one
                factor.as_number() != Some(1.0)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Product(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::DropOne);
    Some(opt)
}

/// Flattens nested products into the outer product.
///
/// `a * (b * c) = a * b * c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Product(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Product(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(Expr::Product(new_factors))
    })?;

    step_collector.push(Step::FlattenProduct);
    Some(opt)
}

/// Folds negated factors into a single outer sign by parity.
///
/// `(-a)*(-b) = a*b`
/// `(-a)*b = -(a*b)`
pub fn extract_signs(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Neg(_))) {
            return None;
        }

        let mut negative = false;
        let mut stripped = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Neg(inner) => {
                    negative = !negative;
                    stripped.push((**inner).clone());
                },
                factor => stripped.push(factor.clone()),
            }
        }

        let inner = Expr::Product(stripped).downgrade();
        if negative {
            Some(Expr::Neg(Box::new(inner)))
        } else {
            Some(inner)
        }
    })?;

    step_collector.push(Step::ExtractSigns);
    Some(opt)
}

/// Combines repeated factors into a power.
///
/// `x*x = x^2`
/// `x*y*x*x = x^3*y`
///
/// Only strictly equal, non-numeric factors are combined; numeric factors are left for constant
/// folding.
pub fn combine_repeated(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_idx < new_factors.len() {
            if new_factors[current_idx].as_number().is_some() {
                current_idx += 1;
                continue;
            }

            let mut count = 1usize;
            let mut next_idx = current_idx + 1;
            while next_idx < new_factors.len() {
                if new_factors[next_idx] == new_factors[current_idx] {
                    count += 1;
                    new_factors.remove(next_idx);
                } else {
                    next_idx += 1;
                }
            }

            if count > 1 {
                let base = new_factors[current_idx].clone();
                new_factors[current_idx] = Expr::power(base, Expr::Const(count as f64));
            }

            current_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Product(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineRepeated);
    Some(opt)
}

/// Collapses a product with zero or one factors.
pub fn collapse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if factors.len() <= 1 {
            Some(Expr::Product(factors.to_vec()).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CollapseProduct);
    Some(opt)
}

/// Applies all product rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply_zero(expr, step_collector)
        .or_else(|| drop_one(expr, step_collector))
        .or_else(|| flatten(expr, step_collector))
        .or_else(|| extract_signs(expr, step_collector))
        .or_else(|| combine_repeated(expr, step_collector))
        .or_else(|| collapse(expr, step_collector))
}
