//! Expansion of a product over a sum.

use reorder_error::Error;
use crate::error::{EmptyProduct, NoSumFactor};
use crate::expr::Expr;

/// Expands a product over its first sum factor into a sum of products.
///
/// The first sum factor wins; the order of factors is significant and not configurable. Every
/// other variant passes through unchanged, except [`Expr::Neg`], which distributes its operand
/// and keeps the sign.
///
/// Errors with [`EmptyProduct`] for a product with no factors, and with [`NoSumFactor`] when no
/// factor is a sum.
pub fn distribute(expr: &Expr) -> Result<Expr, Error> {
    match expr {
        Expr::Product(factors) => {
            if factors.is_empty() {
                return Err(Error::from_kind(EmptyProduct));
            }

            let sum_idx = factors.iter()
                .position(|factor| matches!(factor, Expr::Sum(_)))
                .ok_or_else(|| Error::from_kind(NoSumFactor))?;

            let mut rest = factors.clone();
            let Expr::Sum(terms) = rest.remove(sum_idx) else {
                unreachable!()
            };

            let new_terms = terms.into_iter()
                .map(|term| {
                    let mut factors = rest.clone();
                    factors.push(term);
                    Expr::Product(factors)
                })
                .collect::<Vec<_>>();
            Ok(Expr::Sum(new_terms))
        },
        Expr::Neg(inner) => Ok(Expr::Neg(Box::new(distribute(inner)?))),
        expr => Ok(expr.clone()),
    }
}

impl Expr {
    /// Expands this product over its first sum factor. See [`distribute`].
    pub fn distribute(&self) -> Result<Expr, Error> {
        distribute(self)
    }
}
