//! The inverse of distribution for a specific shared factor.

use reorder_error::Error;
use crate::error::{KindMismatch, MissingFactor};
use crate::expr::Expr;

/// Rewrites a sum so every term is expressed as `target * quotient`, returning
/// `Product[target, Sum(quotients)]`.
///
/// A term must either be structurally equal to `target` (quotient `1`), or be a product containing
/// `target` as an exact element (quotient = the remaining factors). Negated terms are unwrapped
/// first and their quotient re-negated after.
///
/// Errors with [`KindMismatch`] when `expr` is not a sum, and with [`MissingFactor`] when a term
/// has neither shape.
pub fn factor(expr: &Expr, target: &Expr) -> Result<Expr, Error> {
    let Expr::Sum(terms) = expr else {
        return Err(Error::from_kind(KindMismatch {
            expected: "sum",
            found: expr.kind_name(),
        }));
    };

    let mut quotients = Vec::with_capacity(terms.len());
    for term in terms {
        let (negated, bare) = match term {
            Expr::Neg(inner) => (true, &**inner),
            term => (false, term),
        };

        let quotient = if let Expr::Product(factors) = bare {
            let idx = factors.iter()
                .position(|factor| factor == target)
                .ok_or_else(|| Error::from_kind(MissingFactor {
                    factor: target.to_string(),
                    term: term.to_string(),
                }))?;

            let mut rest = factors.clone();
            rest.remove(idx);
            Expr::Product(rest).downgrade()
        } else if bare == target {
            Expr::Const(1.0)
        } else {
            return Err(Error::from_kind(MissingFactor {
                factor: target.to_string(),
                term: term.to_string(),
            }));
        };

        if negated {
            quotients.push(Expr::Neg(Box::new(quotient)));
        } else {
            quotients.push(quotient);
        }
    }

    Ok(Expr::Product(vec![target.clone(), Expr::Sum(quotients)]))
}

impl Expr {
    /// Factors this sum by the given shared sub-expression. See [`factor`].
    pub fn factor(&self, target: &Expr) -> Result<Expr, Error> {
        factor(self, target)
    }
}
