//! Replacement of sub-trees by structural equality.

use crate::expr::Expr;

/// Returns a tree in which every subtree structurally equal to `find` — the root included — is
/// replaced by `replacement`.
///
/// The comparison happens before recursion at every node, so occurrences of `find` *inside* an
/// inserted `replacement` are never expanded again.
pub fn substitute(expr: &Expr, find: &Expr, replacement: &Expr) -> Expr {
    if expr == find {
        return replacement.clone();
    }

    match expr {
        Expr::Sum(terms) => Expr::Sum(
            terms.iter().map(|term| substitute(term, find, replacement)).collect(),
        ),
        Expr::Product(factors) => Expr::Product(
            factors.iter().map(|factor| substitute(factor, find, replacement)).collect(),
        ),
        Expr::Neg(inner) => Expr::Neg(Box::new(substitute(inner, find, replacement))),
        Expr::Inv(inner) => Expr::Inv(Box::new(substitute(inner, find, replacement))),
        Expr::Exp(base, exponent) => Expr::Exp(
            Box::new(substitute(base, find, replacement)),
            Box::new(substitute(exponent, find, replacement)),
        ),
        Expr::Log(base, argument) => Expr::Log(
            Box::new(substitute(base, find, replacement)),
            Box::new(substitute(argument, find, replacement)),
        ),
        Expr::Func { name, inverse, arg } => Expr::Func {
            name: name.clone(),
            inverse: inverse.clone(),
            arg: Box::new(substitute(arg, find, replacement)),
        },
        Expr::Var(_) | Expr::Const(_) => expr.clone(),
    }
}

impl Expr {
    /// Replaces every subtree structurally equal to `find` with `replacement`. See [`substitute`].
    pub fn substitute(&self, find: &Expr, replacement: &Expr) -> Expr {
        substitute(self, find, replacement)
    }
}
