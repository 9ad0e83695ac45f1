//! Isolation of sub-expressions: `extract` and `select`.
//!
//! Both operations address a piece of a node with an [`Index`] and return a pair. [`extract`]
//! performs the algebraic move of "moving everything else to the other side of an equation whose
//! right-hand side is `rhs`"; [`select`] leaves a named placeholder where the piece was, so it can
//! be substituted back later.

use reorder_error::Error;
use std::fmt;
use crate::error::IndexOutOfRange;
use crate::expr::Expr;

/// A structural position inside an expression node.
///
/// Each variant defines its own valid domain: sums and products accept any position (or span)
/// within their child list; powers and logarithms accept exactly `0` (the base) and `1` (the
/// exponent / argument); every other variant accepts only `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// A single child position.
    At(usize),

    /// A half-open span of children, valid only on sums and products.
    Span(usize, usize),
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(idx) => write!(f, "{}", idx),
            Self::Span(start, stop) => write!(f, "{}..{}", start, stop),
        }
    }
}

/// Builds the index-range error for a node.
fn out_of_range(index: Index, domain: impl Into<String>) -> Error {
    Error::from_kind(IndexOutOfRange {
        index,
        domain: domain.into(),
    })
}

/// Splits a child list around `index`, returning the selected children and the rest in order.
///
/// Errors when the index falls outside the list, or when a span is not strictly increasing.
fn split_children(
    children: &[Expr],
    index: Index,
    kind_name: &'static str,
) -> Result<(Vec<Expr>, Vec<Expr>, usize), Error> {
    match index {
        Index::At(idx) if idx < children.len() => {
            let mut rest = children.to_vec();
            let picked = rest.remove(idx);
            Ok((vec![picked], rest, idx))
        },
        Index::Span(start, stop) if start < stop && stop <= children.len() => {
            let picked = children[start..stop].to_vec();
            let mut rest = children[..start].to_vec();
            rest.extend(children[stop..].iter().cloned());
            Ok((picked, rest, start))
        },
        index => Err(out_of_range(
            index,
            format!("positions 0..{} of this {}", children.len(), kind_name),
        )),
    }
}

/// Isolates the piece of `expr` at `index`, returning `(isolated, adjusted_rhs)`.
///
/// The adjusted right-hand side is the algebraic consequence of removing the piece: extracting a
/// term of a sum subtracts the other terms from `rhs`, extracting a factor of a product divides
/// `rhs` by the others, extracting the exponent of a power takes the logarithm of `rhs`, and so
/// on. Indexing outside a variant's domain errors with
/// [`IndexOutOfRange`](crate::error::IndexOutOfRange).
pub fn extract(expr: &Expr, rhs: &Expr, index: Index) -> Result<(Expr, Expr), Error> {
    match expr {
        Expr::Sum(terms) => {
            let (picked, rest, _) = split_children(terms, index, "sum")?;
            let isolated = Expr::Sum(picked).downgrade();
            Ok((isolated, rhs.clone() - Expr::Sum(rest)))
        },
        Expr::Product(factors) => {
            let (picked, rest, _) = split_children(factors, index, "product")?;
            let isolated = Expr::Product(picked).downgrade();
            Ok((isolated, rhs.clone() / Expr::Product(rest)))
        },
        Expr::Neg(inner) => match index {
            Index::At(0) => Ok(((**inner).clone(), -rhs.clone())),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Inv(inner) => match index {
            Index::At(0) => Ok(((**inner).clone(), Expr::Inv(Box::new(rhs.clone())))),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Exp(base, exponent) => match index {
            Index::At(0) => Ok((
                (**base).clone(),
                Expr::power(rhs.clone(), Expr::Inv(exponent.clone())),
            )),
            Index::At(1) => Ok((
                (**exponent).clone(),
                Expr::log((**base).clone(), rhs.clone()),
            )),
            index => Err(out_of_range(index, "indices 0 and 1")),
        },
        Expr::Log(base, argument) => match index {
            Index::At(0) => Ok((
                (**base).clone(),
                Expr::power((**argument).clone(), Expr::Inv(Box::new(rhs.clone()))),
            )),
            Index::At(1) => Ok((
                (**argument).clone(),
                Expr::power((**base).clone(), rhs.clone()),
            )),
            index => Err(out_of_range(index, "indices 0 and 1")),
        },
        Expr::Var(_) | Expr::Const(_) => match index {
            Index::At(0) => Ok((expr.clone(), rhs.clone())),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Func { name, inverse, arg } => match index {
            Index::At(0) => Ok((
                (**arg).clone(),
                Expr::func(inverse.clone(), name.clone(), rhs.clone()),
            )),
            index => Err(out_of_range(index, "index 0 only")),
        },
    }
}

/// Isolates the piece of `expr` at `index`, replacing it in place with the placeholder variable
/// `name` and returning `(isolated, remainder_with_placeholder)`.
///
/// The structural addressing is identical to [`extract`].
pub fn select(expr: &Expr, name: &str, index: Index) -> Result<(Expr, Expr), Error> {
    let placeholder = Expr::var(name);
    match expr {
        Expr::Sum(terms) => {
            let (picked, _, at) = split_children(terms, index, "sum")?;
            let mut remainder = terms.to_vec();
            remainder.splice(at..at + picked.len(), [placeholder]);
            Ok((Expr::Sum(picked).downgrade(), Expr::Sum(remainder)))
        },
        Expr::Product(factors) => {
            let (picked, _, at) = split_children(factors, index, "product")?;
            let mut remainder = factors.to_vec();
            remainder.splice(at..at + picked.len(), [placeholder]);
            Ok((Expr::Product(picked).downgrade(), Expr::Product(remainder)))
        },
        Expr::Neg(inner) => match index {
            Index::At(0) => Ok(((**inner).clone(), Expr::Neg(Box::new(placeholder)))),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Inv(inner) => match index {
            Index::At(0) => Ok(((**inner).clone(), Expr::Inv(Box::new(placeholder)))),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Exp(base, exponent) => match index {
            Index::At(0) => Ok((
                (**base).clone(),
                Expr::power(placeholder, (**exponent).clone()),
            )),
            Index::At(1) => Ok((
                (**exponent).clone(),
                Expr::power((**base).clone(), placeholder),
            )),
            index => Err(out_of_range(index, "indices 0 and 1")),
        },
        Expr::Log(base, argument) => match index {
            Index::At(0) => Ok((
                (**base).clone(),
                Expr::log(placeholder, (**argument).clone()),
            )),
            Index::At(1) => Ok((
                (**argument).clone(),
                Expr::log((**base).clone(), placeholder),
            )),
            index => Err(out_of_range(index, "indices 0 and 1")),
        },
        Expr::Var(_) | Expr::Const(_) => match index {
            Index::At(0) => Ok((expr.clone(), placeholder)),
            index => Err(out_of_range(index, "index 0 only")),
        },
        Expr::Func { name: fn_name, inverse, arg } => match index {
            Index::At(0) => Ok((
                (**arg).clone(),
                Expr::func(fn_name.clone(), inverse.clone(), placeholder),
            )),
            index => Err(out_of_range(index, "index 0 only")),
        },
    }
}

impl Expr {
    /// Isolates the piece at `index` against the right-hand side `rhs`. See [`extract`].
    pub fn extract(&self, rhs: &Expr, index: Index) -> Result<(Expr, Expr), Error> {
        extract(self, rhs, index)
    }

    /// Isolates the piece at `index`, leaving the placeholder `name` behind. See [`select`].
    pub fn select(&self, name: &str, index: Index) -> Result<(Expr, Expr), Error> {
        select(self, name, index)
    }
}
