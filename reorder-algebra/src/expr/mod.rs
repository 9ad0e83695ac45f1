//! The tree representation of algebraic expressions.
//!
//! [`Expr`] is a closed tagged union: every rewrite operation matches on it exhaustively, so
//! adding a variant surfaces every match arm that needs updating at compile time.
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expr`] is **structural**: two expressions are equal iff
//! they have the same variant and all stored fields are deep-equal, with the terms of sums and the
//! factors of products compared in order. `x + y` and `y + x` are therefore *not* equal, even
//! though they are mathematically equivalent. Structural equality is cheap, never reports false
//! positives, and is the notion of equality used by [`contains`](Expr::contains),
//! [`substitute`](crate::substitute::substitute) and [`factor`](crate::factor::factor).
//!
//! # Numeric duality
//!
//! Constants canonically live in [`Expr::Const`], but a [`Expr::Var`] whose name is numeric text
//! (`Var("2")`, `Var("-0.5")`) is a live legacy representation of the same thing. Every folding
//! rule accepts both spellings through [`Expr::as_number`]; nothing in this crate may treat them
//! differently.

mod iter;

pub use iter::ExprIter;

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A single node of an algebraic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Multiple terms added together.
    Sum(Vec<Expr>),

    /// Multiple factors multiplied together.
    Product(Vec<Expr>),

    /// The negation of the inner expression.
    Neg(Box<Expr>),

    /// The multiplicative inverse of the inner expression.
    Inv(Box<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),

    /// The logarithm of an argument in a given base, as `Log(base, argument)`.
    Log(Box<Expr>, Box<Expr>),

    /// A free symbol, such as `x`.
    Var(String),

    /// A numeric literal.
    Const(f64),

    /// A named unary function paired with the name of its algebraic inverse, enabling automatic
    /// cancellation of `f(g(x))` when `f` and `g` declare each other.
    Func {
        /// The name of the function, such as `sin`.
        name: String,

        /// The name of the function's inverse, such as `asin`.
        inverse: String,

        /// The function's argument.
        arg: Box<Expr>,
    },
}

/// [`Eq`] is implemented manually to allow comparing [`Expr::Const`] values. The rewrite rules in
/// this crate **must never** produce a NaN constant! Report any bugs that cause this to happen.
impl Eq for Expr {}

impl Expr {
    /// Creates a free variable with the given name.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// Creates a numeric literal.
    pub fn num(value: f64) -> Self {
        Self::Const(value)
    }

    /// Creates a power expression.
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exponent))
    }

    /// Creates a logarithm of `argument` in `base`.
    pub fn log(base: Expr, argument: Expr) -> Self {
        Self::Log(Box::new(base), Box::new(argument))
    }

    /// Creates a named function application with a declared inverse.
    pub fn func(name: impl Into<String>, inverse: impl Into<String>, arg: Expr) -> Self {
        Self::Func {
            name: name.into(),
            inverse: inverse.into(),
            arg: Box::new(arg),
        }
    }

    /// The lowercase name of this node's variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sum(_) => "sum",
            Self::Product(_) => "product",
            Self::Neg(_) => "negation",
            Self::Inv(_) => "inverse",
            Self::Exp(..) => "power",
            Self::Log(..) => "logarithm",
            Self::Var(_) => "variable",
            Self::Const(_) => "constant",
            Self::Func { .. } => "function",
        }
    }

    /// If the expression is a numeric literal, in either spelling, returns its value.
    ///
    /// Both [`Expr::Const`] and the legacy numeric-string [`Expr::Var`] are accepted (see the
    /// [module documentation](self)). The string check is deliberately narrow: an optional leading
    /// `-`, ASCII digits, and at most one `.` — names like `inf` or `1e9` stay symbolic.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Const(value) => Some(*value),
            Self::Var(name) => {
                let digits = name.strip_prefix('-').unwrap_or(name);
                if digits.is_empty()
                    || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
                    || digits.chars().filter(|&c| c == '.').count() > 1
                {
                    return None;
                }
                name.parse().ok()
            },
            _ => None,
        }
    }

    /// Returns the direct children of this node, in structural order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Sum(terms) => terms.iter().collect(),
            Self::Product(factors) => factors.iter().collect(),
            Self::Neg(inner) | Self::Inv(inner) => vec![inner],
            Self::Exp(base, exponent) => vec![base, exponent],
            Self::Log(base, argument) => vec![base, argument],
            Self::Var(_) | Self::Const(_) => Vec::new(),
            Self::Func { arg, .. } => vec![arg],
        }
    }

    /// Returns true if the given expression is structurally equal to this node or to any of its
    /// descendants.
    pub fn contains(&self, other: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == other)
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Sum`] with zero / one term, or an
    /// [`Expr::Product`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`Expr::Const`] containing
    /// the additive / multiplicative identity.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Sum(mut terms) => {
                if terms.is_empty() {
                    Self::Const(0.0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Sum(terms)
                }
            },
            Self::Product(mut factors) => {
                if factors.is_empty() {
                    Self::Const(1.0)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Product(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Returns true if the expression needs parentheses when rendered as an operand of a product or a
/// power.
fn is_compound(expr: &Expr) -> bool {
    matches!(expr, Expr::Sum(_) | Expr::Product(_) | Expr::Neg(_))
}

/// Writes the expression, parenthesized when `parens` holds.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum(terms) => {
                let mut iter = terms.iter();
                if let Some(first) = iter.next() {
                    write_operand(f, first, matches!(first, Self::Sum(_)))?;
                    for term in iter {
                        // negated terms render as a binary minus
                        if let Self::Neg(inner) = term {
                            write!(f, " - ")?;
                            write_operand(f, inner, matches!(&**inner, Self::Sum(_)))?;
                        } else {
                            write!(f, " + ")?;
                            write_operand(f, term, matches!(term, Self::Sum(_)))?;
                        }
                    }
                }
                Ok(())
            },
            Self::Product(factors) => {
                let mut iter = factors.iter();
                if let Some(first) = iter.next() {
                    write_operand(f, first, is_compound(first))?;
                    for factor in iter {
                        // inverse factors render as a division
                        if let Self::Inv(inner) = factor {
                            write!(f, "/")?;
                            write_operand(f, inner, is_compound(inner))?;
                        } else {
                            write!(f, " ")?;
                            write_operand(f, factor, is_compound(factor))?;
                        }
                    }
                }
                Ok(())
            },
            Self::Neg(inner) => {
                write!(f, "-")?;
                write_operand(f, inner, matches!(&**inner, Self::Sum(_)))
            },
            Self::Inv(inner) => {
                write!(f, "1/")?;
                write_operand(f, inner, is_compound(inner))
            },
            Self::Exp(base, exponent) => {
                write_operand(f, base, is_compound(base))?;
                write!(f, "^")?;
                write_operand(f, exponent, is_compound(exponent))
            },
            Self::Log(base, argument) => {
                match &**base {
                    base @ (Self::Var(_) | Self::Const(_)) => write!(f, "log_{}", base)?,
                    base => write!(f, "log_({})", base)?,
                }
                write!(f, "({})", argument)
            },
            Self::Var(name) => write!(f, "{}", name),
            Self::Const(value) => write!(f, "{}", value),
            Self::Func { name, arg, .. } => write!(f, "{}({})", name, arg),
        }
    }
}

/// Adds two expressions, producing a two-term [`Expr::Sum`]. No flattening or simplification is
/// done here; [`simplify`](crate::simplify::simplify) flattens later, so the structural indices
/// a user sees stay predictable until they ask for simplification.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Sum(vec![self, rhs])
    }
}

/// Subtracts an expression, producing a [`Expr::Sum`] whose second term is negated.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Sum(vec![self, Self::Neg(Box::new(rhs))])
    }
}

/// Multiplies two expressions, producing a two-factor [`Expr::Product`]. No flattening or
/// simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::Product(vec![self, rhs])
    }
}

/// Divides by an expression, producing a [`Expr::Product`] whose second factor is inverted.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Product(vec![self, Self::Inv(Box::new(rhs))])
    }
}

/// Wraps the expression in a [`Expr::Neg`]. No simplification is done.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Neg(Box::new(self))
    }
}
