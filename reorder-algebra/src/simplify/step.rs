use std::fmt;

/// One applied simplification rule.
///
/// [`simplify_with_steps`](crate::simplify::simplify_with_steps) records a [`Step`] every time a
/// rule fires, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A sum with zero or one terms collapsed.
    CollapseSum,

    /// Nested sums were flattened into the outer sum.
    FlattenSum,

    /// `a + 0 = a`
    DropZero,

    /// A product with zero or one factors collapsed.
    CollapseProduct,

    /// Nested products were flattened into the outer product.
    FlattenProduct,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    DropOne,

    /// Negated factors folded into one outer sign by parity.
    ExtractSigns,

    /// `x * x = x^2`
    CombineRepeated,

    /// `--x = x`
    DoubleNegation,

    /// `-(a + b) = -a + -b`
    NegateSum,

    /// `1/(1/x) = x`
    DoubleInverse,

    /// `1/(-x) = -(1/x)`
    InvertNegation,

    /// `1/(a*b) = (1/a)*(1/b)`
    InvertProduct,

    /// `(a^b)^c = a^(b*c)`
    NestedPower,

    /// `log_b(a^c) = c*log_b(a)`
    LogOfPower,

    /// `log_(a^c)(x) = log_a(x)/c`
    PowerBaseLog,

    /// `f(g(x)) = x` for declared inverses `f` and `g`.
    InverseCancel,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CollapseSum => "collapse sum",
            Self::FlattenSum => "flatten sums",
            Self::DropZero => "drop zero terms",
            Self::CollapseProduct => "collapse product",
            Self::FlattenProduct => "flatten products",
            Self::MultiplyZero => "multiply by zero",
            Self::DropOne => "drop one factors",
            Self::ExtractSigns => "extract signs",
            Self::CombineRepeated => "combine repeated factors",
            Self::DoubleNegation => "double negation",
            Self::NegateSum => "negate sum",
            Self::DoubleInverse => "double inverse",
            Self::InvertNegation => "invert negation",
            Self::InvertProduct => "invert product",
            Self::NestedPower => "nested power",
            Self::LogOfPower => "log of power",
            Self::PowerBaseLog => "power base log",
            Self::InverseCancel => "inverse cancellation",
        };
        write!(f, "{}", name)
    }
}
