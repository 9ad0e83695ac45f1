//! Error kinds raised by the rewrite operations.
//!
//! Each kind is a standalone struct deriving [`ErrorKind`](reorder_error::ErrorKind); the
//! interpreter attaches command-text spans before reporting.

use ariadne::Fmt;
use reorder_attrs::ErrorKind;
use reorder_error::EXPR;
use crate::isolate::Index;

/// An operation expected a particular node variant and got something else.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("this operation requires a {}, found a {}", self.expected, self.found),
    labels = ["this command"],
)]
pub struct KindMismatch {
    /// The variant the operation needed.
    pub expected: &'static str,

    /// The variant that was actually there.
    pub found: &'static str,
}

/// A structural index or slice addressed a position outside a node's valid range.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("index {} is out of range", self.index),
    labels = ["this index"],
    help = format!("this node accepts {}", self.domain),
)]
pub struct IndexOutOfRange {
    /// The index that was given.
    pub index: Index,

    /// A description of the positions the node accepts.
    pub domain: String,
}

/// A term of the sum being factored does not contain the requested factor.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a factor of every term", self.factor),
    labels = ["this sum"],
    help = format!("the term `{}` does not contain `{}`", self.term, self.factor),
)]
pub struct MissingFactor {
    /// The factor that was being pulled out.
    pub factor: String,

    /// The first term it is missing from.
    pub term: String,
}

/// A product was asked to distribute, but none of its factors is a sum.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a sum factor is required to distribute",
    labels = ["this product"],
)]
pub struct NoSumFactor;

/// A product with no factors at all was asked to distribute.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot distribute an empty product",
    labels = ["here"],
)]
pub struct EmptyProduct;

/// A function name has no entry in the built-in inverse table.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no known inverse", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "name the inverse explicitly, as in `!name inverse`".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean `{}`?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name that was looked up.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}
