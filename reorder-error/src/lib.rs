//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use ariadne::{Color, Report};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// Implementations are expected to come from `reorder_attrs`'s derive macro, which generates every
/// method from the struct's `#[error(...)]` attribute.
pub trait ErrorKind: Debug + Send {
    /// The short name of this kind of error, used in one-line diagnostics.
    fn name(&self) -> &'static str;

    /// The message displayed at the top of the error report.
    fn message(&self) -> String;

    /// Optional help text describing what the user can do to fix the error.
    fn help(&self) -> Option<String> {
        None
    }

    /// Returns this error kind as an [`Any`] reference, so callers can downcast to the concrete
    /// kind and assert on its fields.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source text that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source text that this error originated from. May be empty for errors
    /// raised by the algebra layer, which has no notion of source locations; the interpreter fills
    /// in the span of the failing command before reporting.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error with no associated spans.
    pub fn from_kind(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}
