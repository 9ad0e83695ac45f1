//! Error kinds raised by the interpreter itself.

use reorder_attrs::ErrorKind;

/// A command needed more values than the stack holds.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("this command needs {} value(s), but the stack holds {}", self.needed, self.depth),
    labels = ["this command"],
)]
pub struct StackUnderflow {
    /// How many values the command needed.
    pub needed: usize,

    /// How many values were actually on the stack.
    pub depth: usize,
}

/// A command's textual arguments failed to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "could not parse the command's arguments",
    labels = ["here"],
    help = format!("expected {}", self.expected),
)]
pub struct MalformedCommand {
    /// What the parser was looking for.
    pub expected: &'static str,
}

/// The `==<name>` command: equation solving was declared but never implemented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "solving equations is not supported",
    labels = ["this command"],
    help = format!("nothing can solve for `{}` yet", self.name),
)]
pub struct SolveUnsupported {
    /// The variable the command asked to solve for.
    pub name: String,
}
