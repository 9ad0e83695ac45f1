//! The stack interpreter of the `reorder` calculator.
//!
//! A [`Session`] owns a stack of expressions and steps it one command at a time:
//!
//! ```
//! use reorder_algebra::Expr;
//! use reorder_session::Session;
//!
//! let mut session = Session::new();
//! session.submit("2");
//! session.submit("3");
//! session.submit("+");
//! session.submit("=");
//! assert_eq!(session.top(), Some(&Expr::Const(5.0)));
//! ```
//!
//! Commands are a line of text each (see [`command`] for the grammar). Any failure — wrong arity,
//! a type mismatch, an index out of range, malformed arguments — is caught at the [`Session`]
//! boundary and turned into a one-line diagnostic; the session itself survives every error, and
//! stack slot 0 always holds the `Const(0)` sentinel afterwards.

pub mod command;
pub mod error;
pub mod session;

pub use command::Command;
pub use session::Session;
