//! The command grammar of the interpreter.
//!
//! A command is one line of text. Exact commands are matched first, then the first matching
//! prefix wins; anything that matches nothing at all pushes the line onto the stack as a symbol
//! (or as a constant, when it is numeric text).
//!
//! | command | effect |
//! |---|---|
//! | `+` `-` `*` `/` `^` | pop two, push the combined expression |
//! | `_` | pop one, push its negation |
//! | `.` | pop one, push its simplified form |
//! | `.<idx> <name>` | pop one, select the child at `idx`, naming the placeholder `<name>` |
//! | `.<start> <stop> <name>` | same, selecting a span of children |
//! | `,` | pop one, push it distributed and simplified |
//! | `,<idx>` | factor the top sum by element `idx` of its first term's factor list |
//! | `$` | duplicate the top of the stack |
//! | `$<n>` | duplicate the n-th-from-top element |
//! | `!<name> <inverse>` | pop one, wrap it in the named function |
//! | `!<name>` | same, with the inverse looked up in the built-in table |
//! | `\` | discard the top of the stack |
//! | `/s` | swap the top two |
//! | `/s <name>` | pop a value and a target, substitute the value for `<name>` in the target |
//! | `/r` | show the debug form of the top of the stack |
//! | `/l`, `/ll` | list the top expression's children (one or two levels down) |
//! | `=` | pop one, push it with constants folded |
//! | `==<name>` | unsupported: equation solving was never implemented |
//! | `=<idx>`, `=<start> <stop>` | pop a target and a right-hand side, extract the addressed piece |
//! | anything else | push the token as a symbol / constant |

pub mod token;

use reorder_algebra::{Expr, Index};
use reorder_error::Error;
use crate::error::MalformedCommand;
use token::{Token, TokenKind};

/// A binary stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,

    /// `-`
    Sub,

    /// `*`
    Mul,

    /// `/`
    Div,

    /// `^`
    Pow,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Pop two expressions and push their combination.
    Binary(BinaryOp),

    /// Pop one expression and push its negation.
    Negate,

    /// Pop one expression and push its simplified form.
    Simplify,

    /// Pop one expression, select the piece at `index`, and push the piece and the remainder.
    Select {
        /// The structural position to select.
        index: Index,

        /// The placeholder variable left in the remainder.
        name: String,
    },

    /// Pop one expression and push it distributed and simplified.
    Distribute,

    /// Factor the top of the stack by element `index` of its first term's factor list.
    Factor {
        /// The position within the first term.
        index: usize,
    },

    /// Duplicate the `depth`-th-from-top element (`1` is the top itself).
    Duplicate {
        /// Distance from the top of the stack.
        depth: usize,
    },

    /// Pop one expression and wrap it in a named function.
    Wrap {
        /// The function name.
        name: String,

        /// The inverse name, when given explicitly; otherwise it comes from the built-in table.
        inverse: Option<String>,
    },

    /// Discard the top of the stack.
    Drop,

    /// Swap the top two elements.
    Swap,

    /// Pop a value and a target; push the target with `name` substituted, then the value.
    Substitute {
        /// The placeholder variable to replace.
        name: String,
    },

    /// Show the debug form of the top of the stack.
    DebugTop,

    /// List the top expression's children with their structural indices.
    List {
        /// Descend one extra level through the first child.
        deep: bool,
    },

    /// Pop one expression and push it with constants folded.
    EvalConsts,

    /// Solve the top equation for a variable. Declared but never implemented.
    Solve {
        /// The variable to solve for.
        name: String,
    },

    /// Pop a target and a right-hand side; push the extracted piece and the adjusted side.
    Extract {
        /// The structural position to extract.
        index: Index,
    },

    /// Push an expression onto the stack.
    Push(Expr),
}

/// Parses a single usize argument token.
fn parse_usize(token: &Token) -> Result<usize, Error> {
    if token.kind != TokenKind::Int {
        return Err(Error::new(
            vec![token.span.clone()],
            MalformedCommand { expected: "an integer" },
        ));
    }
    token.lexeme.parse().map_err(|_| Error::new(
        vec![token.span.clone()],
        MalformedCommand { expected: "an integer" },
    ))
}

/// Parses a function-name argument token.
fn parse_name(token: &Token) -> Result<String, Error> {
    if token.kind != TokenKind::Name {
        return Err(Error::new(
            vec![token.span.clone()],
            MalformedCommand { expected: "a name" },
        ));
    }
    Ok(token.lexeme.to_string())
}

/// The span of everything after a command's prefix, for arity errors.
fn tail_span(line: &str, prefix_len: usize) -> Vec<std::ops::Range<usize>> {
    vec![prefix_len..line.len().max(prefix_len)]
}

impl Command {
    /// Parses one line of text into a command.
    ///
    /// Only argument errors fail here; a line that matches no command shape at all becomes
    /// [`Command::Push`].
    pub fn parse(line: &str) -> Result<Self, Error> {
        match line {
            "+" => return Ok(Self::Binary(BinaryOp::Add)),
            "-" => return Ok(Self::Binary(BinaryOp::Sub)),
            "*" => return Ok(Self::Binary(BinaryOp::Mul)),
            "/" => return Ok(Self::Binary(BinaryOp::Div)),
            "^" => return Ok(Self::Binary(BinaryOp::Pow)),
            "_" => return Ok(Self::Negate),
            "." => return Ok(Self::Simplify),
            "," => return Ok(Self::Distribute),
            "$" => return Ok(Self::Duplicate { depth: 1 }),
            "\\" => return Ok(Self::Drop),
            "/s" => return Ok(Self::Swap),
            "/r" => return Ok(Self::DebugTop),
            "/l" => return Ok(Self::List { deep: false }),
            "/ll" => return Ok(Self::List { deep: true }),
            "=" => return Ok(Self::EvalConsts),
            _ => {},
        }

        if let Some(name) = line.strip_prefix("==") {
            return Ok(Self::Solve { name: name.trim().to_string() });
        }

        if let Some(tail) = line.strip_prefix('=') {
            let tokens = token::tokenize_args(tail, 1);
            return match tokens.as_slice() {
                [idx] => Ok(Self::Extract { index: Index::At(parse_usize(idx)?) }),
                [start, stop] => Ok(Self::Extract {
                    index: Index::Span(parse_usize(start)?, parse_usize(stop)?),
                }),
                _ => Err(Error::new(
                    tail_span(line, 1),
                    MalformedCommand { expected: "exactly 1 or 2 arguments" },
                )),
            };
        }

        if let Some(tail) = line.strip_prefix('.') {
            let tokens = token::tokenize_args(tail, 1);
            return match tokens.as_slice() {
                [idx, name] => Ok(Self::Select {
                    index: Index::At(parse_usize(idx)?),
                    name: name.lexeme.to_string(),
                }),
                [start, stop, name] => Ok(Self::Select {
                    index: Index::Span(parse_usize(start)?, parse_usize(stop)?),
                    name: name.lexeme.to_string(),
                }),
                _ => Err(Error::new(
                    tail_span(line, 1),
                    MalformedCommand { expected: "exactly 2 or 3 arguments" },
                )),
            };
        }

        if let Some(tail) = line.strip_prefix(',') {
            let tokens = token::tokenize_args(tail, 1);
            return match tokens.as_slice() {
                [idx] => Ok(Self::Factor { index: parse_usize(idx)? }),
                _ => Err(Error::new(
                    tail_span(line, 1),
                    MalformedCommand { expected: "exactly 1 argument" },
                )),
            };
        }

        if let Some(tail) = line.strip_prefix('$') {
            let tokens = token::tokenize_args(tail, 1);
            return match tokens.as_slice() {
                [depth] => Ok(Self::Duplicate { depth: parse_usize(depth)? }),
                _ => Err(Error::new(
                    tail_span(line, 1),
                    MalformedCommand { expected: "exactly 1 argument" },
                )),
            };
        }

        if let Some(tail) = line.strip_prefix('!') {
            let tokens = token::tokenize_args(tail, 1);
            return match tokens.as_slice() {
                [name] => Ok(Self::Wrap { name: parse_name(name)?, inverse: None }),
                [name, inverse] => Ok(Self::Wrap {
                    name: parse_name(name)?,
                    inverse: Some(parse_name(inverse)?),
                }),
                _ => Err(Error::new(
                    tail_span(line, 1),
                    MalformedCommand { expected: "one or two function names" },
                )),
            };
        }

        if let Some(tail) = line.strip_prefix("/s") {
            let tokens = token::tokenize_args(tail, 2);
            return match tokens.as_slice() {
                [] => Ok(Self::Swap),
                [name] => Ok(Self::Substitute { name: name.lexeme.to_string() }),
                _ => Err(Error::new(
                    tail_span(line, 2),
                    MalformedCommand { expected: "at most 1 argument" },
                )),
            };
        }

        // the raw token becomes a constant when it is numeric text, and a free symbol otherwise
        let symbol = Expr::Var(line.to_string());
        Ok(match symbol.as_number() {
            Some(value) => Self::Push(Expr::Const(value)),
            None => Self::Push(symbol),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reorder_error::ErrorKind as _;
    use super::*;

    #[test]
    fn exact_commands() {
        assert_eq!(Command::parse("+").unwrap(), Command::Binary(BinaryOp::Add));
        assert_eq!(Command::parse("^").unwrap(), Command::Binary(BinaryOp::Pow));
        assert_eq!(Command::parse("_").unwrap(), Command::Negate);
        assert_eq!(Command::parse(".").unwrap(), Command::Simplify);
        assert_eq!(Command::parse(",").unwrap(), Command::Distribute);
        assert_eq!(Command::parse("$").unwrap(), Command::Duplicate { depth: 1 });
        assert_eq!(Command::parse("\\").unwrap(), Command::Drop);
        assert_eq!(Command::parse("/s").unwrap(), Command::Swap);
        assert_eq!(Command::parse("=").unwrap(), Command::EvalConsts);
    }

    #[test]
    fn select_commands() {
        assert_eq!(
            Command::parse(".0 t").unwrap(),
            Command::Select { index: Index::At(0), name: "t".to_string() },
        );
        assert_eq!(
            Command::parse(".1 3 part").unwrap(),
            Command::Select { index: Index::Span(1, 3), name: "part".to_string() },
        );
    }

    #[test]
    fn extract_commands() {
        assert_eq!(
            Command::parse("=2").unwrap(),
            Command::Extract { index: Index::At(2) },
        );
        assert_eq!(
            Command::parse("=0 2").unwrap(),
            Command::Extract { index: Index::Span(0, 2) },
        );
    }

    #[test]
    fn solve_is_parsed_before_extract() {
        assert_eq!(
            Command::parse("==x").unwrap(),
            Command::Solve { name: "x".to_string() },
        );
    }

    #[test]
    fn wrap_commands() {
        assert_eq!(
            Command::parse("!sin asin").unwrap(),
            Command::Wrap { name: "sin".to_string(), inverse: Some("asin".to_string()) },
        );
        assert_eq!(
            Command::parse("!cos").unwrap(),
            Command::Wrap { name: "cos".to_string(), inverse: None },
        );
    }

    #[test]
    fn substitute_command() {
        assert_eq!(
            Command::parse("/s t").unwrap(),
            Command::Substitute { name: "t".to_string() },
        );
    }

    #[test]
    fn push_fallback() {
        assert_eq!(Command::parse("x").unwrap(), Command::Push(Expr::var("x")));
        assert_eq!(Command::parse("2").unwrap(), Command::Push(Expr::Const(2.0)));
        assert_eq!(Command::parse("2.5").unwrap(), Command::Push(Expr::Const(2.5)));
        assert_eq!(
            Command::parse("-3").unwrap(),
            Command::Push(Expr::Const(-3.0)),
        );
        // non-numeric text stays symbolic
        assert_eq!(Command::parse("inf").unwrap(), Command::Push(Expr::var("inf")));
    }

    #[test]
    fn malformed_arguments_error_with_spans() {
        let err = Command::parse(".x t").unwrap_err();
        let kind = err.kind.as_any().downcast_ref::<MalformedCommand>().unwrap();
        assert_eq!(kind.expected, "an integer");
        assert_eq!(err.spans, vec![1..2]);

        let err = Command::parse(".5").unwrap_err();
        let kind = err.kind.as_any().downcast_ref::<MalformedCommand>().unwrap();
        assert_eq!(kind.expected, "exactly 2 or 3 arguments");

        assert!(Command::parse("$x").unwrap_err().kind.as_any().is::<MalformedCommand>());
        assert!(Command::parse(",a b").unwrap_err().kind.as_any().is::<MalformedCommand>());
    }
}
