//! The session object: one stack of expressions, stepped a command at a time.

use reorder_algebra::error::{IndexOutOfRange, KindMismatch, UnknownFunction};
use reorder_algebra::{functions, Expr, Index};
use reorder_error::{Error, ErrorKind as _};
use crate::command::{BinaryOp, Command};
use crate::error::{SolveUnsupported, StackUnderflow};

/// An interactive rewriting session.
///
/// The stack is the only state. Slot 0 always holds the `Const(0)` sentinel marking the scratch
/// boundary; it is reinstated after every command, successful or not.
#[derive(Debug)]
pub struct Session {
    stack: Vec<Expr>,
}

impl Session {
    /// Creates a session holding only the sentinel.
    pub fn new() -> Self {
        Self { stack: vec![Self::sentinel()] }
    }

    /// The reserved stack-bottom value.
    fn sentinel() -> Expr {
        Expr::Const(0.0)
    }

    /// The current stack, sentinel included, bottom first.
    pub fn stack(&self) -> &[Expr] {
        &self.stack
    }

    /// The top of the stack.
    pub fn top(&self) -> Option<&Expr> {
        self.stack.last()
    }

    /// Runs one command and returns its output text, converting any failure into a one-line
    /// diagnostic. The stack is never corrupted by a failing command; at worst, operands already
    /// popped by the failing command are gone.
    pub fn submit(&mut self, line: &str) -> String {
        match self.execute(line) {
            Ok(output) => output,
            Err(err) => format!("could not execute ({}): {}", err.kind.name(), err.kind.message()),
        }
    }

    /// Runs one command, returning its output text or the error that stopped it.
    ///
    /// This is the [`submit`](Self::submit) entry point without the diagnostic formatting, for
    /// callers that want to render the error themselves. The sentinel is reinstated either way.
    pub fn execute(&mut self, line: &str) -> Result<String, Error> {
        let line = line.trim();
        let result = if line.is_empty() {
            Ok(String::new())
        } else {
            Command::parse(line).and_then(|command| self.run(command))
        };
        self.restore_sentinel();

        // errors from the algebra layer carry no spans; point them at the whole command
        result.map_err(|err| {
            if err.spans.is_empty() {
                Error { spans: vec![0..line.len()], kind: err.kind }
            } else {
                err
            }
        })
    }

    fn run(&mut self, command: Command) -> Result<String, Error> {
        match command {
            Command::Binary(op) => {
                let rhs = self.pop()?;
                let lhs = self.pop()?;
                let combined = match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => lhs / rhs,
                    BinaryOp::Pow => Expr::power(lhs, rhs),
                };
                self.stack.push(combined);
                Ok(String::new())
            },
            Command::Negate => {
                let expr = self.pop()?;
                self.stack.push(-expr);
                Ok(String::new())
            },
            Command::Simplify => {
                let expr = self.pop()?;
                self.stack.push(expr.simplify());
                Ok(String::new())
            },
            Command::Select { index, name } => {
                let (isolated, remainder) = self.peek(1)?.select(&name, index)?;
                self.stack.pop();
                self.stack.push(isolated);
                self.stack.push(remainder);
                Ok(match index {
                    Index::At(_) => "select".to_string(),
                    Index::Span(..) => "select slice".to_string(),
                })
            },
            Command::Distribute => {
                let distributed = self.peek(1)?.distribute()?.simplify();
                self.stack.pop();
                self.stack.push(distributed);
                Ok(String::new())
            },
            Command::Factor { index } => {
                let factored = Self::factor(self.peek(1)?, index)?;
                self.stack.pop();
                self.stack.push(factored);
                Ok(String::new())
            },
            Command::Duplicate { depth } => {
                // `$0` addresses the sentinel slot, everything else counts from the top
                let idx = if depth == 0 {
                    0
                } else {
                    self.stack.len().checked_sub(depth).ok_or_else(|| {
                        Error::from_kind(StackUnderflow {
                            needed: depth,
                            depth: self.stack.len(),
                        })
                    })?
                };
                let duplicated = self.stack[idx].clone();
                self.stack.push(duplicated);
                Ok(String::new())
            },
            Command::Wrap { name, inverse } => {
                // resolve the inverse before touching the stack, so a failed lookup costs nothing
                let inverse = match inverse {
                    Some(inverse) => inverse,
                    None => functions::inverse_of(&name)
                        .map(str::to_string)
                        .ok_or_else(|| {
                            Error::from_kind(UnknownFunction {
                                suggestions: functions::suggestions_for(&name),
                                name: name.clone(),
                            })
                        })?,
                };
                let arg = self.pop()?;
                self.stack.push(Expr::func(name, inverse, arg));
                Ok(String::new())
            },
            Command::Drop => {
                self.pop()?;
                Ok(String::new())
            },
            Command::Swap => {
                self.peek(2)?;
                let len = self.stack.len();
                self.stack.swap(len - 1, len - 2);
                Ok("swap".to_string())
            },
            Command::Substitute { name } => {
                let value = self.pop()?;
                let target = self.pop()?;
                self.stack.push(target.substitute(&Expr::var(name.as_str()), &value));
                self.stack.push(value);
                Ok("sub".to_string())
            },
            Command::DebugTop => {
                let top = self.peek(1)?;
                Ok(format!("{:?}", top))
            },
            Command::List { deep } => self.list(deep),
            Command::EvalConsts => {
                let expr = self.pop()?;
                self.stack.push(expr.eval_consts());
                Ok(String::new())
            },
            Command::Solve { name } => Err(Error::from_kind(SolveUnsupported { name })),
            Command::Extract { index } => {
                let target = self.peek(1)?;
                let rhs = self.peek(2)?;
                let (isolated, adjusted) = target.extract(rhs, index)?;
                self.stack.truncate(self.stack.len() - 2);
                self.stack.push(isolated);
                self.stack.push(adjusted);
                Ok(index.to_string())
            },
            Command::Push(expr) => {
                self.stack.push(expr);
                Ok(String::new())
            },
        }
    }

    /// Factors a (possibly negated) sum by element `index` of its first term's factor list.
    fn factor(expr: &Expr, index: usize) -> Result<Expr, Error> {
        let (negated, sum) = match expr {
            Expr::Neg(inner) => (true, &**inner),
            expr => (false, expr),
        };

        let Expr::Sum(terms) = sum else {
            return Err(Error::from_kind(KindMismatch {
                expected: "sum",
                found: sum.kind_name(),
            }));
        };

        let Some(first) = terms.first() else {
            return Err(Error::from_kind(IndexOutOfRange {
                index: Index::At(index),
                domain: "positions of a sum with at least one term".to_string(),
            }));
        };

        // the factor target is addressed within the first term, sign ignored
        let prime = match first {
            Expr::Neg(inner) => &**inner,
            term => term,
        };
        let target = match prime {
            Expr::Product(factors) => factors.get(index).cloned().ok_or_else(|| {
                Error::from_kind(IndexOutOfRange {
                    index: Index::At(index),
                    domain: format!("positions 0..{} of the leading term", factors.len()),
                })
            })?,
            term if index == 0 => term.clone(),
            term => {
                return Err(Error::from_kind(IndexOutOfRange {
                    index: Index::At(index),
                    domain: format!("index 0 only, since the leading term is a {}", term.kind_name()),
                }));
            },
        };

        let factored = sum.factor(&target)?;
        if negated {
            Ok((-factored).simplify())
        } else {
            Ok(factored.simplify())
        }
    }

    /// Lists the top expression's child slots with their structural indices, descending one extra
    /// level for `deep`.
    fn list(&self, deep: bool) -> Result<String, Error> {
        /// Names one sign wrapper and steps through it.
        fn peel<'a>(expr: &'a Expr, out: &mut String) -> &'a Expr {
            let mut expr = expr;
            if matches!(expr, Expr::Neg(_) | Expr::Inv(_)) {
                out.push_str(expr.kind_name());
                out.push(' ');
                expr = expr.children()[0];
            }
            out.push_str(expr.kind_name());
            expr
        }

        let top = self.peek(1)?;
        let mut out = String::new();
        let mut expr = peel(top, &mut out);

        if deep {
            let first = expr.children().into_iter().next().ok_or_else(|| {
                Error::from_kind(IndexOutOfRange {
                    index: Index::At(0),
                    domain: format!("children of this {}, of which there are none", expr.kind_name()),
                })
            })?;
            out.push('\n');
            expr = peel(first, &mut out);
        }

        for (i, child) in expr.children().iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("({:2})  {}", i, child));
        }
        Ok(out)
    }

    /// Pops the top of the stack.
    fn pop(&mut self) -> Result<Expr, Error> {
        self.stack.pop().ok_or_else(|| {
            Error::from_kind(StackUnderflow { needed: 1, depth: 0 })
        })
    }

    /// The `n`-th value from the top without popping (`1` is the top itself).
    fn peek(&self, n: usize) -> Result<&Expr, Error> {
        self.stack.len().checked_sub(n)
            .and_then(|idx| self.stack.get(idx))
            .ok_or_else(|| {
                Error::from_kind(StackUnderflow { needed: n, depth: self.stack.len() })
            })
    }

    /// Reinstates the sentinel at slot 0 if it is missing or was overwritten.
    fn restore_sentinel(&mut self) {
        if self.stack.first() != Some(&Self::sentinel()) {
            self.stack.insert(0, Self::sentinel());
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, commands: &[&str]) {
        for command in commands {
            session.submit(command);
        }
    }

    #[test]
    fn scenario_a_constant_arithmetic() {
        let mut session = Session::new();
        run(&mut session, &["2", "3", "+", "="]);
        assert_eq!(session.top(), Some(&Expr::Const(5.0)));
    }

    #[test]
    fn scenario_b_squaring() {
        let mut session = Session::new();
        run(&mut session, &["x", "x", "*", "."]);
        assert_eq!(
            session.top(),
            Some(&Expr::power(Expr::var("x"), Expr::Const(2.0))),
        );
    }

    #[test]
    fn scenario_c_factoring() {
        let mut session = Session::new();
        // ab + ac, factored by element 0 of the first term
        run(&mut session, &["a", "b", "*", "a", "c", "*", "+", ".", ",0"]);
        assert_eq!(
            session.top(),
            Some(&Expr::Product(vec![
                Expr::var("a"),
                Expr::Sum(vec![Expr::var("b"), Expr::var("c")]),
            ])),
        );
    }

    #[test]
    fn scenario_d_bad_index_preserves_the_stack() {
        let mut session = Session::new();
        run(&mut session, &["r", "x", "y", "+"]);
        let before = session.stack().to_vec();

        let output = session.submit("=5");
        assert!(output.contains("IndexOutOfRange"));
        assert_eq!(session.stack(), &before[..]);
    }

    #[test]
    fn sentinel_invariant_holds_after_any_sequence() {
        let mut session = Session::new();
        let commands = [
            "x", "y", "+", ".", "\\", "\\", "\\", "\\", "+", "*", "nonsense",
            ",7", "=9", "==q", "/s", "$4", "!mystery", "2", "3", "^", "=",
        ];
        for command in commands {
            session.submit(command);
            assert_eq!(session.stack().first(), Some(&Expr::Const(0.0)));
        }
    }

    #[test]
    fn dropping_the_sentinel_restores_it() {
        let mut session = Session::new();
        assert_eq!(session.stack().len(), 1);
        session.submit("\\");
        assert_eq!(session.stack(), &[Expr::Const(0.0)]);
    }

    #[test]
    fn binary_operators_build_structure() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "-"]);
        assert_eq!(session.top(), Some(&(Expr::var("a") - Expr::var("b"))));

        run(&mut session, &["c", "/"]);
        assert_eq!(
            session.top(),
            Some(&((Expr::var("a") - Expr::var("b")) / Expr::var("c"))),
        );

        run(&mut session, &["2", "^"]);
        assert_eq!(
            session.top(),
            Some(&Expr::power(
                (Expr::var("a") - Expr::var("b")) / Expr::var("c"),
                Expr::Const(2.0),
            )),
        );
    }

    #[test]
    fn numeric_tokens_normalize_to_constants() {
        let mut session = Session::new();
        run(&mut session, &["2.5", "x"]);
        assert_eq!(session.stack()[1], Expr::Const(2.5));
        assert_eq!(session.stack()[2], Expr::var("x"));
    }

    #[test]
    fn select_pushes_isolated_then_remainder() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "+", "c", "+", "."]);
        let output = session.submit(".1 t");
        assert_eq!(output, "select");

        let stack = session.stack();
        // isolated below, remainder on top
        assert_eq!(stack[stack.len() - 2], Expr::var("b"));
        assert_eq!(
            stack[stack.len() - 1],
            Expr::Sum(vec![Expr::var("a"), Expr::var("t"), Expr::var("c")]),
        );
    }

    #[test]
    fn select_and_substitute_round_trip() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "+", "c", "+", "."]);
        let original = session.top().unwrap().clone();

        // name a sub-term, then swap the pieces into place and substitute it back
        run(&mut session, &[".1 t", "/s", "/s t"]);
        session.submit("\\");
        assert_eq!(session.top(), Some(&original));
    }

    #[test]
    fn extract_pushes_isolated_then_adjusted() {
        let mut session = Session::new();
        // r on the bottom, then x + y on top; extract term 0
        run(&mut session, &["r", "x", "y", "+"]);
        let output = session.submit("=0");
        assert_eq!(output, "0");

        let stack = session.stack();
        assert_eq!(stack[stack.len() - 2], Expr::var("x"));
        assert_eq!(
            stack[stack.len() - 1],
            Expr::var("r") - Expr::Sum(vec![Expr::var("y")]),
        );
    }

    #[test]
    fn extract_slice() {
        let mut session = Session::new();
        run(&mut session, &["r", "a", "b", "+", "c", "+", "d", "+", "."]);
        let output = session.submit("=1 3");
        assert_eq!(output, "1..3");

        let stack = session.stack();
        assert_eq!(
            stack[stack.len() - 2],
            Expr::Sum(vec![Expr::var("b"), Expr::var("c")]),
        );
    }

    #[test]
    fn swap_and_duplicate() {
        let mut session = Session::new();
        run(&mut session, &["a", "b"]);
        assert_eq!(session.submit("/s"), "swap");
        assert_eq!(session.top(), Some(&Expr::var("a")));

        session.submit("$");
        assert_eq!(session.stack()[2..], [Expr::var("a"), Expr::var("a")][..]);

        // $3 reaches past the duplicate to `b`
        session.submit("$3");
        assert_eq!(session.top(), Some(&Expr::var("b")));
    }

    #[test]
    fn wrap_with_explicit_and_builtin_inverse() {
        let mut session = Session::new();
        run(&mut session, &["x", "!f g"]);
        assert_eq!(session.top(), Some(&Expr::func("f", "g", Expr::var("x"))));

        run(&mut session, &["y", "!sin"]);
        assert_eq!(session.top(), Some(&Expr::func("sin", "asin", Expr::var("y"))));
    }

    #[test]
    fn wrap_unknown_function_costs_nothing() {
        let mut session = Session::new();
        session.submit("x");
        let before = session.stack().to_vec();

        let output = session.submit("!sinn");
        assert!(output.contains("UnknownFunction"));
        assert!(output.contains("has no known inverse"));
        assert_eq!(session.stack(), &before[..]);
    }

    #[test]
    fn wrapping_enables_cancellation() {
        let mut session = Session::new();
        run(&mut session, &["x", "!asin", "!sin", "."]);
        assert_eq!(session.top(), Some(&Expr::var("x")));
    }

    #[test]
    fn distribute_command_simplifies() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "c", "+", "*", ","]);
        assert_eq!(
            session.top(),
            Some(&Expr::Sum(vec![
                Expr::Product(vec![Expr::var("a"), Expr::var("b")]),
                Expr::Product(vec![Expr::var("a"), Expr::var("c")]),
            ])),
        );
    }

    #[test]
    fn factor_a_negated_sum() {
        let mut session = Session::new();
        // -(ab + ac) factored by a
        run(&mut session, &["a", "b", "*", "a", "c", "*", "+", ".", "_", ",0"]);
        assert_eq!(
            session.top(),
            Some(&Expr::Neg(Box::new(Expr::Product(vec![
                Expr::var("a"),
                Expr::Sum(vec![Expr::var("b"), Expr::var("c")]),
            ])))),
        );
    }

    #[test]
    fn factor_requires_a_sum() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "*"]);
        let output = session.submit(",0");
        assert!(output.contains("KindMismatch"));
        assert!(output.contains("requires a sum"));
    }

    #[test]
    fn solve_is_not_supported() {
        let mut session = Session::new();
        run(&mut session, &["r", "x", "2", "*"]);
        let output = session.submit("==x");
        assert!(output.contains("SolveUnsupported"));
        // nothing was consumed
        assert_eq!(session.stack().len(), 3);
    }

    #[test]
    fn listing_shows_indexed_children() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "*", "c", "+", "."]);
        let output = session.submit("/l");
        assert_eq!(output, "sum\n( 0)  a b\n( 1)  c");

        let output = session.submit("/ll");
        assert_eq!(output, "sum\nproduct\n( 0)  a\n( 1)  b");
    }

    #[test]
    fn listing_peels_signs() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "+", "_"]);
        let output = session.submit("/l");
        assert!(output.starts_with("negation sum"));
    }

    #[test]
    fn debug_top() {
        let mut session = Session::new();
        session.submit("x");
        assert_eq!(session.submit("/r"), format!("{:?}", Expr::var("x")));
    }

    #[test]
    fn errors_leave_earlier_work_alone() {
        let mut session = Session::new();
        run(&mut session, &["a", "b", "+"]);
        let before = session.stack().to_vec();

        // malformed argument, unknown factor index, unsupported solve
        for command in [".x t", ",9", "==q"] {
            let output = session.submit(command);
            assert!(output.starts_with("could not execute"), "{}", output);
            assert_eq!(session.stack(), &before[..], "stack changed after {:?}", command);
        }
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut session = Session::new();
        let before = session.stack().to_vec();
        assert_eq!(session.submit("   "), "");
        assert_eq!(session.stack(), &before[..]);
    }

    #[test]
    fn eval_consts_folds_legacy_and_canonical_spellings() {
        let mut session = Session::new();
        // a numeric-string placeholder left by select folds like a constant
        run(&mut session, &["x", "2", "+", ".0 3", "="]);
        assert_eq!(session.top(), Some(&Expr::Const(5.0)));
    }
}
