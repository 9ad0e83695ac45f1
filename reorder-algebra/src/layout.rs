//! The contract consumed by an external renderer.
//!
//! A [`Fragment`] is a glyph-agnostic description of how an expression lays out: a tree of text
//! leaves, horizontal runs, raised / lowered scripts, and bracketed groups. A renderer walks the
//! fragment tree and decides pixels, fonts and colors on its own; nothing in this module knows
//! about any of those.
//!
//! Cursor positions are addressed with a [`CursorPath`]: the child indices of the [`Fragment::Row`]
//! runs along the way, ending with a character offset inside a [`Fragment::Text`] leaf.
//! [`Fragment::Script`] and [`Fragment::Bracketed`] are transparent containers — they do not
//! contribute a path segment, and their decorations (the bracket glyphs themselves) are not
//! cursor-addressable. [`first_path`](Fragment::first_path) / [`last_path`](Fragment::last_path)
//! and [`prev`](Fragment::prev) / [`next`](Fragment::next) step through the valid addresses in
//! lexicographic order, returning `None` past either end.

use crate::expr::Expr;

/// A cursor address: row child indices, ending in a character offset within a text leaf.
pub type CursorPath = Vec<usize>;

/// One node of the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A run of glyphs, with `len + 1` cursor positions.
    Text(String),

    /// Children laid out left to right.
    Row(Vec<Fragment>),

    /// A child shifted off the baseline; positive offsets raise it (exponents), negative ones
    /// lower it (logarithm bases).
    Script {
        /// The shifted child.
        inner: Box<Fragment>,

        /// Direction and magnitude of the shift, in renderer-defined units.
        offset: i32,
    },

    /// A child wrapped in bracket glyphs.
    Bracketed(Box<Fragment>),
}

impl Fragment {
    /// The first valid cursor address inside this fragment.
    pub fn first_path(&self) -> CursorPath {
        match self {
            Self::Text(_) => vec![0],
            Self::Row(children) => match children.first() {
                Some(first) => {
                    let mut path = vec![0];
                    path.extend(first.first_path());
                    path
                },
                None => Vec::new(),
            },
            Self::Script { inner, .. } | Self::Bracketed(inner) => inner.first_path(),
        }
    }

    /// The last valid cursor address inside this fragment.
    pub fn last_path(&self) -> CursorPath {
        match self {
            Self::Text(text) => vec![text.chars().count()],
            Self::Row(children) => match children.last() {
                Some(last) => {
                    let mut path = vec![children.len() - 1];
                    path.extend(last.last_path());
                    path
                },
                None => Vec::new(),
            },
            Self::Script { inner, .. } | Self::Bracketed(inner) => inner.last_path(),
        }
    }

    /// The valid cursor address immediately before `path`, or `None` at the very beginning.
    pub fn prev(&self, path: &[usize]) -> Option<CursorPath> {
        match self {
            Self::Text(_) => {
                let offset = *path.first()?;
                if offset == 0 {
                    None
                } else {
                    Some(vec![offset - 1])
                }
            },
            Self::Row(children) => {
                let child_idx = *path.first()?;
                let child = children.get(child_idx)?;

                if let Some(inner) = child.prev(&path[1..]) {
                    let mut out = vec![child_idx];
                    out.extend(inner);
                    return Some(out);
                }

                // step into the previous sibling, at its end
                if child_idx == 0 {
                    return None;
                }
                let mut out = vec![child_idx - 1];
                out.extend(children[child_idx - 1].last_path());
                Some(out)
            },
            Self::Script { inner, .. } | Self::Bracketed(inner) => inner.prev(path),
        }
    }

    /// The valid cursor address immediately after `path`, or `None` at the very end.
    pub fn next(&self, path: &[usize]) -> Option<CursorPath> {
        match self {
            Self::Text(text) => {
                let offset = *path.first()?;
                if offset >= text.chars().count() {
                    None
                } else {
                    Some(vec![offset + 1])
                }
            },
            Self::Row(children) => {
                let child_idx = *path.first()?;
                let child = children.get(child_idx)?;

                if let Some(inner) = child.next(&path[1..]) {
                    let mut out = vec![child_idx];
                    out.extend(inner);
                    return Some(out);
                }

                // step into the next sibling, at its start
                let child_idx = child_idx + 1;
                if child_idx >= children.len() {
                    return None;
                }
                let mut out = vec![child_idx];
                out.extend(children[child_idx].first_path());
                Some(out)
            },
            Self::Script { inner, .. } | Self::Bracketed(inner) => inner.next(path),
        }
    }
}

/// Wraps a fragment in brackets when `wrap` holds.
fn bracket_if(fragment: Fragment, wrap: bool) -> Fragment {
    if wrap {
        Fragment::Bracketed(Box::new(fragment))
    } else {
        fragment
    }
}

/// Lowers an expression into its layout.
///
/// Sums interleave `+` / `-` glyph leaves, rendering negated terms as a binary minus; products
/// interleave factors by juxtaposition, with `/` for inverse factors; exponents become raised
/// scripts and logarithm bases lowered ones; function applications are a name followed by a
/// bracketed argument. Empty sums and products render as their identity element.
pub fn layout(expr: &Expr) -> Fragment {
    match expr {
        Expr::Sum(terms) => {
            let Some(first) = terms.first() else {
                return Fragment::Text("0".to_string());
            };

            let mut row = vec![layout(first)];
            for term in &terms[1..] {
                let term = if let Expr::Neg(inner) = term {
                    row.push(Fragment::Text("-".to_string()));
                    &**inner
                } else {
                    row.push(Fragment::Text("+".to_string()));
                    term
                };
                row.push(bracket_if(layout(term), matches!(term, Expr::Sum(_))));
            }
            Fragment::Row(row)
        },
        Expr::Product(factors) => {
            let Some(first) = factors.first() else {
                return Fragment::Text("1".to_string());
            };

            let mut row = vec![layout(first)];
            for factor in &factors[1..] {
                let factor = if let Expr::Inv(inner) = factor {
                    row.push(Fragment::Text("/".to_string()));
                    &**inner
                } else {
                    factor
                };
                row.push(bracket_if(
                    layout(factor),
                    matches!(factor, Expr::Sum(_) | Expr::Product(_)),
                ));
            }
            Fragment::Row(row)
        },
        Expr::Neg(inner) => Fragment::Row(vec![
            Fragment::Text("-".to_string()),
            bracket_if(layout(inner), matches!(&**inner, Expr::Sum(_))),
        ]),
        Expr::Inv(inner) => Fragment::Row(vec![
            bracket_if(
                layout(inner),
                matches!(&**inner, Expr::Sum(_) | Expr::Product(_) | Expr::Neg(_)),
            ),
            Fragment::Script {
                inner: Box::new(Fragment::Text("-1".to_string())),
                offset: 1,
            },
        ]),
        Expr::Exp(base, exponent) => Fragment::Row(vec![
            bracket_if(
                layout(base),
                matches!(&**base, Expr::Sum(_) | Expr::Product(_) | Expr::Neg(_)),
            ),
            Fragment::Script {
                inner: Box::new(layout(exponent)),
                offset: 1,
            },
        ]),
        Expr::Log(base, argument) => Fragment::Row(vec![
            Fragment::Text("log".to_string()),
            Fragment::Script {
                inner: Box::new(layout(base)),
                offset: -1,
            },
            Fragment::Bracketed(Box::new(layout(argument))),
        ]),
        Expr::Var(name) => Fragment::Text(name.clone()),
        Expr::Const(value) => Fragment::Text(value.to_string()),
        Expr::Func { name, arg, .. } => Fragment::Row(vec![
            Fragment::Text(name.clone()),
            Fragment::Bracketed(Box::new(layout(arg))),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn sum_interleaves_signs() {
        let expr = Expr::Sum(vec![
            Expr::var("a"),
            Expr::Neg(Box::new(Expr::var("b"))),
            Expr::var("c"),
        ]);
        assert_eq!(
            layout(&expr),
            Fragment::Row(vec![
                Fragment::Text("a".to_string()),
                Fragment::Text("-".to_string()),
                Fragment::Text("b".to_string()),
                Fragment::Text("+".to_string()),
                Fragment::Text("c".to_string()),
            ]),
        );
    }

    #[test]
    fn product_renders_inverses_as_division() {
        let expr = Expr::Product(vec![
            Expr::var("a"),
            Expr::Inv(Box::new(Expr::var("b"))),
        ]);
        assert_eq!(
            layout(&expr),
            Fragment::Row(vec![
                Fragment::Text("a".to_string()),
                Fragment::Text("/".to_string()),
                Fragment::Text("b".to_string()),
            ]),
        );
    }

    #[test]
    fn exponents_become_raised_scripts() {
        let expr = Expr::power(Expr::var("x") + Expr::num(1.0), Expr::num(2.0));
        assert_eq!(
            layout(&expr),
            Fragment::Row(vec![
                Fragment::Bracketed(Box::new(Fragment::Row(vec![
                    Fragment::Text("x".to_string()),
                    Fragment::Text("+".to_string()),
                    Fragment::Text("1".to_string()),
                ]))),
                Fragment::Script {
                    inner: Box::new(Fragment::Text("2".to_string())),
                    offset: 1,
                },
            ]),
        );
    }

    #[test]
    fn empty_sequences_render_their_identity() {
        assert_eq!(layout(&Expr::Sum(Vec::new())), Fragment::Text("0".to_string()));
        assert_eq!(layout(&Expr::Product(Vec::new())), Fragment::Text("1".to_string()));
    }

    #[test]
    fn text_cursor_walks_characters() {
        let fragment = Fragment::Text("ab".to_string());
        assert_eq!(fragment.first_path(), vec![0]);
        assert_eq!(fragment.last_path(), vec![2]);
        assert_eq!(fragment.next(&[0]), Some(vec![1]));
        assert_eq!(fragment.next(&[2]), None);
        assert_eq!(fragment.prev(&[1]), Some(vec![0]));
        assert_eq!(fragment.prev(&[0]), None);
    }

    #[test]
    fn row_cursor_crosses_children() {
        let fragment = Fragment::Row(vec![
            Fragment::Text("ab".to_string()),
            Fragment::Text("+".to_string()),
            Fragment::Text("c".to_string()),
        ]);

        assert_eq!(fragment.first_path(), vec![0, 0]);
        assert_eq!(fragment.last_path(), vec![2, 1]);

        // walk the whole fragment left to right, then back
        let mut forward = vec![fragment.first_path()];
        while let Some(next) = fragment.next(forward.last().unwrap()) {
            forward.push(next);
        }
        assert_eq!(*forward.last().unwrap(), fragment.last_path());

        let mut backward = vec![fragment.last_path()];
        while let Some(prev) = fragment.prev(backward.last().unwrap()) {
            backward.push(prev);
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn containers_are_transparent() {
        let fragment = Fragment::Row(vec![
            Fragment::Text("x".to_string()),
            Fragment::Script {
                inner: Box::new(Fragment::Text("2".to_string())),
                offset: 1,
            },
        ]);

        // the script contributes no path segment of its own
        assert_eq!(fragment.last_path(), vec![1, 1]);
        assert_eq!(fragment.next(&[0, 1]), Some(vec![1, 0]));
        assert_eq!(fragment.prev(&[1, 0]), Some(vec![0, 1]));
    }

    #[test]
    fn nested_layout_navigation_terminates() {
        // (x + 1)^2 / y
        let expr = Expr::Product(vec![
            Expr::power(Expr::var("x") + Expr::num(1.0), Expr::num(2.0)),
            Expr::Inv(Box::new(Expr::var("y"))),
        ]);
        let fragment = layout(&expr);

        let mut count = 0;
        let mut path = fragment.first_path();
        while let Some(next) = fragment.next(&path) {
            path = next;
            count += 1;
            assert!(count < 100, "cursor walk must terminate");
        }
        assert_eq!(path, fragment.last_path());
        assert!(count > 0);
    }
}
