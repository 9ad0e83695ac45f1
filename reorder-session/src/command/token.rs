use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can appear in a command's argument list.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// A token produced by the argument tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the command line that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

/// Returns the non-whitespace tokens of a command's argument tail, with spans shifted by
/// `offset` so they address the full command line.
pub fn tokenize_args(tail: &str, offset: usize) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(tail);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        if kind.is_whitespace() {
            continue;
        }
        let span = lexer.span();
        tokens.push(Token {
            span: span.start + offset..span.end + offset,
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let tokens = tokenize_args(input, 0);
        assert_eq!(tokens.len(), N);

        for (token, (expected_kind, expected_lexeme)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, expected_kind);
            assert_eq!(token.lexeme, expected_lexeme);
        }
    }

    #[test]
    fn select_args() {
        compare_tokens(
            "0 name",
            [(TokenKind::Int, "0"), (TokenKind::Name, "name")],
        );
    }

    #[test]
    fn slice_args() {
        compare_tokens(
            "1   3 t",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Int, "3"),
                (TokenKind::Name, "t"),
            ],
        );
    }

    #[test]
    fn stray_symbols() {
        compare_tokens(
            "a * 2",
            [
                (TokenKind::Name, "a"),
                (TokenKind::Symbol, "*"),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn spans_are_offset() {
        let tokens = tokenize_args("12 x", 3);
        assert_eq!(tokens[0].span, 3..5);
        assert_eq!(tokens[1].span, 6..7);
    }
}
