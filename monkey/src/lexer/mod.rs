//! Lexer implementation using logos
//!
//! [`Lexer`] hands out one [`Token`] per call. Input the generated matcher
//! rejects becomes an `Illegal` token and scanning carries on; once the source
//! is exhausted every call yields `Eof`.

mod token;

pub use token::{Token, TokenKind};

use crate::ast::Span;
use logos::Logos;

/// On-demand scanner over a source string
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    len: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: TokenKind::lexer(source),
            len: source.len(),
        }
    }

    /// Scan the next token
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            return Token::new(TokenKind::Eof, "", Span::point(self.len));
        };

        let span = Span::from(self.inner.span());
        let slice = self.inner.slice();
        match result {
            Ok(TokenKind::Str) => Token::new(TokenKind::Str, token::unescape(slice), span),
            Ok(kind) => Token::new(kind, slice, span),
            Err(()) => Token::new(TokenKind::Illegal, slice, span),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `Eof`
    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        (!tok.is(TokenKind::Eof)).then_some(tok)
    }
}

/// Tokenize a whole source string, `Eof` included
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let done = tok.is(TokenKind::Eof);
        tokens.push(tok);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].literal, "");
    }

    #[test]
    fn test_every_fixed_token_scans_to_itself() {
        let table = [
            ("=", TokenKind::Assign),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("!", TokenKind::Bang),
            ("*", TokenKind::Asterisk),
            ("/", TokenKind::Slash),
            ("==", TokenKind::Eq),
            ("!=", TokenKind::NotEq),
            ("<", TokenKind::Lt),
            (">", TokenKind::Gt),
            ("<=", TokenKind::LtEq),
            (">=", TokenKind::GtEq),
            (",", TokenKind::Comma),
            (";", TokenKind::Semicolon),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            ("fn", TokenKind::Function),
            ("let", TokenKind::Let),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("return", TokenKind::Return),
        ];
        for (text, kind) in table {
            let tokens = tokenize(text);
            assert_eq!(tokens.len(), 2, "{text:?} should scan to one token");
            assert_eq!(tokens[0].kind, kind, "{text:?}");
            assert_eq!(tokens[0].literal, text);
            assert_eq!(tokens[1].kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_tokenize_program() {
        let source = "let five = 5;
let add = fn(x, y) {
  x + y;
};
let result = add(five, 10);
!-/*5;
5 < 10 > 5;
if (5 <= 10) { return true; } else { return false; }
10 == 10; 10 != 9; 1 >= 0;";
        let expected = vec![
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::Function, "fn"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "y"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Ident, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Ident, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "result"),
            (TokenKind::Assign, "="),
            (TokenKind::Ident, "add"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Int, "10"),
            (TokenKind::RParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Bang, "!"),
            (TokenKind::Minus, "-"),
            (TokenKind::Slash, "/"),
            (TokenKind::Asterisk, "*"),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "5"),
            (TokenKind::Lt, "<"),
            (TokenKind::Int, "10"),
            (TokenKind::Gt, ">"),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::If, "if"),
            (TokenKind::LParen, "("),
            (TokenKind::Int, "5"),
            (TokenKind::LtEq, "<="),
            (TokenKind::Int, "10"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::True, "true"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Else, "else"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::False, "false"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Int, "10"),
            (TokenKind::Eq, "=="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "10"),
            (TokenKind::NotEq, "!="),
            (TokenKind::Int, "9"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "1"),
            (TokenKind::GtEq, ">="),
            (TokenKind::Int, "0"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];

        let tokens = tokenize(source);
        let actual: Vec<_> = tokens.iter().map(|t| (t.kind, t.literal.as_str())).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("fnord letter iffy");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Ident));
        assert_eq!(tokens[0].literal, "fnord");
    }

    #[test]
    fn test_identifiers_are_letters_and_underscores() {
        let tokens = tokenize("foo_bar x1");
        assert_eq!(tokens[0].literal, "foo_bar");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].literal, "x");
        assert_eq!(tokens[2].kind, TokenKind::Int);
        assert_eq!(tokens[2].literal, "1");
    }

    #[test]
    fn test_two_char_operators_need_adjacent_equals() {
        assert_eq!(kinds("= ="), vec![TokenKind::Assign, TokenKind::Assign, TokenKind::Eof]);
        assert_eq!(kinds("! ="), vec![TokenKind::Bang, TokenKind::Assign, TokenKind::Eof]);
        assert_eq!(kinds("<=="), vec![TokenKind::LtEq, TokenKind::Assign, TokenKind::Eof]);
    }

    #[test]
    fn test_tokenize_string_literal() {
        let tokens = tokenize(r#""hello world" "a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].literal, "hello world");
        assert_eq!(tokens[1].literal, "a\"b");
    }

    #[test]
    fn test_illegal_character_then_continue() {
        let tokens = tokenize("1 @ 2");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "@");
        assert_eq!(tokens[2].kind, TokenKind::Int);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let tokens = tokenize("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(kinds("  \t\r\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("let x");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 5));
        assert_eq!(tokens[2].span, Span::point(5));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let collected: Vec<_> = Lexer::new("a + b").map(|t| t.kind).collect();
        assert_eq!(collected, vec![TokenKind::Ident, TokenKind::Plus, TokenKind::Ident]);
    }
}
