use crate::ast::{Atom, Expr, ExprVector};
use crate::error::{ParseError, Result};
use tlc_lex::{Lexer, Token, TokenKind};

/// Recursive-descent parser driving a [`Lexer`] to produce an [`ExprVector`].
///
/// Whitespace and comment tokens are filtered out before the parser ever
/// sees them, so every production below only has to handle the grammar's
/// actual terminals.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = Self::next_significant(&mut lexer);
        Self { lexer, current }
    }

    fn next_significant(lexer: &mut Lexer<'a>) -> Token {
        loop {
            let tok = lexer.next_token();
            if !matches!(tok.kind, TokenKind::Whitespace | TokenKind::Comment) {
                return tok;
            }
        }
    }

    fn advance(&mut self) -> Token {
        std::mem::replace(&mut self.current, Self::next_significant(&mut self.lexer))
    }

    fn fatal(&self, message: impl Into<String>) -> ParseError {
        ParseError::Fatal {
            span: self.current.span,
            message: message.into(),
            lexeme: self.current.lexeme.clone(),
            kind: self.current.kind,
        }
    }

    /// Drains the lexer to end-of-input and returns the top-level forms.
    pub fn parse_program(&mut self) -> Result<ExprVector> {
        let mut program = ExprVector::new();
        while self.current.kind != TokenKind::Eof {
            program.push(self.parse_expr()?);
        }
        Ok(program)
    }

    /// Consumes and returns exactly one expression.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Eof => Err(self.fatal("Unexpected end of input")),
            TokenKind::Error => {
                let message = self
                    .current
                    .message
                    .clone()
                    .unwrap_or_else(|| "invalid token".to_string());
                Err(self.fatal(message))
            }
            TokenKind::LParen => self.parse_list(),
            TokenKind::RParen => Err(self.fatal("Unmatched ')'")),
            TokenKind::Quote => self.parse_quote(),
            TokenKind::Symbol => {
                let tok = self.advance();
                Ok(Expr::atom(Atom::Symbol(tok.lexeme), tok.span))
            }
            TokenKind::Number => {
                let tok = self.advance();
                let value: f64 = tok
                    .lexeme
                    .parse()
                    .expect("lexer only emits NUMBER for lexemes that parse as f64");
                Ok(Expr::atom(Atom::Number(value), tok.span))
            }
            TokenKind::String => {
                let tok = self.advance();
                let unquoted = strip_quotes(&tok.lexeme);
                Ok(Expr::atom(Atom::String(unquoted), tok.span))
            }
            TokenKind::Whitespace | TokenKind::Comment => {
                unreachable!("trivia is filtered before the parser sees it")
            }
        }
    }

    fn parse_list(&mut self) -> Result<Expr> {
        let open = self.advance(); // consume '('
        let mut items = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::RParen => {
                    let close = self.advance();
                    return Ok(Expr::list(items, open.span.to(close.span)));
                }
                TokenKind::Eof => return Err(self.fatal("Unterminated list")),
                _ => items.push(self.parse_expr()?),
            }
        }
    }

    fn parse_quote(&mut self) -> Result<Expr> {
        let quote_tok = self.advance(); // consume '\''
        let operand = self.parse_expr()?;
        let quote_symbol = Expr::atom(Atom::Symbol("quote".to_string()), quote_tok.span);
        let span = quote_tok.span.to(operand.span);
        Ok(Expr::list(vec![quote_symbol, operand], span))
    }
}

fn strip_quotes(lexeme: &str) -> String {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
        .to_string()
}
