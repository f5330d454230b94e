//! Recursive-descent parser for the expression grammar
//!
//! ```text
//! T   -> F (AddOp T)?
//! F   -> Lit (MulOp F)?
//! Lit -> NUM | LPAREN T RPAREN
//! ```
//!
//! The recursion sits on the right of each operator, so every operator
//! chain is right-associative: `8.0-3.0-1.0` is `8.0-(3.0-1.0)`. Each
//! production decides on one token of lookahead.
//!
//! The right recursion of `T` and `F` is read as a loop and folded from the
//! right, so only parentheses grow the call stack.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::grammar::ast::{BinaryOp, Expr};
use crate::log_error;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{SpannedToken, TokenKind, TokenStream, TokenStreamError};

const ADDITIVE: [BinaryOp; 2] = [BinaryOp::Plus, BinaryOp::Minus];
const MULTIPLICATIVE: [BinaryOp; 2] = [BinaryOp::Times, BinaryOp::Div];

/// Parser over an owned token stream.
///
/// Each parenthesized sub-expression counts one nesting level; exceeding
/// `max_depth` fails with `NestingTooDeep` instead of exhausting the call
/// stack. Operator chains of any length stay at the level they start on.
#[derive(Debug)]
pub struct ExprParser {
    tokens: TokenStream,
    depth: usize,
    max_depth: usize,
    deepest: usize,
}

impl ExprParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_max_depth(tokens, MAX_PARSE_DEPTH)
    }

    /// The limit is clamped to `1..=MAX_PARSE_DEPTH`
    pub fn with_max_depth(tokens: TokenStream, max_depth: usize) -> Self {
        Self {
            tokens,
            depth: 0,
            max_depth: max_depth.clamp(1, MAX_PARSE_DEPTH),
            deepest: 0,
        }
    }

    /// Parse one complete expression; nothing but EOF may follow it
    pub fn parse(&mut self) -> SyntaxResult<Expr> {
        let expr = self.parse_expression()?;
        self.expect_end_of_input()?;
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> SyntaxResult<Expr> {
        self.parse_t()
    }

    /// T -> F (AddOp T)?
    pub fn parse_t(&mut self) -> SyntaxResult<Expr> {
        let first = self.parse_f()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek_operator(ADDITIVE) {
            self.consume(op.token_kind())?;
            rest.push((op, self.parse_f()?));
        }
        Ok(fold_right(first, rest))
    }

    /// F -> Lit (MulOp F)?
    pub fn parse_f(&mut self) -> SyntaxResult<Expr> {
        let first = self.parse_lit()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek_operator(MULTIPLICATIVE) {
            self.consume(op.token_kind())?;
            rest.push((op, self.parse_lit()?));
        }
        Ok(fold_right(first, rest))
    }

    /// Lit -> NUM | LPAREN T RPAREN
    pub fn parse_lit(&mut self) -> SyntaxResult<Expr> {
        if self.tokens.peek(TokenKind::Num, 0) {
            let token = self.consume(TokenKind::Num)?;
            return Self::convert_literal(&token);
        }

        if self.tokens.peek(TokenKind::LParen, 0) {
            return self.nested(|parser| {
                parser.consume(TokenKind::LParen)?;
                let inner = parser.parse_t()?;
                parser.consume(TokenKind::RParen)?;
                Ok(inner)
            });
        }

        let current = self.tokens.current();
        let error = SyntaxError::unexpected_token(
            &[TokenKind::Num, TokenKind::LParen],
            current.value.kind,
            current.span.start.offset,
        );
        log_error!(error.error_code(), "Expected a literal or parenthesized expression",
            span = current.span,
            "found" => current.value.kind,
            "offset" => current.span.start.offset
        );
        Err(error)
    }

    /// Fail with `TrailingInput` unless only the EOF sentinel is left
    pub fn expect_end_of_input(&self) -> SyntaxResult<()> {
        if self.tokens.is_at_end() {
            return Ok(());
        }

        let current = self.tokens.current();
        let error = SyntaxError::TrailingInput {
            found: current.value.kind,
            offset: current.span.start.offset,
        };
        log_error!(error.error_code(), "Input continues after a complete expression",
            span = current.span,
            "found" => current.value.kind,
            "remaining_tokens" => self.tokens.remaining_count()
        );
        Err(error)
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Deepest parenthesis nesting reached so far
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    fn nested<F>(&mut self, production: F) -> SyntaxResult<Expr>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<Expr>,
    {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            let current = self.tokens.current();
            let error = SyntaxError::NestingTooDeep {
                depth,
                max_depth: self.max_depth,
                offset: current.span.start.offset,
            };
            log_error!(error.error_code(), "Maximum parser nesting depth exceeded",
                span = current.span,
                "depth" => depth,
                "max_depth" => self.max_depth
            );
            return Err(error);
        }

        self.depth = depth;
        self.deepest = self.deepest.max(depth);
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn peek_operator(&self, candidates: [BinaryOp; 2]) -> Option<BinaryOp> {
        candidates
            .into_iter()
            .find(|op| self.tokens.peek(op.token_kind(), 0))
    }

    fn consume(&mut self, expected: TokenKind) -> SyntaxResult<SpannedToken> {
        self.tokens.consume(expected).map_err(|error| {
            let TokenStreamError::UnexpectedToken {
                expected,
                found,
                span,
            } = error;
            let error = SyntaxError::unexpected_token(&[expected], found, span.start.offset);
            log_error!(error.error_code(), "Unexpected token",
                span = span,
                "expected" => expected,
                "found" => found
            );
            error
        })
    }

    /// Out-of-range literals round to an infinity; only malformed text fails
    fn convert_literal(token: &SpannedToken) -> SyntaxResult<Expr> {
        let lexeme = &token.value.lexeme;
        lexeme.parse::<f64>().map(Expr::literal).map_err(|_| {
            let error = SyntaxError::InvalidLiteral {
                lexeme: lexeme.clone(),
                offset: token.span.start.offset,
            };
            log_error!(error.error_code(), "Numeric literal conversion failed",
                span = token.span,
                "lexeme" => lexeme
            );
            error
        })
    }
}

/// `e0 op1 e1 op2 e2` becomes `e0 op1 (e1 op2 e2)`
fn fold_right(first: Expr, mut rest: Vec<(BinaryOp, Expr)>) -> Expr {
    let Some((mut pending, mut acc)) = rest.pop() else {
        return first;
    };
    while let Some((op, operand)) = rest.pop() {
        acc = Expr::binary(pending, operand, acc);
        pending = op;
    }
    Expr::binary(pending, first, acc)
}
