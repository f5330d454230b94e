//! Abstract syntax tree for arithmetic expressions
//!
//! `Expr` is a closed enum; every consumer matches it exhaustively. Each
//! binary node owns its two operands, so the tree has no sharing.

use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, in token declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Div => "/",
        }
    }

    /// Operator for an operator token kind
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Minus),
            TokenKind::Times => Some(Self::Times),
            TokenKind::Div => Some(Self::Div),
            _ => None,
        }
    }

    pub fn token_kind(&self) -> TokenKind {
        match self {
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Times => TokenKind::Times,
            Self::Div => TokenKind::Div,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Plus => left + right,
            Self::Minus => left - right,
            Self::Times => left * right,
            Self::Div => left / right,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    FloatLiteral(f64),
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn literal(value: f64) -> Self {
        Self::FloatLiteral(value)
    }

    pub fn plus(left: Expr, right: Expr) -> Self {
        Self::Plus(Box::new(left), Box::new(right))
    }

    pub fn minus(left: Expr, right: Expr) -> Self {
        Self::Minus(Box::new(left), Box::new(right))
    }

    pub fn times(left: Expr, right: Expr) -> Self {
        Self::Times(Box::new(left), Box::new(right))
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Self::Div(Box::new(left), Box::new(right))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        match op {
            BinaryOp::Plus => Self::plus(left, right),
            BinaryOp::Minus => Self::minus(left, right),
            BinaryOp::Times => Self::times(left, right),
            BinaryOp::Div => Self::div(left, right),
        }
    }

    /// Operator and operands of a binary node; `None` for literals
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Self::FloatLiteral(_) => None,
            Self::Plus(l, r) => Some((BinaryOp::Plus, l, r)),
            Self::Minus(l, r) => Some((BinaryOp::Minus, l, r)),
            Self::Times(l, r) => Some((BinaryOp::Times, l, r)),
            Self::Div(l, r) => Some((BinaryOp::Div, l, r)),
        }
    }

    /// IEEE 754 evaluation; division by zero yields an infinity or NaN
    pub fn evaluate(&self) -> f64 {
        enum Step<'a> {
            Visit(&'a Expr),
            Apply(BinaryOp),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<f64> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Self::FloatLiteral(value)) => values.push(*value),
                Step::Visit(expr) => {
                    if let Some((op, l, r)) = expr.as_binary() {
                        steps.push(Step::Apply(op));
                        steps.push(Step::Visit(r));
                        steps.push(Step::Visit(l));
                    }
                }
                Step::Apply(op) => {
                    let right = values.pop().unwrap_or(f64::NAN);
                    let left = values.pop().unwrap_or(f64::NAN);
                    values.push(op.apply(left, right));
                }
            }
        }
        values.pop().unwrap_or(f64::NAN)
    }

    /// Height of the tree; a literal has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, level)) = pending.pop() {
            deepest = deepest.max(level);
            if let Some((_, l, r)) = expr.as_binary() {
                pending.push((l, level + 1));
                pending.push((r, level + 1));
            }
        }
        deepest
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            if let Some((_, l, r)) = expr.as_binary() {
                pending.push(l);
                pending.push(r);
            }
        }
        count
    }

    /// Move both operands of a binary node out, leaving literals behind
    fn detach_operands(&mut self, into: &mut Vec<Expr>) {
        if let Self::Plus(l, r) | Self::Minus(l, r) | Self::Times(l, r) | Self::Div(l, r) = self {
            into.push(std::mem::replace(l.as_mut(), Self::FloatLiteral(0.0)));
            into.push(std::mem::replace(r.as_mut(), Self::FloatLiteral(0.0)));
        }
    }
}

// Long operator chains build trees thousands of nodes deep; dropping them
// recursively would overflow the stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

/// Fully parenthesized; literals always carry a fractional part.
///
/// Output for trees built by the parser re-parses to an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloatLiteral(value) => {
                let text = value.to_string();
                if value.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
            Self::Plus(l, r) => write!(f, "({} + {})", l, r),
            Self::Minus(l, r) => write!(f, "({} - {})", l, r),
            Self::Times(l, r) => write!(f, "({} * {})", l, r),
            Self::Div(l, r) => write!(f, "({} / {})", l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: f64) -> Expr {
        Expr::literal(value)
    }

    #[test]
    fn test_evaluate() {
        // 8 - (3 - 1)
        let expr = Expr::minus(lit(8.0), Expr::minus(lit(3.0), lit(1.0)));
        assert_eq!(expr.evaluate(), 6.0);

        let expr = Expr::plus(lit(2.0), Expr::times(lit(3.0), lit(4.0)));
        assert_eq!(expr.evaluate(), 14.0);

        assert!(Expr::div(lit(1.0), lit(0.0)).evaluate().is_infinite());
    }

    #[test]
    fn test_display_is_fully_parenthesized() {
        let expr = Expr::times(Expr::plus(lit(2.0), lit(3.5)), lit(4.0));
        assert_eq!(expr.to_string(), "((2.0 + 3.5) * 4.0)");
        assert_eq!(lit(0.25).to_string(), "0.25");
        assert_eq!(lit(100.0).to_string(), "100.0");
    }

    #[test]
    fn test_binary_helpers() {
        let expr = Expr::binary(BinaryOp::Div, lit(1.0), lit(2.0));
        assert_eq!(expr, Expr::div(lit(1.0), lit(2.0)));

        let (op, l, r) = expr.as_binary().unwrap();
        assert_eq!(op, BinaryOp::Div);
        assert_eq!(op.symbol(), "/");
        assert_eq!(op.token_kind(), TokenKind::Div);
        assert_eq!((l, r), (&lit(1.0), &lit(2.0)));

        assert!(lit(1.0).as_binary().is_none());
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Num), None);
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Minus), Some(BinaryOp::Minus));
        assert_eq!(BinaryOp::Minus.apply(8.0, 2.0), 6.0);
    }

    #[test]
    fn test_depth_and_node_count() {
        let leaf = lit(1.0);
        assert_eq!(leaf.depth(), 1);
        assert_eq!(leaf.node_count(), 1);

        let expr = Expr::plus(lit(1.0), Expr::times(lit(2.0), lit(3.0)));
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.node_count(), 5);
    }

    #[test]
    fn test_deep_tree() {
        let mut expr = lit(1.0);
        for _ in 0..100_000 {
            expr = Expr::times(lit(1.0), expr);
        }
        assert_eq!(expr.depth(), 100_001);
        assert_eq!(expr.node_count(), 200_001);
        assert_eq!(expr.evaluate(), 1.0);
        drop(expr);
    }

    #[test]
    fn test_serde_json() {
        let expr = Expr::plus(lit(1.5), lit(2.0));
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, r#"{"Plus":[{"FloatLiteral":1.5},{"FloatLiteral":2.0}]}"#);

        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }
}
