//! Binding powers for the Pratt evaluator.

use crate::lex::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    Power,
    Prefix,
    Call,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Power,
}

impl Op {
    /// The infix operator a token stands for, if it has an infix handler.
    pub const fn infix(kind: TokenKind) -> Option<Op> {
        match kind {
            TokenKind::Plus => Some(Op::Plus),
            TokenKind::Minus => Some(Op::Minus),
            TokenKind::Star => Some(Op::Star),
            TokenKind::Slash => Some(Op::Slash),
            TokenKind::DoubleStar => Some(Op::Power),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Plus => lhs + rhs,
            Op::Minus => lhs - rhs,
            Op::Star => lhs * rhs,
            Op::Slash => lhs / rhs,
            Op::Power => lhs.powf(rhs),
        }
    }
}

/// Precedence of a token in operator position. Tokens that never bind return
/// `None` and end the infix loop.
///
/// `(` is ranked `Call` although nothing handles it as an operator, so
/// `2(3)` reaches the infix lookup and is rejected there.
pub const fn precedence(kind: TokenKind) -> Option<Precedence> {
    match kind {
        TokenKind::Plus | TokenKind::Minus => Some(Precedence::Sum),
        TokenKind::Star | TokenKind::Slash => Some(Precedence::Product),
        TokenKind::DoubleStar => Some(Precedence::Power),
        TokenKind::LeftParen => Some(Precedence::Call),
        TokenKind::Number | TokenKind::RightParen | TokenKind::EndOfInput => None,
    }
}

/// Floor for the right operand of `op`. Left-associative operators pass their
/// own precedence; `**` passes one level lower so it groups to the right.
pub const fn right_binding_power(op: Op) -> Precedence {
    match op {
        Op::Plus | Op::Minus => Precedence::Sum,
        Op::Star | Op::Slash => Precedence::Product,
        Op::Power => Precedence::Product,
    }
}

pub const fn prefix_binding_power() -> Precedence {
    Precedence::Prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        use Precedence::*;
        let levels = [Lowest, Sum, Product, Power, Prefix, Call];
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn operators_bind_by_family() {
        assert_eq!(precedence(TokenKind::Plus), precedence(TokenKind::Minus));
        assert_eq!(precedence(TokenKind::Star), precedence(TokenKind::Slash));
        assert!(precedence(TokenKind::DoubleStar) > precedence(TokenKind::Star));
        assert_eq!(precedence(TokenKind::RightParen), None);
        assert_eq!(precedence(TokenKind::Number), None);
    }

    #[test]
    fn left_paren_binds_but_has_no_infix_handler() {
        assert_eq!(precedence(TokenKind::LeftParen), Some(Precedence::Call));
        assert_eq!(Op::infix(TokenKind::LeftParen), None);
    }

    #[test]
    fn power_recurses_below_itself() {
        assert!(right_binding_power(Op::Power) < Precedence::Power);
        for op in [Op::Plus, Op::Minus, Op::Star, Op::Slash] {
            let kind = match op {
                Op::Plus => TokenKind::Plus,
                Op::Minus => TokenKind::Minus,
                Op::Star => TokenKind::Star,
                _ => TokenKind::Slash,
            };
            assert_eq!(Some(right_binding_power(op)), precedence(kind));
        }
    }

    #[test]
    fn division_follows_ieee() {
        assert_eq!(Op::Slash.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(Op::Slash.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(Op::Slash.apply(0.0, 0.0).is_nan());
        assert!(Op::Power.apply(-8.0, 1.0 / 3.0).is_nan());
    }
}
