use crate::{
    Lexer,
    error::{EvalError, named_source},
    lex::{Token, TokenKind},
    parse::{Op, Precedence, precedence, prefix_binding_power, right_binding_power},
};

/// Nesting allowed by [`Evaluator::new`] unless overridden.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parses and evaluates in a single pass. The evaluator owns its lexer, so
/// one instance serves exactly one expression.
pub struct Evaluator<'de> {
    lexer: Lexer<'de>,
    max_depth: usize,
    depth: usize,
}

impl<'de> Evaluator<'de> {
    pub fn new(filename: Option<&'de str>, whole: &'de str) -> Self {
        Evaluator {
            lexer: Lexer::new(filename, whole),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluates the whole input; anything left after the expression is an
    /// error.
    pub fn evaluate_all(mut self) -> Result<f64, EvalError> {
        let value = self.evaluate(Precedence::Lowest)?;
        let rest = self.lexer.next_token()?;
        if rest.kind != TokenKind::EndOfInput {
            return Err(self.unexpected(rest));
        }
        log::debug!("{:?} = {value}", self.lexer.whole());
        Ok(value)
    }

    /// Evaluates operators binding tighter than `floor`, leaving the first
    /// weaker token unconsumed.
    pub fn evaluate(&mut self, floor: Precedence) -> Result<f64, EvalError> {
        if self.depth >= self.max_depth {
            let at = self.lexer.peek()?;
            return Err(EvalError::DepthLimitExceeded {
                src: self.source(),
                bad_bit: at.span(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let value = self.evaluate_within(floor);
        self.depth -= 1;
        value
    }

    fn evaluate_within(&mut self, floor: Precedence) -> Result<f64, EvalError> {
        let mut lhs = self.prefix()?;

        loop {
            let token = self.lexer.peek()?;
            if token.kind == TokenKind::EndOfInput {
                break;
            }
            match precedence(token.kind) {
                Some(p) if p > floor => {}
                _ => break,
            }
            let Some(op) = Op::infix(token.kind) else {
                return Err(self.unexpected(token));
            };
            self.lexer.next_token()?;

            let rhs = self.evaluate(right_binding_power(op))?;
            log::trace!("infix {op:?} {lhs} {rhs}");
            lhs = op.apply(lhs, rhs);
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<f64, EvalError> {
        let token = self.lexer.next_token()?;
        log::trace!("prefix {:?} {:?}", token.kind, token.literal);

        match token.kind {
            TokenKind::Number => {
                token
                    .literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::MalformedNumber {
                        src: self.source(),
                        bad_bit: token.span(),
                        literal: token.literal.to_string(),
                    })
            }
            TokenKind::Minus | TokenKind::Plus => {
                let operand = self.evaluate(prefix_binding_power())?;
                if token.kind == TokenKind::Minus {
                    Ok(-operand)
                } else {
                    Ok(operand)
                }
            }
            TokenKind::LeftParen => {
                let inner = self.evaluate(Precedence::Lowest)?;
                let close = self.lexer.next_token()?;
                if close.kind != TokenKind::RightParen {
                    return Err(EvalError::MissingClosingParen {
                        src: self.source(),
                        bad_bit: close.span(),
                        open: token.span(),
                    });
                }
                Ok(inner)
            }
            _ => Err(self.unexpected(token)),
        }
    }

    fn unexpected(&self, token: Token<'de>) -> EvalError {
        let name = match token.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            _ => token.literal.to_string(),
        };
        EvalError::UnexpectedToken {
            src: self.source(),
            bad_bit: token.span(),
            token: name,
        }
    }

    fn source(&self) -> miette::NamedSource<String> {
        named_source(self.lexer.filename(), self.lexer.whole())
    }
}
