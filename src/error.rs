use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EvalError {
    #[error("Unexpected token '{token}'")]
    #[diagnostic(
        code(arith::unexpected_token),
        help("expected a number, a unary sign or `(` before this point, or an operator after it")
    )]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,

        #[label("this token")]
        bad_bit: SourceSpan,

        token: String,
    },

    #[error("missing closing parenthesis")]
    #[diagnostic(code(arith::missing_closing_paren), help("add a `)` to close the group"))]
    MissingClosingParen {
        #[source_code]
        src: NamedSource<String>,

        #[label("expected `)` here")]
        bad_bit: SourceSpan,

        #[label("unclosed `(`")]
        open: SourceSpan,
    },

    #[error("malformed number literal '{literal}'")]
    #[diagnostic(
        code(arith::malformed_number),
        help("a number is digits with at most one `.`, e.g. `4.0` or `.5`")
    )]
    MalformedNumber {
        #[source_code]
        src: NamedSource<String>,

        #[label("this numeric literal")]
        bad_bit: SourceSpan,

        literal: String,
    },

    #[error("Unexpected character '{character}'")]
    #[diagnostic(
        code(arith::unrecognized_character),
        help("remove or correct the character: `{character}`")
    )]
    UnrecognizedCharacter {
        #[source_code]
        src: NamedSource<String>,

        #[label("this character")]
        bad_bit: SourceSpan,

        character: char,
    },

    #[error("expression nests deeper than {limit} levels")]
    #[diagnostic(
        code(arith::depth_limit_exceeded),
        help("simplify the expression or raise the depth limit")
    )]
    DepthLimitExceeded {
        #[source_code]
        src: NamedSource<String>,

        #[label("limit reached here")]
        bad_bit: SourceSpan,

        limit: usize,
    },
}

impl EvalError {
    /// Byte offset into the input where the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            EvalError::UnexpectedToken { bad_bit, .. }
            | EvalError::MissingClosingParen { bad_bit, .. }
            | EvalError::MalformedNumber { bad_bit, .. }
            | EvalError::UnrecognizedCharacter { bad_bit, .. }
            | EvalError::DepthLimitExceeded { bad_bit, .. } => bad_bit.offset(),
        }
    }
}

pub(crate) fn named_source(filename: Option<&str>, whole: &str) -> NamedSource<String> {
    NamedSource::new(filename.unwrap_or("<input>"), whole.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn eval_error_is_send_sync_static() {
        _assert_send_sync_static::<EvalError>();
    }

    #[test]
    fn offset_reports_label_start() {
        let err = EvalError::UnrecognizedCharacter {
            src: named_source(None, "1 + $"),
            bad_bit: SourceSpan::from(4..5),
            character: '$',
        };
        assert_eq!(err.offset(), 4);
        assert_eq!(err.to_string(), "Unexpected character '$'");
    }

    #[test]
    fn diagnostic_code_is_stable() {
        let err = EvalError::MissingClosingParen {
            src: named_source(Some("expr.txt"), "(1"),
            bad_bit: SourceSpan::from(2..2),
            open: SourceSpan::from(0..1),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("arith::missing_closing_paren"));
    }
}
