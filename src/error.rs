use thiserror::Error;

use crate::lexer::TokenType;

/// The parser's internal representation of a diagnostic. `Parser::errors()`
/// still hands callers plain strings (that is the contract the REPL and the
/// rest of the crate are written against), but building each message through
/// this type keeps the three wordings defined in one place instead of
/// scattered `format!` calls, and ties them to `Display` rather than
/// free-floating string literals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedToken { expected: TokenType, got: TokenType },

    #[error("no prefix parse function for {token_type} found")]
    NoPrefixParseFn { token_type: TokenType },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_canonical_wording() {
        assert_eq!(
            ParseError::ExpectedToken {
                expected: TokenType::Ident,
                got: TokenType::Assign,
            }
            .to_string(),
            "expected next token to be Ident, got Assign instead"
        );
        assert_eq!(
            ParseError::NoPrefixParseFn {
                token_type: TokenType::Semicolon,
            }
            .to_string(),
            "no prefix parse function for Semicolon found"
        );
        assert_eq!(
            ParseError::InvalidInteger {
                literal: "99999999999999999999".to_string(),
            }
            .to_string(),
            "could not parse \"99999999999999999999\" as integer"
        );
    }
}
