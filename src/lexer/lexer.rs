use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;

pub static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("fn", TokenType::Function);
    m.insert("let", TokenType::Let);
    m.insert("true", TokenType::True);
    m.insert("false", TokenType::False);
    m.insert("if", TokenType::If);
    m.insert("else", TokenType::Else);
    m.insert("return", TokenType::Return);
    m
});

/*
The lexer's job is to scan source text as a sequence of Unicode scalars and group those
scalars together into lexemes. Each lexeme is then classified into a token, the atomic
unit later stages of the interpreter (the parser, then the evaluator) work with.

Positions are tracked in scalar units, not bytes, so that a multi-byte character such as
'世' advances the lexer's position by one, the same as 'a' would. This matters for `len`,
which reports scalar counts, and for any future work that wants to report a column.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Illegal,
    Eof,

    // identifiers + literals
    Ident,
    Int,
    String,

    // operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Lt,
    Gt,
    Eq,
    NotEq,

    // delimiters
    Comma,
    Semicolon,
    Colon,

    Lparen,
    Rparen,
    Lbrace,
    Rbrace,
    Lbracket,
    Rbracket,

    // keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>) -> Self {
        Self {
            token_type,
            literal: literal.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.token_type, self.literal)
    }
}

fn lookup_ident(ident: &str) -> TokenType {
    KEYWORDS.get(ident).copied().unwrap_or(TokenType::Ident)
}

/* Lexer:
The lexer consumes Unicode scalars from the source, identifies which lexeme the scalar
begins, and keeps consuming while that lexeme continues. Once a lexeme ends, the lexer
emits a token and returns to the top of the loop. After the input is exhausted, the lexer
keeps returning EOF tokens forever rather than failing — callers decide when to stop
asking for tokens.
*/
pub struct Lexer {
    input: Vec<char>,
    position: usize,      // current scalar under examination
    read_position: usize, // next scalar to read
    ch: char,              // current scalar, '\0' past the end
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut lexer = Self {
            input: source.chars().collect(),
            position: 0,
            read_position: 0,
            ch: '\0',
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            '\0'
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> char {
        if self.read_position >= self.input.len() {
            '\0'
        } else {
            self.input[self.read_position]
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            '=' => {
                if self.peek_char() == '=' {
                    self.read_char();
                    Token::new(TokenType::Eq, "==")
                } else {
                    Token::new(TokenType::Assign, "=")
                }
            }
            '+' => Token::new(TokenType::Plus, "+"),
            '-' => Token::new(TokenType::Minus, "-"),
            '!' => {
                if self.peek_char() == '=' {
                    self.read_char();
                    Token::new(TokenType::NotEq, "!=")
                } else {
                    Token::new(TokenType::Bang, "!")
                }
            }
            '/' => Token::new(TokenType::Slash, "/"),
            '*' => Token::new(TokenType::Asterisk, "*"),
            '<' => Token::new(TokenType::Lt, "<"),
            '>' => Token::new(TokenType::Gt, ">"),
            ';' => Token::new(TokenType::Semicolon, ";"),
            ':' => Token::new(TokenType::Colon, ":"),
            ',' => Token::new(TokenType::Comma, ","),
            '(' => Token::new(TokenType::Lparen, "("),
            ')' => Token::new(TokenType::Rparen, ")"),
            '{' => Token::new(TokenType::Lbrace, "{"),
            '}' => Token::new(TokenType::Rbrace, "}"),
            '[' => Token::new(TokenType::Lbracket, "["),
            ']' => Token::new(TokenType::Rbracket, "]"),
            '"' => Token::new(TokenType::String, self.read_string()),
            '\0' => Token::new(TokenType::Eof, ""),
            c => {
                if is_letter(c) {
                    // identifiers are multi-scalar; return early, `read_identifier`
                    // already left `self.ch` on the scalar past the lexeme.
                    let literal = self.read_identifier();
                    let token_type = lookup_ident(&literal);
                    let tok = Token::new(token_type, literal);
                    log::trace!("next_token: {:?} {:?}", tok.token_type, tok.literal);
                    return tok;
                } else if is_digit(c) {
                    let tok = Token::new(TokenType::Int, self.read_number());
                    log::trace!("next_token: {:?} {:?}", tok.token_type, tok.literal);
                    return tok;
                } else {
                    Token::new(TokenType::Illegal, c.to_string())
                }
            }
        };

        self.read_char();
        log::trace!("next_token: {:?} {:?}", tok.token_type, tok.literal);
        tok
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, ' ' | '\t' | '\n' | '\r') {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    // Strings are not escape-processed: whatever lies between the quotes is
    // taken verbatim, matching the spec's "no escape processing required" rule.
    fn read_string(&mut self) -> String {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == '"' || self.ch == '\0' {
                break;
            }
        }
        self.input[start..self.position].iter().collect()
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_token_covers_every_punctuation_and_operator() {
        let input = "=+(){},;!-/*<>:[]";
        let expected = vec![
            TokenType::Assign,
            TokenType::Plus,
            TokenType::Lparen,
            TokenType::Rparen,
            TokenType::Lbrace,
            TokenType::Rbrace,
            TokenType::Comma,
            TokenType::Semicolon,
            TokenType::Bang,
            TokenType::Minus,
            TokenType::Slash,
            TokenType::Asterisk,
            TokenType::Lt,
            TokenType::Gt,
            TokenType::Colon,
            TokenType::Lbracket,
            TokenType::Rbracket,
            TokenType::Eof,
        ];

        let mut lexer = Lexer::new(input);
        for want in expected {
            let tok = lexer.next_token();
            assert_eq!(tok.token_type, want);
        }
    }

    #[test]
    fn next_token_handles_a_small_program() {
        let input = r#"
            let five = 5;
            let add = fn(x, y) {
                x + y;
            };
            let result = add(five, 10);
            !-/*5;
            5 < 10 > 5;

            if (5 < 10) {
                return true;
            } else {
                return false;
            }

            10 == 10;
            10 != 9;
            "foobar";
            "foo bar";
            [1, 2];
            {"foo": "bar"};
        "#;

        let expected = vec![
            (TokenType::Let, "let"),
            (TokenType::Ident, "five"),
            (TokenType::Assign, "="),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "add"),
            (TokenType::Assign, "="),
            (TokenType::Function, "fn"),
            (TokenType::Lparen, "("),
            (TokenType::Ident, "x"),
            (TokenType::Comma, ","),
            (TokenType::Ident, "y"),
            (TokenType::Rparen, ")"),
            (TokenType::Lbrace, "{"),
            (TokenType::Ident, "x"),
            (TokenType::Plus, "+"),
            (TokenType::Ident, "y"),
            (TokenType::Semicolon, ";"),
            (TokenType::Rbrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "result"),
            (TokenType::Assign, "="),
            (TokenType::Ident, "add"),
            (TokenType::Lparen, "("),
            (TokenType::Ident, "five"),
            (TokenType::Comma, ","),
            (TokenType::Int, "10"),
            (TokenType::Rparen, ")"),
            (TokenType::Semicolon, ";"),
            (TokenType::Bang, "!"),
            (TokenType::Minus, "-"),
            (TokenType::Slash, "/"),
            (TokenType::Asterisk, "*"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "5"),
            (TokenType::Lt, "<"),
            (TokenType::Int, "10"),
            (TokenType::Gt, ">"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::If, "if"),
            (TokenType::Lparen, "("),
            (TokenType::Int, "5"),
            (TokenType::Lt, "<"),
            (TokenType::Int, "10"),
            (TokenType::Rparen, ")"),
            (TokenType::Lbrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::True, "true"),
            (TokenType::Semicolon, ";"),
            (TokenType::Rbrace, "}"),
            (TokenType::Else, "else"),
            (TokenType::Lbrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::False, "false"),
            (TokenType::Semicolon, ";"),
            (TokenType::Rbrace, "}"),
            (TokenType::Int, "10"),
            (TokenType::Eq, "=="),
            (TokenType::Int, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "10"),
            (TokenType::NotEq, "!="),
            (TokenType::Int, "9"),
            (TokenType::Semicolon, ";"),
            (TokenType::String, "foobar"),
            (TokenType::Semicolon, ";"),
            (TokenType::String, "foo bar"),
            (TokenType::Semicolon, ";"),
            (TokenType::Lbracket, "["),
            (TokenType::Int, "1"),
            (TokenType::Comma, ","),
            (TokenType::Int, "2"),
            (TokenType::Rbracket, "]"),
            (TokenType::Semicolon, ";"),
            (TokenType::Lbrace, "{"),
            (TokenType::String, "foo"),
            (TokenType::Colon, ":"),
            (TokenType::String, "bar"),
            (TokenType::Rbrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Eof, ""),
        ];

        let mut lexer = Lexer::new(input);
        for (want_type, want_literal) in expected {
            let tok = lexer.next_token();
            assert_eq!(tok.token_type, want_type);
            assert_eq!(tok.literal, want_literal);
        }
    }

    #[test]
    fn empty_input_yields_eof_immediately() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().token_type, TokenType::Eof);
        assert_eq!(lexer.next_token().token_type, TokenType::Eof);
    }

    #[test]
    fn unclassifiable_scalars_are_reported_as_illegal_not_fatal() {
        let mut lexer = Lexer::new("@5");
        let illegal = lexer.next_token();
        assert_eq!(illegal.token_type, TokenType::Illegal);
        assert_eq!(illegal.literal, "@");
        assert_eq!(lexer.next_token().token_type, TokenType::Int);
    }

    #[test]
    fn identifiers_reject_digits_mid_lexeme() {
        // `[0-9]+` and `[A-Za-z_]+` never share a lexeme under this grammar:
        // `x1` lexes as two tokens, not one identifier.
        let mut lexer = Lexer::new("x1");
        let first = lexer.next_token();
        assert_eq!(first.token_type, TokenType::Ident);
        assert_eq!(first.literal, "x");
        let second = lexer.next_token();
        assert_eq!(second.token_type, TokenType::Int);
        assert_eq!(second.literal, "1");
    }

    #[test]
    fn len_counts_unicode_scalars_not_bytes() {
        let mut lexer = Lexer::new(r#""世界""#);
        let tok = lexer.next_token();
        assert_eq!(tok.token_type, TokenType::String);
        assert_eq!(tok.literal.chars().count(), 2);
    }
}
