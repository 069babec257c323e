// Lexer - converts the characters of a single source unit into a stream of
// tokens which are handed to the parser one at a time.
use std::rc::Rc;

use crate::compiler::source::{Location, SourceUnit};

use super::LexerResult;
use super::{
    tokens::{Lex, Primitive, Token},
    LexerError,
};
use Lex::*;

pub struct Lexer {
    chars: std::vec::IntoIter<char>,

    /// Characters that have been read and then given back.  This is a LIFO
    /// stack: the last character pushed is the next one read.
    pushback: Vec<char>,

    /// The token returned by the last `peek`, which will be handed out by
    /// the next call to `next`.
    peeked: Option<Token>,

    file: Rc<str>,
    line: u32,
}

impl Lexer {
    pub fn new(unit: &SourceUnit) -> Lexer {
        Self::from_str(unit.name(), unit.text())
    }

    pub fn from_str(file: &str, text: &str) -> Lexer {
        Lexer {
            chars: text.chars().collect::<Vec<_>>().into_iter(),
            pushback: vec![],
            peeked: None,
            file: file.into(),
            line: 1,
        }
    }

    /// The name of the file being tokenized
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Current line in the source unit
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line)
    }

    /// Returns and consumes the next token.  Once the input is exhausted this
    /// will return an EOF token every time it is called.
    pub fn next(&mut self) -> LexerResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.read_token(),
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> LexerResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Consumes the next token if it is the same kind of token as `test`.
    pub fn next_if(&mut self, test: &Lex) -> LexerResult<Option<Token>> {
        if self.peek()?.token_eq(test) {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Converts the rest of the source unit into a vector of tokens.  The
    /// terminating EOF token is not included.
    #[cfg(test)]
    pub fn tokenize(&mut self) -> LexerResult<Vec<Token>> {
        let mut tokens = vec![];
        loop {
            let token = self.next()?;
            if token.sym == Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn read_token(&mut self) -> LexerResult<Token> {
        self.consume_whitespace();

        let sym = match self.get_char() {
            None => Eof,
            Some(c) if c.is_ascii_digit() => {
                self.unget_char(c);
                self.consume_integer(false)?
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                self.unget_char(c);
                self.consume_identifier()
            }
            Some('-') if self.peek_char().map_or(false, |c| c.is_ascii_digit()) => {
                self.consume_integer(true)?
            }
            Some('"') => self.consume_string_literal()?,
            Some(c) => self.consume_operator(c)?,
        };

        let token = Token::new(sym, self.location());
        log::trace!("lexer: {}", token);
        Ok(token)
    }

    fn get_char(&mut self) -> Option<char> {
        self.pushback.pop().or_else(|| self.chars.next())
    }

    fn unget_char(&mut self, c: char) {
        self.pushback.push(c)
    }

    fn peek_char(&mut self) -> Option<char> {
        let c = self.get_char()?;
        self.unget_char(c);
        Some(c)
    }

    /// Advances past the next character, if it matches the given test character.
    fn next_char_if(&mut self, t: char) -> bool {
        match self.get_char() {
            Some(c) if c == t => true,
            Some(c) => {
                self.unget_char(c);
                false
            }
            None => false,
        }
    }

    /// Skips whitespace and `//` comments, counting lines as it goes.
    fn consume_whitespace(&mut self) {
        while let Some(c) = self.get_char() {
            match c {
                '\n' => self.line += 1,
                c if c.is_whitespace() => (),
                '/' if self.next_char_if('/') => self.consume_line_comment(),
                c => {
                    self.unget_char(c);
                    break;
                }
            }
        }
    }

    /// Consume up to, but not including, the end of the line so that the
    /// newline is still counted.
    fn consume_line_comment(&mut self) {
        while let Some(c) = self.get_char() {
            if c == '\n' {
                self.unget_char(c);
                break;
            }
        }
    }

    fn consume_integer(&mut self, negative: bool) -> LexerResult<Lex> {
        let mut value: u64 = 0;
        while let Some(c) = self.get_char() {
            if !c.is_ascii_digit() {
                self.unget_char(c);
                break;
            }

            let digit = c as u64 - '0' as u64;
            value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => return err!(self.location(), LexerError::IntegerOutOfRange),
            };
        }

        // A negative literal can hold one more than a positive literal
        let limit = if negative {
            i64::MAX as u64 + 1
        } else {
            i64::MAX as u64
        };
        if value > limit {
            return err!(self.location(), LexerError::IntegerOutOfRange);
        }

        let value = value as i64;
        Ok(Integer(if negative { value.wrapping_neg() } else { value }))
    }

    fn consume_identifier(&mut self) -> Lex {
        let mut s = String::new();
        while let Some(c) = self.get_char() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
            } else {
                self.unget_char(c);
                break;
            }
        }

        Self::keyword(&s).unwrap_or(Identifier(s))
    }

    fn keyword(s: &str) -> Option<Lex> {
        Some(match s {
            "struct" => Struct,
            "include" => Include,
            "const" => Const,
            "void" => Void,
            "u8" => Lex::Primitive(Primitive::U8),
            "u16" => Lex::Primitive(Primitive::U16),
            "u32" => Lex::Primitive(Primitive::U32),
            "i8" => Lex::Primitive(Primitive::I8),
            "i16" => Lex::Primitive(Primitive::I16),
            "i32" => Lex::Primitive(Primitive::I32),
            "f32" => Lex::Primitive(Primitive::F32),
            "f64" => Lex::Primitive(Primitive::F64),
            _ => return None,
        })
    }

    /// Reads the body of a quoted string.  The opening quote has already been
    /// consumed.
    fn consume_string_literal(&mut self) -> LexerResult<Lex> {
        let mut s = String::new();
        loop {
            match self.get_char() {
                None => return err!(self.location(), LexerError::UnexpectedEofInString),
                Some('"') => break,
                Some('\n') => return err!(self.location(), LexerError::NewlineInString),
                Some('\\') => match self.get_char() {
                    None => return err!(self.location(), LexerError::UnexpectedEofInString),
                    Some(c) => match Self::escape_code(c) {
                        Some(e) => s.push(e),
                        None => {
                            return err!(self.location(), LexerError::InvalidEscapeSequence(c))
                        }
                    },
                },
                Some(c) => s.push(c),
            }
        }

        Ok(QuotedString(s))
    }

    /// Returns the character that an escape code stands for
    fn escape_code(c: char) -> Option<char> {
        match c {
            '\\' => Some('\\'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '"' => Some('"'),
            _ => None,
        }
    }

    fn consume_operator(&mut self, c: char) -> LexerResult<Lex> {
        Ok(match c {
            '{' => LBrace,
            '}' => RBrace,
            '(' => LParen,
            ')' => RParen,
            '[' => LBracket,
            ']' => RBracket,
            ',' => Comma,
            ':' => Colon,
            ';' => Semicolon,
            '*' => Mul,
            '+' => Add,
            '-' => Minus,
            '/' => Div,
            '=' => Assign,
            '~' => BNot,
            // Angle brackets only exist as the shift operators
            '<' if self.next_char_if('<') => ShiftLeft,
            '>' if self.next_char_if('>') => ShiftRight,
            c => return err!(self.location(), LexerError::IllegalCharacter(c)),
        })
    }
}
