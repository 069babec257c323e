use crate::compiler::{lexer::tokens::Lex, lexer::LexerError, CompilerError};

/// Compiler errors that happen within the Parser stage of compilation.
/// Errors raised by the lexer while the parser is pulling tokens are
/// wrapped in [`ParserError::Lexical`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParserError {
    Lexical(LexerError),
    ExpectedButFound(Lex, Lex),
    UnexpectedAtFileScope(Lex),
    ExpectedType(Lex),
    ExpectedAtom(Lex),
    NegativeArrayBound(i64),
    PointerToArray,
    IncludeNotFound(String, String),
    IncludeCycle(String),
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ParserError::*;
        match self {
            Lexical(le) => f.write_fmt(format_args!("{}", le)),
            ExpectedButFound(expected, found) => f.write_fmt(format_args!(
                "expected {}, got {}",
                lex_kind_to_string(expected),
                found
            )),
            UnexpectedAtFileScope(found) => {
                f.write_fmt(format_args!("unexpected {} at file scope", found))
            }
            ExpectedType(found) => f.write_fmt(format_args!("expected type; got {}", found)),
            ExpectedAtom(found) => f.write_fmt(format_args!("expected atom; got {}", found)),
            NegativeArrayBound(n) => {
                f.write_fmt(format_args!("array bounds must be positive; got {}", n))
            }
            PointerToArray => f.write_str("cannot declare pointer to array type"),
            IncludeNotFound(path, msg) => {
                f.write_fmt(format_args!("file not found: '{}' - {}", path, msg))
            }
            IncludeCycle(path) => f.write_fmt(format_args!(
                "include cycle: '{}' is already being parsed",
                path
            )),
        }
    }
}

/// Describes the kind of token that was expected.  Payloads are not part of
/// an expectation, so only the kind is named.
fn lex_kind_to_string(lex: &Lex) -> String {
    match lex {
        Lex::Integer(_) => "integer literal".into(),
        Lex::Identifier(_) => "identifier".into(),
        Lex::QuotedString(_) => "string".into(),
        lex => format!("{}", lex),
    }
}

impl From<CompilerError<LexerError>> for CompilerError<ParserError> {
    fn from(le: CompilerError<LexerError>) -> Self {
        let (loc, inner) = le.take();
        CompilerError::new(loc, ParserError::Lexical(inner))
    }
}
