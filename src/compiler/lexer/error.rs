use std::fmt::Display;

/// Errors which can be encountered while tokenizing a compilation unit
#[derive(Clone, PartialEq, Debug)]
pub enum LexerError {
    IllegalCharacter(char),
    UnexpectedEofInString,
    NewlineInString,
    InvalidEscapeSequence(char),
    IntegerOutOfRange,
}

impl Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LexerError::*;
        let msg = match self {
            IllegalCharacter(c) => format!("illegal character: '{}'", c),
            UnexpectedEofInString => "end of file inside quoted string".into(),
            NewlineInString => "newline in quoted string".into(),
            InvalidEscapeSequence(c) => format!("unsupported escape: '{}'", c),
            IntegerOutOfRange => "integer literal out of range".into(),
        };

        f.write_str(&msg)
    }
}
