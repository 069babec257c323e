use crate::compiler::{
    lexer::{
        lexer::Lexer,
        tokens::{Lex, Token},
    },
    source::Location,
};

use super::{ParserError, ParserResult};

/// Wraps a [`Lexer`] with the lookahead helpers the grammar rules are
/// written in terms of.  Lexer errors are converted to parser errors as they
/// pass through.
pub struct TokenStream {
    lexer: Lexer,
}

impl TokenStream {
    pub fn new(lexer: Lexer) -> TokenStream {
        TokenStream { lexer }
    }

    pub fn file(&self) -> &str {
        self.lexer.file()
    }

    pub fn line(&self) -> u32 {
        self.lexer.line()
    }

    pub fn next(&mut self) -> ParserResult<Token> {
        Ok(self.lexer.next()?)
    }

    pub fn peek(&mut self) -> ParserResult<&Token> {
        Ok(self.lexer.peek()?)
    }

    /// Consumes the next token if it is the same kind of token as `test`
    pub fn next_if(&mut self, test: &Lex) -> ParserResult<Option<Token>> {
        Ok(self.lexer.next_if(test)?)
    }

    /// Consumes the next token, which must be the same kind of token as
    /// `test`.
    pub fn next_must_be(&mut self, test: &Lex) -> ParserResult<Token> {
        let token = self.next()?;
        if token.token_eq(test) {
            Ok(token)
        } else {
            err!(
                token.loc,
                ParserError::ExpectedButFound(test.clone(), token.sym)
            )
        }
    }

    /// Consumes the next token, which must be an identifier, and returns
    /// its location and text.
    pub fn next_must_be_id(&mut self) -> ParserResult<(Location, String)> {
        let token = self.next_must_be(&Lex::Identifier(String::new()))?;
        match token.sym {
            Lex::Identifier(id) => Ok((token.loc, id)),
            _ => unreachable!("next_must_be only returns identifiers"),
        }
    }
}
