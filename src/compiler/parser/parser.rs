use crate::compiler::{
    ast::*,
    lexer::{lexer::Lexer, tokens::Lex},
    source::{SourceResolver, SourceUnit},
};

use super::{expression::expression, tokenstream::TokenStream, ParserError, ParserResult};

/*
    Grammar
    PRIMITIVE := u8 | u16 | u32 | i8 | i16 | i32 | f32 | f64
    BASE_TYPE := PRIMITIVE | void | IDENTIFIER
    PARAMS := LPAREN [TYPE IDENTIFIER [, TYPE IDENTIFIER]*] RPAREN
    TYPE := BASE_TYPE [LBRACKET INTEGER RBRACKET | MUL | PARAMS]*
    FIELD := TYPE IDENTIFIER [, IDENTIFIER]* SEMICOLON
    STRUCT_DEF := struct IDENTIFIER LBRACE FIELD* RBRACE [SEMICOLON]
    ATOM := INTEGER | IDENTIFIER | LPAREN EXPRESSION RPAREN | ~ATOM | -ATOM
    EXPRESSION := ATOM [(<< | >> | + | - | * | /) EXPRESSION]*
    CONST_DEF := const IDENTIFIER = EXPRESSION [SEMICOLON]
    INCLUDE := include STRING [SEMICOLON]
    FILE := [STRUCT_DEF | CONST_DEF | INCLUDE]* EOF

    Type suffixes apply to everything to their left, so `u8*[4]` is an array
    of four pointers.  A pointer to an array cannot be declared.
*/

/// Parses a source unit and, recursively, every file it includes.
pub struct Parser<'a> {
    sources: &'a dyn SourceResolver,

    /// Identities of the files currently being parsed, outermost first.
    parsing: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(sources: &'a dyn SourceResolver) -> Parser<'a> {
        Parser {
            sources,
            parsing: vec![],
        }
    }

    /// Parses `unit` into a [`ParseResult`].  Included files are opened
    /// through the source resolver and their definitions are merged into
    /// the result with the included flag set.
    pub fn parse(&mut self, unit: &SourceUnit) -> ParserResult<ParseResult> {
        log::debug!("parsing {}", unit.name());
        self.parsing.push(unit.identity().into());
        let mut stream = TokenStream::new(Lexer::new(unit));
        let result = self.file(&mut stream);
        self.parsing.pop();
        result
    }

    fn file(&mut self, stream: &mut TokenStream) -> ParserResult<ParseResult> {
        let mut result = ParseResult::new(stream.file());

        loop {
            let token = stream.next()?;
            match token.sym {
                Lex::Eof => break,
                Lex::Struct => struct_def(stream, &mut result)?,
                Lex::Const => const_def(stream, &mut result)?,
                Lex::Include => self.include(stream, &mut result)?,
                sym => return err!(token.loc, ParserError::UnexpectedAtFileScope(sym)),
            }
        }

        Ok(result)
    }

    fn include(&mut self, stream: &mut TokenStream, result: &mut ParseResult) -> ParserResult<()> {
        trace!(stream);
        let token = stream.next_must_be(&Lex::QuotedString(String::new()))?;
        let path = match token.sym {
            Lex::QuotedString(path) => path,
            _ => unreachable!("next_must_be only returns strings"),
        };
        stream.next_if(&Lex::Semicolon)?;

        let unit = match self.sources.open(Some(stream.file()), &path) {
            Ok(unit) => unit,
            Err(e) => {
                return err!(
                    token.loc,
                    ParserError::IncludeNotFound(path, e.to_string())
                )
            }
        };

        if self.parsing.iter().any(|f| f == unit.identity()) {
            return err!(token.loc, ParserError::IncludeCycle(path));
        }

        let nested = self.parse(&unit)?;
        result.merge_included(&path, nested);
        Ok(())
    }
}

fn struct_def(stream: &mut TokenStream, result: &mut ParseResult) -> ParserResult<()> {
    trace!(stream);
    let (loc, name) = stream.next_must_be_id()?;
    stream.next_must_be(&Lex::LBrace)?;

    let mut fields = vec![];
    while stream.next_if(&Lex::RBrace)?.is_none() {
        field_decl(stream, result, &mut fields)?;
    }
    stream.next_if(&Lex::Semicolon)?;

    result.add_struct(StructDef::new(&name, loc, fields));
    Ok(())
}

/// One type followed by one or more field names which share it
fn field_decl(
    stream: &mut TokenStream,
    result: &mut ParseResult,
    fields: &mut Vec<FieldDef>,
) -> ParserResult<()> {
    trace!(stream);
    let ty = type_decl(stream, result)?;

    loop {
        let (loc, name) = stream.next_must_be_id()?;
        fields.push(FieldDef::new(&name, loc, ty.clone()));
        if stream.next_if(&Lex::Comma)?.is_none() {
            break;
        }
    }

    stream.next_must_be(&Lex::Semicolon)?;
    Ok(())
}

fn const_def(stream: &mut TokenStream, result: &mut ParseResult) -> ParserResult<()> {
    trace!(stream);
    let (loc, name) = stream.next_must_be_id()?;
    stream.next_must_be(&Lex::Assign)?;
    let expr = expression(stream)?;
    stream.next_if(&Lex::Semicolon)?;

    result.add_constant(ConstDef::new(&name, loc, expr));
    Ok(())
}

fn type_decl(stream: &mut TokenStream, result: &mut ParseResult) -> ParserResult<Type> {
    trace!(stream);
    let mut ty = base_type(stream)?;

    loop {
        if stream.next_if(&Lex::LBracket)?.is_some() {
            let len = array_bound(stream)?;
            stream.next_must_be(&Lex::RBracket)?;
            ty = Type::Array(Box::new(ty), len);
        } else if let Some(star) = stream.next_if(&Lex::Mul)? {
            if let Type::Array(..) = ty {
                return err!(star.loc, ParserError::PointerToArray);
            }
            ty = Type::Pointer(Box::new(ty));
        } else if let Some(paren) = stream.next_if(&Lex::LParen)? {
            let params = fn_params(stream, result)?;
            let id = result.add_function_type(FunctionType::new(paren.loc, ty, params));
            ty = Type::Function(id);
        } else {
            break;
        }
    }

    Ok(ty)
}

fn base_type(stream: &mut TokenStream) -> ParserResult<Type> {
    let token = stream.next()?;
    match token.sym {
        Lex::Primitive(p) => Ok(Type::Primitive(p)),
        Lex::Void => Ok(Type::Void),
        Lex::Identifier(name) => Ok(Type::Struct(StructRef::new(token.loc, &name))),
        sym => err!(token.loc, ParserError::ExpectedType(sym)),
    }
}

fn array_bound(stream: &mut TokenStream) -> ParserResult<u64> {
    let token = stream.next_must_be(&Lex::Integer(0))?;
    match token.sym {
        Lex::Integer(n) if n < 0 => err!(token.loc, ParserError::NegativeArrayBound(n)),
        Lex::Integer(n) => Ok(n as u64),
        _ => unreachable!("next_must_be only returns integers"),
    }
}

/// The parameter list of a function type.  The opening parenthesis has
/// already been consumed.
fn fn_params(stream: &mut TokenStream, result: &mut ParseResult) -> ParserResult<Vec<Parameter>> {
    trace!(stream);
    let mut params = vec![];

    while stream.next_if(&Lex::RParen)?.is_none() {
        if !params.is_empty() {
            stream.next_must_be(&Lex::Comma)?;
        }

        let ty = type_decl(stream, result)?;
        let (_, name) = stream.next_must_be_id()?;
        params.push(Parameter::new(&name, ty));
    }

    Ok(params)
}
