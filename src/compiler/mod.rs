/**
 * The compiler turns a blob source file, along with every file it includes,
 * into layout descriptions that an assembler and a C compiler agree on.
 *
 * Compilation runs through these stages:
 * 1. The lexer turns the text of each source file into tokens.
 * 2. The parser builds a `ParseResult` for the root file, recursively parsing
 *    every included file and merging its definitions into the result.  Struct
 *    references are left unbound at this point.
 * 3. The resolver links struct references to their definitions, rejects
 *    structs which contain themselves, sorts the structs into dependency
 *    order, lays them out, and evaluates every constant.
 * 4. One of the generators in `emit` writes the resolved unit as text.
 *
 * Every error a user can cause is found in stages 1 through 3 and is reported
 * with the file and line it came from.  Once a unit has been resolved the
 * generators cannot fail on account of the input, so any inconsistency they
 * find is treated as a bug in the compiler and panics.
 */
#[macro_use]
mod error;

pub mod ast;
pub mod emit;
pub mod lexer;
pub mod parser;
pub mod semantics;
pub mod source;

use std::fmt::Display;

pub use error::CompilerError;

use ast::ParseResult;
use parser::{Parser, ParserError};
use semantics::SemanticError;
use source::{SourceError, SourceResolver};

/// Any error which stops a unit from being compiled
#[derive(Debug)]
pub enum CompileError {
    /// The root file could not be opened
    Source(String, SourceError),
    Parser(CompilerError<ParserError>),
    Semantic(CompilerError<SemanticError>),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Source(path, e) => f.write_fmt(format_args!("{}: {}", path, e)),
            CompileError::Parser(e) => f.write_fmt(format_args!("{}", e)),
            CompileError::Semantic(e) => f.write_fmt(format_args!("{}", e)),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<CompilerError<ParserError>> for CompileError {
    fn from(e: CompilerError<ParserError>) -> Self {
        CompileError::Parser(e)
    }
}

impl From<CompilerError<SemanticError>> for CompileError {
    fn from(e: CompilerError<SemanticError>) -> Self {
        CompileError::Semantic(e)
    }
}

/// Parses and resolves the file at `path`, producing a unit that is ready
/// to be handed to a generator.
pub fn compile(sources: &dyn SourceResolver, path: &str) -> Result<ParseResult, CompileError> {
    let unit = sources
        .open(None, path)
        .map_err(|e| CompileError::Source(path.into(), e))?;

    let mut result = Parser::new(sources).parse(&unit)?;
    semantics::resolve(&mut result)?;
    Ok(result)
}
