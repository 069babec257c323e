/*
 * Semantic analysis of a parsed compilation unit.  This covers:
 * 1. Linking every struct reference to the definition it names and checking
 *    that fields are declared with types that have storage.
 * 2. Rejecting structs which contain themselves by value, and sorting the
 *    structs so that every struct follows the structs it embeds.
 * 3. Computing field offsets and struct sizes and alignments.
 * 4. Evaluating constant expressions.
 *
 * Struct resolution and constant evaluation are independent of each other;
 * they only share the error type.
 */
mod constants;
mod error;
mod layout;
mod tests;
mod type_resolver;

use super::{ast::ParseResult, CompilerError};

pub use error::SemanticError;
pub use layout::align_up;

/// Captures the Failure state of any Semantic Analysis operation.
/// Which will, if it fails, result in a [`SemanticError`] wrapped
/// in a [`CompilerError`]
pub type SemanticResult<T> = Result<T, CompilerError<SemanticError>>;

/// Resolves a parsed unit in place: links, orders, and lays out its structs
/// and then evaluates its constants.  Resolving a unit a second time leaves
/// it unchanged.
pub fn resolve(result: &mut ParseResult) -> SemanticResult<()> {
    type_resolver::resolve_structs(result)?;
    constants::resolve_constants(result)?;
    result.set_resolved();
    Ok(())
}
