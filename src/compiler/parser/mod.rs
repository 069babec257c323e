use super::CompilerError;

/// Logs the grammar rule being entered along with where the parser is in
/// the current file.
macro_rules! trace {
    ($ts:expr) => {
        log::trace!(
            "{} <- {}({})",
            stdext::function_name!(),
            $ts.file(),
            $ts.line()
        )
    };
}

mod error;
mod expression;
mod parser;
mod tests;
mod tokenstream;

pub use error::ParserError;
pub use parser::Parser;

pub type ParserResult<T> = Result<T, CompilerError<ParserError>>;
