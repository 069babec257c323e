use std::fmt::Display;

use super::source::Location;

/// Represents all errors that are generated from within the Compiler
/// module and its submodules.
///
/// This type captures common metadata which is necessarily present for
/// all errors which are caused by input source code.  E.g. the file and line
/// that the error occurs on. This also handles formatting all error messages
/// with the universal metadata along with the inner metadata.
///
/// The inner error allows metadata which is specific to a submodule within
/// the compiler. E.g., the errors themselves are submodule specific and
/// are stored in the `inner` field.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerError<IE> {
    loc: Location,
    inner: IE,
}

impl<IE> CompilerError<IE> {
    pub fn new(loc: Location, inner: IE) -> Self {
        CompilerError { loc, inner }
    }

    pub fn location(&self) -> &Location {
        &self.loc
    }

    pub fn inner(&self) -> &IE {
        &self.inner
    }

    /// Deconstructs the error into its location and its inner error
    pub fn take(self) -> (Location, IE) {
        (self.loc, self.inner)
    }
}

impl<IE: Display> Display for CompilerError<IE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.loc, self.inner))
    }
}

impl<IE: Display + std::fmt::Debug> std::error::Error for CompilerError<IE> {}

/// Creates an `Err` holding a [`CompilerError`] at the given location
macro_rules! err {
    ($loc: expr, $kind: expr) => {
        Err(crate::compiler::CompilerError::new($loc.clone(), $kind))
    };
}
