//! This module abstracts out the source code from which the compiler derives
//! it's input data.  A [`SourceResolver`] turns the path written in an
//! `include` statement (or the path of the root input file) into a
//! [`SourceUnit`] that the lexer can read, and every token and syntax node
//! carries a [`Location`] pointing back into one of those units.

use std::{fmt::Display, rc::Rc};

mod memory;

pub use memory::MemorySources;

/// The file and line that a token or syntax node came from.  Locations are
/// immutable and cheap to clone: the file name is shared between every
/// location in the same file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    file: Rc<str>,
    line: u32,
}

impl Location {
    pub fn new(file: Rc<str>, line: u32) -> Location {
        Location { file, line }
    }

    /// The name of the file, as it was reported by the [`SourceResolver`]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line number
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}({})", self.file, self.line))
    }
}

/// A unit of source code: the text of one file along with the name that
/// will be used to refer to that file in diagnostics and for resolving any
/// includes written inside of it.  Two units with the same identity are the
/// same file, however differently their names were spelled.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    name: String,
    identity: String,
    text: String,
}

impl SourceUnit {
    pub fn new(name: &str, text: &str) -> SourceUnit {
        SourceUnit {
            name: name.into(),
            identity: name.into(),
            text: text.into(),
        }
    }

    /// Replaces the identity, which otherwise is the name
    pub fn with_identity(mut self, identity: &str) -> SourceUnit {
        self.identity = identity.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Locates and reads source files for the parser.
pub trait SourceResolver {
    /// Open the file `path` as written by the file `from`.  `from` is `None`
    /// for the root input file.  Implementations should look relative to
    /// the directory of `from` first and then through any configured search
    /// directories.
    fn open(&self, from: Option<&str>, path: &str) -> Result<SourceUnit, SourceError>;
}

/// Errors raised while trying to find or read a source file.
#[derive(Debug)]
pub enum SourceError {
    NotFound(String),
    Io(String, std::io::Error),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NotFound(path) => f.write_fmt(format_args!(
                "cannot find '{}' in any include paths",
                path
            )),
            SourceError::Io(path, e) => f.write_fmt(format_args!("could not read '{}': {}", path, e)),
        }
    }
}

impl PartialEq for SourceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SourceError::NotFound(a), SourceError::NotFound(b)) => a == b,
            (SourceError::Io(a, ea), SourceError::Io(b, eb)) => a == b && ea.kind() == eb.kind(),
            _ => false,
        }
    }
}
