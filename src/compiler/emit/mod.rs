//! Generators which turn a resolved [`ParseResult`] into text.  Every
//! generator reads the same resolved model, so the numbers written by the
//! assembly generator and the numbers checked by the C header always agree.

use std::{fmt::Display, io::Write, path::Path};

use super::ast::{FieldDef, ParseResult, StructDef};

pub mod asm;
pub mod header;
pub mod layout;

#[derive(Debug)]
pub enum EmitError {
    /// The unit has not been through the resolver
    NotResolved,
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::NotResolved => f.write_str("cannot generate output for an unresolved unit"),
            EmitError::Io(e) => f.write_fmt(format_args!("{}", e)),
            EmitError::Json(e) => f.write_fmt(format_args!("{}", e)),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<std::io::Error> for EmitError {
    fn from(e: std::io::Error) -> Self {
        EmitError::Io(e)
    }
}

impl From<serde_json::Error> for EmitError {
    fn from(e: serde_json::Error) -> Self {
        EmitError::Json(e)
    }
}

pub type EmitResult<T> = Result<T, EmitError>;

/// The output formats which can be selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generator {
    /// `EQU` statements for a 68k assembler
    Asm68k,
    /// A C header with static assertions on every size and offset
    CHeader,
}

impl Generator {
    pub const NAMES: [&'static str; 2] = ["asm68k", "cheader"];

    pub fn from_name(name: &str) -> Option<Generator> {
        match name {
            "asm68k" => Some(Generator::Asm68k),
            "cheader" => Some(Generator::CHeader),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Generator::Asm68k => "asm68k",
            Generator::CHeader => "cheader",
        }
    }

    pub fn generate(&self, result: &ParseResult, output: &mut dyn Write) -> EmitResult<()> {
        match self {
            Generator::Asm68k => asm::generate(result, output),
            Generator::CHeader => header::generate(result, output),
        }
    }
}

fn check_resolved(result: &ParseResult) -> EmitResult<()> {
    if result.is_resolved() {
        Ok(())
    } else {
        Err(EmitError::NotResolved)
    }
}

/// The file name of an include path without its directory or extension
fn include_stem(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    Path::new(&normalized)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(normalized)
}

fn struct_layout(s: &StructDef) -> (u64, u64) {
    match (s.size_bytes(), s.alignment_bytes()) {
        (Some(size), Some(alignment)) => (size, alignment),
        _ => panic!("struct {} has not been laid out", s.get_name()),
    }
}

fn field_offset(s: &StructDef, field: &FieldDef) -> u64 {
    match field.offset_bytes() {
        Some(offset) => offset,
        None => panic!("field {}::{} has not been laid out", s.get_name(), field.name),
    }
}
