#![cfg(test)]

mod constants;

use crate::compiler::{
    ast::ParseResult,
    parser::Parser,
    semantics::{resolve, SemanticResult},
    source::{MemorySources, SourceResolver},
};

fn resolve_file(sources: &MemorySources, name: &str) -> SemanticResult<ParseResult> {
    let unit = sources.open(None, name).unwrap();
    let mut result = match Parser::new(sources).parse(&unit) {
        Ok(result) => result,
        Err(e) => panic!("failed to parse {}: {}", name, e),
    };
    resolve(&mut result)?;
    Ok(result)
}

fn resolve_str(text: &str) -> SemanticResult<ParseResult> {
    resolve_file(&MemorySources::new().with("test", text), "test")
}
