use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::compiler::ast::{ParseResult, StructDef, Type};

use super::{check_resolved, field_offset, struct_layout, EmitResult};

/// A machine readable summary of the layout of every local struct and the
/// value of every local constant in a resolved unit.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct LayoutReport {
    file: String,
    constants: Vec<ConstantLayout>,
    structs: Vec<StructLayout>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ConstantLayout {
    pub name: String,
    pub value: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct StructLayout {
    pub name: String,
    pub size: u64,
    pub alignment: u64,
    pub fields: Vec<FieldLayout>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct FieldLayout {
    pub name: String,
    pub offset: u64,
    pub size: u64,
    #[serde(rename = "type")]
    pub ty: String,
}

impl LayoutReport {
    pub fn extract(result: &ParseResult) -> EmitResult<LayoutReport> {
        check_resolved(result)?;

        let constants = result
            .get_resolved_constants()
            .iter()
            .map(|rc| (&result.get_constants()[rc.index()], rc.value()))
            .filter(|(c, _)| !c.was_included())
            .map(|(c, value)| ConstantLayout {
                name: c.get_name().into(),
                value,
            })
            .collect();

        let structs = result
            .get_structs()
            .iter()
            .filter(|s| !s.was_included())
            .map(|s| struct_report(result, s))
            .collect();

        Ok(LayoutReport {
            file: result.get_filename().into(),
            constants,
            structs,
        })
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_constants(&self) -> &Vec<ConstantLayout> {
        &self.constants
    }

    pub fn get_structs(&self) -> &Vec<StructLayout> {
        &self.structs
    }

    /// Loads a report from the given reader.
    #[cfg(test)]
    pub fn read(input: &mut dyn std::io::Read) -> EmitResult<LayoutReport> {
        let report: LayoutReport = serde_json::from_reader(input)?;
        Ok(report)
    }

    /// Writes the report as pretty printed JSON
    pub fn write(&self, output: &mut dyn Write) -> EmitResult<()> {
        serde_json::to_writer_pretty(&mut *output, self)?;
        writeln!(output)?;
        Ok(())
    }
}

/// Extracts the layout report of `result` and writes it to `output`.
pub fn generate(result: &ParseResult, output: &mut dyn Write) -> EmitResult<()> {
    LayoutReport::extract(result)?.write(output)
}

fn struct_report(result: &ParseResult, s: &StructDef) -> StructLayout {
    let (size, alignment) = struct_layout(s);
    let fields = s
        .get_fields()
        .iter()
        .map(|f| FieldLayout {
            name: f.name.clone(),
            offset: field_offset(s, f),
            size: match f.ty.size_bytes(result.get_structs()) {
                Some(size) => size,
                None => panic!("field {}::{} has no storage", s.get_name(), f.name),
            },
            ty: type_name(result, &f.ty),
        })
        .collect();

    StructLayout {
        name: s.get_name().into(),
        size,
        alignment,
        fields,
    }
}

/// Renders a type the way it is written in source, spelling out function
/// types in full.
fn type_name(result: &ParseResult, ty: &Type) -> String {
    match ty {
        Type::Pointer(inner) => format!("{}*", type_name(result, inner)),
        Type::Array(el, len) => format!("{}[{}]", type_name(result, el), len),
        Type::Function(id) => {
            let ft = result.get_function_type(*id);
            let params = ft
                .get_params()
                .iter()
                .map(|p| format!("{} {}", type_name(result, &p.ty), p.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", type_name(result, ft.get_return_type()), params)
        }
        Type::Primitive(_) | Type::Void | Type::Struct(_) => ty.to_string(),
    }
}
