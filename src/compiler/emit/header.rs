use std::io::Write;

use md5::{Digest, Md5};

use crate::compiler::{
    ast::{FunctionType, ParseResult, StructDef, Type},
    lexer::tokens::Primitive,
};

use super::{check_resolved, field_offset, include_stem, struct_layout, EmitResult};

/// Writes a C header declaring every local struct, with static assertions
/// that the C compiler lays each struct out exactly as the resolver did.
pub fn generate(result: &ParseResult, output: &mut dyn Write) -> EmitResult<()> {
    check_resolved(result)?;

    let aliases = FunctionAliases::new(result);
    let local_structs: Vec<&StructDef> = result
        .get_structs()
        .iter()
        .filter(|s| !s.was_included())
        .collect();

    writeln!(output, "#pragma once")?;
    writeln!(
        output,
        "/* This file was automatically generated. Do not edit it. */"
    )?;
    for include in result.get_includes() {
        writeln!(output, "#include\t\"{}.h\"", include_stem(include))?;
    }
    writeln!(output)?;

    for s in &local_structs {
        writeln!(output, "typedef struct {0} {0};", s.get_name())?;
    }

    for (ft, alias) in result.get_function_types().iter().zip(&aliases.names) {
        if let Some(alias) = alias {
            writeln!(
                output,
                "typedef {} {}({});",
                aliases.pre_type(result, ft.get_return_type()),
                alias,
                aliases.params(result, ft)
            )?;
        }
    }

    for s in &local_structs {
        writeln!(output, "struct {} {{", s.get_name())?;
        for field in s.get_fields() {
            writeln!(
                output,
                "    {} {}{};",
                aliases.pre_type(result, &field.ty),
                field.name,
                post_type(&field.ty)
            )?;
        }
        writeln!(output, "}};")?;
    }

    for s in &local_structs {
        let (size, _) = struct_layout(s);
        writeln!(
            output,
            "_Static_assert(sizeof({0}) == {1}, \"size of struct {0} does not match assembly output\");",
            s.get_name(),
            size
        )?;

        for field in s.get_fields() {
            writeln!(
                output,
                "_Static_assert(__builtin_offsetof({0}, {1}) == {2}, \"offset of field {0}::{1} does not match assembly output\");",
                s.get_name(),
                field.name,
                field_offset(s, field)
            )?;
        }
    }

    Ok(())
}

/// Typedef names for the function types declared in this file.  Function
/// types from included files are named by the header generated for them.
struct FunctionAliases {
    names: Vec<Option<String>>,
}

impl FunctionAliases {
    fn new(result: &ParseResult) -> FunctionAliases {
        let id = unique_id(result.get_filename());
        let mut next = 0;
        let names = result
            .get_function_types()
            .iter()
            .map(|ft| {
                if ft.was_included() {
                    None
                } else {
                    next += 1;
                    Some(format!("_blobc_fn_{}_{}", id, next - 1))
                }
            })
            .collect();

        FunctionAliases { names }
    }

    /// The part of a declaration which comes before the declared name
    fn pre_type(&self, result: &ParseResult, ty: &Type) -> String {
        match ty {
            Type::Primitive(p) => c_primitive(*p).into(),
            Type::Void => "void".into(),
            Type::Struct(sref) => sref.get_name().into(),
            Type::Pointer(inner) => format!("{}*", self.pre_type(result, inner)),
            Type::Array(el, _) => self.pre_type(result, el),
            Type::Function(id) => match &self.names[id.index()] {
                Some(alias) => alias.clone(),
                None => panic!(
                    "function type declared at {} has no alias in this file",
                    result.get_function_type(*id).location()
                ),
            },
        }
    }

    fn params(&self, result: &ParseResult, ft: &FunctionType) -> String {
        ft.get_params()
            .iter()
            .map(|p| format!("{} {}{}", self.pre_type(result, &p.ty), p.name, post_type(&p.ty)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The array bounds which follow the declared name, outermost first
fn post_type(ty: &Type) -> String {
    let mut post = String::new();
    let mut ty = ty;
    while let Type::Array(el, len) = ty {
        post.push_str(&format!("[{}]", len));
        ty = el;
    }
    post
}

fn c_primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::U8 => "unsigned char",
        Primitive::U16 => "unsigned short",
        Primitive::U32 => "unsigned int",
        Primitive::I8 => "signed char",
        Primitive::I16 => "signed short",
        Primitive::I32 => "signed int",
        Primitive::F32 => "float",
        Primitive::F64 => "double",
    }
}

/// A stable identifier for the input file, so that function typedefs from
/// different headers never collide: the MD5 of the file name in uppercase hex.
fn unique_id(filename: &str) -> String {
    Md5::digest(filename.replace('\\', "/").as_bytes())
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect()
}
