use std::io::Write;

use crate::compiler::ast::ParseResult;

use super::{check_resolved, field_offset, include_stem, struct_layout, EmitResult};

/// Writes an assembler include file which defines every local constant and
/// the offset of every field, size, and alignment of every local struct as
/// `EQU` symbols.  Definitions that came from included files are left to
/// the include file generated for them.
pub fn generate(result: &ParseResult, output: &mut dyn Write) -> EmitResult<()> {
    check_resolved(result)?;

    writeln!(output, "; This file was automatically generated. Do not edit it.")?;
    for include in result.get_includes() {
        writeln!(output, "\t\tinclude\t\"{}.i\"", include_stem(include))?;
    }
    writeln!(output)?;

    for rc in result.get_resolved_constants() {
        let c = &result.get_constants()[rc.index()];
        if c.was_included() {
            continue;
        }
        writeln!(output, "{}\t\tEQU {}", c.get_name(), rc.value())?;
    }

    for s in result.get_structs().iter().filter(|s| !s.was_included()) {
        for field in s.get_fields() {
            writeln!(
                output,
                "{}_{}\t\tEQU {}",
                s.get_name(),
                field.name,
                field_offset(s, field)
            )?;
        }

        let (size, alignment) = struct_layout(s);
        writeln!(output, "{}_SIZEOF\t\tEQU {}", s.get_name(), size)?;
        writeln!(output, "{}_ALIGNOF\t\tEQU {}", s.get_name(), alignment)?;
    }

    Ok(())
}
