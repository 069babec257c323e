use log::trace;

use crate::compiler::ast::{StructDef, Type};

use super::{type_resolver::bound_id, SemanticError, SemanticResult};

/// Rounds `value` up to the next multiple of `alignment`, which must be a
/// power of two.  Returns `None` if the result does not fit in a `u64`.
pub fn align_up(value: u64, alignment: u64) -> Option<u64> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    value.checked_add(mask).map(|v| v & !mask)
}

/// Pass 3: computes the offset of every field and the size and alignment
/// of every struct.  Structs are laid out on demand so that anything a
/// struct embeds by value is always laid out before the struct itself.
pub(super) fn compute_layouts(structs: &mut [StructDef]) -> SemanticResult<()> {
    let mut done = vec![false; structs.len()];
    for idx in 0..structs.len() {
        layout_struct(structs, &mut done, idx)?;
    }
    Ok(())
}

fn layout_struct(structs: &mut [StructDef], done: &mut [bool], idx: usize) -> SemanticResult<()> {
    if done[idx] {
        return Ok(());
    }

    let mut deps = vec![];
    for field in structs[idx].get_fields() {
        value_dependencies(&field.ty, &mut deps);
    }
    for dep in deps {
        layout_struct(structs, done, dep)?;
    }

    let s = &structs[idx];
    let overflow = || {
        err!(
            s.location(),
            SemanticError::SizeOverflow(s.get_name().into())
        )
    };

    let mut offsets = Vec::with_capacity(s.get_fields().len());
    let mut align_of: u64 = 1;
    let mut offset: u64 = 0;
    for field in s.get_fields() {
        // Every field has storage by now, so a missing size means overflow
        let (size, alignment) = match (
            field.ty.size_bytes(structs),
            field.ty.alignment_bytes(structs),
        ) {
            (Some(size), Some(alignment)) => (size, alignment),
            _ => return overflow(),
        };

        let field_offset = match align_up(offset, alignment) {
            Some(o) => o,
            None => return overflow(),
        };
        align_of = align_of.max(alignment);
        offset = match field_offset.checked_add(size) {
            Some(o) => o,
            None => return overflow(),
        };
        offsets.push(field_offset);
    }

    let size = match align_up(offset, align_of) {
        Some(size) => size,
        None => return overflow(),
    };
    trace!("{}: size {} alignment {}", s.get_name(), size, align_of);

    let s = &mut structs[idx];
    for (field, offset) in s.get_fields_mut().iter_mut().zip(offsets) {
        field.offset = Some(offset);
    }
    s.set_layout(size, align_of);
    done[idx] = true;

    Ok(())
}

/// Collects the structs which `ty` contains by value
fn value_dependencies(ty: &Type, deps: &mut Vec<usize>) {
    match ty {
        Type::Struct(sref) => deps.push(bound_id(sref).index()),
        Type::Array(el, _) => value_dependencies(el, deps),
        Type::Primitive(_) | Type::Void | Type::Pointer(_) | Type::Function(_) => (),
    }
}
