use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::compiler::{ast::*, source::Location};

use super::{layout::compute_layouts, SemanticError, SemanticResult};

/// Links every struct reference to its definition, checks that no struct
/// contains itself by value, sorts the structs into emission order, and
/// lays them out.
pub fn resolve_structs(result: &mut ParseResult) -> SemanticResult<()> {
    debug!("Resolving {} structs", result.structs.len());

    let by_name = struct_ids_by_name(&result.structs)?;
    link_structs(result, &by_name)?;

    let weights = compute_weights(&result.structs)?;
    sort_structs(result, &weights);

    compute_layouts(&mut result.structs)
}

fn struct_ids_by_name(structs: &[StructDef]) -> SemanticResult<FxHashMap<String, StructId>> {
    let mut by_name = FxHashMap::default();
    for (idx, s) in structs.iter().enumerate() {
        if by_name
            .insert(s.get_name().to_string(), StructId::new(idx))
            .is_some()
        {
            return err!(
                s.location(),
                SemanticError::DuplicateStruct(s.get_name().into())
            );
        }
    }
    Ok(by_name)
}

/// Pass 1: binds struct references by name and checks the types that fields
/// are declared with.
fn link_structs(
    result: &mut ParseResult,
    by_name: &FxHashMap<String, StructId>,
) -> SemanticResult<()> {
    let mut field_names = FxHashSet::default();

    for s in result.structs.iter_mut() {
        field_names.clear();
        for field in s.get_fields_mut() {
            if !field_names.insert(field.name.clone()) {
                return err!(
                    field.loc,
                    SemanticError::DuplicateField(field.name.clone())
                );
            }

            check_storage(&field.ty, &field.loc)?;
            link_type(&mut field.ty, by_name)?;
        }
    }

    for ft in result.function_types.iter_mut() {
        for ty in ft.types_mut() {
            link_type(ty, by_name)?;
        }
    }

    Ok(())
}

/// Fields and array elements must have storage: `void` and function types
/// can only be used behind a pointer.
fn check_storage(ty: &Type, loc: &Location) -> SemanticResult<()> {
    match ty {
        Type::Void => err!(loc, SemanticError::VoidStorage),
        Type::Function(_) => err!(loc, SemanticError::FunctionStorage),
        Type::Array(el, _) => check_storage(el, loc),
        Type::Primitive(_) | Type::Struct(_) | Type::Pointer(_) => Ok(()),
    }
}

fn link_type(ty: &mut Type, by_name: &FxHashMap<String, StructId>) -> SemanticResult<()> {
    let mut result = Ok(());
    ty.visit_mut(&mut |t: &mut Type| {
        if let Type::Struct(sref) = t {
            match by_name.get(sref.get_name()) {
                Some(id) => sref.bind(*id),
                None if result.is_ok() => {
                    result = err!(
                        sref.location(),
                        SemanticError::UnknownStruct(sref.get_name().into())
                    )
                }
                None => (),
            }
        }
    });
    result
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Weight {
    Unvisited,
    Visiting,
    Done(u64),
}

/// Pass 2: computes the sort weight of every struct.  A local struct
/// weighs one more than the sum of the weights of the structs it contains
/// by value, so it always sorts after all of them.  Included structs weigh
/// zero and sort before every local struct.
fn compute_weights(structs: &[StructDef]) -> SemanticResult<Vec<u64>> {
    let mut weights = vec![Weight::Unvisited; structs.len()];
    for idx in 0..structs.len() {
        struct_weight(structs, &mut weights, StructId::new(idx))?;
    }

    Ok(weights
        .into_iter()
        .map(|w| match w {
            Weight::Done(w) => w,
            w => panic!("struct weight left as {:?}", w),
        })
        .collect())
}

fn struct_weight(
    structs: &[StructDef],
    weights: &mut Vec<Weight>,
    id: StructId,
) -> SemanticResult<u64> {
    let s = &structs[id.index()];
    match weights[id.index()] {
        Weight::Done(w) => return Ok(w),
        Weight::Visiting => {
            return err!(
                s.location(),
                SemanticError::RecursiveStruct(s.get_name().into())
            )
        }
        Weight::Unvisited => (),
    }

    weights[id.index()] = Weight::Visiting;

    let overflow = || {
        err!(
            s.location(),
            SemanticError::WeightOverflow(s.get_name().into())
        )
    };

    let mut weight: u64 = 0;
    for field in s.get_fields() {
        weight = match weight.checked_add(type_weight(structs, weights, &field.ty)?) {
            Some(w) => w,
            None => return overflow(),
        };
    }

    let weight = if s.was_included() {
        0
    } else {
        match weight.checked_add(1) {
            Some(w) => w,
            None => return overflow(),
        }
    };
    trace!("weight of {} is {}", s.get_name(), weight);

    weights[id.index()] = Weight::Done(weight);
    Ok(weight)
}

/// Pointers and function types only need a forward declaration of what they
/// point to, so they add nothing.
fn type_weight(structs: &[StructDef], weights: &mut Vec<Weight>, ty: &Type) -> SemanticResult<u64> {
    match ty {
        Type::Struct(sref) => struct_weight(structs, weights, bound_id(sref)),
        Type::Array(el, _) => type_weight(structs, weights, el),
        Type::Primitive(_) | Type::Void | Type::Pointer(_) | Type::Function(_) => Ok(0),
    }
}

pub(super) fn bound_id(sref: &StructRef) -> StructId {
    match sref.definition() {
        Some(id) => id,
        None => panic!("struct reference {} was not linked", sref.get_name()),
    }
}

/// Reorders the structs by `(weight, name)` and rebinds every reference so
/// that it points at the same definition in its new position.
fn sort_structs(result: &mut ParseResult, weights: &[u64]) {
    let structs = std::mem::take(&mut result.structs);
    let mut keyed: Vec<(u64, usize, StructDef)> = structs
        .into_iter()
        .enumerate()
        .map(|(idx, s)| (weights[idx], idx, s))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.get_name().cmp(b.2.get_name())));

    let mut new_index = vec![0; keyed.len()];
    for (new, (_, old, _)) in keyed.iter().enumerate() {
        new_index[*old] = new;
    }
    result.structs = keyed.into_iter().map(|(_, _, s)| s).collect();

    let mut rebind = |ty: &mut Type| {
        if let Type::Struct(sref) = ty {
            let old = bound_id(sref);
            sref.bind(StructId::new(new_index[old.index()]));
        }
    };
    for s in result.structs.iter_mut() {
        for field in s.get_fields_mut() {
            field.ty.visit_mut(&mut rebind);
        }
    }
    for ft in result.function_types.iter_mut() {
        for ty in ft.types_mut() {
            ty.visit_mut(&mut rebind);
        }
    }

    debug!(
        "Struct order: {}",
        result
            .structs
            .iter()
            .map(|s| s.get_name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
