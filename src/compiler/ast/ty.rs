use crate::compiler::{lexer::tokens::Primitive, source::Location};

use super::structdef::StructDef;

/// Index of a [`StructDef`] within the struct list of a
/// [`ParseResult`](super::ParseResult).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(usize);

impl StructId {
    pub fn new(idx: usize) -> StructId {
        StructId(idx)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Index of a [`FunctionType`] within the function type list of a
/// [`ParseResult`](super::ParseResult).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

impl FunctionId {
    pub fn new(idx: usize) -> FunctionId {
        FunctionId(idx)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/**
The types which a field can be declared with.  Struct references are created
by the parser holding only a name; the resolver binds them to the definition
they name.  Function types live in the function type list of the
[`ParseResult`](super::ParseResult) and are referred to by [`FunctionId`].
 */
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    Void,
    Struct(StructRef),
    Pointer(Box<Type>),
    Array(Box<Type>, u64),
    Function(FunctionId),
}

/// Size in bytes of every pointer, regardless of what it points to.
pub const POINTER_SIZE: u64 = 4;

/// Alignment in bytes of every pointer.
pub const POINTER_ALIGNMENT: u64 = 2;

impl Type {
    /// Returns the size of a value of this type.  `void` and function types
    /// have no storage and return `None`, as do struct references which
    /// have not been laid out yet and arrays whose size overflows.
    pub fn size_bytes(&self, structs: &[StructDef]) -> Option<u64> {
        match self {
            Type::Primitive(p) => Some(p.size_bytes()),
            Type::Pointer(_) => Some(POINTER_SIZE),
            Type::Array(el, len) => el.size_bytes(structs)?.checked_mul(*len),
            Type::Struct(sref) => structs.get(sref.definition()?.index())?.size_bytes(),
            Type::Void | Type::Function(_) => None,
        }
    }

    /// Returns the alignment of a value of this type, with the same
    /// exceptions as [`Type::size_bytes`].
    pub fn alignment_bytes(&self, structs: &[StructDef]) -> Option<u64> {
        match self {
            Type::Primitive(p) => Some(p.alignment_bytes()),
            Type::Pointer(_) => Some(POINTER_ALIGNMENT),
            Type::Array(el, _) => el.alignment_bytes(structs),
            Type::Struct(sref) => structs.get(sref.definition()?.index())?.alignment_bytes(),
            Type::Void | Type::Function(_) => None,
        }
    }

    /// Applies `f` to this type and then to every type nested within it, outer
    /// to inner.  Function types are not followed: their return and parameter
    /// types live in the function type list.
    pub fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Type),
    {
        f(self);
        match self {
            Type::Pointer(inner) | Type::Array(inner, _) => inner.visit_mut(f),
            Type::Primitive(_) | Type::Void | Type::Struct(_) | Type::Function(_) => (),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(p) => f.write_fmt(format_args!("{}", p)),
            Type::Void => f.write_str("void"),
            Type::Struct(sref) => f.write_str(sref.get_name()),
            Type::Pointer(inner) => f.write_fmt(format_args!("{}*", inner)),
            Type::Array(el, len) => f.write_fmt(format_args!("{}[{}]", el, len)),
            Type::Function(id) => f.write_fmt(format_args!("fn#{}", id.index())),
        }
    }
}

/// A reference to a struct by name.  The reference starts out unbound and
/// is bound exactly once by the resolver; the name never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct StructRef {
    loc: Location,
    name: String,
    def: Option<StructId>,
}

impl StructRef {
    pub fn new(loc: Location, name: &str) -> StructRef {
        StructRef {
            loc,
            name: name.into(),
            def: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.loc
    }

    /// The definition this reference is bound to, if it has been resolved.
    pub fn definition(&self) -> Option<StructId> {
        self.def
    }

    pub fn is_resolved(&self) -> bool {
        self.def.is_some()
    }

    pub(crate) fn bind(&mut self, id: StructId) {
        self.def = Some(id)
    }
}

/// A named argument of a function type
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: &str, ty: Type) -> Parameter {
        Parameter {
            name: name.into(),
            ty,
        }
    }
}

/// A function type literal, such as the `u8(i32 a)` in `u8(i32 a)* callback;`.
/// Function types have no storage of their own and can only be used behind a
/// pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    loc: Location,
    ret_ty: Type,
    params: Vec<Parameter>,
    was_included: bool,
}

impl FunctionType {
    pub fn new(loc: Location, ret_ty: Type, params: Vec<Parameter>) -> FunctionType {
        FunctionType {
            loc,
            ret_ty,
            params,
            was_included: false,
        }
    }

    pub fn location(&self) -> &Location {
        &self.loc
    }

    pub fn get_return_type(&self) -> &Type {
        &self.ret_ty
    }

    pub fn get_params(&self) -> &Vec<Parameter> {
        &self.params
    }

    pub fn was_included(&self) -> bool {
        self.was_included
    }

    pub(crate) fn set_included(&mut self) {
        self.was_included = true
    }

    /// Iterates mutably over the return type and every parameter type
    pub(crate) fn types_mut(&mut self) -> impl Iterator<Item = &mut Type> {
        std::iter::once(&mut self.ret_ty).chain(self.params.iter_mut().map(|p| &mut p.ty))
    }
}
