use crate::compiler::source::Location;

use super::{expression::Expression, ty::Type};

#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    loc: Location,
    name: String,
    pub(crate) fields: Vec<FieldDef>,
    was_included: bool,
    size: Option<u64>,
    alignment: Option<u64>,
}

impl std::fmt::Display for StructDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.write_str(self.get_name())
    }
}

impl StructDef {
    pub fn new(name: &str, loc: Location, fields: Vec<FieldDef>) -> StructDef {
        StructDef {
            loc,
            name: name.into(),
            fields,
            was_included: false,
            size: None,
            alignment: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.loc
    }

    pub fn get_fields(&self) -> &Vec<FieldDef> {
        &self.fields
    }

    pub fn get_fields_mut(&mut self) -> &mut Vec<FieldDef> {
        &mut self.fields
    }

    pub fn get_field(&self, field: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == field)
    }

    /// True if this struct came from an included file and so is already
    /// defined by that file's own output.
    pub fn was_included(&self) -> bool {
        self.was_included
    }

    pub(crate) fn set_included(&mut self) {
        self.was_included = true
    }

    /// Size in bytes; `None` until the resolver has laid this struct out.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size
    }

    /// Alignment in bytes; `None` until the resolver has laid this struct out.
    pub fn alignment_bytes(&self) -> Option<u64> {
        self.alignment
    }

    pub fn is_laid_out(&self) -> bool {
        self.size.is_some() && self.alignment.is_some()
    }

    pub(crate) fn set_layout(&mut self, size: u64, alignment: u64) {
        self.size = Some(size);
        self.alignment = Some(alignment);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub loc: Location,
    pub name: String,
    pub ty: Type,
    pub(crate) offset: Option<u64>,
}

impl FieldDef {
    pub fn new(name: &str, loc: Location, ty: Type) -> FieldDef {
        FieldDef {
            loc,
            name: name.into(),
            ty,
            offset: None,
        }
    }

    /// Byte offset from the start of the struct; `None` until the resolver
    /// has laid out the owning struct.
    pub fn offset_bytes(&self) -> Option<u64> {
        self.offset
    }
}

/// A named constant: `const NAME = <expression>;`
#[derive(Clone, Debug, PartialEq)]
pub struct ConstDef {
    loc: Location,
    name: String,
    expr: Expression,
    was_included: bool,
}

impl ConstDef {
    pub fn new(name: &str, loc: Location, expr: Expression) -> ConstDef {
        ConstDef {
            loc,
            name: name.into(),
            expr,
            was_included: false,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.loc
    }

    pub fn get_expression(&self) -> &Expression {
        &self.expr
    }

    pub fn was_included(&self) -> bool {
        self.was_included
    }

    pub(crate) fn set_included(&mut self) {
        self.was_included = true
    }
}
