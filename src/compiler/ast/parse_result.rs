use super::{
    structdef::{ConstDef, StructDef},
    ty::{FunctionId, FunctionType, StructId, Type},
};

/// The output of parsing one translation unit: the root file plus everything
/// it transitively includes.  Definitions pulled in through an `include` are
/// appended after the definitions that precede the `include` statement and
/// are flagged as included.
///
/// Name uniqueness is not checked here.  Two structs (or constants) with the
/// same name can live side by side until the resolver rejects them.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    filename: String,
    includes: Vec<String>,
    pub(crate) structs: Vec<StructDef>,
    pub(crate) constants: Vec<ConstDef>,
    pub(crate) function_types: Vec<FunctionType>,
    pub(crate) resolved_constants: Vec<ResolvedConstant>,
    resolved: bool,
}

impl ParseResult {
    pub fn new(filename: &str) -> ParseResult {
        ParseResult {
            filename: filename.into(),
            includes: vec![],
            structs: vec![],
            constants: vec![],
            function_types: vec![],
            resolved_constants: vec![],
            resolved: false,
        }
    }

    /// Name of the root file, as reported by the source resolver
    pub fn get_filename(&self) -> &str {
        &self.filename
    }

    /// The include paths written in the root file, in order.  Includes of
    /// included files are not listed.
    pub fn get_includes(&self) -> &Vec<String> {
        &self.includes
    }

    /// Every struct in the unit.  After resolution this is in emission order:
    /// a struct never precedes a struct it embeds by value.
    pub fn get_structs(&self) -> &Vec<StructDef> {
        &self.structs
    }

    pub fn get_struct(&self, id: StructId) -> &StructDef {
        &self.structs[id.index()]
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.get_name() == name)
    }

    pub fn get_constants(&self) -> &Vec<ConstDef> {
        &self.constants
    }

    pub fn get_function_types(&self) -> &Vec<FunctionType> {
        &self.function_types
    }

    pub fn get_function_type(&self, id: FunctionId) -> &FunctionType {
        &self.function_types[id.index()]
    }

    /// Values of every constant, in declaration order.  Empty until the
    /// resolver has run.
    pub fn get_resolved_constants(&self) -> &Vec<ResolvedConstant> {
        &self.resolved_constants
    }

    /// Looks up the value of a resolved constant by name
    pub fn constant_value(&self, name: &str) -> Option<i64> {
        self.resolved_constants
            .iter()
            .find(|rc| self.constants[rc.index].get_name() == name)
            .map(|rc| rc.value)
    }

    /// True once the resolver has linked, ordered, and laid out every struct
    /// and evaluated every constant.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(crate) fn set_resolved(&mut self) {
        self.resolved = true
    }

    pub(crate) fn add_struct(&mut self, s: StructDef) {
        self.structs.push(s)
    }

    pub(crate) fn add_constant(&mut self, c: ConstDef) {
        self.constants.push(c)
    }

    /// Registers a function type literal and returns the id that a
    /// [`Type::Function`] uses to refer to it.
    pub(crate) fn add_function_type(&mut self, ft: FunctionType) -> FunctionId {
        self.function_types.push(ft);
        FunctionId::new(self.function_types.len() - 1)
    }

    /// Appends the definitions of a nested parse to this unit, marking all
    /// of them as included.  Function ids in the nested unit are shifted so
    /// that they keep pointing at the same function types once appended.
    pub(crate) fn merge_included(&mut self, path: &str, nested: ParseResult) {
        let offset = self.function_types.len();
        let mut shift = |ty: &mut Type| {
            if let Type::Function(id) = ty {
                *id = FunctionId::new(id.index() + offset);
            }
        };

        for mut ft in nested.function_types {
            ft.set_included();
            for ty in ft.types_mut() {
                ty.visit_mut(&mut shift);
            }
            self.function_types.push(ft);
        }

        for mut s in nested.structs {
            s.set_included();
            for field in s.get_fields_mut() {
                field.ty.visit_mut(&mut shift);
            }
            self.structs.push(s);
        }

        for mut c in nested.constants {
            c.set_included();
            self.constants.push(c);
        }

        self.includes.push(path.into());
    }
}

/// The value of one constant, referring to its definition by position in
/// [`ParseResult::get_constants`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedConstant {
    index: usize,
    value: i64,
}

impl ResolvedConstant {
    pub fn new(index: usize, value: i64) -> ResolvedConstant {
        ResolvedConstant { index, value }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
