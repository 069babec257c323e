/// Errors generated while linking, ordering, and laying out the structs of a
/// compilation unit and while evaluating its constants.
#[derive(Clone, Debug, PartialEq)]
pub enum SemanticError {
    UnknownStruct(String),
    DuplicateStruct(String),
    DuplicateField(String),
    RecursiveStruct(String),
    VoidStorage,
    FunctionStorage,
    SizeOverflow(String),
    WeightOverflow(String),
    DuplicateConstant(String),
    UndefinedConstant(String),
    RecursiveConstant(String),
    DivisionByZero,
    ShiftNegativeOperand(i64),
    ShiftNegativeCount(i64),
    ShiftCountTooLarge(i64),
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SemanticError::*;
        match self {
            UnknownStruct(name) => f.write_fmt(format_args!("struct {} unknown", name)),
            DuplicateStruct(name) => f.write_fmt(format_args!("struct '{}' already defined", name)),
            DuplicateField(name) => f.write_fmt(format_args!("duplicate field name '{}'", name)),
            RecursiveStruct(name) => f.write_fmt(format_args!(
                "type {} has a recursive relationship with itself",
                name
            )),
            VoidStorage => f.write_str("void cannot be used as a field or array element type"),
            FunctionStorage => f.write_str("function types do not have storage"),
            SizeOverflow(name) => f.write_fmt(format_args!("size of struct '{}' overflows", name)),
            WeightOverflow(name) => f.write_fmt(format_args!(
                "struct '{}' has too many nested struct fields to be ordered",
                name
            )),
            DuplicateConstant(name) => {
                f.write_fmt(format_args!("constant '{}' already defined", name))
            }
            UndefinedConstant(name) => f.write_fmt(format_args!("undefined constant '{}'", name)),
            RecursiveConstant(name) => {
                f.write_fmt(format_args!("constant '{}' has a recursive definition", name))
            }
            DivisionByZero => f.write_str("division by zero"),
            ShiftNegativeOperand(v) => f.write_fmt(format_args!("cannot shift negative value {}", v)),
            ShiftNegativeCount(c) => f.write_fmt(format_args!("negative shift count {}", c)),
            ShiftCountTooLarge(c) => {
                f.write_fmt(format_args!("shift count {} is larger than 63", c))
            }
        }
    }
}
