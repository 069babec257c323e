mod expression;
mod parse_result;
mod structdef;
mod ty;

pub use self::expression::{BinaryOperator, Expression, UnaryOperator};
pub use self::parse_result::{ParseResult, ResolvedConstant};
pub use self::structdef::{ConstDef, FieldDef, StructDef};
pub use self::ty::{
    FunctionId, FunctionType, Parameter, StructId, StructRef, Type, POINTER_ALIGNMENT,
    POINTER_SIZE,
};
