use crate::compiler::source::Location;

/// A constant expression.  Every node carries the location it was parsed at
/// so that evaluation errors can point at the operator or name which caused
/// them.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Location, i64),
    Identifier(Location, String),
    UnaryOp(Location, UnaryOperator, Box<Expression>),
    BinaryOp(Location, BinaryOperator, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn location(&self) -> &Location {
        match self {
            Expression::Literal(loc, ..)
            | Expression::Identifier(loc, ..)
            | Expression::UnaryOp(loc, ..)
            | Expression::BinaryOp(loc, ..) => loc,
        }
    }

    pub fn root_str(&self) -> String {
        match self {
            Expression::Literal(_, v) => format!("{}", v),
            Expression::Identifier(_, id) => id.clone(),
            Expression::UnaryOp(_, op, _) => format!("{}", op),
            Expression::BinaryOp(_, op, ..) => format!("{}", op),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            Expression::Literal(..) | Expression::Identifier(..) => f.write_str(&self.root_str()),
            Expression::UnaryOp(_, op, operand) => f.write_fmt(format_args!("{}{}", op, operand)),
            Expression::BinaryOp(_, op, l, r) => f.write_fmt(format_args!("({} {} {})", l, op, r)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOperator {
    /// Binding strength of the operator: higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use BinaryOperator::*;
        match self {
            ShiftLeft | ShiftRight => 1,
            Add | Sub => 2,
            Mul | Div => 3,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        use BinaryOperator::*;
        match self {
            Add => f.write_str("+"),
            Sub => f.write_str("-"),
            Mul => f.write_str("*"),
            Div => f.write_str("/"),
            ShiftLeft => f.write_str("<<"),
            ShiftRight => f.write_str(">>"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    BNot,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        use UnaryOperator::*;
        match self {
            Negate => f.write_str("-"),
            BNot => f.write_str("~"),
        }
    }
}
