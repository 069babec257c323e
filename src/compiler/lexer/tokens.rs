use crate::compiler::source::Location;

/// The primitive storage types built into the language.  Each primitive has a
/// fixed size and alignment on the target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F32,
    F64,
}

impl Primitive {
    pub fn size_bytes(&self) -> u64 {
        match self {
            Primitive::U8 | Primitive::I8 => 1,
            Primitive::U16 | Primitive::I16 => 2,
            Primitive::U32 | Primitive::I32 | Primitive::F32 => 4,
            Primitive::F64 => 8,
        }
    }

    pub fn alignment_bytes(&self) -> u64 {
        match self {
            Primitive::U8 | Primitive::I8 => 1,
            _ => 2,
        }
    }

    pub fn is_signed(&self) -> bool {
        !matches!(self, Primitive::U8 | Primitive::U16 | Primitive::U32)
    }

    pub fn is_integral(&self) -> bool {
        !matches!(self, Primitive::F32 | Primitive::F64)
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::U8 => f.write_str("u8"),
            Primitive::U16 => f.write_str("u16"),
            Primitive::U32 => f.write_str("u32"),
            Primitive::I8 => f.write_str("i8"),
            Primitive::I16 => f.write_str("i16"),
            Primitive::I32 => f.write_str("i32"),
            Primitive::F32 => f.write_str("f32"),
            Primitive::F64 => f.write_str("f64"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lex {
    Integer(i64),
    Identifier(String),
    QuotedString(String),
    Struct,
    Include,
    Const,
    Void,
    Primitive(Primitive),
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Mul,
    Add,
    Minus,
    Div,
    Assign,
    BNot,
    ShiftLeft,
    ShiftRight,
    Eof,
}

impl std::fmt::Display for Lex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Lex::*;
        match self {
            Integer(i) => f.write_str(&format!("integer literal {}", i)),
            Identifier(id) => f.write_str(&format!("identifier {}", id)),
            QuotedString(s) => f.write_str(&format!("string \"{}\"", s)),
            Struct => f.write_str("struct"),
            Include => f.write_str("include"),
            Const => f.write_str("const"),
            Void => f.write_str("void"),
            Primitive(p) => f.write_str(&format!("{}", p)),
            LBrace => f.write_str("{"),
            RBrace => f.write_str("}"),
            LParen => f.write_str("("),
            RParen => f.write_str(")"),
            LBracket => f.write_str("["),
            RBracket => f.write_str("]"),
            Comma => f.write_str(","),
            Colon => f.write_str(":"),
            Semicolon => f.write_str(";"),
            Mul => f.write_str("*"),
            Add => f.write_str("+"),
            Minus => f.write_str("-"),
            Div => f.write_str("/"),
            Assign => f.write_str("="),
            BNot => f.write_str("~"),
            ShiftLeft => f.write_str("<<"),
            ShiftRight => f.write_str(">>"),
            Eof => f.write_str("end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The value of the token
    pub sym: Lex,

    pub loc: Location,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.loc, self.sym))
    }
}

impl Token {
    pub fn new(s: Lex, loc: Location) -> Token {
        Token { sym: s, loc }
    }

    /// Tests if this token is the same kind of token as `a`.  Payloads are
    /// ignored, so any identifier matches `Lex::Identifier(_)`.
    pub fn token_eq(&self, a: &Lex) -> bool {
        std::mem::discriminant(&self.sym) == std::mem::discriminant(a)
    }
}
