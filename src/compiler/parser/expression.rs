use crate::compiler::{ast::*, lexer::tokens::Lex};

use super::{tokenstream::TokenStream, ParserError, ParserResult};

/// Lowest binding strength of any binary operator.  Parenthesized
/// expressions restart at this level.
const LOWEST_PRECEDENCE: u8 = 1;

pub(super) fn expression(stream: &mut TokenStream) -> ParserResult<Expression> {
    trace!(stream);
    binary_expression(stream, LOWEST_PRECEDENCE)
}

/// Precedence climbing: keeps folding operators which bind at least as
/// tightly as `min_precedence` into the left operand.  Right operands are
/// parsed one level tighter, which makes every operator left associative.
fn binary_expression(stream: &mut TokenStream, min_precedence: u8) -> ParserResult<Expression> {
    let mut left = atom(stream)?;

    loop {
        let op = match binary_operator(&stream.peek()?.sym) {
            Some(op) if op.precedence() >= min_precedence => op,
            _ => break,
        };
        let token = stream.next()?;
        let right = binary_expression(stream, op.precedence() + 1)?;
        left = Expression::BinaryOp(token.loc, op, Box::new(left), Box::new(right));
    }

    Ok(left)
}

fn binary_operator(lex: &Lex) -> Option<BinaryOperator> {
    match lex {
        Lex::ShiftLeft => Some(BinaryOperator::ShiftLeft),
        Lex::ShiftRight => Some(BinaryOperator::ShiftRight),
        Lex::Add => Some(BinaryOperator::Add),
        Lex::Minus => Some(BinaryOperator::Sub),
        Lex::Mul => Some(BinaryOperator::Mul),
        Lex::Div => Some(BinaryOperator::Div),
        _ => None,
    }
}

/// Literals, names, parenthesized expressions, and the unary operators,
/// which bind tighter than any binary operator.
fn atom(stream: &mut TokenStream) -> ParserResult<Expression> {
    let token = stream.next()?;
    match token.sym {
        Lex::Integer(v) => Ok(Expression::Literal(token.loc, v)),
        Lex::Identifier(id) => Ok(Expression::Identifier(token.loc, id)),
        Lex::LParen => {
            let expr = binary_expression(stream, LOWEST_PRECEDENCE)?;
            stream.next_must_be(&Lex::RParen)?;
            Ok(expr)
        }
        Lex::BNot => Ok(Expression::UnaryOp(
            token.loc,
            UnaryOperator::BNot,
            Box::new(atom(stream)?),
        )),
        Lex::Minus => Ok(Expression::UnaryOp(
            token.loc,
            UnaryOperator::Negate,
            Box::new(atom(stream)?),
        )),
        sym => err!(token.loc, ParserError::ExpectedAtom(sym)),
    }
}
