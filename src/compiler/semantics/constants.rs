use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::compiler::ast::*;

use super::{SemanticError, SemanticResult};

/// Evaluates every constant in the unit, in declaration order, and stores
/// the values in the unit's resolved constant list.
pub fn resolve_constants(result: &mut ParseResult) -> SemanticResult<()> {
    debug!("Resolving {} constants", result.constants.len());

    let mut evaluator = ConstantEvaluator::new(&result.constants)?;
    let mut values = Vec::with_capacity(result.constants.len());
    for (idx, c) in result.constants.iter().enumerate() {
        let value = evaluator.evaluate(c)?;
        trace!("{} = {}", c.get_name(), value);
        values.push(ResolvedConstant::new(idx, value));
    }

    result.resolved_constants = values;
    Ok(())
}

struct ConstantEvaluator<'a> {
    constants: FxHashMap<&'a str, &'a ConstDef>,

    /// Expression nodes currently being evaluated, keyed by identity so that
    /// equal but distinct nodes never collide.
    evaluating: FxHashSet<*const Expression>,
}

impl<'a> ConstantEvaluator<'a> {
    fn new(constants: &'a [ConstDef]) -> SemanticResult<ConstantEvaluator<'a>> {
        let mut lookup = FxHashMap::default();
        for c in constants {
            if lookup.insert(c.get_name(), c).is_some() {
                return err!(
                    c.location(),
                    SemanticError::DuplicateConstant(c.get_name().into())
                );
            }
        }

        Ok(ConstantEvaluator {
            constants: lookup,
            evaluating: FxHashSet::default(),
        })
    }

    /// Evaluates one top level constant.  The set of nodes being evaluated
    /// starts out empty for every constant.
    fn evaluate(&mut self, c: &'a ConstDef) -> SemanticResult<i64> {
        self.evaluating.clear();
        self.eval(c.get_expression())
    }

    fn eval(&mut self, expr: &'a Expression) -> SemanticResult<i64> {
        let key = expr as *const Expression;
        self.evaluating.insert(key);
        let value = self.eval_node(expr);
        self.evaluating.remove(&key);
        value
    }

    fn eval_node(&mut self, expr: &'a Expression) -> SemanticResult<i64> {
        match expr {
            Expression::Literal(_, v) => Ok(*v),
            Expression::Identifier(loc, name) => {
                let target = match self.constants.get(name.as_str()) {
                    Some(&c) => c.get_expression(),
                    None => return err!(loc, SemanticError::UndefinedConstant(name.clone())),
                };
                if self.evaluating.contains(&(target as *const Expression)) {
                    return err!(loc, SemanticError::RecursiveConstant(name.clone()));
                }
                self.eval(target)
            }
            Expression::UnaryOp(_, op, operand) => {
                let v = self.eval(operand)?;
                Ok(match op {
                    UnaryOperator::Negate => v.wrapping_neg(),
                    UnaryOperator::BNot => !v,
                })
            }
            Expression::BinaryOp(loc, op, l, r) => {
                let l = self.eval(l)?;
                let r = self.eval(r)?;
                match op {
                    BinaryOperator::Add => Ok(l.wrapping_add(r)),
                    BinaryOperator::Sub => Ok(l.wrapping_sub(r)),
                    BinaryOperator::Mul => Ok(l.wrapping_mul(r)),
                    BinaryOperator::Div if r == 0 => err!(loc, SemanticError::DivisionByZero),
                    BinaryOperator::Div => Ok(l.wrapping_div(r)),
                    BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => {
                        if l < 0 {
                            err!(loc, SemanticError::ShiftNegativeOperand(l))
                        } else if r < 0 {
                            err!(loc, SemanticError::ShiftNegativeCount(r))
                        } else if r > 63 {
                            err!(loc, SemanticError::ShiftCountTooLarge(r))
                        } else if *op == BinaryOperator::ShiftLeft {
                            Ok(l << r)
                        } else {
                            Ok(l >> r)
                        }
                    }
                }
            }
        }
    }
}
