use super::environment::Environment;
use super::error::{EvalError, RuntimeError};
use super::value::Value;
use crate::parser::{BinaryOp, CondOp, Token, UnaryOp};
use crate::stack::Stack;

/// Runs a postfix token sequence as a stack machine and returns the values
/// left over once every token is consumed: none for a pure assignment, one
/// for a value expression.
///
/// Identifiers stay unresolved on the stack until an operator needs their
/// value, which is what lets `=` read its left operand as a name.
pub fn evaluate(
    postfix: &[Token],
    env: &mut Environment,
    line: usize,
) -> Result<Vec<Value>, RuntimeError> {
    let mut stack: Stack<Token> = Stack::new();

    for token in postfix {
        match token {
            Token::Int(_) | Token::Bool(_) | Token::Ident(_) => stack.push(token.clone()),
            Token::Assign => {
                let value = pop_operand(&mut stack, token, line)?;
                let value = resolve(&value, env, line)?;

                match pop_operand(&mut stack, token, line)? {
                    Token::Ident(name) => env.set(name, value),
                    target => {
                        return Err(RuntimeError::eval(
                            EvalError::InvalidAssignmentTarget(target),
                            line,
                        ))
                    }
                }
            }
            Token::UnaryOp(op) => {
                let operand = pop_operand(&mut stack, token, line)?;
                let value = expect_int(resolve(&operand, env, line)?, token, line)?;

                let result = match op {
                    UnaryOp::Neg => value
                        .checked_neg()
                        .ok_or_else(|| EvalError::Overflow(token.to_string())),
                    UnaryOp::Plus => Ok(value),
                };

                stack.push(Token::Int(result.map_err(|e| RuntimeError::eval(e, line))?));
            }
            Token::BinaryOp(op) => {
                let (lhs, rhs) = pop_int_pair(&mut stack, env, token, line)?;
                let result = apply_binary(*op, lhs, rhs).map_err(|e| RuntimeError::eval(e, line))?;

                stack.push(Token::Int(result));
            }
            Token::CondOp(op) => {
                let (lhs, rhs) = pop_int_pair(&mut stack, env, token, line)?;

                stack.push(Token::Bool(compare(*op, lhs, rhs)));
            }
            Token::Whitespace | Token::KeyWord(_) | Token::Paren(_) => {
                return Err(RuntimeError::eval(
                    EvalError::OperatorUnknown(token.clone()),
                    line,
                ))
            }
        }
    }

    stack
        .into_vec()
        .iter()
        .map(|token| resolve(token, env, line))
        .collect()
}

fn resolve(token: &Token, env: &Environment, line: usize) -> Result<Value, RuntimeError> {
    let err = match token {
        Token::Int(i) => return Ok(Value::Int(*i)),
        Token::Bool(b) => return Ok(Value::Bool(*b)),
        Token::Ident(name) => match env.get(name) {
            Some(value) => return Ok(value),
            None => EvalError::UninitializedVariable(name.clone()),
        },
        _ => EvalError::InvalidResidualToken(token.clone()),
    };

    Err(RuntimeError::eval(err, line))
}

fn pop_operand(stack: &mut Stack<Token>, op: &Token, line: usize) -> Result<Token, RuntimeError> {
    stack
        .pop()
        .map_err(|_| RuntimeError::eval(EvalError::StackUnderflow(op.to_string()), line))
}

// The right operand sits on top, so it comes off first.
fn pop_int_pair(
    stack: &mut Stack<Token>,
    env: &Environment,
    op: &Token,
    line: usize,
) -> Result<(i64, i64), RuntimeError> {
    let rhs = pop_operand(stack, op, line)?;
    let lhs = pop_operand(stack, op, line)?;

    let lhs = resolve(&lhs, env, line)?;
    let rhs = resolve(&rhs, env, line)?;

    Ok((expect_int(lhs, op, line)?, expect_int(rhs, op, line)?))
}

fn expect_int(value: Value, op: &Token, line: usize) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(i) => Ok(i),
        other => Err(RuntimeError::eval(
            EvalError::TypeMismatch {
                op: op.to_string(),
                expected: "Integer",
                found: other.type_name(),
            },
            line,
        )),
    }
}

fn apply_binary(op: BinaryOp, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    let overflow = || EvalError::Overflow(op.as_char().to_string());

    match op {
        BinaryOp::Add => lhs.checked_add(rhs).ok_or_else(overflow),
        BinaryOp::Sub => lhs.checked_sub(rhs).ok_or_else(overflow),
        BinaryOp::Mul => lhs.checked_mul(rhs).ok_or_else(overflow),
        BinaryOp::Div | BinaryOp::Mod if rhs == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => lhs.checked_div(rhs).ok_or_else(overflow),
        BinaryOp::Mod => lhs.checked_rem(rhs).ok_or_else(overflow),
        BinaryOp::Pow if rhs < 0 => Err(EvalError::NegativeExponent(rhs)),
        BinaryOp::Pow => pow(lhs, rhs).ok_or_else(overflow),
    }
}

fn pow(base: i64, exp: i64) -> Option<i64> {
    match u32::try_from(exp) {
        Ok(exp) => base.checked_pow(exp),
        Err(_) => match base {
            0 | 1 => Some(base),
            -1 => Some(if exp % 2 == 0 { 1 } else { -1 }),
            _ => None,
        },
    }
}

fn compare(op: CondOp, lhs: i64, rhs: i64) -> bool {
    match op {
        CondOp::Lt => lhs < rhs,
        CondOp::Gt => lhs > rhs,
        CondOp::Lte => lhs <= rhs,
        CondOp::Gte => lhs >= rhs,
        CondOp::Equal => lhs == rhs,
    }
}
