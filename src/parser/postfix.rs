use super::error::{ParseError, ParseErrorKind};
use super::token::{Paren, Token};
use crate::stack::Stack;

/// Reorders an infix statement into postfix using the shunting-yard
/// algorithm. Operators of equal precedence group left to right, `^`
/// included.
pub fn to_postfix(infix: &[Token], line: usize) -> Result<Vec<Token>, ParseError> {
    let underflow = || ParseError::new(ParseErrorKind::StackUnderflow, line);
    let mut stack = Stack::new();
    let mut output = vec![];

    stack.push(Token::Paren(Paren::Open));

    let closing = Token::Paren(Paren::Close);
    for token in infix.iter().chain(std::iter::once(&closing)) {
        match token {
            Token::Int(_) | Token::Ident(_) | Token::Bool(_) => output.push(token.clone()),
            Token::Paren(Paren::Open) => stack.push(token.clone()),
            Token::Paren(Paren::Close) => loop {
                match stack.pop().map_err(|_| underflow())? {
                    Token::Paren(Paren::Open) => break,
                    op => output.push(op),
                }
            },
            Token::UnaryOp(_) => stack.push(token.clone()),
            Token::BinaryOp(_) | Token::Assign | Token::CondOp(_) => {
                let precedence = token.precedence();

                loop {
                    let top = stack.peek().map_err(|_| underflow())?;

                    if matches!(top, Token::Paren(Paren::Open)) || top.precedence() < precedence {
                        break;
                    }

                    output.push(stack.pop().map_err(|_| underflow())?);
                }

                stack.push(token.clone());
            }
            Token::Whitespace => continue,
            Token::KeyWord(_) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownToken(token.clone()),
                    line,
                ))
            }
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MismatchedOperators, line));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Lexer, ParseErrorKind};
    use pretty_assertions::assert_eq;

    fn postfix(source: &str) -> Result<String, ParseErrorKind> {
        let line = Lexer::new(source, 1).lex_line().unwrap();

        to_postfix(line.tokens(), 1)
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .map_err(|err| err.kind)
    }

    #[test]
    fn precedence_orders_operators() {
        assert_eq!(postfix("1 + 2 * 3").unwrap(), "1 2 3 * +");
        assert_eq!(postfix("1 * 2 + 3").unwrap(), "1 2 * 3 +");
        assert_eq!(postfix("2 * 3 ^ 2").unwrap(), "2 3 2 ^ *");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix("8 - 3 - 2").unwrap(), "8 3 - 2 -");
        assert_eq!(postfix("2 ^ 3 ^ 2").unwrap(), "2 3 ^ 2 ^");
        assert_eq!(postfix("1 + 2 * 3 - 4").unwrap(), "1 2 3 * + 4 -");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(postfix("(1 + 2) * 3").unwrap(), "1 2 + 3 *");
        assert_eq!(postfix("((x))").unwrap(), "x");
    }

    #[test]
    fn assignment_binds_loosest() {
        assert_eq!(postfix("x = y < 3 + 1").unwrap(), "x y 3 1 + < =");
    }

    #[test]
    fn unary_binds_tightest() {
        assert_eq!(postfix("3 - -2").unwrap(), "3 2 neg -");
        assert_eq!(postfix("-3 + 2").unwrap(), "3 neg 2 +");
        assert_eq!(postfix("-2 ^ 2").unwrap(), "2 neg 2 ^");
    }

    #[test]
    fn indentation_tokens_are_ignored() {
        let line = Lexer::new("\t\tx = 1 + 2", 1).lex_line().unwrap();

        assert_eq!(
            to_postfix(&line.expanded(), 1).unwrap(),
            to_postfix(line.tokens(), 1).unwrap()
        );
    }

    #[test]
    fn unclosed_parenthesis() {
        assert_eq!(postfix("(1 + 2"), Err(ParseErrorKind::MismatchedOperators));
    }

    #[test]
    fn unopened_parenthesis() {
        assert_eq!(postfix("1 + 2) * 3"), Err(ParseErrorKind::StackUnderflow));
        assert_eq!(postfix("1)"), Err(ParseErrorKind::StackUnderflow));
    }

    #[test]
    fn keyword_inside_expression() {
        assert_eq!(
            postfix("x = print"),
            Err(ParseErrorKind::UnknownToken(Token::KeyWord(
                crate::parser::KeyWord::Print
            )))
        );
    }
}
