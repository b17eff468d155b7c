use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or` / `||`.
///
/// Grammar: `logical_or := logical_and (("or" | "||") logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens, &[BinaryOperator::Or], parse_logical_and, line)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `and` / `&&`. Precedence is higher
/// than OR and lower than equality.
///
/// Grammar: `logical_and := equality (("and" | "&&") equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens, &[BinaryOperator::And], parse_equality, line)
}

/// Parses equality expressions: `==` and `!=`.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens,
                       &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                       parse_comparison,
                       line)
}

/// Parses relational expressions: `<`, `<=`, `>`, `>=`.
///
/// Grammar: `comparison := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens,
                       &[BinaryOperator::Less,
                         BinaryOperator::LessEqual,
                         BinaryOperator::Greater,
                         BinaryOperator::GreaterEqual],
                       parse_additive,
                       line)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens,
                       &[BinaryOperator::Add, BinaryOperator::Sub],
                       parse_multiplicative,
                       line)
}

/// Parses multiplication-level expressions: `*`, `/`, and `%`.
///
/// Grammar: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_level(tokens,
                       &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod],
                       parse_unary,
                       line)
}

/// Parses one left-associative binary precedence level.
///
/// Repeatedly parses `next_level` operands joined by any operator in
/// `operators`, folding them into a left-leaning expression tree. Each
/// right operand is parsed with its operator's line, so an expression cut
/// off mid-operator reports where the operand was expected.
fn parse_binary_level<'a, I>(tokens: &mut Peekable<I>,
                             operators: &[BinaryOperator],
                             next_level: fn(&mut Peekable<I>, usize) -> ParseResult<Expr>,
                             line: usize)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next_level(tokens, line)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            let line = *line;
            tokens.next();
            let right = next_level(tokens, line)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right) };
            continue;
        }
        break;
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator (arithmetic, comparison, or logical), `None` for all other
/// tokens.
///
/// # Example
/// ```
/// use kodiscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
