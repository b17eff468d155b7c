use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_logical_or, statement::parse_statement, utils::absorb_semicolons},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete source string into a program.
///
/// Convenience wrapper that tokenizes and then parses the token stream to
/// exhaustion.
///
/// # Errors
/// Propagates lexical errors and parse errors unchanged.
///
/// # Example
/// ```
/// use kodiscript::interpreter::parser::core::parse_source;
///
/// let program = parse_source("let x = 1 + 2; x").unwrap();
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_source(source: &str) -> ParseResult<Program> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    parse_program(&mut iter)
}

/// Parses a program: statements until the token stream is exhausted.
///
/// Statements may be separated by optional semicolons; runs of semicolons
/// are absorbed.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    absorb_semicolons(tokens);
    while let Some((_, line)) = tokens.peek() {
        let line = *line;
        statements.push(parse_statement(tokens, line)?);
        absorb_semicolons(tokens);
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, the elvis operator, and recursively descends
/// through the precedence hierarchy. `line` is the line where the
/// expression is expected, cited when the input ends before the expression
/// is complete.
///
/// Grammar: `expression := elvis`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_elvis(tokens, line)
}

/// Parses the elvis level: `a ?: b`, left-associative.
///
/// Grammar: `elvis := logical_or ("?:" logical_or)*`
fn parse_elvis<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_or(tokens, line)?;

    while let Some((Token::Elvis, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_logical_or(tokens, line)?;
        left = Expr::Elvis { left:  Box::new(left),
                             right: Box::new(right), };
    }

    Ok(left)
}
