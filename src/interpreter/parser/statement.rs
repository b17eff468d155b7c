use std::iter::Peekable;

use crate::{
    ast::Stmt,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{absorb_semicolons, expect_token, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Dispatch is on the current token:
/// - `let` begins a binding,
/// - `if`, `for`, `while`, `return` begin their control statements,
/// - `{` begins a block,
/// - an identifier directly followed by `=` (one-token lookahead) begins an
///   assignment,
/// - anything else is an expression statement.
///
/// `line` is cited when the input is already exhausted; each statement form
/// otherwise reports through its own leading token's line. Trailing
/// semicolons are not consumed here; the program and block loops absorb
/// them.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Let, line)) => {
            let line = *line;
            parse_let(tokens, line)
        },
        Some((Token::If, line)) => {
            let line = *line;
            parse_if(tokens, line)
        },
        Some((Token::Return, line)) => {
            let line = *line;
            parse_return(tokens, line)
        },
        Some((Token::For, line)) => {
            let line = *line;
            parse_for(tokens, line)
        },
        Some((Token::While, line)) => {
            let line = *line;
            parse_while(tokens, line)
        },
        Some((Token::LBrace, line)) => {
            let line = *line;
            tokens.next();
            Ok(Stmt::Block(parse_block(tokens, line)?))
        },
        Some((Token::Identifier(_), line)) => {
            let line = *line;
            if let Some(assignment) = parse_assignment(tokens)? {
                Ok(assignment)
            } else {
                Ok(Stmt::Expression(parse_expression(tokens, line)?))
            }
        },
        Some((_, line)) => {
            let line = *line;
            Ok(Stmt::Expression(parse_expression(tokens, line)?))
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses a `let` binding: `let NAME = EXPR`.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let name = parse_identifier(tokens, line)?;
    let value_line = expect_token(tokens, &Token::Equals, "'=' after the binding name", line)?;
    let value = parse_expression(tokens, value_line)?;

    Ok(Stmt::Let { name, value })
}

/// Parses an assignment when the lookahead confirms one.
///
/// The next token is an identifier; if the token after it is `=`, both are
/// consumed and the right-hand expression is parsed. Otherwise no input is
/// consumed and `Ok(None)` is returned so the caller can parse an
/// expression statement instead.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();

    if let Some((Token::Equals, line)) = lookahead.peek() {
        let line = *line;
        let name = match tokens.next() {
            Some((Token::Identifier(n), _)) => n.clone(),
            _ => unreachable!(),
        };
        tokens.next();

        let value = parse_expression(tokens, line)?;
        return Ok(Some(Stmt::Assign { name, value }));
    }

    Ok(None)
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if (<condition>) <branch>
///     else if (<condition>) <branch>
///     else <branch>
/// ```
/// Each branch is either a `{ ... }` block or a single statement. Chained
/// `else if` constructs are parsed recursively.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let condition_line = expect_token(tokens, &Token::LParen, "'(' after 'if'", line)?;
    let condition = parse_expression(tokens, condition_line)?;
    let branch_line = expect_token(tokens, &Token::RParen, "')' after the condition", line)?;

    let then_branch = Box::new(parse_branch(tokens, branch_line)?);

    absorb_semicolons(tokens);
    let else_branch = if let Some((Token::Else, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        Some(Box::new(parse_branch(tokens, line)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch })
}

/// Parses one `if`/`else` branch: a block when the next token is `{`,
/// otherwise a single statement.
fn parse_branch<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LBrace, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        Ok(Stmt::Block(parse_block(tokens, line)?))
    } else {
        parse_statement(tokens, line)
    }
}

/// Parses a `return` statement.
///
/// The value expression is omitted exactly when the next token is `;`,
/// `}`, or the end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let value = match tokens.peek() {
        None | Some((Token::Semicolon | Token::RBrace, _)) => None,
        Some(_) => Some(parse_expression(tokens, line)?),
    };

    Ok(Stmt::Return(value))
}

/// Parses a `for`-in loop: `for (NAME in EXPR) { BODY }`.
///
/// The body must be a block.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    expect_token(tokens, &Token::LParen, "'(' after 'for'", line)?;
    let variable = parse_identifier(tokens, line)?;
    let iterable_line = expect_token(tokens, &Token::In, "'in' after the loop variable", line)?;
    let iterable = parse_expression(tokens, iterable_line)?;
    expect_token(tokens, &Token::RParen, "')' after the iterable", line)?;

    let body_line = expect_token(tokens, &Token::LBrace, "'{' to open the loop body", line)?;
    let body = parse_block(tokens, body_line)?;

    Ok(Stmt::ForIn { variable,
                     iterable,
                     body })
}

/// Parses a `while` loop: `while (EXPR) { BODY }`.
///
/// The body must be a block.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let condition_line = expect_token(tokens, &Token::LParen, "'(' after 'while'", line)?;
    let condition = parse_expression(tokens, condition_line)?;
    expect_token(tokens, &Token::RParen, "')' after the condition", line)?;

    let body_line = expect_token(tokens, &Token::LBrace, "'{' to open the loop body", line)?;
    let body = parse_block(tokens, body_line)?;

    Ok(Stmt::While { condition, body })
}
