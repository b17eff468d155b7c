use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            template::expand_template,
            utils::{expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators:
/// - `-`    (numeric negation)
/// - `!` / `not`  (logical not)
///
/// Unary operators are right-associative, so `!-x` parses as `!(-x)`, and
/// bind tighter than any binary operator.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "not") unary
///            | primary postfix*
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens, line)?;
        Ok(Expr::Unary { op:   UnaryOperator::Negate,
                         expr: Box::new(expr), })
    } else if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens, line)?;
        Ok(Expr::Unary { op:   UnaryOperator::Not,
                         expr: Box::new(expr), })
    } else {
        let primary = parse_primary(tokens, line)?;
        parse_postfix(tokens, primary)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and
/// include:
/// - number, string, boolean, and null literals
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - object literals (`{ name: expr, ... }`)
/// - function literals (`fn (a, b) { ... }`)
///
/// This function does not handle unary or postfix operators; the postfix
/// chain is applied by the caller. `line` is cited when the input ends
/// where a primary was expected.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line })?;

    match peeked {
        (Token::Number(..) | Token::Bool(..) | Token::Null | Token::Str(..), _) => {
            parse_literal(tokens)
        },
        (Token::LParen, line) => {
            let line = *line;
            parse_grouping(tokens, line)
        },
        (Token::LBracket, line) => {
            let line = *line;
            parse_array_literal(tokens, line)
        },
        (Token::LBrace, line) => {
            let line = *line;
            parse_object_literal(tokens, line)
        },
        (Token::Fn, line) => {
            let line = *line;
            parse_function_literal(tokens, line)
        },
        (Token::Identifier(_), line) => {
            let line = *line;
            let name = parse_identifier(tokens, line)?;
            Ok(Expr::Identifier(name))
        },
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses postfix operators applied to an expression.
///
/// The postfix chain applies left to right and supports:
///
/// 1. **Member access**: `expr.name` and null-safe `expr?.name`
/// 2. **Calls**: `expr(arg1, arg2, ...)`
/// 3. **Indexing**: `expr[index]`
///
/// Chains may mix freely: `a.b[0]?.c(1)` applies each step to the result
/// of the previous one. Parsing continues until no further postfix
/// operator is found.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "." IDENT
///              | postfix "?." IDENT
///              | postfix "(" arguments ")"
///              | postfix "[" expression "]"
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let property = parse_identifier(tokens, line)?;
                node = Expr::Member { object: Box::new(node),
                                      property };
            },
            Some((Token::SafeDot, line)) => {
                let line = *line;
                tokens.next();
                let property = parse_identifier(tokens, line)?;
                node = Expr::SafeMember { object: Box::new(node),
                                          property };
            },
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let arguments = parse_comma_separated(tokens,
                                                      |tokens| parse_expression(tokens, line),
                                                      &Token::RParen,
                                                      line)?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments };
            },
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                let index = parse_expression(tokens, line)?;
                expect_token(tokens, &Token::RBracket, "']' after the index", line)?;
                node = Expr::Index { object: Box::new(node),
                                     index:  Box::new(index), };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses a literal token: number, boolean, null, or string.
///
/// Plain strings become string-literal nodes. Strings whose lexer-recorded
/// marker list is non-empty are expanded into their literal and expression
/// parts.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(n), _)) => Ok(Expr::Number(*n)),
        Some((Token::Bool(b), _)) => Ok(Expr::Bool(*b)),
        Some((Token::Null, _)) => Ok(Expr::Null),
        Some((Token::Str(lit), line)) => {
            if lit.markers.is_empty() {
                Ok(Expr::Str(lit.value.clone()))
            } else {
                Ok(Expr::Template(expand_template(&lit.value, &lit.markers, *line)?))
            }
        },
        _ => unreachable!(),
    }
}

/// Parses a parenthesized expression.
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`. The inner expression is
/// returned as-is (no wrapper node).
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens, line)?;
    expect_token(tokens, &Token::RParen, "')' to close the grouping", line)?;
    Ok(expr)
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed with the full expression grammar, separated by
/// commas; `[]` is a valid empty array and trailing commas are rejected.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let elements = parse_comma_separated(tokens,
                                         |tokens| parse_expression(tokens, line),
                                         &Token::RBracket,
                                         line)?;
    Ok(Expr::Array(elements))
}

/// Parses an object literal of the form `{ name: expr, ... }`.
///
/// Keys are identifiers, not arbitrary expressions. `{}` is a valid empty
/// object. Duplicate keys are legal; the last value wins at evaluation
/// time.
fn parse_object_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let pairs = parse_comma_separated(tokens,
                                      |tokens| {
                                          let key = parse_identifier(tokens, line)?;
                                          let colon_line = expect_token(tokens,
                                                                        &Token::Colon,
                                                                        "':' after object key",
                                                                        line)?;
                                          let value = parse_expression(tokens, colon_line)?;
                                          Ok((key, value))
                                      },
                                      &Token::RBrace,
                                      line)?;

    Ok(Expr::Object(pairs))
}

/// Parses a function literal.
///
/// Expected structure: `fn ( NAME (, NAME)* ? ) { BODY }` — the parameter
/// list may be empty and the body must be a block.
fn parse_function_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    expect_token(tokens, &Token::LParen, "'(' after 'fn'", line)?;
    let params = parse_comma_separated(tokens,
                                       |tokens| parse_identifier(tokens, line),
                                       &Token::RParen,
                                       line)?;

    let body_line = expect_token(tokens, &Token::LBrace, "'{' to open the function body", line)?;
    let body = parse_block(tokens, body_line)?;

    Ok(Expr::Function { params, body })
}
