use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists, and
/// function parameter lists. It repeatedly calls `parse_item` to parse one
/// element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
/// Trailing commas are not supported. `line` names the enclosing
/// construct's line, cited when the input ends before the closing token.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token
/// appears between items, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected: format!("',' or {closing:?}"),
                                                  found:    format!("{tok:?}"),
                                                  line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`. `line` is the enclosing
/// construct's line, cited when the input ends instead.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => Err(ParseError::Expected { expected: "an identifier".to_string(),
                                                        found:    format!("{tok:?}"),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes the next token, which must equal `expected`, and returns its
/// line. `description` names the token in the error message; `line` is the
/// enclosing construct's line, cited when the input ends instead.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token,
                                                          description: &str,
                                                          line: usize)
                                                          -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => Err(ParseError::Expected { expected: description.to_string(),
                                                        found:    format!("{tok:?}"),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes any run of semicolons. Statements may be terminated by an
/// optional `;`, and several in a row are legal.
pub(in crate::interpreter::parser) fn absorb_semicolons<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}
