use std::iter::Peekable;

use crate::{
    ast::Stmt,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::absorb_semicolons},
    },
};

/// Parses a block's statements, assuming the opening `{` has already been
/// consumed.
///
/// A block consists of zero or more statements, each optionally terminated
/// by semicolons, up to the closing `}`.
///
/// Grammar: `block := statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if a statement fails to parse or the input ends
/// before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        absorb_semicolons(tokens);

        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((_, stmt_line)) => {
                let stmt_line = *stmt_line;
                statements.push(parse_statement(tokens, stmt_line)?);
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(statements)
}
