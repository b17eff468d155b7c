use crate::{
    ast::{Expr, TemplatePart},
    error::ParseError,
    interpreter::{
        lexer::tokenize,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Expands the decoded body of a template literal into its parts.
///
/// `markers` holds the byte offsets of the genuine `${` markers the lexer
/// recorded while decoding; the decoded text alone cannot distinguish a
/// real marker from an escaped `\${`, so the body is split on those
/// recorded positions rather than re-scanned. Text between markers becomes
/// literal parts; each marker's content is re-lexed and parsed as one full
/// expression. Marker bodies may contain nested braces (an object literal,
/// for instance); the scan tracks brace depth to find the matching close.
/// A marker recorded inside an earlier marker's braces belongs to that
/// fragment and is skipped here.
///
/// # Errors
/// `InvalidTemplate` when a marker is unterminated or empty, or when its
/// content fails to lex or parse, or leaves trailing tokens.
pub fn expand_template(body: &str,
                       markers: &[usize],
                       line: usize)
                       -> ParseResult<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut cursor = 0usize;

    for &marker in markers {
        if marker < cursor || !body[marker..].starts_with("${") {
            continue;
        }

        if marker > cursor {
            parts.push(TemplatePart::Literal(body[cursor..marker].to_string()));
        }

        let inner_start = marker + 2;
        let mut depth = 1usize;
        let mut inner_end = None;
        for (offset, c) in body[inner_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        inner_end = Some(inner_start + offset);
                        break;
                    }
                },
                _ => {},
            }
        }

        let Some(inner_end) = inner_end else {
            return Err(ParseError::InvalidTemplate { details: "unterminated '${'".to_string(),
                                                     line });
        };

        parts.push(TemplatePart::Expr(parse_fragment(&body[inner_start..inner_end], line)?));
        cursor = inner_end + 1;
    }

    if cursor < body.len() || parts.is_empty() {
        parts.push(TemplatePart::Literal(body[cursor..].to_string()));
    }

    Ok(parts)
}

/// Lexes and parses one interpolation fragment as a full expression,
/// requiring the fragment to be consumed entirely.
fn parse_fragment(fragment: &str, line: usize) -> ParseResult<Expr> {
    if fragment.trim().is_empty() {
        return Err(ParseError::InvalidTemplate { details: "empty '${}' marker".to_string(),
                                                 line });
    }

    let tokens = tokenize(fragment).map_err(|e| ParseError::InvalidTemplate { details:
                                                                                  e.to_string(),
                                                                              line })?;

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, line).map_err(|e| {
                   ParseError::InvalidTemplate { details: e.to_string(),
                                                 line }
               })?;

    if let Some((tok, _)) = iter.peek() {
        return Err(ParseError::InvalidTemplate { details: format!("unexpected trailing token {tok:?}"),
                                                 line });
    }

    Ok(expr)
}
