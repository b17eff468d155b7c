use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`. A `.` not followed
    /// by a digit is left for the next token.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens, delimited by `"` or `'`. Escapes are decoded
    /// during lexing; every unescaped `${` in the body is recorded as an
    /// interpolation marker, which makes the literal a template.
    #[regex(r#""([^"\\]|\\.)*""#, decode_string)]
    #[regex(r"'([^'\\]|\\.)*'", decode_string)]
    Str(StringLit),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `let`
    #[token("let")]
    Let,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `while`
    #[token("while")]
    While,
    /// `and` / `&&`
    #[token("and")]
    #[token("&&")]
    And,
    /// `or` / `||`
    #[token("or")]
    #[token("||")]
    Or,
    /// `not` / `!`
    #[token("not")]
    #[token("!")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `user`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `?.`
    #[token("?.")]
    SafeDot,
    /// `?:`
    #[token("?:")]
    Elvis,
    /// Newlines advance the line counter and are otherwise skipped;
    /// statements are not newline-terminated.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// The decoded payload of a string literal token.
///
/// Marker positions are recorded while decoding, because afterwards an
/// escaped `\$` is byte-for-byte identical to a real `$` — only the lexer
/// knows which `${` occurrences were genuine.
#[derive(Debug, PartialEq, Clone)]
pub struct StringLit {
    /// The body with escape sequences already decoded.
    pub value:   String,
    /// Byte offsets into `value` where an unescaped `${` marker begins.
    /// Empty for a plain string; non-empty makes the literal a template.
    pub markers: Vec<usize>,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of that line's start,
/// which together give the line/column pairs cited by lexical errors.
pub struct LexerExtras {
    /// The current line number (1-based) in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line begins.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Decodes the body of a quoted string literal.
///
/// The surrounding quotes are stripped and escape sequences are mapped:
/// `\n`, `\t`, `\r`, `\\`, `\"`, `\'`, `\$` become newline, tab, carriage
/// return, backslash, the quotes, and a literal dollar; any other escaped
/// character yields itself. An unescaped `$` immediately followed by `{`
/// records an interpolation marker at its decoded byte offset, so an
/// escaped `\${` stays literal even when the same body also contains a
/// genuine marker.
///
/// String bodies may span lines; the line counter in the lexer extras is
/// advanced for every newline the body contains.
fn decode_string(lex: &mut logos::Lexer<Token>) -> StringLit {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];

    for (index, byte) in body.bytes().enumerate() {
        if byte == b'\n' {
            lex.extras.line += 1;
            lex.extras.line_start = lex.span().start + 1 + index + 1;
        }
    }

    let mut value = String::with_capacity(body.len());
    let mut markers = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some(other) => value.push(other),
                None => {},
            }
        } else {
            if c == '$' && chars.peek() == Some(&'{') {
                markers.push(value.len());
            }
            value.push(c);
        }
    }

    StringLit { value, markers }
}

/// Tokenizes a complete source string.
///
/// Produces the finite token sequence consumed by the parser, paired with
/// each token's 1-based source line. Whitespace, newlines, and `//` line
/// comments are skipped. The sequence has no explicit end-of-input sentinel;
/// the parser treats iterator exhaustion as the sentinel.
///
/// # Errors
/// Returns a [`ParseError`] citing line and column when the input contains
/// a character no rule accepts, or a string literal that is still open at
/// end of input.
///
/// # Example
/// ```
/// use kodiscript::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 2").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[2].0, Token::Equals);
/// assert_eq!(tokens[3].0, Token::Number(2.0));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();
                let line = lexer.extras.line;
                let column = lexer.span().start.saturating_sub(lexer.extras.line_start) + 1;
                let character = slice.chars().next().unwrap_or('\0');

                return Err(if character == '"' || character == '\'' {
                    ParseError::UnterminatedString { line, column }
                } else {
                    ParseError::UnexpectedCharacter { character,
                                                     line,
                                                     column }
                });
            },
        }
    }

    Ok(tokens)
}
