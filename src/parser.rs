// ABOUTME: Parser module turning lithpy source text into an AST using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag},
    character::complete::{char, digit1, multispace1, none_of, one_of},
    combinator::{opt, recognize},
    multi::many0,
    IResult, Parser,
};

/// An untyped parse-tree node, deliberately shaped like `mpc_ast_t`'s
/// tag/contents/children triple: the Reader (`crate::reader`) dispatches on
/// `tag` exactly as spec.md's §4.1 describes, independent of how this
/// particular parser built the tree.
#[derive(Debug, Clone)]
pub struct AstNode {
    pub tag: &'static str,
    pub contents: String,
    pub children: Vec<AstNode>,
}

impl AstNode {
    fn leaf(tag: &'static str, contents: impl Into<String>) -> Self {
        AstNode {
            tag,
            contents: contents.into(),
            children: Vec::new(),
        }
    }

    fn branch(tag: &'static str, children: Vec<AstNode>) -> Self {
        AstNode {
            tag,
            contents: String::new(),
            children,
        }
    }
}

/// Skips whitespace and `;`-to-end-of-line comments (neither carries
/// semantic meaning, so unlike doc-comment-preserving dialects there's
/// nothing further to capture here).
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    let line_comment = (char(';'), nom::bytes::complete::take_while(|c| c != '\n'));
    many0(alt((
        nom::combinator::value((), multispace1),
        nom::combinator::value((), line_comment),
    )))
    .map(|_| ())
    .parse(input)
}

/// `-?[0-9]+([.][0-9]*)?`
fn parse_number(input: &str) -> IResult<&str, AstNode> {
    recognize((opt(char('-')), digit1, opt((char('.'), opt(digit1)))))
        .map(|s: &str| AstNode::leaf("number", s))
        .parse(input)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\%^=<>!&".contains(c)
}

/// `true|false`, not followed by a further symbol character (so `truest`
/// reads as one symbol rather than the boolean `true` plus a stray `st`).
fn parse_bool(input: &str) -> IResult<&str, AstNode> {
    let (rest, word) = alt((tag("true"), tag("false"))).parse(input)?;
    if rest.chars().next().is_some_and(is_symbol_char) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, AstNode::leaf("bool", word)))
}

/// `[a-zA-Z0-9_+\-*/\\%^=<>!&]+`
fn parse_symbol(input: &str) -> IResult<&str, AstNode> {
    nom::bytes::complete::take_while1(is_symbol_char)
        .map(|s: &str| AstNode::leaf("symbol", s))
        .parse(input)
}

/// `"(\\.|[^"])*"` with C-style escapes unescaped by the reader, not here —
/// `contents` keeps the raw escaped text between the quotes (reader §4.1
/// strips quotes and unescapes).
fn parse_string(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = char('"')(input)?;
    if let Ok((rest, _)) = char::<_, nom::error::Error<_>>('"')(input) {
        return Ok((rest, AstNode::leaf("string", "\"\"")));
    }
    let (input, body) = escaped(none_of("\"\\"), '\\', one_of("\"\\nt")).parse(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, AstNode::leaf("string", format!("\"{}\"", body))))
}

fn parse_sexpr(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws_and_comments(input)?;
    let (input, children) = many0((parse_expr, ws_and_comments).map(|(e, _)| e)).parse(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, AstNode::branch("sexpr", children)))
}

fn parse_qexpr(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = char('{')(input)?;
    let (input, _) = ws_and_comments(input)?;
    let (input, children) = many0((parse_expr, ws_and_comments).map(|(e, _)| e)).parse(input)?;
    let (input, _) = char('}')(input)?;
    Ok((input, AstNode::branch("qexpr", children)))
}

/// Tries the alternatives in the same priority order as the grammar in
/// SPEC_FULL.md §4.1a: number and bool before symbol (so `42` isn't read as
/// a symbol), string and the bracketed forms rounding it out.
fn parse_expr(input: &str) -> IResult<&str, AstNode> {
    alt((
        parse_number,
        parse_bool,
        parse_string,
        parse_sexpr,
        parse_qexpr,
        parse_symbol,
    ))
    .parse(input)
}

/// Parses zero or more top-level expressions into one `"program"` root node
/// (mirrors `lispy`'s `/^/ <expr>* /$/` in the original grammar).
fn parse_program(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = ws_and_comments(input)?;
    let (input, children) = many0((parse_expr, ws_and_comments).map(|(e, _)| e)).parse(input)?;
    Ok((input, AstNode::branch("program", children)))
}

/// Parses an entire source string. Fails if any non-whitespace input is
/// left unconsumed (a malformed trailing token).
pub fn parse(input: &str) -> Result<AstNode, String> {
    match parse_program(input) {
        Ok((rest, node)) if rest.trim().is_empty() => Ok(node),
        Ok((rest, _)) => Err(format!("unexpected input: {:?}", rest)),
        Err(e) => Err(format!("parse error: {}", e)),
    }
}
