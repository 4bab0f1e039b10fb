//! Template lexer.
//!
//! Runs the pest grammar and reads tokens off the leaf pairs, tagging each
//! one with the location of its first character. Tokens come out in
//! document order, so their absolute offsets never decrease.

use log::trace;
use pest::error::{Error, ErrorVariant, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use crate::errors::{SourceContext, StencilError};
use crate::syntax::{SourceText, Token, TokenKind};
use crate::tagged::Tagged;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub(crate) struct TemplateGrammar;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Splits a template into located tokens.
pub fn tokenize(source: &SourceContext) -> Result<Vec<Tagged<Token>>, StencilError> {
    let text = SourceText::new(&source.content);
    let mut tokens = Vec::new();
    for pair in parse_pairs(source, &text)? {
        collect_tokens(pair, &text, &mut tokens);
    }
    trace!("lexed {} tokens from {}", tokens.len(), source.name);
    Ok(tokens)
}

// ============================================================================
// SHARED WITH THE PARSER
// ============================================================================

pub(crate) fn parse_pairs<'i>(
    source: &'i SourceContext,
    text: &SourceText,
) -> Result<Pairs<'i, Rule>, StencilError> {
    TemplateGrammar::parse(Rule::document, &source.content)
        .map_err(|e| convert_parse_error(e, source, text))
}

/// Appends the leaf tokens under `pair` to `out`, in order.
pub(crate) fn collect_tokens(pair: Pair<Rule>, text: &SourceText, out: &mut Vec<Tagged<Token>>) {
    let rule = pair.as_rule();
    let start = pair.as_span().start();
    let lexeme = pair.as_str();
    let mut children = pair.into_inner().peekable();

    if children.peek().is_some() {
        children.for_each(|child| collect_tokens(child, text, out));
        return;
    }

    if let Some(kind) = token_kind(rule) {
        out.push(Tagged::new(Token::new(kind, lexeme), text.location_at(start)));
    }
}

fn token_kind(rule: Rule) -> Option<TokenKind> {
    let kind = match rule {
        Rule::transition => TokenKind::Transition,
        Rule::star => TokenKind::Star,
        Rule::open_brace => TokenKind::OpenBrace,
        Rule::close_brace => TokenKind::CloseBrace,
        Rule::open_paren => TokenKind::OpenParen,
        Rule::close_paren => TokenKind::CloseParen,
        Rule::dot => TokenKind::Dot,
        Rule::identifier => TokenKind::Identifier,
        Rule::markup => TokenKind::Markup,
        Rule::code_text | Rule::expr_text => TokenKind::Code,
        Rule::comment_text => TokenKind::Comment,
        _ => return None,
    };
    Some(kind)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceContext, text: &SourceText) -> StencilError {
    let (start, end) = match error.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span((start, end)) => (start, end),
    };

    let expected: &[Rule] = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => positives,
        ErrorVariant::CustomError { .. } => &[],
    };

    let (message, label) = if expected.contains(&Rule::close_brace) {
        ("missing closing brace", "code block is not closed")
    } else if expected.contains(&Rule::close_paren) {
        ("missing closing parenthesis", "expression is not closed")
    } else if expected.contains(&Rule::identifier) {
        (
            "expected an identifier, '(', '{' or '*' after '@'",
            "dangling transition",
        )
    } else if expected.contains(&Rule::star) {
        ("unterminated comment", "comment is not closed")
    } else {
        ("syntax error", "here")
    };

    // Point at the offending character rather than an empty gap.
    let end = if end > start {
        end
    } else {
        source.content[start..]
            .chars()
            .next()
            .map_or(start, |ch| start + ch.len_utf8())
    };

    StencilError::syntax(source, message, label, text.location_at(start), start..end)
}
