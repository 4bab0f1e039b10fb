//! Stencil Parser
//!
//! Folds the located tokens of each top-level construct into one located
//! block. The block's location comes from the span combinator, so it is
//! always the start of its earliest token.

use log::debug;
use pest::iterators::Pair;

use crate::errors::{SourceContext, StencilError};
use crate::span::{self, Span};
use crate::syntax::lexer::{collect_tokens, parse_pairs, Rule};
use crate::syntax::{Block, Document, SourceText, SyntaxNode, Token};
use crate::tagged::Tagged;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a template into located blocks.
pub fn parse(source: &SourceContext) -> Result<Document, StencilError> {
    let text = SourceText::new(&source.content);
    let pairs = parse_pairs(source, &text)?;

    let mut nodes = Vec::new();
    for pair in pairs.flat_map(|document| document.into_inner()) {
        if pair.as_rule() == Rule::EOI {
            continue;
        }
        nodes.push(build_node(pair, source, &text)?);
    }

    Ok(Document {
        name: source.name.clone(),
        nodes,
    })
}

// ============================================================================
// NODE BUILDERS
// ============================================================================

fn build_node(
    pair: Pair<Rule>,
    source: &SourceContext,
    text: &SourceText,
) -> Result<SyntaxNode, StencilError> {
    let rule = pair.as_rule();
    let bytes = pair.as_span().start()..pair.as_span().end();
    let mut tokens = Vec::new();
    collect_tokens(pair, text, &mut tokens);

    let value = match rule {
        Rule::markup => Block::Markup(span::concat(&tokens)?.into_value()),
        Rule::escaped_transition => Block::EscapedTransition,
        Rule::comment => Block::Comment(inner_text(&tokens, 2, 2)),
        Rule::code_block => Block::CodeBlock(inner_text(&tokens, 2, 1)),
        Rule::explicit_expression => Block::Expression {
            code: inner_text(&tokens, 2, 1),
            implicit: false,
        },
        Rule::implicit_expression => Block::Expression {
            code: span::concat(tokens.iter().skip(1))?.into_value(),
            implicit: true,
        },
        rule => {
            return Err(StencilError::syntax(
                source,
                format!("unsupported construct: {rule:?}"),
                "here",
                text.location_at(bytes.start),
                bytes,
            ))
        }
    };

    let block = span::combine(value, &tokens)?;
    let span = span::covering_span(tokens.iter().map(Span::of_text))?;
    debug!("folded {} {:#}", block.type_name(), block);

    Ok(SyntaxNode {
        block,
        span,
        tokens,
    })
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Text of `tokens` without `lead` opening and `trail` closing delimiters.
fn inner_text(tokens: &[Tagged<Token>], lead: usize, trail: usize) -> String {
    let end = tokens.len().saturating_sub(trail).max(lead);
    tokens[lead.min(tokens.len())..end.min(tokens.len())]
        .iter()
        .map(|token| token.text.as_str())
        .collect()
}
