//! Syntax module for Stencil templates.
//!
//! Templates mix markup with `@`-prefixed code. The lexer turns text into
//! located tokens; the parser folds those tokens into located blocks. Every
//! value that leaves this module is a [`Tagged`] value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;
use crate::render::LocalizedDisplay;
use crate::span::Span;
use crate::tagged::Tagged;

pub mod lexer;
pub mod parser;
pub mod source;

pub use lexer::tokenize;
pub use parser::parse;
pub use source::SourceText;

// ============================================================================
// TOKENS
// ============================================================================

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `@`
    Transition,
    /// `*` inside a comment delimiter
    Star,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Dot,
    Identifier,
    Markup,
    Code,
    Comment,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Transition => "transition",
            TokenKind::Star => "star",
            TokenKind::OpenBrace => "open-brace",
            TokenKind::CloseBrace => "close-brace",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::Dot => "dot",
            TokenKind::Identifier => "identifier",
            TokenKind::Markup => "markup",
            TokenKind::Code => "code",
            TokenKind::Comment => "comment",
        }
    }

    /// Delimiters and transitions, as opposed to content.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            TokenKind::Transition
                | TokenKind::Star
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace
                | TokenKind::OpenParen
                | TokenKind::CloseParen
        )
    }
}

/// A run of source text with its lexical kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl LocalizedDisplay for Token {}

// ============================================================================
// BLOCKS
// ============================================================================

/// A top-level construct of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    Markup(String),
    /// `@@`, standing for a literal `@`.
    EscapedTransition,
    Comment(String),
    CodeBlock(String),
    Expression { code: String, implicit: bool },
}

impl Block {
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Markup(_) => "Markup",
            Block::EscapedTransition => "EscapedTransition",
            Block::Comment(_) => "Comment",
            Block::CodeBlock(_) => "CodeBlock",
            Block::Expression { implicit: true, .. } => "ImplicitExpression",
            Block::Expression { implicit: false, .. } => "ExplicitExpression",
        }
    }

    /// The block's content without delimiters.
    pub fn content(&self) -> &str {
        match self {
            Block::Markup(text)
            | Block::Comment(text)
            | Block::CodeBlock(text)
            | Block::Expression { code: text, .. } => text,
            Block::EscapedTransition => "@",
        }
    }
}

impl fmt::Display for Block {
    /// Writes the block back out as template source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Markup(text) => f.write_str(text),
            Block::EscapedTransition => f.write_str("@@"),
            Block::Comment(text) => write!(f, "@*{text}*@"),
            Block::CodeBlock(code) => write!(f, "@{{{code}}}"),
            Block::Expression {
                code,
                implicit: true,
            } => write!(f, "@{code}"),
            Block::Expression {
                code,
                implicit: false,
            } => write!(f, "@({code})"),
        }
    }
}

impl LocalizedDisplay for Block {}

/// A parsed block with the tokens it was folded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub block: Tagged<Block>,
    pub span: Span,
    pub tokens: Vec<Tagged<Token>>,
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub nodes: Vec<SyntaxNode>,
}

impl Document {
    /// The region all nodes cover, or `None` for an empty document.
    pub fn span(&self) -> Option<Span> {
        crate::span::covering_span(self.nodes.iter().map(|node| node.span)).ok()
    }

    /// Reassembles the template text from its blocks.
    pub fn to_source(&self) -> String {
        self.nodes
            .iter()
            .map(|node| node.block.to_string())
            .collect()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Tagged<Block>> {
        self.nodes.iter().map(|node| &node.block)
    }

    /// The node under a cursor position.
    pub fn node_at(&self, location: &SourceLocation) -> Option<&SyntaxNode> {
        self.nodes.iter().find(|node| node.span.contains(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_display_round_trips_delimiters() {
        assert_eq!(Block::EscapedTransition.to_string(), "@@");
        assert_eq!(Block::Comment(" x ".into()).to_string(), "@* x *@");
        assert_eq!(Block::CodeBlock(" var a = 1; ".into()).to_string(), "@{ var a = 1; }");
        let implicit = Block::Expression {
            code: "model.name".into(),
            implicit: true,
        };
        assert_eq!(implicit.to_string(), "@model.name");
        assert_eq!(implicit.type_name(), "ImplicitExpression");
        let explicit = Block::Expression {
            code: "a + b".into(),
            implicit: false,
        };
        assert_eq!(explicit.to_string(), "@(a + b)");
        assert_eq!(explicit.content(), "a + b");
    }

    #[test]
    fn test_token_kinds() {
        assert!(TokenKind::Transition.is_meta());
        assert!(!TokenKind::Identifier.is_meta());
        assert_eq!(TokenKind::CloseParen.name(), "close-paren");
    }
}
