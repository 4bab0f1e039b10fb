//! Stencil error handling.
//!
//! One error enum for the whole crate. Argument errors are caller contract
//! violations raised by the tagged-value core; syntax and I/O errors come
//! from the template pipeline and the CLI.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::location::SourceLocation;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The document a diagnostic points into.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.clone())
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum StencilError {
    #[error("illegal argument: {what} must not be absent")]
    #[diagnostic(
        code(stencil::argument::absent_value),
        help("synthesize a placeholder value instead of passing none")
    )]
    AbsentValue { what: &'static str },

    #[error("illegal argument: cannot combine an empty set of tagged values")]
    #[diagnostic(code(stencil::argument::empty_combination))]
    EmptyCombination,

    #[error("syntax error at {location}: {message}")]
    #[diagnostic(code(stencil::parse))]
    Syntax {
        message: String,
        location: SourceLocation,
        #[source_code]
        src: NamedSource<String>,
        #[label("{label}")]
        span: SourceSpan,
        label: String,
    },

    #[error("failed to read {path}")]
    #[diagnostic(code(stencil::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StencilError {
    /// True for the caller-contract violations of the tagged-value core.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, Self::AbsentValue { .. } | Self::EmptyCombination)
    }

    /// Where the error points in its document, if anywhere.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Syntax { location, .. } => Some(*location),
            _ => None,
        }
    }

    pub(crate) fn syntax(
        source: &SourceContext,
        message: impl Into<String>,
        label: impl Into<String>,
        location: SourceLocation,
        bytes: std::ops::Range<usize>,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            location,
            src: source.to_named_source(),
            span: SourceSpan::from(bytes),
            label: label.into(),
        }
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a StencilError with full miette diagnostics.
pub fn print_error(error: StencilError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
