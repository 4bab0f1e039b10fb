//! Source-snippet presentation of Stencil errors.
//!
//! `SourceDiagnostic` turns an error's location back into the author's
//! line and column (1-based for humans) and draws a caret under the spot.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Write;

use termcolor::{Color, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::errors::StencilError;
use crate::location::SourceLocation;
use crate::syntax::SourceText;

/// Number of lines of context to show before and after the error in code snippets.
const SNIPPET_CONTEXT_LINES: usize = 2;

/// An error together with the text it points into.
pub struct SourceDiagnostic<'a> {
    error: &'a StencilError,
    source: Option<&'a str>,
}

impl<'a> SourceDiagnostic<'a> {
    pub fn new(error: &'a StencilError, source: Option<&'a str>) -> Self {
        Self { error, source }
    }
}

impl Display for SourceDiagnostic<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Error")?;
        if let Some(location) = self.error.location() {
            write!(f, "{}", format_location(&location))?;
        }
        writeln!(f, ":")?;
        writeln!(f, "{}", self.error)?;

        if let Some(snippet) = self.snippet() {
            write!(f, "\n{}", snippet)?;
        }
        Ok(())
    }
}

impl SourceDiagnostic<'_> {
    fn snippet(&self) -> Option<String> {
        let location = self.error.location()?;
        let source = SourceText::new(self.source?);
        Some(generate_code_snippet(&source, &location, label_of(self.error)))
    }
}

// === Formatting Helpers ===

fn format_location(location: &SourceLocation) -> String {
    format!(
        " [at line {}, col {}]",
        location.line_index + 1,
        location.character_index + 1
    )
}

fn label_of(error: &StencilError) -> &str {
    match error {
        StencilError::Syntax { label, .. } => label.as_str(),
        _ => "here",
    }
}

/// Numbered lines around the error with a caret under its column.
fn generate_code_snippet(source: &SourceText, location: &SourceLocation, label: &str) -> String {
    let error_line = location.line_index;
    let first = error_line.saturating_sub(SNIPPET_CONTEXT_LINES);
    let last = (error_line + SNIPPET_CONTEXT_LINES).min(source.line_count() - 1);
    let width = (last + 1).to_string().len();

    let mut result = String::new();
    for index in first..=last {
        let Some(line) = source.line(index) else {
            continue;
        };
        result.push_str(&format!("{:width$} | {}\n", index + 1, line, width = width));

        if index == error_line {
            let prefix: String = line.chars().take(location.character_index).collect();
            result.push_str(&format!(
                "{:width$} | {}^ {}\n",
                "",
                " ".repeat(prefix.width()),
                label,
                width = width
            ));
        }
    }
    result
}

// === Public API ===

/// Prints a diagnostic to standard error, coloured when stderr is a terminal.
pub fn print_diagnostic_to_stderr(diagnostic: &SourceDiagnostic) {
    use termcolor::StandardStream;
    let mut stderr = StandardStream::stderr(super::output::color_choice(atty::Stream::Stderr));
    if print_diagnostic_colored(&mut stderr, diagnostic).is_err() {
        eprintln!("{}", diagnostic);
    }
}

fn print_diagnostic_colored(
    writer: &mut impl WriteColor,
    diagnostic: &SourceDiagnostic,
) -> std::io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(writer, "Error")?;

    writer.reset()?;
    if let Some(location) = diagnostic.error.location() {
        write!(writer, "{}", format_location(&location))?;
    }
    writeln!(writer, ":")?;
    writeln!(writer, "{}", diagnostic.error)?;

    if let Some(snippet) = diagnostic.snippet() {
        write!(writer, "\n{}", snippet)?;
    }

    writer.reset()?;
    Ok(())
}
