//! Golden master tests for diagnostic output.
//!
//! These tests capture the exact formatted output of `SourceDiagnostic`
//! to ensure consistent error presentation across changes.

use stencil::cli::diagnostics::SourceDiagnostic;
use stencil::syntax::parse;
use stencil::{SourceContext, StencilError};

/// Test helper to capture diagnostic output as a string.
fn capture_diagnostic_output(error: &StencilError, source: Option<&str>) -> String {
    let diagnostic = SourceDiagnostic::new(error, source);
    format!("{}", diagnostic)
}

fn parse_error(text: &str) -> StencilError {
    parse(&SourceContext::from_file("test", text)).unwrap_err()
}

#[test]
fn test_dangling_transition_diagnostic() {
    let source = "ab\n@ x\ncd";
    let error = parse_error(source);

    let output = capture_diagnostic_output(&error, Some(source));

    let expected = "Error [at line 2, col 2]:
syntax error at (1,1): expected an identifier, '(', '{' or '*' after '@'

1 | ab
2 | @ x
  |  ^ dangling transition
3 | cd
";

    assert_eq!(output, expected);
}

#[test]
fn test_syntax_error_without_source() {
    let error = parse_error("ab\n@ x\ncd");

    let output = capture_diagnostic_output(&error, None);

    let expected = "Error [at line 2, col 2]:
syntax error at (1,1): expected an identifier, '(', '{' or '*' after '@'
";

    assert_eq!(output, expected);
}

#[test]
fn test_unclosed_block_points_at_end_of_input() {
    let source = "<p>\n@{ var x = 1;";
    let error = parse_error(source);

    assert_eq!(error.location().map(|l| l.line_index), Some(1));
    let output = capture_diagnostic_output(&error, Some(source));
    assert!(output.starts_with("Error [at line 2, col 14]:"), "{output}");
    assert!(output.contains("missing closing brace"), "{output}");
}

#[test]
fn test_argument_error_has_no_location() {
    let error = StencilError::EmptyCombination;

    let output = capture_diagnostic_output(&error, Some("anything"));

    let expected = "Error:
illegal argument: cannot combine an empty set of tagged values
";

    assert_eq!(output, expected);
}
