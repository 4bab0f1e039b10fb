//! Handles all user-facing output for the CLI.
//!
//! Token and block listings, in text or JSON. Writers take any `WriteColor`
//! so tests can capture output in a plain buffer.

use std::io::{self, Write};

use serde_json::{json, Value};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::FrontEndConfig;
use crate::render::render;
use crate::syntax::{Document, Token};
use crate::tagged::Tagged;

// ============================================================================
// STREAMS
// ============================================================================

/// Colour only when the stream is a terminal.
pub fn color_choice(stream: atty::Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(color_choice(atty::Stream::Stdout))
}

// ============================================================================
// LISTINGS
// ============================================================================

/// One token per line: kind, then the rendered token.
pub fn write_tokens(
    writer: &mut impl WriteColor,
    tokens: &[Tagged<Token>],
    config: &FrontEndConfig,
) -> io::Result<()> {
    if config.json {
        return write_json(writer, &json!({ "source": config.source_name, "tokens": tokens }));
    }

    for token in tokens {
        let color = if token.kind.is_meta() {
            Color::Yellow
        } else {
            Color::Green
        };
        writer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(writer, "{:<12}", token.kind.name())?;
        writer.reset()?;
        writeln!(writer, " {}", escape(&render(token, config.format, Some(&config.locale))))?;
    }
    Ok(())
}

/// One block per line: block type, then the rendered block.
pub fn write_document(
    writer: &mut impl WriteColor,
    document: &Document,
    config: &FrontEndConfig,
) -> io::Result<()> {
    if config.json {
        return write_json(
            writer,
            &json!({ "source": config.source_name, "nodes": document.nodes }),
        );
    }

    for node in &document.nodes {
        writer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(writer, "{:<18}", node.block.type_name())?;
        writer.reset()?;
        writeln!(
            writer,
            " {}",
            escape(&render(&node.block, config.format, Some(&config.locale)))
        )?;
    }
    Ok(())
}

/// Listings in JSON are keyed by the document name they came from.
fn write_json(writer: &mut impl Write, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

/// Keeps each listing entry on one line.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
