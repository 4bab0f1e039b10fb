//! The Stencil Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{fs, path::Path, process};

use clap::Parser;
use log::info;

use crate::config::FrontEndConfig;
use crate::errors::{print_error, SourceContext, StencilError};
use crate::syntax::{parse, tokenize};

pub mod args;
pub mod diagnostics;
pub mod logger;
pub mod output;

use args::{Command, RenderArgs, StencilArgs};
use diagnostics::{print_diagnostic_to_stderr, SourceDiagnostic};

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = StencilArgs::parse();
    logger::init(args.verbose);

    let result = match args.command {
        Command::Tokens(render) => handle_tokens(&render),
        Command::Tree(render) => handle_tree(&render),
        Command::Check { file } => handle_check(&file),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_tokens(render: &RenderArgs) -> Result<(), StencilError> {
    let source = read_source(&render.file)?;
    let config = FrontEndConfig::resolve(source.name.clone(), render.overrides());
    let tokens = tokenize(&source)?;
    output::write_tokens(&mut output::stdout(), &tokens, &config)
        .map_err(|e| io_error(&render.file, e))
}

fn handle_tree(render: &RenderArgs) -> Result<(), StencilError> {
    let source = read_source(&render.file)?;
    let config = FrontEndConfig::resolve(source.name.clone(), render.overrides());
    let document = parse(&source)?;
    output::write_document(&mut output::stdout(), &document, &config)
        .map_err(|e| io_error(&render.file, e))
}

/// Reports syntax errors as source snippets instead of miette reports.
fn handle_check(file: &Path) -> Result<(), StencilError> {
    let source = read_source(file)?;
    match parse(&source) {
        Ok(document) => {
            println!("{}: ok ({} blocks)", source.name, document.nodes.len());
            Ok(())
        }
        Err(e) => {
            print_diagnostic_to_stderr(&SourceDiagnostic::new(&e, Some(&source.content)));
            process::exit(1);
        }
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn read_source(path: &Path) -> Result<SourceContext, StencilError> {
    info!("reading {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(SourceContext::from_file(path.display().to_string(), content))
}

fn io_error(path: &Path, source: std::io::Error) -> StencilError {
    StencilError::Io {
        path: path.display().to_string(),
        source,
    }
}
