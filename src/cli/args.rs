//! Defines the command-line arguments and subcommands for the Stencil CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::render::RenderFormat;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "stencil",
    version,
    about = "Lex and parse templates, keeping every token tied to its source location."
)]
pub struct StencilArgs {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the located tokens of a template.
    Tokens(RenderArgs),
    /// Print the located blocks of a template.
    Tree(RenderArgs),
    /// Parse a template and report the first syntax error, if any.
    Check {
        /// The path to the template file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// Options shared by the commands that print tagged values.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// The path to the template file.
    #[arg(required = true)]
    pub file: PathBuf,

    /// `plain` prints bare values, `full` prints `value@(line,column)`.
    #[arg(short, long)]
    pub format: Option<RenderFormat>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Locale tag for numeric formatting, e.g. `de-DE`.
    #[arg(long)]
    pub locale: Option<String>,
}

impl RenderArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            locale: self.locale.clone(),
            format: self.format,
            json: self.json,
        }
    }
}
