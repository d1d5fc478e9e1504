//! Command-line argument structures.
//!
//! Isolates clap derivations so lint expectations remain scoped, keeping
//! `main.rs` focused on runtime logic. Every subcommand also derives
//! `OrthoConfig`, so its options can come from a config file or `CODEI_*`
//! environment variables as well as the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Serde predicate for boolean flags: skip serializing a `false` CLI default
/// so it cannot mask a value from configuration or the environment.
#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's skip_serializing_if passes a reference"
)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Footer shown in `--help`: options may also come from a config file or
/// the environment.
pub const CONFIG_HELP: &str = "Options may also be set in a config file (`.codei.toml`, or the path \
in CODEI_CONFIG_PATH) under [cmds.<subcommand>], or through CODEI_* environment variables. \
Command-line flags take precedence.";

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "codei",
    version,
    about = "Save editor settings as templates and apply them to new projects",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available settings templates
    #[command(after_help = CONFIG_HELP)]
    List(ListArgs),
    /// Save the local settings as a named template
    #[command(after_help = CONFIG_HELP)]
    Create(CreateArgs),
    /// Create or update the local settings from a template
    ///
    /// `overwrite` can also be switched on from a config file or the
    /// environment, so the template may win without `--overwrite` being
    /// passed.
    #[command(after_help = CONFIG_HELP)]
    Init(InitArgs),
}

/// Parameters accepted by the `list` sub-command.
#[derive(Parser, Deserialize, Serialize, Default, Debug, OrthoConfig, Clone)]
#[command(name = "list")]
#[ortho_config(prefix = "CODEI")]
pub struct ListArgs {
    /// Directory holding the templates
    #[arg(long, value_name = "DIR")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

/// Parameters accepted by the `create` sub-command.
#[derive(Parser, Deserialize, Serialize, Default, Debug, OrthoConfig, Clone)]
#[command(name = "create")]
#[ortho_config(prefix = "CODEI")]
pub struct CreateArgs {
    /// Name to save the local settings under
    #[arg(required = true)]
    // Clap marks the argument as required so parsing yields `Some(value)`. The
    // `Option` allows `CreateArgs::default()` and config merging to leave it unset.
    pub name: Option<String>,
    /// Replace an existing template with the same name
    #[arg(short = 'o', long)]
    #[serde(default, skip_serializing_if = "is_false")]
    pub overwrite: bool,
    /// Directory holding the templates
    #[arg(long, value_name = "DIR")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

/// Parameters accepted by the `init` sub-command.
#[derive(Parser, Deserialize, Serialize, Default, Debug, OrthoConfig, Clone)]
#[command(name = "init")]
#[ortho_config(prefix = "CODEI")]
pub struct InitArgs {
    /// Settings template to use for initialization
    #[arg(required = true)]
    pub project_type: Option<String>,
    /// Let the template win over local settings on conflicting keys
    #[arg(short = 'o', long)]
    #[serde(default, skip_serializing_if = "is_false")]
    pub overwrite: bool,
    /// Print the resulting changes instead of writing them
    #[arg(long)]
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,
    /// Directory holding the templates
    #[arg(long, value_name = "DIR")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}
