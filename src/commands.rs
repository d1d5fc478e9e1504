//! Command execution helpers for `codei`.
//!
//! This module owns the runtime flow for each subcommand: resolving the
//! templates directory, running the workflow and reporting the outcome to the
//! terminal. Configuration layering happens before these functions are
//! called.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use codei::cli_args::{CreateArgs, InitArgs, ListArgs};
use codei::templates::default_templates_dir;
use codei::workflow::{plan_init, save_local_as_template};
use codei::{CodeiError, InitOutcome, LocalSettings, SaveOutcome, TemplateStore};
use log::debug;

fn open_store(dir: Option<PathBuf>) -> Result<TemplateStore, CodeiError> {
    let dir = match dir {
        Some(dir) => dir,
        None => default_templates_dir()?,
    };
    debug!("using templates in {}", dir.display());
    Ok(TemplateStore::new(dir))
}

/// Write one line of user-facing output.
///
/// A closed pipe is not worth failing over; anything else is.
fn say<W: Write>(out: &mut W, line: &str) -> Result<(), CodeiError> {
    match writeln!(out, "{line}") {
        Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(CodeiError::Output(e)),
        _ => Ok(()),
    }
}

fn init_message(outcome: InitOutcome) -> &'static str {
    match outcome {
        InitOutcome::Created => "Creating new settings.json file...",
        InitOutcome::Updated => "Updating existing settings.json file...",
    }
}

pub fn run_list<W: Write>(args: ListArgs, mut out: W) -> Result<(), CodeiError> {
    let store = open_store(args.templates_dir)?;
    let names = store.names()?;
    say(&mut out, &format!("Available settings: {}", names.join(", ")))
}

pub fn run_create<W: Write>(args: CreateArgs, root: &Path, mut out: W) -> Result<(), CodeiError> {
    let name = args.name.unwrap_or_default();
    let store = open_store(args.templates_dir)?;
    let local = LocalSettings::in_dir(root);
    match save_local_as_template(&store, &local, &name, args.overwrite)? {
        SaveOutcome::Written => say(&mut out, &format!("Saved settings as template '{name}'.")),
        SaveOutcome::Exists => say(
            &mut out,
            &format!("Template '{name}' already exists. Use --overwrite to replace it."),
        ),
    }
}

pub fn run_init<W: Write>(args: InitArgs, root: &Path, mut out: W) -> Result<(), CodeiError> {
    let name = args.project_type.unwrap_or_default();
    let store = open_store(args.templates_dir)?;
    let local = LocalSettings::in_dir(root);
    let plan = plan_init(&store, &local, &name, args.overwrite)?;
    if args.dry_run {
        let preview = plan.preview()?;
        return say(&mut out, preview.trim_end());
    }
    say(&mut out, init_message(plan.outcome))?;
    plan.apply(&local)
}
