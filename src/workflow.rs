//! The two file-changing workflows: initializing local settings from a
//! template and saving local settings as a template.
//!
//! Nothing here prints; callers decide how to report each outcome.

use log::debug;

use crate::CodeiError;
use crate::merge::merge;
use crate::settings::{LocalSettings, Settings, render};
use crate::templates::{SaveOutcome, TemplateStore};

/// How an initialization changes the local settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No local file existed; the template is written as-is.
    Created,
    /// The local file existed and is replaced by the merged document.
    Updated,
}

/// A computed initialization, ready to be previewed or applied.
#[derive(Debug, Clone)]
pub struct InitPlan {
    pub outcome: InitOutcome,
    /// The local document before the change, if there was one.
    pub before: Option<Settings>,
    /// The document that will be written.
    pub after: Settings,
}

/// Work out what initializing from template `name` would produce.
///
/// With `overwrite` unset local values win conflicts; with it set the
/// template's values win. Nothing is written.
///
/// # Errors
///
/// Returns [`CodeiError::TemplateNotFound`] for unknown templates and
/// propagates read and parse failures.
pub fn plan_init(
    store: &TemplateStore,
    local: &LocalSettings,
    name: &str,
    overwrite: bool,
) -> Result<InitPlan, CodeiError> {
    let template = store
        .load(name)?
        .ok_or_else(|| CodeiError::TemplateNotFound(name.to_owned()))?;
    let Some(current) = local.load()? else {
        debug!("no local settings at {}", local.path().display());
        return Ok(InitPlan {
            outcome: InitOutcome::Created,
            before: None,
            after: template,
        });
    };
    let after = if overwrite {
        debug!("merging local settings into template {name}");
        merge(&template, &current)
    } else {
        debug!("merging template {name} into local settings");
        merge(&current, &template)
    };
    Ok(InitPlan {
        outcome: InitOutcome::Updated,
        before: Some(current),
        after,
    })
}

impl InitPlan {
    /// Write the planned document.
    ///
    /// # Errors
    ///
    /// Returns [`CodeiError::Io`] if the settings directory or file cannot be
    /// written.
    pub fn apply(&self, local: &LocalSettings) -> Result<(), CodeiError> {
        local.store(&self.after)
    }

    /// Unified diff from the current document to the planned one.
    ///
    /// Both sides are rendered in the persisted layout, so formatting-only
    /// differences in the existing file are not shown.
    ///
    /// # Errors
    ///
    /// Returns [`CodeiError::Serialize`] if either document cannot be rendered.
    pub fn preview(&self) -> Result<String, CodeiError> {
        let before = self.before.as_ref().map(render).transpose()?.unwrap_or_default();
        let after = render(&self.after)?;
        Ok(diffy::create_patch(&before, &after).to_string())
    }
}

/// Initialize local settings from template `name` in one step.
///
/// # Errors
///
/// See [`plan_init`] and [`InitPlan::apply`].
pub fn init_local(
    store: &TemplateStore,
    local: &LocalSettings,
    name: &str,
    overwrite: bool,
) -> Result<InitOutcome, CodeiError> {
    let plan = plan_init(store, local, name, overwrite)?;
    plan.apply(local)?;
    Ok(plan.outcome)
}

/// Save the local settings as template `name`.
///
/// An existing template is replaced only when `overwrite` is set. Without
/// it, [`SaveOutcome::Exists`] is returned before the local file is read.
///
/// # Errors
///
/// Returns [`CodeiError::MissingLocalSettings`] when there is no local file,
/// plus any name, read or write failure.
pub fn save_local_as_template(
    store: &TemplateStore,
    local: &LocalSettings,
    name: &str,
    overwrite: bool,
) -> Result<SaveOutcome, CodeiError> {
    if store.contains(name)? && !overwrite {
        return Ok(SaveOutcome::Exists);
    }
    let current = local
        .load()?
        .ok_or_else(|| CodeiError::MissingLocalSettings(local.path().to_path_buf()))?;
    store.save(name, &current, overwrite)
}
