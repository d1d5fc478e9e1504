//! Configuration loading helpers.
//!
//! Wraps `ortho_config` so subcommand options can be layered from a config
//! file and `CODEI_*` environment variables beneath the command line.
//! Positional names are rarely present in configuration; a gathering failure
//! caused only by their absence falls back to the command-line values.

use figment::error::{Error as FigmentError, Kind as FigmentKind};
use log::debug;
use ortho_config::{OrthoConfig, OrthoError, load_and_merge_subcommand_for};

use crate::CodeiError;

fn missing_field_in(err: &FigmentError, fields: &[&str]) -> bool {
    // FigmentError yields its causes only by value; clone to inspect without ownership.
    err.clone().into_iter().any(|e| {
        matches!(
            e.kind,
            FigmentKind::MissingField(ref f) if fields.iter().any(|name| f == *name)
        )
    })
}

/// Load configuration for a set of CLI arguments, falling back to `cli_args`
/// when gathering fails because one of `optional_fields` is missing.
///
/// # Errors
///
/// Returns [`CodeiError::Config`] if configuration gathering fails for any
/// other reason, such as a malformed config file.
#[expect(
    clippy::result_large_err,
    reason = "configuration loading errors can be verbose"
)]
pub fn load_with_fallback<T>(cli_args: T, optional_fields: &[&str]) -> Result<T, CodeiError>
where
    T: OrthoConfig + serde::Serialize + Default + clap::CommandFactory + Clone,
{
    match load_and_merge_subcommand_for::<T>(&cli_args) {
        Ok(v) => Ok(v),
        Err(OrthoError::Gathering(e)) => {
            if missing_field_in(&e, optional_fields) {
                debug!("configuration incomplete, using command-line values: {e}");
                Ok(cli_args)
            } else {
                Err(OrthoError::Gathering(e).into())
            }
        }
        Err(e) => Err(e.into()),
    }
}
