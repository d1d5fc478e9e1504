//! Named settings templates kept as `<name>.json` files in one directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::CodeiError;
use crate::settings::{self, Settings};

/// Extension of template files.
pub const TEMPLATE_EXTENSION: &str = "json";

/// Directory name, next to the executable, holding the bundled templates.
pub const DEFAULT_TEMPLATES_DIR: &str = "configs";

static TEMPLATE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").expect("valid regex"));

/// Result of saving a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The template file was written.
    Written,
    /// A template of that name exists and overwriting was not requested.
    Exists,
}

/// Check that `name` can be used as a template file stem.
///
/// # Errors
///
/// Returns [`CodeiError::InvalidTemplateName`] for empty names, names with
/// path separators or other unexpected characters, and names starting with
/// `.`.
pub fn validate_name(name: &str) -> Result<(), CodeiError> {
    if TEMPLATE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(CodeiError::InvalidTemplateName(name.to_owned()))
    }
}

/// Locate the default templates directory: `configs/` beside the running
/// executable, after resolving symlinks.
///
/// # Errors
///
/// Returns [`CodeiError::TemplatesDirUnknown`] when the executable path
/// cannot be determined.
pub fn default_templates_dir() -> Result<PathBuf, CodeiError> {
    let exe = std::env::current_exe().map_err(CodeiError::TemplatesDirUnknown)?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(base.join(DEFAULT_TEMPLATES_DIR))
}

/// A directory of templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing template `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CodeiError::InvalidTemplateName`] if `name` is not a valid
    /// file stem.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, CodeiError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{TEMPLATE_EXTENSION}")))
    }

    /// Load template `name`, returning `None` when no such template exists.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid names, unreadable files, or files that
    /// are not JSON objects.
    pub fn load(&self, name: &str) -> Result<Option<Settings>, CodeiError> {
        let path = self.path_for(name)?;
        debug!("looking up template {name} at {}", path.display());
        settings::read_optional(&path)
    }

    /// Whether template `name` exists.
    ///
    /// # Errors
    ///
    /// Returns [`CodeiError::InvalidTemplateName`] for invalid names.
    pub fn contains(&self, name: &str) -> Result<bool, CodeiError> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Save `doc` as template `name`.
    ///
    /// An existing template is only replaced when `overwrite` is set.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid names or when the file cannot be written.
    pub fn save(
        &self,
        name: &str,
        doc: &Settings,
        overwrite: bool,
    ) -> Result<SaveOutcome, CodeiError> {
        let path = self.path_for(name)?;
        if path.is_file() && !overwrite {
            return Ok(SaveOutcome::Exists);
        }
        settings::write(&path, doc)?;
        info!("saved template {name} to {}", path.display());
        Ok(SaveOutcome::Written)
    }

    /// Names of all templates, sorted.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CodeiError::Io`] if the directory exists but cannot be read.
    pub fn names(&self) -> Result<Vec<String>, CodeiError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CodeiError::io(&self.dir, e)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CodeiError::io(&self.dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) && path.is_file() {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    #[fixture]
    fn store_dir() -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join("rust.json"), r#"{"editor.formatOnSave": true}"#)
            .expect("write rust");
        fs::write(dir.path().join("python.json"), r#"{"python.analysis": {}}"#)
            .expect("write python");
        fs::write(dir.path().join("notes.txt"), "not a template").expect("write notes");
        dir
    }

    fn doc(value: serde_json::Value) -> Settings {
        value.as_object().cloned().expect("object")
    }

    #[rstest]
    #[case("python")]
    #[case("rust-2024")]
    #[case("web_app.v2")]
    fn validate_name_accepts(#[case] name: &str) {
        assert!(validate_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case("nested/name")]
    #[case(".hidden")]
    #[case("with space")]
    fn validate_name_rejects(#[case] name: &str) {
        assert!(matches!(
            validate_name(name),
            Err(CodeiError::InvalidTemplateName(n)) if n == name
        ));
    }

    #[rstest]
    fn names_lists_json_stems_sorted(store_dir: TempDir) {
        let store = TemplateStore::new(store_dir.path());
        assert_eq!(store.names().expect("names"), ["python", "rust"]);
    }

    #[test]
    fn names_of_missing_directory_is_empty() {
        let dir = TempDir::new().expect("create temp dir");
        let store = TemplateStore::new(dir.path().join("nope"));
        assert!(store.names().expect("names").is_empty());
    }

    #[rstest]
    fn load_known_and_unknown(store_dir: TempDir) {
        let store = TemplateStore::new(store_dir.path());
        let rust = store.load("rust").expect("load").expect("present");
        assert_eq!(rust.get("editor.formatOnSave"), Some(&json!(true)));
        assert!(store.load("go").expect("load").is_none());
    }

    #[rstest]
    fn save_respects_overwrite(store_dir: TempDir) {
        let store = TemplateStore::new(store_dir.path());
        let replacement = doc(json!({"editor.formatOnSave": false}));

        let outcome = store.save("rust", &replacement, false).expect("save");
        assert_eq!(outcome, SaveOutcome::Exists);
        let kept = store.load("rust").expect("load").expect("present");
        assert_eq!(kept.get("editor.formatOnSave"), Some(&json!(true)));

        let outcome = store.save("rust", &replacement, true).expect("save");
        assert_eq!(outcome, SaveOutcome::Written);
        let replaced = store.load("rust").expect("load").expect("present");
        assert_eq!(replaced, replacement);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = TempDir::new().expect("create temp dir");
        let store = TemplateStore::new(dir.path().join("configs"));
        let outcome = store
            .save("fresh", &doc(json!({"a": 1})), false)
            .expect("save");
        assert_eq!(outcome, SaveOutcome::Written);
        assert!(store.contains("fresh").expect("contains"));
    }
}
