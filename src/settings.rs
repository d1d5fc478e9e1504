//! Reading and writing settings documents.
//!
//! Documents are JSON objects. They are always written with sorted keys,
//! four-space indentation and a trailing newline so that saved files diff
//! cleanly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::CodeiError;

/// A settings document: string keys mapped to arbitrary JSON values.
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Directory holding the local settings file, relative to the working directory.
pub const SETTINGS_DIR: &str = ".vscode";

/// File name of the local settings file inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "settings.json";

const INDENT: &[u8] = b"    ";

/// Parse `text` as a settings document.
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Returns [`CodeiError::InvalidDocument`] when `text` is not valid JSON or
/// its root is not an object.
pub fn parse(text: &str, path: &Path) -> Result<Settings, CodeiError> {
    let mut de = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut de).map_err(|source| CodeiError::InvalidDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a document in the persisted layout.
///
/// # Errors
///
/// Returns [`CodeiError::Serialize`] if serialization fails.
///
/// # Examples
///
/// ```
/// use codei::settings::{Settings, render};
/// use serde_json::json;
///
/// let mut doc = Settings::new();
/// doc.insert("b".into(), json!(1));
/// doc.insert("a".into(), json!({"c": true}));
/// let text = render(&doc).unwrap();
/// assert_eq!(text, "{\n    \"a\": {\n        \"c\": true\n    },\n    \"b\": 1\n}\n");
/// ```
pub fn render(doc: &Settings) -> Result<String, CodeiError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| CodeiError::Serialize(serde::ser::Error::custom(e)))
}

/// Read and parse the document at `path`, returning `None` when it is absent.
///
/// # Errors
///
/// Returns [`CodeiError::Io`] for read failures other than a missing file and
/// [`CodeiError::InvalidDocument`] when the contents are not a JSON object.
pub fn read_optional(path: &Path) -> Result<Option<Settings>, CodeiError> {
    match fs::read_to_string(path) {
        Ok(text) => parse(&text, path).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CodeiError::io(path, e)),
    }
}

/// Write `doc` to `path`, creating parent directories as required.
///
/// # Errors
///
/// Returns [`CodeiError::Io`] if a directory or the file cannot be written.
pub fn write(path: &Path, doc: &Settings) -> Result<(), CodeiError> {
    let text = render(doc)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CodeiError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| CodeiError::io(path, e))?;
    debug!("wrote settings to {}", path.display());
    Ok(())
}

/// The settings file belonging to a working directory.
#[derive(Debug, Clone)]
pub struct LocalSettings {
    path: PathBuf,
}

impl LocalSettings {
    /// Locate the settings file for the working directory `root`.
    ///
    /// Nothing is read or created until a document is loaded or stored.
    #[must_use]
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(SETTINGS_DIR).join(SETTINGS_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current document, if there is one.
    ///
    /// # Errors
    ///
    /// See [`read_optional`].
    pub fn load(&self) -> Result<Option<Settings>, CodeiError> {
        read_optional(&self.path)
    }

    /// Replace the file with `doc`, creating the settings directory first.
    ///
    /// # Errors
    ///
    /// See [`write`].
    pub fn store(&self, doc: &Settings) -> Result<(), CodeiError> {
        write(&self.path, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    #[rstest]
    #[case::array_root("[1, 2]")]
    #[case::scalar_root("3")]
    #[case::truncated("{\"a\": ")]
    fn parse_rejects_non_objects(#[case] text: &str) {
        let err = parse(text, Path::new("bad.json")).expect_err("should reject");
        assert!(matches!(err, CodeiError::InvalidDocument { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn parse_reports_json_path() {
        let err = parse("{\"editor\": {\"fontSize\": }}", Path::new("s.json"))
            .expect_err("should reject");
        match err {
            CodeiError::InvalidDocument { source, .. } => {
                assert_eq!(source.path().to_string(), "editor.fontSize");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn render_sorts_keys() {
        let doc = parse(r#"{"z": 1, "a": 2, "m": {"y": 0, "b": 0}}"#, Path::new("x"))
            .expect("parse");
        let text = render(&doc).expect("render");
        let a = text.find("\"a\"").expect("a");
        let m = text.find("\"m\"").expect("m");
        let z = text.find("\"z\"").expect("z");
        assert!(a < m && m < z);
        assert!(text.find("\"b\"").expect("b") < text.find("\"y\"").expect("y"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn render_keeps_non_ascii_text() {
        let doc = parse(r#"{"workbench.colorTheme": "Solarisé ☀"}"#, Path::new("x"))
            .expect("parse");
        let text = render(&doc).expect("render");
        assert_eq!(text, "{\n    \"workbench.colorTheme\": \"Solarisé ☀\"\n}\n");
    }

    #[test]
    fn read_optional_missing_is_none() {
        let dir = TempDir::new().expect("create temp dir");
        let doc = read_optional(&dir.path().join("absent.json")).expect("read");
        assert!(doc.is_none());
    }

    #[test]
    fn local_settings_store_creates_directory() {
        let dir = TempDir::new().expect("create temp dir");
        let local = LocalSettings::in_dir(dir.path());
        assert!(local.load().expect("load").is_none());

        let doc = parse(r#"{"editor.tabSize": 4}"#, local.path()).expect("parse");
        local.store(&doc).expect("store");

        assert!(dir.path().join(".vscode").is_dir());
        let loaded = local.load().expect("load").expect("present");
        assert_eq!(loaded.get("editor.tabSize"), Some(&json!(4)));
    }
}
