//! Temporary project layout for binary tests.
//!
//! Each [`Project`] owns a templates directory and a working directory so
//! tests never touch the real templates beside the built executable.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct Project {
    root: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        fs::create_dir_all(root.path().join("configs")).expect("create templates dir");
        fs::create_dir_all(root.path().join("work")).expect("create working dir");
        Self { root }
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.path().join("configs")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.work_dir().join(".vscode").join("settings.json")
    }

    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir().join(format!("{name}.json"))
    }

    pub fn write_template(&self, name: &str, value: &Value) {
        fs::write(self.template_path(name), value.to_string()).expect("write template");
    }

    pub fn write_settings(&self, value: &Value) {
        let path = self.settings_path();
        fs::create_dir_all(path.parent().expect("settings dir")).expect("create settings dir");
        fs::write(path, value.to_string()).expect("write settings");
    }

    pub fn read_json(path: PathBuf) -> Value {
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
        serde_json::from_str(&text).expect("parse json")
    }

    /// `codei` run from the working directory with `--templates-dir` set.
    pub fn codei(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("codei").expect("binary");
        cmd.current_dir(self.work_dir())
            .env_remove("CODEI_CONFIG_PATH")
            .args(args)
            .arg("--templates-dir")
            .arg(self.templates_dir());
        cmd
    }
}
