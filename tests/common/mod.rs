//! Shared harness for end-to-end CLI tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// The temp directory is cleaned up on drop. Commands built through
/// [`TestEnv::cmd`] point `--dir` at the notes directory and redirect the
/// config lookup into the temp directory, so a developer's real config file
/// never leaks into a test.
pub struct TestEnv {
    _temp_dir: TempDir,
    notes_dir: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create notes directory");
        std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_home,
        }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn journal_dir(&self) -> PathBuf {
        self.notes_dir.join("journal")
    }

    pub fn db_path(&self) -> PathBuf {
        self.notes_dir.join(".loam").join("loam.db")
    }

    /// Writes an org file into the notes directory and returns its path.
    pub fn write_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }

    /// Writes an org file into the journal directory and returns its path.
    pub fn write_journal(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.journal_dir();
        std::fs::create_dir_all(&dir).expect("Failed to create journal directory");
        let path = dir.join(name);
        std::fs::write(&path, content).expect("Failed to write journal entry");
        path
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("loam").expect("Failed to find loam binary");
        cmd.arg("--dir").arg(&self.notes_dir);
        cmd.env("XDG_CONFIG_HOME", &self.config_home);
        cmd.env("HOME", self._temp_dir.path());
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a minimal identified org note.
pub fn org_note(id: &str, title: &str, body: &str) -> String {
    format!(":PROPERTIES:\n:ID: {id}\n:END:\n#+TITLE: {title}\n\n{body}")
}
