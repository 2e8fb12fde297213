//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - An isolated home directory so no user configuration leaks in
//! - A host directory standing in for drive `C:`
//! - Command builders with the mapping pre-configured

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared for every command.
const LONGPATH_VARS: &[&str] = &[
    "LONGPATH_CONFIG",
    "LONGPATH_FORMAT",
    "LONGPATH_COMPRESS",
    "LONGPATH_CHECK_CHARS",
    "LONGPATH_BASE_DIR",
    "LONGPATH_BUFFER_CAPACITY",
    "LONGPATH_BUFFER_ATTEMPTS",
    "LONGPATH_VOLUMES",
    "LONGPATH_LOG_MODE",
];

/// Test environment with an isolated home and a mapped drive.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Home directory used by the CLI
    pub home: PathBuf,
    /// Host directory mapped as `C:`
    pub drive: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        let drive = temp_dir.path().join("drive-c");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        std::fs::create_dir_all(&drive).expect("Failed to create drive directory");

        Self {
            temp_dir,
            home,
            drive,
        }
    }

    /// Get a command builder with an isolated environment and no mappings.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("longpath").expect("Failed to find longpath binary");
        for var in LONGPATH_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home).env("USERPROFILE", &self.home);
        cmd
    }

    /// Get a command builder with `C:` mapped onto this environment's drive.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--map-volume")
            .arg(format!("C={}", self.drive.display()));
        cmd
    }

    /// The host path of a path below the mapped drive.
    pub fn on_drive(&self, relative: &str) -> PathBuf {
        relative
            .split('\\')
            .filter(|c| !c.is_empty())
            .fold(self.drive.clone(), |path, c| path.join(c))
    }

    /// Create a directory below the mapped drive.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.on_drive(relative);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a configuration file and return its path.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// The user configuration directory inside the isolated home.
    pub fn user_config_dir(&self) -> PathBuf {
        self.home.join(".longpath")
    }

    /// Run a command and return its stdout, asserting success.
    pub fn stdout_of(cmd: &mut Command) -> String {
        let output = cmd.output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "Command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Path of the temporary directory root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
