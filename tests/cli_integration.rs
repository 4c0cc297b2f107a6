//! Integration tests for the devlog CLI.
//!
//! These tests run the binary against a temporary config file with the
//! generation delay disabled.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A temp dir holding a config file for one test.
struct Fixture {
    _dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config("[generator]\ndelay_ms = 0\n")
    }

    fn with_config(contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, contents).unwrap();
        Self { _dir: dir, config }
    }

    /// Get a command for running devlog with this fixture's config.
    fn devlog(&self) -> Command {
        let mut cmd = Command::cargo_bin("devlog").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("devlog")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devlog"));
}

mod generate {
    use super::*;

    #[test]
    fn prints_cards_and_document() {
        Fixture::new()
            .devlog()
            .args(["generate", "octocat/hello-world", "--date", "2024-05-01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("octocat/hello-world - 2024-05-01"))
            .stdout(predicate::str::contains("[FEATURE] Add authentication system"))
            .stdout(predicate::str::contains("[BUGFIX] Fix user profile image upload"))
            .stdout(predicate::str::contains("# Changelog for octocat/hello-world"))
            .stdout(predicate::str::contains("## 2024-05-01"))
            .stdout(predicate::str::contains("### 🚀 Improvements"))
            .stdout(predicate::str::contains(
                "- **Add dark mode support**: Implemented system-preference based theme switching with manual override option",
            ))
            .stdout(predicate::str::contains(
                "Generated 5 changelog items for octocat/hello-world",
            ));
    }

    #[test]
    fn invalid_repository_fails() {
        Fixture::new()
            .devlog()
            .args(["generate", "invalid-input"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid Repository Format"))
            .stdout(predicate::str::contains("# Changelog").not());
    }

    #[test]
    fn json_lists_entries() {
        let output = Fixture::new()
            .devlog()
            .args(["generate", "octocat/hello-world", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2]["type"], "bugfix");
        assert_eq!(entries[2]["title"], "Fix user profile image upload");
    }

    #[test]
    fn publish_reports_success() {
        Fixture::new()
            .devlog()
            .args(["generate", "a/b", "--publish"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Changelog published!"));
    }

    #[test]
    fn token_is_never_printed() {
        Fixture::new()
            .devlog()
            .args(["--debug", "generate", "a/b", "--token", "ghp_supersecret"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ghp_supersecret").not())
            .stderr(predicate::str::contains("ghp_supersecret").not())
            .stderr(predicate::str::contains("Token provided"));
    }

    #[test]
    fn quiet_prints_nothing() {
        Fixture::new()
            .devlog()
            .args(["--quiet", "generate", "a/b"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn uses_default_repo_from_config() {
        Fixture::with_config("default_repo = \"octocat/spoon-knife\"\n[generator]\ndelay_ms = 0\n")
            .devlog()
            .arg("generate")
            .assert()
            .success()
            .stdout(predicate::str::contains("# Changelog for octocat/spoon-knife"));
    }

    #[test]
    fn timeout_fails_generically() {
        Fixture::with_config("[generator]\ndelay_ms = 5000\ntimeout_secs = 1\n")
            .devlog()
            .args(["generate", "a/b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error generating changelog"))
            .stderr(predicate::str::contains("timed out").not());
    }
}

mod session {
    use super::*;

    #[test]
    fn edit_and_save_replaces_document() {
        Fixture::new()
            .devlog()
            .arg("session")
            .write_stdin("generate octocat/hello-world\nedit\n.clear\nhello edited\n.save\nshow\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Changes saved"))
            .stdout(predicate::str::contains("hello edited"));
    }

    #[test]
    fn cancel_keeps_generated_document() {
        let output = Fixture::new()
            .devlog()
            .arg("session")
            .write_stdin("generate a/b\nedit\n.clear\nthrowaway\n.cancel\nshow\nquit\n")
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("edit cancelled"));
        assert_eq!(stdout.matches("# Changelog for a/b").count(), 2);
    }

    #[test]
    fn repository_with_spaces_is_kept_verbatim() {
        Fixture::new()
            .devlog()
            .arg("session")
            .write_stdin("generate my org/my repo\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("# Changelog for my org/my repo"));
    }

    #[test]
    fn publish_without_document_reports_error() {
        Fixture::new()
            .devlog()
            .arg("session")
            .write_stdin("publish\nquit\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Nothing to publish"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_values() {
        Fixture::with_config("[generator]\ntimeout_secs = 7\n")
            .devlog()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"))
            .stdout(predicate::str::contains("generator.timeout_secs = 7"))
            .stdout(predicate::str::contains("generator.delay_ms = 2000"));
    }

    #[test]
    fn invalid_config_fails() {
        Fixture::with_config("default_repo = \"nope\"\n")
            .devlog()
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load configuration"));
    }
}

#[test]
fn completion_generates_script() {
    Fixture::new()
        .devlog()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("devlog"));
}
