// regsub/tests/cli_integration_tests.rs
//! End-to-end tests for the `regsub` executable.
//!
//! Every test works on its own table inside a temporary directory and passes
//! `--table` and `--user` explicitly, so the developer's real table and
//! environment are never touched.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use test_log::test;

struct Sandbox {
    dir: TempDir,
    table: PathBuf,
}

impl Sandbox {
    fn new() -> Result<Self> {
        let dir = tempdir()?;
        let table = dir.path().join("replace.json");
        Ok(Self { dir, table })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `regsub --table <table> --user <user> <args...>` with a clean environment.
    fn regsub(&self, user: &str, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("regsub").unwrap();
        cmd.env_remove("REGSUB_TABLE")
            .env_remove("REGSUB_CONFIG")
            .env_remove("REGSUB_USER")
            .env("RUST_LOG", "debug")
            .arg("--table")
            .arg(&self.table)
            .arg("--user")
            .arg(user)
            .args(args);
        cmd
    }

    fn add(&self, user: &str, command: &str) {
        self.regsub(user, &["add", command])
            .assert()
            .success()
            .stdout("OK\n");
    }
}

#[test]
fn add_then_list_shows_rule() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/colou?r/hue/");
    sb.add("alice", "s/teh/the/");

    sb.regsub("alice", &["list"])
        .assert()
        .success()
        .stdout("\"colou?r\" -> \"hue\"\n\"teh\" -> \"the\"\n");
    Ok(())
}

#[test]
fn table_file_uses_pair_layout() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/teh/the/");

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&sb.table)?)?;
    assert_eq!(raw, serde_json::json!({ "teh": ["the", "alice"] }));

    let out = sb.regsub("bob", &["ls", "--json"]).assert().success().get_output().stdout.clone();
    let listed: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(listed, raw);
    Ok(())
}

#[test]
fn empty_list_prints_nothing_on_stdout() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.regsub("alice", &["list"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No replacements stored."));
    Ok(())
}

#[test]
fn malformed_command_is_rejected() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.regsub("alice", &["add", "teh -> the"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find valid regex"));
    assert!(!sb.table.exists());
    Ok(())
}

#[test]
fn invalid_regex_is_rejected() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.regsub("alice", &["add", "s/(unclosed/x/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is invalid"));
    Ok(())
}

#[test]
fn broad_regex_is_rejected() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.regsub("alice", &["add", "s/a+/b/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too broad"));
    Ok(())
}

#[test]
fn similar_regex_is_rejected_with_existing_rule() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/hello/hi/");

    sb.regsub("bob", &["add", "s/hello+/hey/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Similar regex already exists"))
        .stderr(predicate::str::contains("\"hello\" -> \"hi\""));

    sb.regsub("bob", &["add", "s/hello/hey/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn edit_requires_owner_or_moderator() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/teh/the/");

    sb.regsub("bob", &["edit", "s/teh/THE/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot edit 'teh'"));

    let config = sb.path().join("regsub.yaml");
    fs::write(&config, "moderators: [bob]\n")?;
    sb.regsub("bob", &["--config", config.to_str().unwrap(), "edit", "s/teh/THE/"])
        .assert()
        .success()
        .stdout("OK\n");

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&sb.table)?)?;
    assert_eq!(raw["teh"], serde_json::json!(["THE", "bob"]));
    Ok(())
}

#[test]
fn edit_of_unknown_rule_fails() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.regsub("alice", &["edit", "s/teh/the/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in replacements"));
    Ok(())
}

#[test]
fn remove_accepts_backticks_and_flag_prefix() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/teh/the/");
    sb.add("alice", "s/(?i)colou?r/hue/");

    sb.regsub("alice", &["rm", "`teh`"]).assert().success().stdout("OK\n");
    sb.regsub("alice", &["remove", "(?i)colou?r"]).assert().success();

    sb.regsub("alice", &["list"]).assert().success().stdout("");
    Ok(())
}

#[test]
fn remove_by_stranger_is_denied() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/teh/the/");

    sb.regsub("mallory", &["rm", "teh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete 'teh'"));
    sb.regsub("mallory", &["rm", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Regex 'nope' not in replacements."));
    Ok(())
}

#[test]
fn apply_rewrites_argument_and_stdin() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/teh/the/");
    sb.add("alice", r"s/(\w+)@(\w+)/$2 at $1/");

    sb.regsub("alice", &["apply", "teh cat"])
        .assert()
        .success()
        .stdout("the cat\n");

    sb.regsub("alice", &["apply"])
        .write_stdin("teh mail: me@home\nteh end")
        .assert()
        .success()
        .stdout("the mail: home at me\nthe end");
    Ok(())
}

#[test]
fn check_reports_similar_keys_as_json() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", "s/hello/hi/");

    let out = sb
        .regsub("alice", &["check", "hello+", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(report["skeleton"], "hello");
    assert_eq!(report["too_broad"], false);
    assert_eq!(report["similar_to"], serde_json::json!(["hello"]));

    sb.regsub("alice", &["check", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Too broad: yes"))
        .stdout(predicate::str::contains("Similar to: none"));
    Ok(())
}

#[test]
fn table_location_can_come_from_config() -> Result<()> {
    let sb = Sandbox::new()?;
    let table = sb.path().join("from-config.json");
    let config = sb.path().join("regsub.yaml");
    fs::write(&config, format!("table_path: {}\n", table.display()))?;

    let mut cmd = Command::cargo_bin("regsub").unwrap();
    cmd.env_remove("REGSUB_TABLE")
        .env("REGSUB_CONFIG", &config)
        .env("REGSUB_USER", "carol")
        .args(["add", "s/teh/the/"])
        .assert()
        .success();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&table)?)?;
    assert_eq!(raw["teh"][1], "carol");
    Ok(())
}

#[test]
fn invalid_config_fails_cleanly() -> Result<()> {
    let sb = Sandbox::new()?;
    let config = sb.path().join("regsub.yaml");
    fs::write(&config, "min_skeleton_len: 0\n")?;

    sb.regsub("alice", &["--config", config.to_str().unwrap(), "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid config file"));
    Ok(())
}

#[test]
fn apply_leaves_dollar_signs_in_input_alone() -> Result<()> {
    let sb = Sandbox::new()?;
    sb.add("alice", r"s/(\w+)=(\S+)/$2 <- $1/");

    sb.regsub("alice", &["apply", "cost=$1"])
        .assert()
        .success()
        .stdout("$1 <- cost\n");
    Ok(())
}
