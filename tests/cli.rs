use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn jokebox(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jokebox").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--offline");
    cmd
}

#[test]
fn empty_history_shows_placeholder() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No jokes in history yet."));
}

#[test]
fn new_joke_is_recorded_in_history() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir).arg("new").assert().success();

    assert!(dir.path().join("history.json").exists());
    jokebox(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("No jokes in history yet.").not());
}

#[test]
fn star_then_unstar_a_history_entry() {
    let dir = tempfile::tempdir().unwrap();
    jokebox(&dir).arg("new").assert().success();

    jokebox(&dir)
        .args(["star", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to favorites"));
    jokebox(&dir)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "));

    jokebox(&dir)
        .args(["unstar", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed from favorites"));
    jokebox(&dir)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorite jokes yet."));
}

#[test]
fn missing_position_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir)
        .args(["show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn clear_history_with_yes_skips_prompt() {
    let dir = tempfile::tempdir().unwrap();
    jokebox(&dir).arg("new").assert().success();

    jokebox(&dir)
        .args(["clear", "history", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared"));
    jokebox(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No jokes in history yet."));
}

#[test]
fn clear_can_be_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    jokebox(&dir).arg("new").assert().success();

    jokebox(&dir)
        .args(["clear", "history"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    jokebox(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "));
}

#[test]
fn theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dark theme enabled"));
    jokebox(&dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Light theme enabled"));
}

#[test]
fn config_set_and_show() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir)
        .args(["config", "category", "pun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category = pun"));
    jokebox(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("category = pun"))
        .stdout(predicate::str::contains("timeout-ms = "));
    jokebox(&dir)
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn interactive_session_quits_on_q() {
    let dir = tempfile::tempdir().unwrap();

    jokebox(&dir)
        .arg("play")
        .write_stdin("f\n1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline mode"))
        .stdout(predicate::str::contains("Added to favorites"));

    assert!(dir.path().join("favorites.json").exists());
}
