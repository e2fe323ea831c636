//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn thematic() -> Command {
    let mut cmd = Command::cargo_bin("thematic").unwrap();
    // The resolve command reads THEME_ENV as a flag fallback
    cmd.env_remove("THEME_ENV");
    cmd
}

#[test]
fn init_scaffolds_a_theme() {
    let dir = tempfile::tempdir().unwrap();

    thematic()
        .current_dir(dir.path())
        .args(["init", "demo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Theme initialized"));

    assert!(dir.path().join("demo/theme.toml").is_file());
    assert!(dir.path().join("demo/style.css").is_file());
    assert!(dir.path().join("demo/assets/css/styles.css").is_file());
    assert!(dir.path().join("demo/assets/js/scripts.js").is_file());
    assert!(dir.path().join("demo/index.html").is_file());
}

#[test]
fn resolve_emits_tags_for_existing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    thematic()
        .current_dir(dir.path())
        .args(["init", "demo"])
        .assert()
        .success();

    let theme = dir.path().join("demo");
    std::fs::create_dir_all(theme.join("dist")).unwrap();
    std::fs::write(theme.join("dist/styles.min.css"), "body{margin:0}").unwrap();

    thematic()
        .current_dir(&theme)
        .args(["resolve", "--env", "production", "--tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tailwind-style-css"))
        .stdout(predicate::str::contains("dist/styles.min.css?ver="))
        // No script build output, so no script tag
        .stdout(predicate::str::contains("child-scripts").not());
}

#[test]
fn resolve_development_falls_back_to_sources() {
    let dir = tempfile::tempdir().unwrap();
    thematic()
        .current_dir(dir.path())
        .args(["init", "demo"])
        .assert()
        .success();

    // init writes the assets/ sources but no dev_build/
    thematic()
        .current_dir(dir.path().join("demo"))
        .args(["resolve", "--env", "development", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assets/css/styles.css"))
        .stdout(predicate::str::contains("assets/js/scripts.js"));
}

#[test]
fn resolve_fails_without_config() {
    let dir = tempfile::tempdir().unwrap();

    thematic()
        .current_dir(dir.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("theme.toml"));
}
