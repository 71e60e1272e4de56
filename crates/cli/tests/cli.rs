use assert_cmd::Command;
use predicates::prelude::*;

fn libris(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.env("LIBRIS_CONFIG_DIR", config_dir)
        .env("LIBRIS_ENV", "local")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    libris(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn schema_print_emits_both_tables_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = libris(dir.path())
        .args(["schema", "--print"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let authors = stdout.find("CREATE TABLE IF NOT EXISTS authors").unwrap();
    let books = stdout.find("CREATE TABLE IF NOT EXISTS books").unwrap();
    assert!(authors < books);
}

#[test]
fn seed_populates_an_empty_database_once() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("seed.db").display());

    libris(dir.path())
        .env("LIBRIS_DATABASE__URL", &url)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded 5 authors and 7 books"));

    libris(dir.path())
        .env("LIBRIS_DATABASE__URL", &url)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded 0 authors and 0 books"));
}

#[test]
fn unknown_environment_fails() {
    let dir = tempfile::tempdir().unwrap();
    libris(dir.path())
        .env("LIBRIS_ENV", "qa")
        .args(["schema", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported environment"));
}
