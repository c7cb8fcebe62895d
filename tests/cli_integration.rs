use assert_cmd::Command;
use predicates::prelude::*;

fn cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bookvault").unwrap();
    cmd.env("BOOKVAULT_HOME", home);
    cmd
}

fn add_book(home: &std::path::Path, title: &str, author: &str, pages: &str, tag: &str, date: &str) -> String {
    let output = cmd(home)
        .args(["add", title, author, "--pages", pages, "--tag", tag, "--date", date])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    // "Added to the vault: <title> (<id>)"
    let start = stdout.rfind('(').unwrap() + 1;
    let end = stdout.rfind(')').unwrap();
    stdout[start..end].to_string()
}

#[test]
fn add_then_list_shows_the_book() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-03-15");

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Dune by Frank Herbert"))
        .stdout(predicates::str::contains("Sci-Fi"));
}

#[test]
fn invalid_title_blocks_the_add() {
    let home = tempfile::tempdir().unwrap();
    cmd(home.path())
        .args(["add", "", "Frank Herbert", "--pages", "412", "--tag", "Sci-Fi"])
        .assert()
        .failure()
        .stdout(predicates::str::contains("Title is required."));

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("No books found."));
}

#[test]
fn search_filters_the_listing() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-01-01");
    add_book(home.path(), "Emma", "Jane Austen", "380", "Classic", "2024-01-02");

    cmd(home.path())
        .args(["list", "--search", "herbert"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Dune"))
        .stdout(predicates::str::contains("Emma").not());
}

#[test]
fn broken_search_pattern_degrades_to_full_listing() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-01-01");

    cmd(home.path())
        .args(["list", "--search", "[unclosed"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Invalid regex"))
        .stdout(predicates::str::contains("Dune"));
}

#[test]
fn sort_orders_the_listing() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Light Read", "Author One", "200", "Fiction", "2024-06-01");
    add_book(home.path(), "Heavy Tome", "Author Two", "300", "Fiction", "2024-01-01");

    cmd(home.path())
        .args(["list", "--sort", "pages-desc"])
        .assert()
        .success()
        .stdout(predicates::str::is_match("(?s)Heavy Tome.*Light Read").unwrap());

    cmd(home.path())
        .args(["list", "--sort", "date-asc"])
        .assert()
        .success()
        .stdout(predicates::str::is_match("(?s)Heavy Tome.*Light Read").unwrap());
}

#[test]
fn edit_patches_a_single_field() {
    let home = tempfile::tempdir().unwrap();
    let id = add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-03-15");

    cmd(home.path())
        .args(["edit", &id, "--pages", "500"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Book updated"));

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("500"));
}

#[test]
fn delete_removes_the_book() {
    let home = tempfile::tempdir().unwrap();
    let id = add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-03-15");

    cmd(home.path())
        .args(["delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"Dune\" deleted."));

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("No books found."));
}

#[test]
fn csv_export_quotes_commas_and_doubled_quotes() {
    let home = tempfile::tempdir().unwrap();
    add_book(
        home.path(),
        "Say \"Hi\", Bob",
        "Some Author",
        "100",
        "Fiction",
        "2024-01-01",
    );

    cmd(home.path())
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "id,title,author,pages,tag,dateAdded,isbn,notes,createdAt,updatedAt",
        ))
        .stdout(predicates::str::contains("\"Say \"\"Hi\"\", Bob\""));
}

#[test]
fn json_export_roundtrips_through_import() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-03-15");

    let export = home.path().join("vault.json");
    cmd(home.path())
        .args(["export", "--output"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicates::str::contains("Exported 1 records."));

    cmd(home.path()).args(["clear", "--yes"]).assert().success();

    cmd(home.path())
        .arg("import")
        .arg(&export)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicates::str::contains("Imported 1 records."));

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Dune"));
}

#[test]
fn bad_import_payload_reports_every_violation_and_keeps_data() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "Dune", "Frank Herbert", "412", "Sci-Fi", "2024-03-15");

    let payload = home.path().join("bad.json");
    std::fs::write(&payload, r#"[{"title": "X"}]"#).unwrap();

    cmd(home.path())
        .arg("import")
        .arg(&payload)
        .arg("--yes")
        .assert()
        .failure()
        .stdout(predicates::str::contains("Import failed:"))
        .stdout(predicates::str::contains("missing \"author\""))
        .stdout(predicates::str::contains("missing \"createdAt\""));

    cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Dune"));
}

#[test]
fn settings_persist_across_invocations() {
    let home = tempfile::tempdir().unwrap();

    cmd(home.path())
        .args(["settings", "page-cap", "2500"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Target set to 2500 pages."));

    cmd(home.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicates::str::contains("page-cap = 2500"));
}

#[test]
fn stats_summarize_the_collection() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "A", "Author One", "300", "Sci-Fi", "2024-01-01");
    add_book(home.path(), "B", "Author Two", "200", "Sci-Fi", "2024-01-02");

    cmd(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicates::str::contains("Books: 2"))
        .stdout(predicates::str::contains("Pages: 500"))
        .stdout(predicates::str::contains("Top tag: Sci-Fi"));
}

#[test]
fn tags_lists_distinct_values() {
    let home = tempfile::tempdir().unwrap();
    add_book(home.path(), "A", "Author One", "300", "Sci-Fi", "2024-01-01");
    add_book(home.path(), "B", "Author Two", "200", "Classic", "2024-01-02");
    add_book(home.path(), "C", "Author Three", "100", "Sci-Fi", "2024-01-03");

    cmd(home.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicates::str::is_match("(?s)Classic.*Sci-Fi").unwrap());
}
