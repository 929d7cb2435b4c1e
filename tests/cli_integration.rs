//! Integration tests for the maintenance-desk binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn desk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("maintenance-desk").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MDESK_PROJECT")
        .arg("--no-color");
    cmd
}

fn initialized() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    desk(&temp_dir).arg("init").assert().success();
    temp_dir
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().unwrap();
    desk(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_commands_require_init() {
    let temp_dir = TempDir::new().unwrap();
    desk(&temp_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not initialized"));
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_new_then_list() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .args([
            "new",
            "--category",
            "Plumbing",
            "--unit",
            "A101",
            "--description",
            "Leak under sink",
            "--contact-name",
            "Ana",
            "--contact-phone",
            "555-0101",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Created ticket R-[A-Z0-9]{6}").unwrap());

    desk(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plumbing — A101"))
        .stdout(predicate::str::contains("Contact: Ana (555-0101)"))
        .stdout(predicate::str::contains("(Open)"));
}

#[test]
fn test_empty_list_message() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets yet."));
}

#[test]
fn test_close_flow_with_json_output() {
    let temp_dir = initialized();
    let output = desk(&temp_dir)
        .args(["--json", "new", "--category", "Electrical", "--unit", "B204"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ticket: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = ticket["id"].as_str().unwrap().to_string();
    assert_eq!(ticket["status"], "Open");
    assert_eq!(ticket["priority"], "Normal");

    desk(&temp_dir)
        .args(["close", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed ticket"));

    desk(&temp_dir)
        .args(["list", "--status", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));
}

#[test]
fn test_close_unknown_ticket() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .args(["close", "R-000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ticket not found"));
}

#[test]
fn test_export_empty_store() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tickets to export"));
    assert!(!temp_dir.path().join("tickets_export.csv").exists());
}

#[test]
fn test_export_writes_quoted_csv() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .args(["new", "--category", "ACU", "--unit", "C3", "--description", "Drips, \"a lot\""])
        .assert()
        .success();

    desk(&temp_dir).arg("export").assert().success();

    let csv = std::fs::read_to_string(temp_dir.path().join("tickets_export.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,status,created_at,updated_at,category,unit_code,priority,description")
    );
    let row = lines.next().unwrap();
    assert!(row.ends_with(r#","ACU","C3","Normal","Drips, ""a lot""""#));
    assert!(!csv.ends_with('\n'));
}

#[test]
fn test_clear_with_yes() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .args(["new", "--unit", "A1"])
        .assert()
        .success();
    desk(&temp_dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 ticket(s)"));
    desk(&temp_dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No tickets yet."));
}

#[test]
fn test_categories_fall_back_when_file_missing() {
    let temp_dir = initialized();
    std::fs::remove_file(temp_dir.path().join(".maintenance-desk/data/ticket_categories.csv"))
        .unwrap();
    desk(&temp_dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Elevator"))
        .stderr(predicate::str::contains("built-in categories"));
}

#[test]
fn test_project_flag_from_other_directory() {
    let desk_dir = initialized();
    let elsewhere = TempDir::new().unwrap();
    desk(&elsewhere)
        .args(["--project", desk_dir.path().to_str().unwrap(), "units"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No units listed"));
}

#[test]
fn test_export_from_subdirectory_writes_to_project_root() {
    let temp_dir = initialized();
    desk(&temp_dir)
        .args(["new", "--category", "Plumbing", "--unit", "A101"])
        .assert()
        .success();

    let nested = temp_dir.path().join("floor1/notes");
    std::fs::create_dir_all(&nested).unwrap();
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("maintenance-desk").unwrap();
    cmd.current_dir(&nested)
        .env_remove("MDESK_PROJECT")
        .args(["--no-color", "export"])
        .assert()
        .success();

    assert!(temp_dir.path().join("tickets_export.csv").exists());
    assert!(!nested.join("tickets_export.csv").exists());
}
