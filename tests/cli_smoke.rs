use assert_cmd::Command;
use assert_fs::prelude::*;

/// Command rooted at a temp dir, with the config lookup pointed at a file
/// that does not exist so a developer's real config cannot leak in.
fn renum(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("renum").unwrap();
    cmd.env("RENUM_CONFIG", dir.path().join("no-such-config.xml"))
        .arg("--dir")
        .arg(dir.path())
        .args(["--log-level", "quiet"]);
    cmd
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn sets_lists_detected_file_sets() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page1.jpg").touch().unwrap();
    dir.child("page2.jpg").touch().unwrap();
    dir.child("notes.txt").touch().unwrap();

    let assert = renum(&dir).arg("sets").assert().success();
    assert!(stdout_of(assert).contains("page*"));
}

#[test]
fn fix_closes_gaps_on_disk() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page0.jpg").touch().unwrap();
    dir.child("page2.jpg").touch().unwrap();

    renum(&dir).args(["fix", "page*"]).assert().success();

    assert!(dir.child("page1.jpg").path().exists());
    assert!(!dir.child("page2.jpg").path().exists());
}

#[test]
fn dry_run_reports_but_does_not_touch() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page0.jpg").touch().unwrap();
    dir.child("page2.jpg").touch().unwrap();

    let assert = renum(&dir)
        .args(["--dry-run", "fix", "page*"])
        .assert()
        .success();
    assert!(stdout_of(assert).contains("page2.jpg -> page1.jpg"));

    assert!(dir.child("page2.jpg").path().exists());
    assert!(!dir.child("page1.jpg").path().exists());
}

#[test]
fn list_marks_gaps() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page0.jpg").touch().unwrap();
    dir.child("page2.jpg").touch().unwrap();

    let assert = renum(&dir).args(["list", "page*"]).assert().success();
    assert!(stdout_of(assert).contains("page0.jpg, G, page2.jpg"));
}

#[test]
fn remove_moves_files_into_the_removed_set() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page0.jpg").touch().unwrap();
    dir.child("page1.jpg").touch().unwrap();
    dir.child("page2.jpg").touch().unwrap();

    renum(&dir).args(["remove", "page*", "1"]).assert().success();

    assert!(dir.child("removed0.jpg").path().exists());
    // Survivors compact back to 0..n-1.
    assert!(dir.child("page1.jpg").path().exists());
    assert!(!dir.child("page2.jpg").path().exists());
}

#[test]
fn move_relocates_a_range() {
    let dir = assert_fs::TempDir::new().unwrap();
    for name in ["page0.jpg", "page1.jpg", "page2.jpg", "page3.jpg"] {
        dir.child(name).touch().unwrap();
    }

    renum(&dir)
        .args(["move", "page*", "0-1", "--to", "3/4"])
        .assert()
        .success();

    // All four indexes stay occupied, just reordered.
    for name in ["page0.jpg", "page1.jpg", "page2.jpg", "page3.jpg"] {
        assert!(dir.child(name).path().exists(), "{name} should exist");
    }
}

#[test]
fn invalid_spot_fails_with_a_message() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("page0.jpg").touch().unwrap();

    let assert = renum(&dir)
        .args(["add", "page*", "--at", "2-3", "x.jpg"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("could not expand"));
}

#[test]
fn unknown_command_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    renum(&dir).arg("explode").assert().failure();
}
