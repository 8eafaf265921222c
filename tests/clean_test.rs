//! Integration tests for `demobuild clean`

mod common;

use common::{combined_output, TestProject};

#[test]
fn test_clean_removes_pkg_and_dist() {
    let project = TestProject::new();
    project.write_manifest(&["hello_world", "toggle"]);
    project.create_file("demos/hello_world/pkg/hello_world.js", "");
    project.create_file("demos/hello_world/src/lib.rs", "");
    project.create_file("dist/index.html", "");

    let output = project.run(&["clean"]);
    assert!(output.status.success(), "{}", combined_output(&output));

    assert!(!project.file_exists("demos/hello_world/pkg"));
    assert!(!project.file_exists("dist"));
    assert!(project.file_exists("demos/hello_world/src/lib.rs"));
    assert!(project.file_exists("demobuild.toml"));
}

#[test]
fn test_clean_with_nothing_to_clean() {
    let project = TestProject::new();
    project.write_manifest(&["hello_world"]);

    let output = project.run(&["clean"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Nothing to clean"));
}

#[test]
fn test_clean_json_reports_removed_and_skipped() {
    let project = TestProject::new();
    project.write_manifest(&["hello_world", "toggle"]);
    project.create_dir("demos/toggle/pkg");

    let output = project.run(&["--json", "clean"]);
    assert!(output.status.success(), "{}", combined_output(&output));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["removed"], serde_json::json!(["demos/toggle/pkg"]));
    assert_eq!(
        json["skipped"],
        serde_json::json!(["demos/hello_world/pkg", "dist"])
    );
}
