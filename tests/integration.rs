use std::path::Path;
use std::process::{Command, Output};

fn wikiref_cmd(fixture: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wikiref"));
    cmd.current_dir(fixture);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests/fixtures").join(name)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Copy a fixture into a temp dir so commands that edit the config don't touch the repo.
fn scratch_copy(name: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture(name);
    for entry in walkdir::WalkDir::new(&source).into_iter().filter_map(Result::ok) {
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = dir.path().join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
    dir
}

#[test]
fn clean_project_checks_clean() {
    let check = wikiref_cmd(&fixture("clean")).arg("check").output().unwrap();
    assert!(
        check.status.success(),
        "check failed: {}{}",
        stdout(&check),
        String::from_utf8_lossy(&check.stderr)
    );
    assert!(stdout(&check).contains("All 9 links resolve"));
}

#[test]
fn broken_project_reports_every_problem() {
    let check = wikiref_cmd(&fixture("broken")).arg("check").output().unwrap();
    assert_eq!(check.status.code(), Some(2));

    let out = stdout(&check);
    assert!(out.contains("Readme.md:3  Missing.md"));
    assert!(out.contains("did you mean `docs/Guide.md`?"));
    assert!(out.contains("AMBIGUOUS  Readme.md:4  Notes  (Notes.markdown, Notes.md)"));
    assert!(out.contains("NON-VCS"));
    assert!(out.contains("2 broken, 2 warnings"));
}

#[test]
fn check_json_lists_findings() {
    let check = wikiref_cmd(&fixture("broken"))
        .args(["check", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(check.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_str(&stdout(&check)).unwrap();
    let findings = report["findings"].as_array().unwrap();
    let kinds: Vec<&str> = findings.iter().map(|f| f["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["broken", "ambiguous", "non_vcs", "broken"]);
    assert_eq!(report["checked"], 5);
}

#[test]
fn unreadable_markdown_is_reported_and_check_continues() {
    let dir = scratch_copy("clean");
    std::fs::write(dir.path().join("Latin1.md"), [0x5b_u8, 0xe9, 0x5d, 0x28, 0x78, 0x29, 0x0a]).unwrap();

    let check = wikiref_cmd(dir.path()).arg("check").output().unwrap();
    assert_eq!(check.status.code(), Some(1));
    let out = stdout(&check);
    assert!(out.contains("UNREADABLE  Latin1.md"));
    assert!(out.contains("0 broken, 1 warnings"));

    let json = wikiref_cmd(dir.path())
        .args(["check", "--format", "json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout(&json)).unwrap();
    assert_eq!(report["checked"], 9);
    assert_eq!(report["unreadable"][0]["source"], "Latin1.md");
}

#[test]
fn resolve_wiki_page_as_json() {
    let resolve = wikiref_cmd(&fixture("clean"))
        .args(["resolve", "Getting Started", "--from", "Demo.wiki/Home.md", "--wiki", "--format", "json"])
        .output()
        .unwrap();
    assert!(resolve.status.success(), "{}", String::from_utf8_lossy(&resolve.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&resolve)).unwrap();
    assert_eq!(report["outcome"], "unique");
    assert_eq!(report["scope"], "Demo.wiki");
    assert_eq!(report["matches"][0]["path"], "Demo.wiki/pages/Getting-Started.md");
    assert_eq!(report["matches"][0]["in_wiki"], true);
    assert_eq!(report["matches"][0]["url"], "https://github.com/example/Demo/wiki/Getting-Started");
}

#[test]
fn wiki_pages_cannot_reach_main_repository() {
    let resolve = wikiref_cmd(&fixture("clean"))
        .args(["resolve", "../Readme", "--from", "Demo.wiki/Home.md"])
        .output()
        .unwrap();
    assert_eq!(resolve.status.code(), Some(2));
    assert!(stdout(&resolve).contains("no match"));
}

#[test]
fn ambiguous_resolve_exits_one() {
    let resolve = wikiref_cmd(&fixture("broken"))
        .args(["resolve", "Notes", "--from", "Readme.md"])
        .output()
        .unwrap();
    assert_eq!(resolve.status.code(), Some(1));
    let out = stdout(&resolve);
    assert!(out.contains("Notes.markdown"));
    assert!(out.contains("Notes.md"));
}

#[test]
fn missing_source_file_is_a_runtime_error() {
    let resolve = wikiref_cmd(&fixture("clean"))
        .args(["resolve", "Readme", "--from", "Nope.md"])
        .output()
        .unwrap();
    assert_eq!(resolve.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&resolve.stderr).contains("File Not Found"));
}

#[test]
fn roots_lists_wiki_before_main() {
    let roots = wikiref_cmd(&fixture("clean")).arg("roots").output().unwrap();
    assert!(roots.status.success());
    let out = stdout(&roots);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("wiki  Demo.wiki"));
    assert!(lines[1].starts_with("main  ."));
}

#[test]
fn exclude_round_trip_changes_check_result() {
    let dir = scratch_copy("clean");

    let add = wikiref_cmd(dir.path())
        .args(["exclude", "add", "images/logo.png"])
        .output()
        .unwrap();
    assert!(add.status.success(), "{}", String::from_utf8_lossy(&add.stderr));

    let check = wikiref_cmd(dir.path()).arg("check").output().unwrap();
    assert_eq!(check.status.code(), Some(1));
    assert!(stdout(&check).contains("NON-VCS    Readme.md:5  images/logo.png"));

    let remove = wikiref_cmd(dir.path())
        .args(["exclude", "remove", "images/logo.png"])
        .output()
        .unwrap();
    assert!(remove.status.success());
    let check = wikiref_cmd(dir.path()).arg("check").output().unwrap();
    assert!(check.status.success());

    let unknown = wikiref_cmd(dir.path())
        .args(["exclude", "remove", "images/logo.png"])
        .output()
        .unwrap();
    assert_eq!(unknown.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("Not Excluded"));
}

#[test]
fn info_json_reports_state() {
    let info = wikiref_cmd(&fixture("clean")).args(["info", "--json"]).output().unwrap();
    assert!(info.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&info)).unwrap();
    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(report["current_state"]["config_found"], true);
    assert_eq!(report["current_state"]["roots"].as_array().map(Vec::len), Some(2));
}
