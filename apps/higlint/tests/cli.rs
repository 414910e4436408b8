use assert_cmd::Command;
use tempfile::TempDir;

fn higlint() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_higlint"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let td = TempDir::new().expect("temp");
    std::fs::create_dir_all(td.path().join(".git")).unwrap();
    for (rel, body) in files {
        let path = td.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }
    td
}

#[test]
fn analyze_small_touch_target_exits_one() {
    let out = higlint()
        .arg("analyze")
        .write_stdin(r#"{"code": "Button { }.frame(width: 30, height: 30)"}"#)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["status"], "success");
    assert_eq!(v["passed"], false);
    assert_eq!(v["summary"]["errors"], 1);
    assert_eq!(v["violations"][0]["rule"], "touch_target_too_small");
}

#[test]
fn analyze_clean_code_exits_zero() {
    let out = higlint()
        .arg("analyze")
        .write_stdin(r#"{"code": "Button { }.frame(minHeight: 44)"}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["passed"], true);
    assert_eq!(v["violations"].as_array().unwrap().len(), 0);
}

#[test]
fn analyze_invalid_json_exits_two_with_error_envelope() {
    let out = higlint()
        .arg("analyze")
        .write_stdin("{oops")
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["status"], "error");
    assert!(v["message"].as_str().unwrap().starts_with("Invalid JSON input"));
}

#[test]
fn check_warnings_only_passes_and_errors_fail() {
    let td = project(&[("App/Theme.swift", "let c = Color(red: 1, green: 0, blue: 0)\n")]);
    higlint()
        .current_dir(td.path())
        .args(["check", "--output", "json"])
        .assert()
        .success();

    std::fs::write(td.path().join("App/Model.swift"), "let n = user!.name\n").unwrap();
    let out = higlint()
        .current_dir(td.path())
        .args(["check", "--output", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["summary"]["files"], 2);
    assert_eq!(v["findings"][0]["file"], "App/Model.swift");
    assert_eq!(v["findings"][0]["rule"], "force_unwrap");
}

#[test]
fn check_respects_disable_flag_and_config() {
    let td = project(&[
        ("App/Model.swift", "let n = user!.name\n"),
        ("higlint.toml", "[rules.hardcoded_color]\nenabled = false\n"),
    ]);
    higlint()
        .current_dir(td.path())
        .args(["check", "--disable", "force_unwrap"])
        .assert()
        .success();

    let out = higlint()
        .current_dir(td.path())
        .args(["rules", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let ids: Vec<&str> = v["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&"hardcoded_color"));
    assert_eq!(ids[0], "touch_target_too_small");
}

#[test]
fn analyze_min_touch_target_flag_changes_exit_code() {
    let request = r#"{"code": "Button{}.frame(width: 46)"}"#;
    higlint()
        .arg("analyze")
        .write_stdin(request)
        .assert()
        .success();

    let out = higlint()
        .args(["analyze", "--min-touch-target", "48"])
        .write_stdin(request)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["summary"]["errors"], 1);
    assert_eq!(v["violations"][0]["rule"], "touch_target_too_small");
}
