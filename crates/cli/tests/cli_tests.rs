//! CLI integration tests
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut command = Command::cargo_bin("copymill").unwrap();
    // Keep tests deterministic and offline regardless of the environment.
    command.env_remove("ANTHROPIC_API_KEY");
    command
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input_default_format() {
    cmd()
        .arg(get_fixture_path("pasted_article.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("**Copymill**"))
        .stdout(predicate::str::contains("**Social Post**"));
}

#[test]
fn test_cli_stdin_short_input() {
    cmd()
        .arg("-")
        .write_stdin("What voice do you write in?")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Copymill**"))
        .stdout(predicate::str::contains("demo mode"));
}

#[test]
fn test_cli_multiple_formats_in_order() {
    let output = cmd()
        .args(["-F", "seo-metadata,social-micro", &get_fixture_path("pasted_article.txt")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let seo = stdout.find("**SEO Headlines & Meta**").unwrap();
    let micro = stdout.find("**Micro Post**").unwrap();
    assert!(seo < micro, "sections must follow selection order");
    assert!(!stdout.contains("**Video Script"));
}

#[test]
fn test_cli_invalid_format_id() {
    cmd()
        .args(["-F", "skywriting", &get_fixture_path("pasted_article.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("skywriting"));
}

#[test]
fn test_cli_campaign_json_output() {
    let output = cmd()
        .args(["--campaign", "--demo", &get_fixture_path("pasted_article.txt")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 4);
    for key in ["social_post", "thread", "video_script", "retrieval_summary"] {
        assert!(object.contains_key(key), "missing key {}", key);
    }
}

#[test]
fn test_cli_campaign_save_dir() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["--campaign", "--demo", "--save-dir"])
        .arg(tmp.path())
        .arg(get_fixture_path("pasted_article.txt"))
        .assert()
        .success();

    for name in ["social_post.txt", "thread.txt", "video_script.txt", "retrieval_summary.txt"] {
        assert!(tmp.path().join(name).exists(), "missing export {}", name);
    }
}

#[test]
fn test_cli_reply_save_dir() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["--save-dir"])
        .arg(tmp.path())
        .arg(get_fixture_path("pasted_article.txt"))
        .assert()
        .success();

    assert!(tmp.path().join("copymill_output.txt").exists());
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("drafts.txt");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("pasted_article.txt"))
        .assert()
        .success();

    assert!(output.exists());
    let written = std::fs::read_to_string(output).unwrap();
    assert!(written.contains("**Social Post**"));
}

#[test]
fn test_cli_missing_input() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT"));
}

#[test]
fn test_cli_nonexistent_file() {
    cmd().arg("nonexistent_source.txt").assert().failure();
}

#[test]
fn test_cli_verbose_banner() {
    cmd()
        .args(["-v", "--demo", &get_fixture_path("pasted_article.txt")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Copymill"))
        .stderr(predicate::str::contains("demo mode"));
}

#[test]
fn test_cli_chat_quit() {
    cmd()
        .args(["--chat", "--demo"])
        .write_stdin(":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Copymill"));
}

#[test]
fn test_cli_chat_short_submission() {
    cmd()
        .args(["--chat", "--demo"])
        .write_stdin("hello there\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Copymill**"));
}

#[test]
fn test_cli_chat_demo_gallery_export() {
    let tmp = TempDir::new().unwrap();
    let input = format!(":demo {}\n:quit\n", tmp.path().display());

    cmd()
        .args(["--chat", "--demo"])
        .write_stdin(input)
        .assert()
        .success();

    assert!(tmp.path().join("social_short.txt").exists());
    assert!(tmp.path().join("seo_metadata.txt").exists());
}

#[test]
fn test_cli_chat_history_empty() {
    cmd()
        .args(["--chat", "--demo"])
        .write_stdin(":history\n:quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No drafts yet"));
}
