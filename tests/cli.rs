use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gamershield"))
}

fn example_responses() -> serde_json::Value {
    serde_json::json!({
        "gaming_frequency": "Daily",
        "multiplayer_gaming": "Always",
        "voice_chat": "Frequently with strangers",
        "streaming": "Never",
        "account_sharing": "Never",
        "personal_info_sharing": "Never",
        "password_practices": "Unique strong passwords",
        "two_factor_auth": "On all accounts",
        "privacy_settings_check": "Regularly",
        "data_collection_awareness": "Very aware",
        "permission_review": "Always",
        "third_party_connections": "Never"
    })
}

#[test]
fn login_encrypts_a_snapshot() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("login")
        .arg("alice")
        .assert()
        .success()
        .stdout(predicate::str::contains("secure login complete"))
        .stdout(predicate::str::contains("AES-256-GCM"))
        .stdout(predicate::str::contains("PBKDF2-SHA256"));

    assert!(vault.join("audit.log").exists());
}

#[test]
fn login_then_unlock_roundtrip() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    // login
    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("login")
        .arg("alice")
        .assert()
        .success();

    // unlock prints the redacted record, not the plaintext secrets
    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("unlock")
        .arg("alice")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth_token_hash"))
        .stdout(predicate::str::contains("BLAKE3"))
        .stdout(predicate::str::contains("token_alice").not());
}

#[test]
fn unlock_with_wrong_password_fails() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    // login
    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("login")
        .arg("alice")
        .assert()
        .success();

    // unlock with the wrong password
    bin()
        .env("GAMERSHIELD_PASSWORD", "wrong_pw")
        .arg("--vault")
        .arg(&vault)
        .arg("unlock")
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password or tampered data"));
}

#[test]
fn unlock_unknown_user_fails() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("unlock")
        .arg("nobody")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn assess_scores_the_example_scenario() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");
    let responses = dir.path().join("responses.json");
    std::fs::write(
        &responses,
        serde_json::to_string_pretty(&example_responses()).unwrap(),
    )
    .unwrap();

    bin()
        .arg("--vault")
        .arg(&vault)
        .arg("assess")
        .arg(&responses)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall risk: 12/100 (Low risk)"))
        .stdout(predicate::str::contains("Secure Voice Chat Practices"));
}

#[test]
fn assess_with_blank_answer_fails() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");
    let responses = dir.path().join("responses.json");

    let mut answers = example_responses();
    answers["two_factor_auth"] = serde_json::Value::String(String::new());
    std::fs::write(&responses, serde_json::to_string(&answers).unwrap()).unwrap();

    bin()
        .arg("--vault")
        .arg(&vault)
        .arg("assess")
        .arg(&responses)
        .assert()
        .failure()
        .stderr(predicate::str::contains("two_factor_auth"));
}

#[test]
fn hash_then_verify_roundtrip() {
    let output = bin()
        .arg("hash")
        .arg("my_secret_value")
        .arg("--algorithm")
        .arg("sha-256")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let field = |name: &str| {
        stdout
            .lines()
            .find_map(|l| l.strip_prefix(name))
            .unwrap()
            .trim()
            .to_string()
    };
    let digest = field("digest:");
    let salt = field("salt:");

    bin()
        .arg("verify")
        .arg("my_secret_value")
        .arg(&digest)
        .arg(&salt)
        .arg("--algorithm")
        .arg("sha-256")
        .assert()
        .success()
        .stdout(predicate::str::contains("hash verified"));

    // a different value must not verify
    bin()
        .arg("verify")
        .arg("another_value")
        .arg(&digest)
        .arg(&salt)
        .arg("--algorithm")
        .arg("sha-256")
        .assert()
        .success()
        .stdout(predicate::str::contains("hash mismatch"));
}

#[test]
fn hash_rejects_unknown_algorithm() {
    bin()
        .arg("hash")
        .arg("value")
        .arg("--algorithm")
        .arg("md5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported algorithm"));
}

#[test]
fn info_reports_vault_activity() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    bin()
        .env("GAMERSHIELD_PASSWORD", "pw")
        .arg("--vault")
        .arg(&vault)
        .arg("login")
        .arg("alice")
        .assert()
        .success();

    bin()
        .arg("--vault")
        .arg(&vault)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("users:         1"))
        .stdout(predicate::str::contains("envelopes:     1"))
        .stdout(predicate::str::contains("audit entries: 1"));
}

#[test]
fn login_without_password_fails() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");

    bin()
        .env_remove("GAMERSHIELD_PASSWORD")
        .arg("--vault")
        .arg(&vault)
        .arg("login")
        .arg("alice")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No password provided"));
}
