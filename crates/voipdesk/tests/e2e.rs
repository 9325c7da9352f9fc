// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: the real binary against a mock VOIP API.
//!
//! Each test gets its own temp dir holding the config file, the settings
//! store and the download directory, so tests are independent.

use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::process::Command;
use voipdesk_test_utils::harness::{
    TEST_AUTH_FOR, TEST_AUTH_PASSWORD, TEST_AUTH_RESELLER, TEST_AUTH_USER,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = format!(
            "[console]\nsettings_path = {:?}\ndownload_dir = {:?}\n",
            dir.path().join("settings.json"),
            dir.path().join("downloads"),
        );
        std::fs::write(dir.path().join("voipdesk.toml"), config).unwrap();
        Self { dir }
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.path().join("settings.json")
    }

    fn store_credentials(&self, server: &MockServer) {
        let settings = json!({
            "api_auth_settings": {
                "apiUrl": server.uri(),
                "authFor": TEST_AUTH_FOR,
                "authReseller": TEST_AUTH_RESELLER,
                "authPassword": TEST_AUTH_PASSWORD,
                "authUser": TEST_AUTH_USER
            }
        });
        std::fs::write(self.settings_path(), settings.to_string()).unwrap();
    }

    fn file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_voipdesk"))
            .arg("--config")
            .arg(self.dir.path().join("voipdesk.toml"))
            .arg("--plain")
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .await
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn envelope(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": result,
        "status_code": 200,
        "status_message": "OK"
    }))
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[tokio::test]
async fn users_are_listed_with_stored_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voip/user"))
        .and(header("X-Auth-User", TEST_AUTH_USER))
        .and(header("X-Auth-Password", TEST_AUTH_PASSWORD))
        .respond_with(envelope(json!([
            {"uuid": "u1", "extension": 101, "user_name": "ana", "display_name": "Ana", "timezone": "Europe/Lisbon"},
            {"uuid": "u2", "extension": 102, "user_name": "ben", "display_name": "Ben"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::new();
    ws.store_credentials(&server);
    let output = ws.run(&["users", "--search", "lisbon"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Ana"));
    assert!(!text.contains("Ben"));
}

#[tokio::test]
async fn commands_fail_without_settings_and_send_nothing() {
    let server = MockServer::start().await;
    let ws = Workspace::new();

    let output = ws.run(&["sounds"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("API settings not configured"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn configure_persists_settings_for_later_runs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voip/sound"))
        .and(header("X-Auth-User", "supervisor"))
        .respond_with(envelope(json!([
            {"uuid": "s1", "name": "Welcome", "tag": "Hold Music", "audio_type": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::new();
    let uri = server.uri();
    let output = ws
        .run(&[
            "configure",
            "--api-url",
            &uri,
            "--auth-for",
            TEST_AUTH_FOR,
            "--auth-reseller",
            TEST_AUTH_RESELLER,
            "--auth-user",
            "supervisor",
            "--password",
            TEST_AUTH_PASSWORD,
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(ws.settings_path()).unwrap()).unwrap();
    assert_eq!(stored["api_auth_settings"]["authUser"], "supervisor");
    assert_eq!(stored["app_features"]["enableCallRecordingDownload"], false);

    let output = ws.run(&["sounds", "--json"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let sounds: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sounds[0]["name"], "Welcome");
}

#[tokio::test]
async fn upload_reports_each_file_and_exits_non_zero_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/voip/sound"))
        .and(body_partial_json(json!({"file_name": "bad.wav"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 415,
            "status_message": "Unsupported audio format"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/voip/sound"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"status_code": 201})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/voip/sound"))
        .respond_with(envelope(json!([])))
        .mount(&server)
        .await;

    let ws = Workspace::new();
    ws.store_credentials(&server);
    let good = ws.file("good.wav", b"RIFF");
    let bad = ws.file("bad.wav", b"RIFF");
    let output = ws.run(&["upload", path_arg(&good), path_arg(&bad)]).await;

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[OK] good.wav"), "stdout: {text}");
    assert!(text.contains("[FAIL] bad.wav: Unsupported audio format"), "stdout: {text}");
    assert!(text.contains("1 uploaded, 1 failed"));
}

#[tokio::test]
async fn recording_download_respects_the_feature_switch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voip/call/c1/audio"))
        .respond_with(envelope(json!({"recording": format!("{}/files/c1.mp3", server.uri())})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/c1.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
        .mount(&server)
        .await;

    let ws = Workspace::new();
    ws.store_credentials(&server);
    let output = ws.run(&["recording", "c1"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("call recording download is disabled in settings"));

    let mut settings: Value =
        serde_json::from_str(&std::fs::read_to_string(ws.settings_path()).unwrap()).unwrap();
    settings["app_features"] = json!({"enableCallRecordingDownload": true});
    std::fs::write(ws.settings_path(), settings.to_string()).unwrap();

    let output = ws.run(&["recording", "c1"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let saved = ws.dir.path().join("downloads").join("recording-c1.mp3");
    assert_eq!(std::fs::read(saved).unwrap(), b"ID3audio");
}

#[tokio::test]
async fn invalid_config_is_rejected_before_any_command() {
    let ws = Workspace::new();
    std::fs::write(
        ws.dir.path().join("voipdesk.toml"),
        "[gateway]\ntimeout_sec = 5\n",
    )
    .unwrap();

    let output = ws.run(&["users"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("timeout_sec"));
}
