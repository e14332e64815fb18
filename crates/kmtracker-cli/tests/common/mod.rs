use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI against `api` with an isolated credentials file.
pub fn run_cli(args: &[&str], api: &str, credentials: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kmtracker"));
    cmd.args(args);
    cmd.env("KMTRACKER_API", api);
    cmd.env("KMTRACKER_CREDENTIALS", credentials);
    cmd.env_remove("KMTRACKER_PASSWORD");
    cmd.env_remove("KMTRACKER_NEW_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], api: &str, credentials: &Path) -> String {
    let output = run_cli(args, api, credentials);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Write a credential pair the way the CLI stores it.
pub fn write_credentials(path: &Path, access: &str, refresh: &str) {
    let json = serde_json::json!({"access": access, "refresh": refresh});
    std::fs::write(path, json.to_string()).unwrap();
}

/// Read the stored access token, if any.
pub fn stored_access(path: &Path) -> Option<String> {
    let json = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&json).ok()?;
    value["access"].as_str().map(str::to_string)
}
