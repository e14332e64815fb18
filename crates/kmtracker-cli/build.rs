//! Embeds the build version as `KMTRACKER_VERSION`.
//!
//! Release tags (`v1.2.0`, `v1.2.0-3-gabc1234`) are used as-is without the
//! `v`. Untagged checkouts report the package version with the commit as
//! build metadata, e.g. `0.1.0+gabc1234`.

use std::path::PathBuf;
use std::process::Command;

fn main() {
    // The crate sits below the workspace root, so watch the real git dir.
    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        let git_dir = PathBuf::from(git_dir);
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
        println!("cargo:rerun-if-changed={}", git_dir.join("refs").display());
    }

    let package = env!("CARGO_PKG_VERSION");
    let version = match git(&["describe", "--tags", "--always", "--dirty"]) {
        Some(describe) => version_from_describe(&describe, package),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=KMTRACKER_VERSION={}", version);
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn version_from_describe(describe: &str, package: &str) -> String {
    // A bare abbreviated hash can start with a digit too, but has no dots.
    let tagged = describe.strip_prefix('v').unwrap_or(describe);
    if tagged.starts_with(|c: char| c.is_ascii_digit()) && tagged.contains('.') {
        tagged.to_string()
    } else {
        format!("{}+g{}", package, describe)
    }
}
