//! Stamps `--version` output with build metadata.
//!
//! `YAY_BUILD_TIMESTAMP` is the UTC build time and `YAY_GIT_COMMIT` the
//! short hash of `HEAD`, or `unknown` outside a checkout.

use std::process::Command;

const GIT_INPUTS: [&str; 2] = [".git/HEAD", ".git/index"];

fn main() {
    for input in GIT_INPUTS {
        println!("cargo:rerun-if-changed={input}");
    }

    emit(
        "YAY_BUILD_TIMESTAMP",
        &chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    );
    emit("YAY_GIT_COMMIT", short_head().as_deref().unwrap_or("unknown"));
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

// Any git failure, including git not being installed, means no hash
fn short_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
