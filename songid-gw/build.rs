//! Build script for songid-gw
//!
//! Stamps the binary with the source revision, build time (UTC) and cargo
//! profile. The values surface in the startup log and on `/health`.

use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Run git and return trimmed stdout, or None outside a checkout
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    // Short hash, suffixed with "-dirty" when the tree has local edits
    let git_rev = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| UNKNOWN.to_string());

    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());

    println!("cargo:rustc-env=SONGID_GIT_REV={}", git_rev);
    println!("cargo:rustc-env=SONGID_BUILT_AT={}", built_at);
    println!("cargo:rustc-env=SONGID_BUILD_PROFILE={}", profile);

    println!("cargo:rerun-if-changed=build.rs");
    if let Some(head) = git(&["rev-parse", "--git-path", "HEAD"]) {
        println!("cargo:rerun-if-changed={}", head);
    }
}
