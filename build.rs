// Version string is `<package version>-<git commit>-<git date>`.
fn main() {
    let commit = std::env::var("GIT_COMMIT").unwrap_or_else(|_| "unknown".to_string());
    let date = std::env::var("GIT_DATE").unwrap_or_else(|_| "unknown".to_string());
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();

    println!("cargo:rustc-env=TASK_SENDER_VERSION={}-{}-{}", version, commit, date);
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");
    println!("cargo:rerun-if-env-changed=GIT_DATE");
}
