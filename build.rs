use std::process::Command;

fn main() {
    // Capture git commit hash at compile time
    let git_hash = run_or_unknown("git", &["rev-parse", "--short", "HEAD"]);
    println!("cargo:rustc-env=CHATSHIELD_GIT_HASH={}", git_hash);

    // Build date without pulling chrono into the build graph
    let build_date = run_or_unknown("date", &["+%Y-%m-%d"]);
    println!("cargo:rustc-env=CHATSHIELD_BUILD_DATE={}", build_date);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
}

fn run_or_unknown(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
