use std::env;
use std::process::Command;

fn main() {
    // Captured for the outbound User-Agent header:
    // gworkspace/<crate version> rustc/<compiler version>
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = match Command::new(&rustc).arg("--version").output() {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .split_whitespace()
            .nth(1)
            .unwrap_or("unknown")
            .to_string(),
        Ok(out) => {
            println!("cargo:warning=rustc --version exited with {}", out.status);
            "unknown".to_string()
        }
        Err(e) => {
            println!("cargo:warning=failed to run {rustc} --version: {e}");
            "unknown".to_string()
        }
    };

    println!("cargo:rustc-env=GWORKSPACE_RUSTC_VERSION={version}");
    println!("cargo:rerun-if-env-changed=RUSTC");
}
