use std::env;

fn main() {
    let version = env::var("RIPENESS_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rerun-if-env-changed=RIPENESS_VERSION");
    println!("cargo:rustc-env=RIPENESS_VERSION={version}");
}
