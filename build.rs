//! Stamps the compile time into the binary for the run banner and the JSON
//! export.

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=src");

    let compiled_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=SHOPLIST_COMPILED_AT={}", compiled_at);
}
