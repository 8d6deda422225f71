use std::path::Path;
use std::{env, fs, io};

// Every sibling directory holding a Cargo.toml is a workspace crate; log.rs turns their
// names into log filters.
fn main() -> io::Result<()> {
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR").ok_or(io::ErrorKind::NotFound)?;
    let Some(workspace_root) = Path::new(&manifest_dir).parent() else {
        return Err(io::ErrorKind::NotFound.into());
    };

    let mut crates = Vec::new();
    for entry in fs::read_dir(workspace_root)? {
        let entry = entry?;
        if !entry.path().join("Cargo.toml").is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            crates.push(name.replace('-', "_"));
        }
    }
    crates.sort();

    println!("cargo:rerun-if-changed=../Cargo.toml");
    println!("cargo:rustc-env=WORKSPACE_CRATES={}", crates.join(","));
    Ok(())
}
