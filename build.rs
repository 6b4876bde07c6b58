use std::env;
use std::path::PathBuf;

const FORWARDED_VARS: &[&str] = &[
    "LINKBOARD_STORAGE_KEY",
    "TRUNK_PUBLIC_LINKBOARD_STORAGE_KEY",
    "LINKBOARD_CONFIRM_CLEAR_MESSAGE",
];

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let env_path = manifest_dir.join(".env");
    let env_local_path = manifest_dir.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    for name in FORWARDED_VARS {
        println!("cargo:rerun-if-env-changed={name}");
        if let Ok(value) = env::var(name) {
            println!("cargo:rustc-env={name}={value}");
        }
    }
}
