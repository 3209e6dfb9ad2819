use std::env;
use std::fs;
use std::path::Path;

/// STM32H753: 2 MiB flash, code and data in the 128 KiB DTCM
const MEMORY_X: &str = "\
MEMORY
{
    FLASH : ORIGIN = 0x08000000, LENGTH = 2048K
    RAM   : ORIGIN = 0x20000000, LENGTH = 128K
}
";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (library and tests) need no linker setup
    if env::var_os("CARGO_FEATURE_FIRMWARE").is_none() {
        return;
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("memory.x"), MEMORY_X).unwrap();
    println!("cargo:rustc-link-search={}", out_dir);

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
