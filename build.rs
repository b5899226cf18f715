use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_file = if target.starts_with("thumbv8m") {
        // Pico 2 ARM
        Some("memory-pico2.x")
    } else if target.starts_with("thumbv6m") {
        // Pico 1
        Some("memory-pico1.x")
    } else {
        // Host builds (tests, docs) need no linker script
        None
    };

    if let Some(memory_file) = memory_file {
        let memory_x = fs::read_to_string(memory_file)
            .unwrap_or_else(|err| panic!("Failed to read {memory_file}: {err}"));
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed={memory_file}");

        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        if target.starts_with("thumbv6m") {
            println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        }
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");
    load_home_env(".env");

    // 3) Provide fallbacks so the clock compiles without .env
    let hour_mode = env_or_default("CLOCK_HOUR_MODE", "24");
    if hour_mode != "12" && hour_mode != "24" {
        println!("cargo:warning=CLOCK_HOUR_MODE is {hour_mode:?}; expected 12 or 24, using 24");
    }

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=CLOCK_HOUR_MODE={hour_mode}");

    // Optional: don't rebuild unless these change
    println!("cargo:rerun-if-env-changed=CLOCK_HOUR_MODE");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
