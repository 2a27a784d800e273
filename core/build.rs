//! Build script for frame-runner.
//!
//! Compiles the stand-in computation module in `../demo_module` into a shared
//! library under `OUT_DIR` and exports its location to the crate as
//! `FRAME_RUNNER_DEMO_MODULE`. The integration tests load it through the same
//! dynamic loading path the binary uses for the real analysis library.
//!
//! The real `libnumerical_analysis_library` is built by its own project and
//! is never linked here.
//!
//! # Environment Variables
//!
//! - `DEMO_MODULE_SKIP_BUILD`: Set to "1" to skip building the demo module
//! - `CC`: C compiler override, honoured by the `cc` crate

use std::env;
use std::path::PathBuf;

fn main() {
    build_demo_module();
}

fn build_demo_module() {
    println!("cargo:rerun-if-changed=../demo_module/src/demo_module.c");
    println!("cargo:rerun-if-changed=../demo_module/include/demo_module.h");
    println!("cargo:rerun-if-env-changed=DEMO_MODULE_SKIP_BUILD");

    if env::var("DEMO_MODULE_SKIP_BUILD")
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        println!("cargo:warning=Skipping demo module build (DEMO_MODULE_SKIP_BUILD=1)");
        return;
    }

    // Shared objects are produced with a gcc/clang style driver only.
    if env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default() != "unix" {
        println!("cargo:warning=Demo module is only built for unix targets");
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let module_dir = manifest_dir.join("../demo_module");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let file_name = if target_os == "macos" {
        "libdemo_module.dylib"
    } else {
        "libdemo_module.so"
    };
    let output = out_dir.join(file_name);

    let compiler = match cc::Build::new().pic(true).try_get_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            println!("cargo:warning=No C compiler for demo module: {}", e);
            return;
        }
    };

    let mut command = compiler.to_command();
    if target_os == "macos" {
        command.arg("-dynamiclib");
    } else {
        command.arg("-shared");
    }
    command
        .arg("-I")
        .arg(module_dir.join("include"))
        .arg(module_dir.join("src/demo_module.c"))
        .arg("-o")
        .arg(&output);

    match command.status() {
        Ok(status) if status.success() => {
            println!("cargo:rustc-env=FRAME_RUNNER_DEMO_MODULE={}", output.display());
        }
        Ok(status) => {
            println!("cargo:warning=Demo module build failed: {}", status);
        }
        Err(e) => {
            println!("cargo:warning=Failed to run C compiler for demo module: {}", e);
        }
    }
}
