// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the barcode-robot firmware
//!
//! The library half of this crate is plain `no_std` code that builds and
//! tests on the host. Only the `rp2350` firmware binary needs a linker
//! script, so this script:
//! - Copies the memory layout definition to the build output directory
//! - Sets up the linker search path for cortex-m-rt
//! - Skips both steps for host builds (tests, benches)
//!
//! # Memory Layout
//! The `memory.x` file defines the RP2350's memory regions:
//! - **FLASH**: 4MB starting at 0x10000000 (program code storage)
//! - **RAM**: 512KB starting at 0x20000000 (runtime data)
//! - **SRAM8**: 4KB starting at 0x20080000 (dedicated memory bank 8)
//! - **SRAM9**: 4KB starting at 0x20081000 (dedicated memory bank 9)
//!
//! # Linker Integration
//! `.cargo/config.toml` passes `-Tlink.x` and `-Tdefmt.x` for the
//! `thumbv8m.main-none-eabihf` target only.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Main build script entry point
///
/// # Panics
/// Panics if the `OUT_DIR` environment variable is not set or `memory.x`
/// cannot be written to it.
fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds never link against memory.x
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();

    println!("cargo:rustc-link-search={}", out.display());
}
