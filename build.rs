//! Build script for ghost-town.
//!
//! Build metadata is stamped through compile-time environment variables:
//!
//! ```text
//! GHOST_TOWN_VERSION=1.0.0 \
//! GHOST_TOWN_BUILD_TIME="$(date -u +%Y-%m-%dT%H:%M:%SZ)" \
//! GHOST_TOWN_COMMIT="$(git rev-parse --short HEAD)" \
//!     cargo build --release
//! ```
//!
//! Unset variables fall back to the defaults in `src/version.rs`.

const STAMP_VARS: [&str; 3] = [
    "GHOST_TOWN_VERSION",
    "GHOST_TOWN_BUILD_TIME",
    "GHOST_TOWN_COMMIT",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for var in STAMP_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }
}
