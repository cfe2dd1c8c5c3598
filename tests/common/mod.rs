#![allow(dead_code)]

pub use taskdag_test_utils::builders;
pub use taskdag_test_utils::init_tracing;
pub use taskdag_test_utils::tasks;

use std::path::PathBuf;

/// Path of a sample pipeline shipped in `demos/`.
pub fn demo_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(file)
}
