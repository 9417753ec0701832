#![allow(dead_code)]

pub mod mocks;

use std::path::PathBuf;

pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
