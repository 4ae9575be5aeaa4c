//! Test helpers shared across crates.
//!
//! Provides a disposable configuration root and text helpers for asserting
//! on generated configuration files.

mod root;
pub mod text;

pub use root::TempConfigRoot;
