//! Proof module: canonical JSON and content hashing for search artifacts.
//!
//! Depends on nothing else in the kernel.

pub mod canon;
pub mod hash;
