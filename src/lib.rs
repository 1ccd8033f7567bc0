//! Facade over the rsp2 grid crates.
//!
//! Everything lives in `rsp2-matrix`; this package exists to own the
//! cross-crate integration tests.

pub use rsp2_matrix::*;
