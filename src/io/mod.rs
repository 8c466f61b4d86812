//! Output artifacts.
//!
//! - normalized auction table -> CSV (`export`)

pub mod export;

pub use export::*;
