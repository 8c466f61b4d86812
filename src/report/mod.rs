//! Console reporting: bounded table preview and the final row-count line.

pub mod format;

pub use format::*;
