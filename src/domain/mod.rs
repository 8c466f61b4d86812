//! Domain types used throughout the pipeline.
//!
//! - normalized auction rows and tables (`AuctionRecord`, `AuctionTable`)
//! - tenor normalization and tenor filtering (`TermUnit`, `TenorFilter`)

pub mod tenor;
pub mod types;

pub use tenor::*;
pub use types::*;
