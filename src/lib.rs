//! `bond-auctions` library crate.
//!
//! The binary (`auctions`) is a thin wrapper around this library so that:
//!
//! - tenor normalization and schema unification are testable without the network
//! - new country sources plug in behind `data::AuctionSource`

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
