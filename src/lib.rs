//! Core library for the stock-sync command line application.
//!
//! A run reads the stock-count spreadsheet and the platform catalog export,
//! merges counted quantities into the catalog by normalized SKU code, derives
//! the publication flag and writes the corrected catalog plus an audit copy of
//! the cleaned stock sheet. File adapters live under [`io`], the row types in
//! [`model`], the merge in [`reconcile`] and the orchestration in [`sync`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod model;
pub mod reconcile;
pub mod sync;

pub use error::{Result, SyncError};
