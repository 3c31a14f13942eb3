//! Core ETL (Extract, Load) abstractions
//!
//! This module provides trait definitions for building the two transfer
//! pipelines: store to directory (export) and directory to store (import).

mod extract;
mod failure;
mod load;
mod pipeline;

pub use extract::{Batch, Extractor};
pub use failure::ItemFailure;
pub use load::{LoadReport, Loader};
pub use pipeline::{Outcome, Pipeline};
