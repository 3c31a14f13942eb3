//! Store HTTP client.
//!
//! This module provides the [`StoreClient`] for talking to the store's
//! document API under a single index.

mod store;

pub use store::{SEARCH_PAGE_SIZE, StoreClient};
