//! Debounced live search over the record listing.

mod pipeline;
pub mod stages;

pub use pipeline::{QueryPipeline, QueryState};
