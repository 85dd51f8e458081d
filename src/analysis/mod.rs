mod recap;
mod walker;

pub mod narrative;
pub mod ranking;
pub mod stats;

pub use recap::{aggregate_commit_sizes, RecapRequest};
