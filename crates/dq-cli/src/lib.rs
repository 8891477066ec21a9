//! CLI library components for the order data-quality pipeline.

pub mod logging;
pub mod pipeline;
