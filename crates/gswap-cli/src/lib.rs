//! Library components for the `guid-swap` CLI.

pub mod logging;
pub mod pipeline;
