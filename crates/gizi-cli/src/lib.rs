//! Library side of the `gizi` CLI, split out for integration tests.

pub mod input;
pub mod logging;
