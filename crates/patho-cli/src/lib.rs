//! Library side of the `patho` CLI: logging setup and the per-command
//! pipelines, kept out of the binary so they can be tested directly.

pub mod logging;
pub mod pipeline;
