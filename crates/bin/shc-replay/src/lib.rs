//! # shc-replay
//!
//! Configuration and cycle loading for the `shc-replay` binary, which stands
//! in for the hub transport by feeding recorded poll cycles to the processor.

pub mod config;
pub mod replay;
